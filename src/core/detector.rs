use crate::core::{Change, Detection, Fingerprint, Notification};

pub const EMPTY_SECTION_PLACEHOLDER: &str = "[leer]";

/// Compares the current fingerprint against the last persisted one.
///
/// Without a previous fingerprint the current one only becomes the baseline.
/// Structure changes are always reported before section changes.
pub fn detect(previous: Option<&Fingerprint>, current: &Fingerprint, section: Option<&str>) -> Detection {
    let Some(previous) = previous else {
        return Detection {
            baseline: true,
            changes: Vec::new(),
        };
    };

    let mut changes = Vec::new();
    if previous.full_hash != current.full_hash {
        changes.push(Change::StructureChanged);
    }
    if previous.section_hash != current.section_hash {
        changes.push(Change::SectionChanged {
            content: section.map(str::to_string),
        });
    }

    Detection {
        baseline: false,
        changes,
    }
}

impl Change {
    pub fn to_notification(&self) -> Notification {
        match self {
            Change::StructureChanged => Notification {
                subject: "OLG Hamm – Strukturänderung erkannt".to_string(),
                body: "Die Gesamtstruktur der Seite hat sich verändert (möglicherweise Layout oder Position des Ausbildungsbereichs).".to_string(),
            },
            Change::SectionChanged { content } => Notification {
                subject: "OLG Hamm – Ausbildungsplatz-Update!".to_string(),
                body: format!(
                    "Der Inhalt im Ausbildungsabschnitt hat sich geändert.\n\nAktueller Inhalt:\n\n{}",
                    content.as_deref().unwrap_or(EMPTY_SECTION_PLACEHOLDER)
                ),
            },
        }
    }
}

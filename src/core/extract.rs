use scraper::{ElementRef, Html};

pub const DEFAULT_SECTION_HEADING: &str = "Kurzfristig zu besetzende Ausbildungsplätze:";

const HEADING_TAG: &str = "h5";

/// Pulls the block of elements that follows a given `<h5>` heading.
///
/// The section runs from the heading's next sibling element up to (not
/// including) the next element whose tag name starts with `h`. Text nodes
/// between elements are not part of the section.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    heading: String,
}

impl SectionExtractor {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
        }
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn extract(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let wanted = self.heading.trim();

        let header = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| {
                el.value().name() == HEADING_TAG && el.text().collect::<String>().trim() == wanted
            });

        let Some(header) = header else {
            tracing::debug!("Section heading not found: {}", wanted);
            return None;
        };

        let mut parts = Vec::new();
        for sibling in header.next_siblings().filter_map(ElementRef::wrap) {
            if sibling.value().name().starts_with('h') {
                break;
            }
            parts.push(sibling.html());
        }

        let combined = parts.join("\n");
        let combined = combined.trim();
        if combined.is_empty() {
            None
        } else {
            Some(combined.to_string())
        }
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_HEADING)
    }
}

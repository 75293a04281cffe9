use crate::core::Fingerprint;
use sha2::{Digest, Sha256};

/// SHA-256 of the content as lowercase hex; a missing section hashes like an empty one.
pub fn content_hash(content: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.unwrap_or("").as_bytes());
    hex::encode(hasher.finalize())
}

impl Fingerprint {
    pub fn of(html: &str, section: Option<&str>) -> Self {
        Self {
            full_hash: content_hash(Some(html)),
            section_hash: content_hash(section),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_known_hash() {
        assert_eq!(
            content_hash(Some("hello")),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_missing_content_hashes_as_empty() {
        assert_eq!(content_hash(None), EMPTY_SHA256);
        assert_eq!(content_hash(Some("")), EMPTY_SHA256);
    }

    #[test]
    fn test_hash_is_utf8_based() {
        let hash = content_hash(Some("Ausbildungsplätze"));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(hash, content_hash(Some("Ausbildungsplatze")));
    }

    #[test]
    fn test_fingerprint_of_page() {
        let fp = Fingerprint::of("<html></html>", None);
        assert_eq!(fp.full_hash, content_hash(Some("<html></html>")));
        assert_eq!(fp.section_hash, EMPTY_SHA256);
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// RFP flavour requested by the client.
///
/// Unrecognized tags are kept verbatim in `Other` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    #[default]
    Standard,
    Government,
    Simplified,
    Other(String),
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentType::Standard => "standard",
            DocumentType::Government => "government",
            DocumentType::Simplified => "simplified",
            DocumentType::Other(tag) => tag,
        }
    }
}

impl From<String> for DocumentType {
    fn from(tag: String) -> Self {
        let trimmed = tag.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("standard") {
            DocumentType::Standard
        } else if trimmed.eq_ignore_ascii_case("government") {
            DocumentType::Government
        } else if trimmed.eq_ignore_ascii_case("simplified") {
            DocumentType::Simplified
        } else {
            DocumentType::Other(tag)
        }
    }
}

impl From<DocumentType> for String {
    fn from(document_type: DocumentType) -> Self {
        match document_type {
            DocumentType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfpSubsection {
    pub title: String,
    pub content: String,
}

/// Top-level RFP section. Subsections cannot nest further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfpSection {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<RfpSubsection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfpDocument {
    pub document_type: DocumentType,
    pub sections: Vec<RfpSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_parse_case_insensitively() {
        assert_eq!(DocumentType::from("Government".to_string()), DocumentType::Government);
        assert_eq!(DocumentType::from("SIMPLIFIED".to_string()), DocumentType::Simplified);
        assert_eq!(DocumentType::from("standard".to_string()), DocumentType::Standard);
    }

    #[test]
    fn test_empty_tag_defaults_to_standard() {
        assert_eq!(DocumentType::from(String::new()), DocumentType::Standard);
        assert_eq!(DocumentType::default(), DocumentType::Standard);
    }

    #[test]
    fn test_unknown_tag_is_kept_as_given() {
        let parsed: DocumentType = serde_json::from_str(r#""Municipal Tender""#).unwrap();
        assert_eq!(parsed, DocumentType::Other("Municipal Tender".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""Municipal Tender""#);
    }

    #[test]
    fn test_known_tag_serializes_lowercase() {
        let json = serde_json::to_string(&DocumentType::Government).unwrap();
        assert_eq!(json, r#""government""#);
    }

    #[test]
    fn test_section_without_subsections_omits_field() {
        let section = RfpSection {
            title: "Introduction".to_string(),
            content: "Hello".to_string(),
            subsections: vec![],
        };
        let value = serde_json::to_value(&section).unwrap();
        assert!(value.get("subsections").is_none());

        let back: RfpSection = serde_json::from_value(value).unwrap();
        assert!(back.subsections.is_empty());
    }
}

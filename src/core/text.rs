//! Rich-text spans.
//!
//! Titles and collection names arrive as span sequences. The core only ever
//! renders them to plain text; marks are carried through untouched.

use serde::{Deserialize, Serialize};

/// One run of text with optional formatting marks ("b", "i", ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<String>,
}

impl TextSpan {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }
}

/// Concatenate span texts, dropping all formatting.
pub fn plain_text(spans: &[TextSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_concatenates_spans() {
        let spans = vec![
            TextSpan::new("Meeting "),
            TextSpan {
                text: "notes".to_string(),
                marks: vec!["b".to_string()],
            },
        ];
        assert_eq!(plain_text(&spans), "Meeting notes");
    }

    #[test]
    fn plain_text_of_empty_sequence_is_empty() {
        assert_eq!(plain_text(&[]), "");
    }
}

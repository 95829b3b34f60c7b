//! Screenplay elements consumed by the layout engine.
//!
//! Elements arrive already parsed. [`parse_elements`] decodes them from JSON,
//! the shape an external screenplay parser hands over:
//!
//! ```
//! use screenplay_pdf::elements::{Element, parse_elements};
//!
//! let elements = parse_elements(r#"[
//!     {"type": "heading", "value": "INT. KITCHEN - DAY"},
//!     {"type": "action", "content": "Steam rises from a pot."}
//! ]"#)?;
//! assert!(matches!(elements[0], Element::Heading { .. }));
//! # Ok::<(), screenplay_pdf::Error>(())
//! ```

mod content_node;

pub use content_node::{ContentNode, FontStyle, StyledWord};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One key/value pair of title-page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePart {
    /// Metadata key (`title`, `author`, `address`, ...)
    pub key: String,
    /// Metadata value, possibly spanning several lines
    pub value: String,
}

impl TitlePart {
    /// Create a title part.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A screenplay element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Produces no output
    None,
    /// Title-page metadata; only honoured as the first element
    Title {
        /// Ordered key/value pairs
        parts: Vec<TitlePart>,
    },
    /// Scene heading
    Heading {
        /// Heading text
        value: String,
    },
    /// Action paragraph
    Action {
        /// Rich text
        content: ContentNode,
    },
    /// Character cue, optional parenthetical and dialog
    DialogGroup {
        /// Character name
        character: String,
        /// Parenthetical without the parentheses
        #[serde(default)]
        parenthetical: Option<String>,
        /// Spoken text
        dialog: ContentNode,
    },
    /// Transition such as `CUT TO:`
    Transition {
        /// Transition text
        value: String,
    },
    /// Centered text
    CenteredText {
        /// Rich text
        content: ContentNode,
    },
    /// Explicit page break
    LineBreak,
    /// Commented-out material
    Boneyard {
        /// Raw text
        value: String,
    },
    /// Writer's notes
    NoteBlock {
        /// Raw text
        value: String,
    },
    /// Section heading used for outlining
    Section {
        /// Nesting depth, 1 for top level
        depth: u32,
        /// Section title
        value: String,
    },
    /// Synopsis line used for outlining
    Synopsis {
        /// Synopsis text
        value: String,
    },
}

impl Element {
    /// Lower-case name of the element kind, as used in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::None => "none",
            Element::Title { .. } => "title",
            Element::Heading { .. } => "heading",
            Element::Action { .. } => "action",
            Element::DialogGroup { .. } => "dialog_group",
            Element::Transition { .. } => "transition",
            Element::CenteredText { .. } => "centered_text",
            Element::LineBreak => "line_break",
            Element::Boneyard { .. } => "boneyard",
            Element::NoteBlock { .. } => "note_block",
            Element::Section { .. } => "section",
            Element::Synopsis { .. } => "synopsis",
        }
    }
}

/// Decode a JSON array of elements.
///
/// Unknown element kinds and missing fields are reported as
/// [`Error::MalformedElement`].
pub fn parse_elements(json: &str) -> Result<Vec<Element>> {
    serde_json::from_str(json).map_err(|e| Error::MalformedElement(e.to_string()))
}

/// Decode elements from a reader holding a JSON array.
pub fn read_elements<R: std::io::Read>(reader: R) -> Result<Vec<Element>> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::MalformedElement(e.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_kind() {
        let elements = parse_elements(
            r#"[
                {"type": "title", "parts": [{"key": "Title", "value": "Test"}]},
                {"type": "heading", "value": "INT. HOUSE - NIGHT"},
                {"type": "action", "content": "Bob enters."},
                {"type": "dialog_group", "character": "BOB", "dialog": "Hi."},
                {"type": "dialog_group", "character": "ANN", "parenthetical": "quietly", "dialog": ["Hey."]},
                {"type": "transition", "value": "CUT TO:"},
                {"type": "centered_text", "content": "THE END"},
                {"type": "line_break"},
                {"type": "boneyard", "value": "cut"},
                {"type": "note_block", "value": "fix"},
                {"type": "section", "depth": 1, "value": "Act One"},
                {"type": "synopsis", "value": "Bob arrives"},
                {"type": "none"}
            ]"#,
        )
        .unwrap();

        let kinds: Vec<&str> = elements.iter().map(Element::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "title",
                "heading",
                "action",
                "dialog_group",
                "dialog_group",
                "transition",
                "centered_text",
                "line_break",
                "boneyard",
                "note_block",
                "section",
                "synopsis",
                "none"
            ]
        );
        assert_eq!(
            elements[3],
            Element::DialogGroup {
                character: "BOB".to_string(),
                parenthetical: None,
                dialog: ContentNode::text("Hi."),
            }
        );
    }

    #[test]
    fn test_unknown_kind_is_malformed() {
        let err = parse_elements(r#"[{"type": "montage", "value": "x"}]"#).unwrap_err();
        assert!(matches!(err, Error::MalformedElement(_)));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = parse_elements(r#"[{"type": "heading"}]"#).unwrap_err();
        assert!(matches!(err, Error::MalformedElement(ref m) if m.contains("value")));
    }

    #[test]
    fn test_read_elements_from_reader() {
        let json = br#"[{"type": "line_break"}]"#;
        let elements = read_elements(&json[..]).unwrap();
        assert_eq!(elements, vec![Element::LineBreak]);
    }

    #[test]
    fn test_round_trip_through_serde() {
        let element = Element::Section {
            depth: 2,
            value: "Sequence".to_string(),
        };
        let json = serde_json::to_string(&element).unwrap();
        assert!(json.contains(r#""type":"section""#));
        assert_eq!(serde_json::from_str::<Element>(&json).unwrap(), element);
    }
}

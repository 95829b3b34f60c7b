//! Rich-text content nodes.
//!
//! A [`ContentNode`] is a small tree of text leaves and styled containers.
//! Layout works on its linearized form: a flat list of words, each carrying
//! the style of its nearest styled ancestor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Font style carried by a styled container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    /// Regular text
    #[default]
    Plain,
    /// Bold text
    Bold,
    /// Italic text
    Italic,
    /// Bold italic text
    BoldItalic,
    /// Underlined text (rendered in the regular face)
    Underline,
}

/// Rich-text tree.
///
/// Deserializes from plain JSON: a string is a text leaf, an array is a plain
/// container and `{"style": ..., "children": [...]}` is a styled container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    /// Text leaf
    Text(String),
    /// Children without a style of their own
    Container(Vec<ContentNode>),
    /// Children rendered in `style` unless a nested container overrides it
    Styled {
        /// Style applied to the children
        style: FontStyle,
        /// Child nodes
        children: Vec<ContentNode>,
    },
}

/// A word of linearized rich text with its resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledWord {
    /// The word, without surrounding whitespace
    pub word: String,
    /// Resolved style
    pub style: FontStyle,
}

impl StyledWord {
    /// Create a styled word.
    pub fn new(word: impl Into<String>, style: FontStyle) -> Self {
        Self {
            word: word.into(),
            style,
        }
    }
}

impl ContentNode {
    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(text.into())
    }

    /// Create a styled container.
    pub fn styled(style: FontStyle, children: Vec<ContentNode>) -> Self {
        ContentNode::Styled { style, children }
    }

    /// Flatten the tree into words.
    ///
    /// Leaf text is split on whitespace and empty tokens are dropped. Each
    /// word takes the style of the closest enclosing styled container, or
    /// [`FontStyle::Plain`] when there is none.
    pub fn linearize(&self) -> Vec<StyledWord> {
        let mut words = Vec::new();
        self.collect_words(FontStyle::Plain, &mut words);
        words
    }

    fn collect_words(&self, inherited: FontStyle, words: &mut Vec<StyledWord>) {
        match self {
            ContentNode::Text(text) => words.extend(
                text.split_whitespace()
                    .map(|word| StyledWord::new(word, inherited)),
            ),
            ContentNode::Container(children) => {
                for child in children {
                    child.collect_words(inherited, words);
                }
            },
            ContentNode::Styled { style, children } => {
                for child in children {
                    child.collect_words(*style, words);
                }
            },
        }
    }
}

impl From<&str> for ContentNode {
    fn from(text: &str) -> Self {
        ContentNode::text(text)
    }
}

impl fmt::Display for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentNode::Text(text) => f.write_str(text),
            ContentNode::Container(children) | ContentNode::Styled { children, .. } => {
                children.iter().try_for_each(|child| fmt::Display::fmt(child, f))
            },
        }
    }
}

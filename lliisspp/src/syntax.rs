//! The syntax tree handed over by a parser.
//!
//! A node is nothing more than a tag, the literal text it matched and its
//! children. Tags are composed of `|`-separated rule names, e.g.
//! `expr|number|integer|regex`, and the root node is tagged `>`. The reader
//! only ever looks at tag substrings, so any parser producing this shape can
//! be plugged in.

use json::JsonValue;

/// The tag of the root node.
pub const ROOT: &str = ">";

#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxNode {
    pub tag: String,
    pub contents: String,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Construct a node without children.
    pub fn leaf(tag: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            contents: contents.into(),
            children: vec![],
        }
    }

    /// Construct a node with children and no text of its own.
    pub fn branch(tag: impl Into<String>, children: Vec<SyntaxNode>) -> Self {
        Self {
            tag: tag.into(),
            contents: String::new(),
            children,
        }
    }

    pub fn is_root(&self) -> bool {
        self.tag == ROOT
    }

    /// Structural nodes carry no meaning of their own: delimiters and the
    /// zero-width markers at the start and end of the input.
    pub fn is_punctuation(&self) -> bool {
        self.tag == "regex" || matches!(self.contents.as_str(), "(" | ")" | "{" | "}")
    }
}

impl From<&SyntaxNode> for JsonValue {
    fn from(node: &SyntaxNode) -> Self {
        let mut obj = JsonValue::new_object();
        obj["tag"] = JsonValue::from(node.tag.as_str());
        if !node.contents.is_empty() {
            obj["contents"] = JsonValue::from(node.contents.as_str());
        }
        if !node.children.is_empty() {
            obj["children"] = JsonValue::Array(node.children.iter().map(JsonValue::from).collect());
        }
        obj
    }
}

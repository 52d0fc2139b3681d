//! Generic tree produced by the XML deserializer.
//!
//! The tree mirrors the XML nesting without any knowledge of the Wolfram|Alpha
//! schema:
//!
//! - attributes are stored under `@name` keys,
//! - text of an element that also has attributes or children lives under `#text`,
//! - a text-only element collapses to a [`Node::Scalar`],
//! - repeated sibling elements become a [`Node::Sequence`], a single one does not.
//!
//! That last collapse is why every accessor that walks child elements goes
//! through [`Node::children`], which always yields a sequence.

use indexmap::IndexMap;
use serde::Serialize;

pub const ATTR_PREFIX: char = '@';
pub const TEXT_KEY: &str = "#text";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Scalar(String),
    Mapping(IndexMap<String, Node>),
    Sequence(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::Mapping(IndexMap::new())
    }
}

impl Node {
    /// Look up a direct key (element name, `@attr` or `#text`).
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Attribute value by bare name, without the `@` prefix.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.get(&format!("{}{}", ATTR_PREFIX, name))
            .and_then(Node::as_str)
    }

    /// Text content of this node, if it has any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(s) => Some(s),
            Node::Mapping(map) => map.get(TEXT_KEY).and_then(Node::as_str),
            Node::Sequence(_) => None,
        }
    }

    /// Text content of the child element `key`. Empty text counts as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Node::as_str)
            .filter(|s| !s.is_empty())
    }

    /// View the node as a slice: a sequence yields its items, anything else
    /// yields itself once.
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Node::Sequence(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Child elements named `key`, always as a sequence; absent yields nothing.
    pub fn children(&self, key: &str) -> std::slice::Iter<'_, Node> {
        self.get(key).map(Node::as_slice).unwrap_or(&[]).iter()
    }

    /// Every child element in document order (per tag), with its tag name.
    /// Attribute and text entries are skipped.
    pub fn elements(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        let entries = match self {
            Node::Mapping(map) => Some(map.iter()),
            _ => None,
        };
        entries
            .into_iter()
            .flatten()
            .filter(|(k, _)| !k.starts_with(ATTR_PREFIX) && k.as_str() != TEXT_KEY)
            .flat_map(|(k, v)| v.as_slice().iter().map(move |n| (k.as_str(), n)))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Scalar(s) => s.is_empty(),
            Node::Mapping(map) => map.is_empty(),
            Node::Sequence(items) => items.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: Vec<(&str, Node)>) -> Node {
        Node::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn scalar(s: &str) -> Node {
        Node::Scalar(s.to_string())
    }

    #[test]
    fn test_children_normalizes_single_entry() {
        let node = mapping(vec![("pod", mapping(vec![("@title", scalar("Result"))]))]);
        assert_eq!(node.children("pod").count(), 1);
        assert_eq!(node.children("missing").count(), 0);
    }

    #[test]
    fn test_children_walks_sequence_in_order() {
        let node = mapping(vec![(
            "pod",
            Node::Sequence(vec![scalar("a"), scalar("b"), scalar("c")]),
        )]);
        let texts: Vec<_> = node.children("pod").filter_map(Node::as_str).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_attr_and_text() {
        let node = mapping(vec![
            ("@success", scalar("true")),
            ("#text", scalar("body")),
            ("plaintext", scalar("")),
        ]);
        assert_eq!(node.attr("success"), Some("true"));
        assert_eq!(node.attr("error"), None);
        assert_eq!(node.as_str(), Some("body"));
        // 空文本视为不存在
        assert_eq!(node.text("plaintext"), None);
    }

    #[test]
    fn test_elements_skips_attributes() {
        let node = mapping(vec![
            ("@count", scalar("2")),
            ("spellcheck", mapping(vec![("@text", scalar("x"))])),
            ("delimiters", Node::Sequence(vec![scalar("1"), scalar("2")])),
        ]);
        let names: Vec<_> = node.elements().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["spellcheck", "delimiters", "delimiters"]);
    }

    #[test]
    fn test_scalar_has_no_keys() {
        let node = scalar("42");
        assert!(node.get("anything").is_none());
        assert_eq!(node.children("pod").count(), 0);
        assert_eq!(node.as_slice().len(), 1);
    }
}

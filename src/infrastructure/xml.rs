// XML -> Node conversion
use crate::domain::error::WolframError;
use crate::domain::tree::{Node, ATTR_PREFIX, TEXT_KEY};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// Element under construction
struct Frame {
    name: String,
    entries: IndexMap<String, Node>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, WolframError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut entries = IndexMap::new();

        for attr in start.attributes() {
            let attr = attr?;
            let key = format!("{}{}", ATTR_PREFIX, String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value()?.into_owned();
            entries.insert(key, Node::Scalar(value));
        }

        Ok(Self {
            name,
            entries,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Node) {
        let Frame {
            name,
            mut entries,
            text,
        } = self;

        let text = text.trim();
        if entries.is_empty() {
            return (name, Node::Scalar(text.to_string()));
        }
        if !text.is_empty() {
            entries.insert(TEXT_KEY.to_string(), Node::Scalar(text.to_string()));
        }
        (name, Node::Mapping(entries))
    }

    fn push_child(&mut self, name: String, node: Node) {
        match self.entries.get_mut(&name) {
            Some(Node::Sequence(items)) => items.push(node),
            Some(existing) => {
                let first = std::mem::take(existing);
                *existing = Node::Sequence(vec![first, node]);
            }
            None => {
                self.entries.insert(name, node);
            }
        }
    }
}

/// Parse an XML document into a generic [`Node`] tree.
///
/// The result is a mapping with a single entry: the root element's name and
/// its converted content. Malformed documents fail with
/// [`WolframError::Parse`].
pub fn parse(xml: &str) -> Result<Node, WolframError> {
    // Text chunks are kept untrimmed and joined; the element trims once on close
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Node)> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            WolframError::Parse(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(start) => {
                ensure_single_root(&root, &stack)?;
                stack.push(Frame::open(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root, &stack)?;
                let (name, node) = Frame::open(&start)?.close();
                attach(&mut stack, &mut root, name, node);
            }
            Event::End(end) => {
                let frame = stack.pop().ok_or_else(|| {
                    WolframError::Parse(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                if frame.name.as_bytes() != end.name().as_ref() {
                    return Err(WolframError::Parse(format!(
                        "expected </{}>, found </{}>",
                        frame.name,
                        String::from_utf8_lossy(end.name().as_ref())
                    )));
                }
                let (name, node) = frame.close();
                attach(&mut stack, &mut root, name, node);
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata);
                append_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // declaration, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(WolframError::Parse(format!(
            "unexpected end of document, <{}> is not closed",
            open.name
        )));
    }

    let (name, node) =
        root.ok_or_else(|| WolframError::Parse("document has no root element".to_string()))?;

    tracing::debug!(root = %name, bytes = xml.len(), "parsed xml document");

    let mut tree = IndexMap::new();
    tree.insert(name, node);
    Ok(Node::Mapping(tree))
}

fn ensure_single_root(
    root: &Option<(String, Node)>,
    stack: &[Frame],
) -> Result<(), WolframError> {
    if stack.is_empty() && root.is_some() {
        return Err(WolframError::Parse(
            "content after the root element".to_string(),
        ));
    }
    Ok(())
}

fn attach(stack: &mut [Frame], root: &mut Option<(String, Node)>, name: String, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(name, node),
        None => *root = Some((name, node)),
    }
}

fn append_text(stack: &mut [Frame], text: &str) -> Result<(), WolframError> {
    if text.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(WolframError::Parse(
            "text outside of the root element".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(xml: &str) -> Node {
        let tree = parse(xml).unwrap();
        let Node::Mapping(mut map) = tree else {
            panic!("expected mapping");
        };
        assert_eq!(map.len(), 1);
        map.swap_remove_index(0).unwrap().1
    }

    #[test]
    fn test_attributes_are_prefixed() {
        let node = root(r#"<queryresult success="true" numpods="1"/>"#);
        assert_eq!(node.get("@success"), Some(&Node::Scalar("true".into())));
        assert_eq!(node.attr("numpods"), Some("1"));
        assert!(node.get("success").is_none());
    }

    #[test]
    fn test_text_only_element_collapses_to_scalar() {
        let node = root("<subpod><plaintext>42</plaintext></subpod>");
        assert_eq!(node.get("plaintext"), Some(&Node::Scalar("42".into())));
    }

    #[test]
    fn test_text_with_attributes_goes_under_text_key() {
        let node = root(r#"<a><b lang="en">hello</b></a>"#);
        let b = node.get("b").unwrap();
        assert_eq!(b.attr("lang"), Some("en"));
        assert_eq!(b.get(TEXT_KEY), Some(&Node::Scalar("hello".into())));
        assert_eq!(b.as_str(), Some("hello"));
    }

    #[test]
    fn test_repeated_children_become_sequence() {
        let node = root("<r><pod>1</pod><pod>2</pod><pod>3</pod></r>");
        let Some(Node::Sequence(items)) = node.get("pod") else {
            panic!("expected sequence");
        };
        let texts: Vec<_> = items.iter().filter_map(Node::as_str).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_single_child_is_not_sequence() {
        let node = root("<r><pod>1</pod></r>");
        assert!(matches!(node.get("pod"), Some(Node::Scalar(_))));
    }

    #[test]
    fn test_entities_and_cdata_are_unescaped() {
        let node = root("<r><a>x &amp; y</a><b><![CDATA[<raw>]]></b></r>");
        assert_eq!(node.text("a"), Some("x & y"));
        assert_eq!(node.text("b"), Some("<raw>"));
    }

    #[test]
    fn test_declaration_and_comments_ignored() {
        let node = root("<?xml version='1.0' encoding='UTF-8'?>\n<!-- c --><r><a>1</a></r>");
        assert_eq!(node.text("a"), Some("1"));
    }

    #[test]
    fn test_mixed_content_keeps_inner_spacing() {
        let node = root("<r>hello <b>x</b> world</r>");
        assert_eq!(node.get(TEXT_KEY), Some(&Node::Scalar("hello  world".into())));
        assert_eq!(node.text("b"), Some("x"));
    }

    #[test]
    fn test_multiline_text_is_trimmed_at_the_ends_only() {
        let node = root("<r><plaintext>\n  a | b\n  c | d\n</plaintext></r>");
        assert_eq!(node.text("plaintext"), Some("a | b\n  c | d"));
    }

    #[test]
    fn test_empty_element_is_empty_scalar() {
        let node = root("<r><plaintext/></r>");
        assert_eq!(node.get("plaintext"), Some(&Node::Scalar(String::new())));
    }

    #[test]
    fn test_unclosed_tag_fails() {
        let err = parse("<queryresult><pod>").unwrap_err();
        assert!(matches!(err, WolframError::Parse(_)));
    }

    #[test]
    fn test_mismatched_tag_fails() {
        assert!(matches!(
            parse("<a><b></a>").unwrap_err(),
            WolframError::Parse(_)
        ));
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(matches!(parse("").unwrap_err(), WolframError::Parse(_)));
        assert!(matches!(parse("   ").unwrap_err(), WolframError::Parse(_)));
    }

    #[test]
    fn test_second_root_fails() {
        assert!(matches!(
            parse("<a/><b/>").unwrap_err(),
            WolframError::Parse(_)
        ));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let xml = r#"<r x="1"><a>1</a><b/><a>2</a></r>"#;
        assert_eq!(parse(xml).unwrap(), parse(xml).unwrap());
    }
}

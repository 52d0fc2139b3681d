use crate::domain::error::WolframError;
use crate::domain::tree::Node;
use crate::infrastructure::xml;
use indexmap::IndexMap;
use std::str::FromStr;

const ROOT_TAG: &str = "queryresult";

/// XML booleans are the literal strings "true" / "false".
fn xml_bool(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Parsed response of one query.
///
/// Owns the tree built from the `<queryresult>` element; every accessor
/// hands out borrowed views into it and never fails on missing data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    root: Node,
}

impl QueryResult {
    pub fn from_xml(xml: &str) -> Result<Self, WolframError> {
        let tree = xml::parse(xml)?;
        Ok(Self::from_tree(tree))
    }

    /// Wrap an already parsed document. A document without a `queryresult`
    /// root yields an empty result.
    pub fn from_tree(tree: Node) -> Self {
        let root = match tree {
            Node::Mapping(mut map) => map.shift_remove(ROOT_TAG).unwrap_or_default(),
            _ => Node::default(),
        };
        Self { root }
    }

    /// The `queryresult` subtree
    pub fn tree(&self) -> &Node {
        &self.root
    }

    pub fn success(&self) -> bool {
        xml_bool(self.root.attr("success"))
    }

    pub fn is_error(&self) -> bool {
        xml_bool(self.root.attr("error")) || self.root.get("error").is_some()
    }

    /// Error reported by the API, e.g. an invalid appid.
    pub fn error(&self) -> Option<ApiError> {
        let node = self.root.get("error")?;
        Some(ApiError {
            code: node.text("code").unwrap_or_default().to_string(),
            msg: node.text("msg").unwrap_or_default().to_string(),
        })
    }

    pub fn num_pods(&self) -> Option<usize> {
        self.root.attr("numpods").and_then(|n| n.parse().ok())
    }

    pub fn timing(&self) -> Option<f64> {
        self.root.attr("timing").and_then(|n| n.parse().ok())
    }

    pub fn data_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.root
            .attr("datatypes")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Pods in document order. Call again to restart.
    pub fn pods(&self) -> impl Iterator<Item = Pod<'_>> + '_ {
        self.root.children("pod").map(Pod::new)
    }

    /// Pods holding the answer to a simple, discrete query.
    pub fn results(&self) -> impl Iterator<Item = Pod<'_>> + '_ {
        self.pods()
            .filter(|pod| pod.primary() || pod.title() == Some("Result"))
    }

    /// Pod title → first plaintext, for every pod that has text.
    pub fn details(&self) -> IndexMap<&str, &str> {
        self.pods()
            .filter_map(|pod| Some((pod.title()?, pod.text()?)))
            .collect()
    }

    /// The first textual answer: the primary result if there is one,
    /// otherwise the first pod with text that is not the echoed input.
    pub fn answer(&self) -> Option<&str> {
        self.results().find_map(|pod| pod.text()).or_else(|| {
            self.pods()
                .filter(|pod| pod.id() != Some("Input"))
                .find_map(|pod| pod.text())
        })
    }

    pub fn assumptions(&self) -> impl Iterator<Item = Assumption<'_>> + '_ {
        self.root
            .children("assumptions")
            .flat_map(|a| a.children("assumption"))
            .map(Assumption::new)
    }

    pub fn warnings(&self) -> impl Iterator<Item = Warning<'_>> + '_ {
        self.root
            .children("warnings")
            .flat_map(Node::elements)
            .map(|(kind, node)| Warning { kind, node })
    }

    /// Pods, then assumptions, then warnings.
    pub fn info(&self) -> impl Iterator<Item = Info<'_>> + '_ {
        self.pods()
            .map(Info::Pod)
            .chain(self.assumptions().map(Info::Assumption))
            .chain(self.warnings().map(Info::Warning))
    }

    pub fn info_len(&self) -> usize {
        self.info().count()
    }
}

impl FromStr for QueryResult {
    type Err = WolframError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_xml(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: String,
    pub msg: String,
}

impl From<ApiError> for WolframError {
    fn from(e: ApiError) -> Self {
        WolframError::Api {
            code: e.code,
            msg: e.msg,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Info<'a> {
    Pod(Pod<'a>),
    Assumption(Assumption<'a>),
    Warning(Warning<'a>),
}

/// A titled section of the answer
#[derive(Debug, Clone, Copy)]
pub struct Pod<'a> {
    node: &'a Node,
}

impl<'a> Pod<'a> {
    fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn title(&self) -> Option<&'a str> {
        self.node.attr("title")
    }

    pub fn id(&self) -> Option<&'a str> {
        self.node.attr("id")
    }

    pub fn scanner(&self) -> Option<&'a str> {
        self.node.attr("scanner")
    }

    pub fn position(&self) -> Option<f64> {
        self.node.attr("position").and_then(|p| p.parse().ok())
    }

    pub fn num_subpods(&self) -> Option<usize> {
        self.node.attr("numsubpods").and_then(|n| n.parse().ok())
    }

    pub fn primary(&self) -> bool {
        xml_bool(self.node.attr("primary"))
    }

    pub fn is_error(&self) -> bool {
        xml_bool(self.node.attr("error")) || self.node.get("error").is_some()
    }

    pub fn subpods(&self) -> impl Iterator<Item = Subpod<'a>> + 'a {
        self.node.children("subpod").map(Subpod::new)
    }

    /// Plaintext of each subpod that has one.
    pub fn texts(&self) -> Vec<&'a str> {
        self.subpods().filter_map(|s| s.plaintext()).collect()
    }

    /// Plaintext of the first subpod.
    pub fn text(&self) -> Option<&'a str> {
        self.subpods().next().and_then(|s| s.plaintext())
    }
}

/// The smallest answer unit: plaintext and/or an image
#[derive(Debug, Clone, Copy)]
pub struct Subpod<'a> {
    node: &'a Node,
}

impl<'a> Subpod<'a> {
    fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn title(&self) -> Option<&'a str> {
        self.node.attr("title").filter(|t| !t.is_empty())
    }

    pub fn plaintext(&self) -> Option<&'a str> {
        self.node.text("plaintext")
    }

    pub fn img(&self) -> Option<Image<'a>> {
        self.images().next()
    }

    pub fn images(&self) -> impl Iterator<Item = Image<'a>> + 'a {
        self.node.children("img").map(|node| Image { node })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Image<'a> {
    node: &'a Node,
}

impl<'a> Image<'a> {
    pub fn src(&self) -> Option<&'a str> {
        self.node.attr("src")
    }

    pub fn alt(&self) -> Option<&'a str> {
        self.node.attr("alt")
    }

    pub fn title(&self) -> Option<&'a str> {
        self.node.attr("title")
    }

    pub fn width(&self) -> Option<u32> {
        self.node.attr("width").and_then(|w| w.parse().ok())
    }

    pub fn height(&self) -> Option<u32> {
        self.node.attr("height").and_then(|h| h.parse().ok())
    }
}

/// An alternate interpretation offered for the input
#[derive(Debug, Clone, Copy)]
pub struct Assumption<'a> {
    node: &'a Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumptionValue<'a> {
    pub name: Option<&'a str>,
    pub desc: Option<&'a str>,
    pub input: Option<&'a str>,
}

impl<'a> Assumption<'a> {
    fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn kind(&self) -> Option<&'a str> {
        self.node.attr("type")
    }

    pub fn word(&self) -> Option<&'a str> {
        self.node.attr("word")
    }

    pub fn template(&self) -> Option<&'a str> {
        self.node.attr("template")
    }

    pub fn values(&self) -> impl Iterator<Item = AssumptionValue<'a>> + 'a {
        self.node.children("value").map(|v| AssumptionValue {
            name: v.attr("name"),
            desc: v.attr("desc"),
            input: v.attr("input"),
        })
    }

    /// Template with `${word}` and `${desc1}` filled in, cut after the first
    /// sentence.
    pub fn text(&self) -> Option<String> {
        let mut text = self.template()?.to_string();
        if let Some(desc) = self.values().next().and_then(|v| v.desc) {
            text = text.replace("${desc1}", desc);
        }
        if let Some(word) = self.word() {
            text = text.replace("${word}", word);
        }
        if let Some(end) = text.find(". ") {
            text.truncate(end + 1);
        }
        Some(text)
    }
}

/// A note attached to the result, such as a spelling correction
#[derive(Debug, Clone, Copy)]
pub struct Warning<'a> {
    kind: &'a str,
    node: &'a Node,
}

impl<'a> Warning<'a> {
    /// Element name, e.g. `spellcheck` or `reinterpret`.
    pub fn kind(&self) -> &'a str {
        self.kind
    }

    pub fn text(&self) -> Option<&'a str> {
        self.node.attr("text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_bool() {
        assert!(xml_bool(Some("true")));
        assert!(!xml_bool(Some("false")));
        assert!(!xml_bool(Some("TRUE ")));
        assert!(!xml_bool(None));
    }

    #[test]
    fn test_non_queryresult_root_is_empty() {
        let result = QueryResult::from_xml("<other success=\"true\"><pod/></other>").unwrap();
        assert!(!result.success());
        assert_eq!(result.pods().count(), 0);
    }

    #[test]
    fn test_empty_queryresult_element() {
        let result: QueryResult = "<queryresult/>".parse().unwrap();
        assert!(!result.success());
        assert_eq!(result.pods().count(), 0);
        assert!(result.details().is_empty());
        assert!(result.answer().is_none());
    }

    #[test]
    fn test_pod_without_subpods() {
        let result =
            QueryResult::from_xml(r#"<queryresult><pod title="Empty"/></queryresult>"#).unwrap();
        let pod = result.pods().next().unwrap();
        assert_eq!(pod.title(), Some("Empty"));
        assert_eq!(pod.subpods().count(), 0);
        assert!(pod.text().is_none());
        assert!(pod.texts().is_empty());
    }

    #[test]
    fn test_pod_error_flag_and_element() {
        let result = QueryResult::from_xml(
            r#"<queryresult success="true">
                <pod title="A" error="true"/>
                <pod title="B"><error><code>3</code><msg>Pod failed</msg></error></pod>
                <pod title="C" error="false"><subpod><plaintext>ok</plaintext></subpod></pod>
            </queryresult>"#,
        )
        .unwrap();
        let flags: Vec<_> = result.pods().map(|p| p.is_error()).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_assumption_text_without_template() {
        let result = QueryResult::from_xml(
            r#"<queryresult><assumptions><assumption type="Clash" word="pi"/></assumptions></queryresult>"#,
        )
        .unwrap();
        let assumption = result.assumptions().next().unwrap();
        assert_eq!(assumption.kind(), Some("Clash"));
        assert!(assumption.text().is_none());
    }
}

//! Response parsing: a navigable XML tree plus typed, forgiving field accessors.
//!
//! The service wraps every typed reply in a `GoodreadsResponse` element and nests the
//! payload under an *expected root path* such as `group_folder/topics`. Documents are
//! read into an [`XmlDocument`] arena once, then domain types walk it through
//! [`XmlNode`] handles. Every accessor is guarded: missing elements and unparsable text
//! fall back to a default instead of failing the whole parse.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::traits::Parseable;

/// Errors that can occur while reading a response document.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// An I/O error during XML writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the underlying quick-xml library.
    #[error("XML processing error: {0}")]
    QuickXml(#[from] quick_xml::Error),

    /// An error from quick-xml attribute handling.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document contains no element at all.
    #[error("the document has no root element")]
    MissingRoot,

    /// The document ended while elements were still open.
    #[error("unexpected end of document inside <{0}>")]
    Unclosed(String),
}

#[derive(Debug)]
struct NodeData {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// An XML document held as an arena of element nodes.
#[derive(Debug)]
pub struct XmlDocument {
    nodes: Vec<NodeData>,
}

impl XmlDocument {
    /// Parses a document. Text and CDATA content of an element are concatenated.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);

        let mut nodes: Vec<NodeData> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let idx = push_node(&mut nodes, &e, stack.last().copied())?;
                    stack.push(idx);
                }
                Event::Empty(e) => {
                    push_node(&mut nodes, &e, stack.last().copied())?;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(e) => {
                    if let Some(&current) = stack.last() {
                        // descriptions carry HTML entities such as `&nbsp;`
                        let text = e
                            .unescape_with(resolve_entity)
                            .map(Cow::into_owned)
                            .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                        nodes[current].text.push_str(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(&current) = stack.last() {
                        nodes[current]
                            .text
                            .push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(&open) = stack.last() {
            return Err(XmlError::Unclosed(nodes[open].name.clone()));
        }
        if nodes.is_empty() {
            return Err(XmlError::MissingRoot);
        }
        for node in &mut nodes {
            let trimmed = node.text.trim();
            if trimmed.len() != node.text.len() {
                node.text = trimmed.to_string();
            }
        }

        Ok(Self { nodes })
    }

    /// Returns the document element.
    pub fn root(&self) -> XmlNode<'_> {
        XmlNode { doc: self, idx: 0 }
    }

    /// Locates the node at a slash-delimited path below the document element.
    ///
    /// If the document element itself carries the first segment (a reply without the
    /// usual response wrapper), lookup starts there instead.
    pub fn locate(&self, path: &str) -> Option<XmlNode<'_>> {
        let root = self.root();
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(root);
        }

        root.path(path).or_else(|| {
            let (first, rest) = path.split_once('/').unwrap_or((path, ""));
            if root.name() != first {
                return None;
            }
            if rest.is_empty() {
                Some(root)
            } else {
                root.path(rest)
            }
        })
    }
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
}

fn push_node(
    nodes: &mut Vec<NodeData>,
    start: &BytesStart<'_>,
    parent: Option<usize>,
) -> Result<usize, XmlError> {
    // trailing top-level elements are folded into the document element
    if parent.is_none() && !nodes.is_empty() {
        return Ok(0);
    }

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    let idx = nodes.len();
    nodes.push(NodeData {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attributes,
        text: String::new(),
        parent,
        children: Vec::new(),
    });
    if let Some(parent) = parent {
        nodes[parent].children.push(idx);
    }
    Ok(idx)
}

/// A handle to one element of an [`XmlDocument`].
#[derive(Debug, Clone, Copy)]
pub struct XmlNode<'a> {
    doc: &'a XmlDocument,
    idx: usize,
}

impl<'a> XmlNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.idx]
    }

    fn at(&self, idx: usize) -> XmlNode<'a> {
        XmlNode { doc: self.doc, idx }
    }

    /// The element name.
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// The text content of the element itself, without that of its children.
    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    /// The value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data()
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The enclosing element.
    pub fn parent(&self) -> Option<XmlNode<'a>> {
        self.data().parent.map(|idx| self.at(idx))
    }

    /// All child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = XmlNode<'a>> + 'a {
        let doc = self.doc;
        self.data()
            .children
            .iter()
            .map(move |&idx| XmlNode { doc, idx })
    }

    /// The child elements with the given name, in document order.
    pub fn children_named<'n>(&self, name: &'n str) -> impl Iterator<Item = XmlNode<'a>> + 'n
    where
        'a: 'n,
    {
        let doc = self.doc;
        self.data()
            .children
            .iter()
            .map(move |&idx| XmlNode { doc, idx })
            .filter(move |c| c.name() == name)
    }

    /// The first child element with the given name.
    pub fn child(&self, name: &str) -> Option<XmlNode<'a>> {
        self.children().find(|c| c.name() == name)
    }

    /// All elements below this one with the given name, in document order.
    pub fn descendants(&self, name: &str) -> Vec<XmlNode<'a>> {
        let mut found = Vec::new();
        let mut pending: Vec<usize> = self.data().children.iter().rev().copied().collect();
        while let Some(idx) = pending.pop() {
            let node = self.at(idx);
            if node.name() == name {
                found.push(node);
            }
            pending.extend(node.data().children.iter().rev().copied());
        }
        found
    }

    /// Descends one named child per slash-delimited segment.
    pub fn path(&self, path: &str) -> Option<XmlNode<'a>> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(*self, |node, segment| node.child(segment))
    }

    /// Text of a child element, or an empty string.
    pub fn element_as_string(&self, name: &str) -> String {
        self.child(name)
            .map(|c| c.text().to_string())
            .unwrap_or_default()
    }

    /// Text of a child element, or `None` if the element is absent or empty.
    pub fn element_as_opt_string(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|c| c.text())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    /// Integer value of a child element, or zero.
    pub fn element_as_i32(&self, name: &str) -> i32 {
        self.element_parsed(name).unwrap_or_default()
    }

    /// Integer value of a child element, or zero.
    pub fn element_as_i64(&self, name: &str) -> i64 {
        self.element_parsed(name).unwrap_or_default()
    }

    /// Integer value of a child element, or `None` if absent or unparsable.
    pub fn element_as_opt_i64(&self, name: &str) -> Option<i64> {
        self.element_parsed(name)
    }

    /// Decimal value of a child element, or zero.
    pub fn element_as_decimal(&self, name: &str) -> f64 {
        self.element_parsed(name).unwrap_or_default()
    }

    /// Boolean value of a child element: `true` or `1` are true, everything else false.
    pub fn element_as_bool(&self, name: &str) -> bool {
        self.child(name)
            .map(|c| parse_bool(c.text()))
            .unwrap_or(false)
    }

    /// A date split over `<prefix>_year`, `<prefix>_month` and `<prefix>_day`.
    ///
    /// Without a year there is no date. A missing month or day is taken as the first.
    pub fn element_as_date(&self, prefix: &str) -> Option<NaiveDate> {
        let year: i32 = self.element_parsed(&format!("{prefix}_year"))?;
        let month: u32 = self
            .element_parsed(&format!("{prefix}_month"))
            .unwrap_or(1);
        let day: u32 = self.element_parsed(&format!("{prefix}_day")).unwrap_or(1);
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// A timestamp of a child element, in the service's `Tue Jan 10 12:00:00 -0800 2017`
    /// format or RFC 3339.
    pub fn element_as_datetime(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        self.child(name).and_then(|c| parse_datetime(c.text()))
    }

    /// A nested object, or `None` if the element is absent.
    pub fn element_as_object<T: Parseable>(&self, name: &str) -> Option<T> {
        self.child(name).map(|c| T::from_node(&c))
    }

    /// The `item` children of the `wrapper` child, parsed in document order.
    ///
    /// An absent wrapper gives `None`; a present wrapper without items gives an empty list.
    pub fn element_as_list<T: Parseable>(&self, wrapper: &str, item: &str) -> Option<Vec<T>> {
        let wrapper = self.child(wrapper)?;
        Some(
            wrapper
                .children_named(item)
                .map(|c| T::from_node(&c))
                .collect(),
        )
    }

    /// A name→count map from the `item` children of the `wrapper` child, read from their
    /// `name` and `count` attributes. Later duplicates overwrite earlier ones.
    pub fn element_as_count_map(&self, wrapper: &str, item: &str) -> Option<BTreeMap<String, i32>> {
        let wrapper = self.child(wrapper)?;
        let mut map = BTreeMap::new();
        for entry in wrapper.children_named(item) {
            if let Some(name) = entry.attribute("name") {
                let count = entry
                    .attribute("count")
                    .and_then(|c| c.trim().parse().ok())
                    .unwrap_or(0);
                map.insert(name.to_string(), count);
            }
        }
        Some(map)
    }

    /// Integer value of an attribute, or zero.
    pub fn attribute_as_i32(&self, name: &str) -> i32 {
        self.attribute(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }

    fn element_parsed<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.child(name).and_then(|c| c.text().trim().parse().ok())
    }
}

fn parse_bool(text: &str) -> bool {
    matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "1")
}

/// Parses the timestamp formats the service uses.
pub fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DateTime::parse_from_str(text, "%a %b %d %H:%M:%S %z %Y")
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .ok()
}

/// Locates `path` in `doc` and hydrates a `T` from it.
///
/// Returns `None` when any segment of the path is missing.
pub fn parse_root<T: Parseable>(doc: &XmlDocument, path: &str) -> Option<T> {
    doc.locate(path).map(|node| T::from_node(&node))
}

/// Parses `xml` and hydrates a `T` from `path`.
pub fn from_xml_str<T: Parseable>(xml: &str, path: &str) -> Result<Option<T>, XmlError> {
    let doc = XmlDocument::parse(xml)?;
    Ok(parse_root(&doc, path))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<GoodreadsResponse>
  <Request><authentication>true</authentication></Request>
  <group_folder>
    <id>12</id>
    <topics start="1" end="2" total="2">
      <topic><id>1</id><title>First &amp; foremost</title></topic>
      <topic><id>2</id><title><![CDATA[Second <b>one</b>]]></title></topic>
    </topics>
  </group_folder>
  <book>
    <id>50</id>
    <average_rating>4.21</average_rating>
    <num_pages>abc</num_pages>
    <is_ebook>true</is_ebook>
    <publication_year>2001</publication_year>
    <publication_month></publication_month>
    <popular_shelves>
      <shelf name="to-read" count="100"/>
      <shelf name="fantasy" count="x"/>
      <shelf name="to-read" count="7"/>
    </popular_shelves>
    <authors></authors>
  </book>
</GoodreadsResponse>"#;

    #[derive(Debug, Default)]
    struct Title {
        id: i64,
        title: String,
    }

    impl Parseable for Title {
        fn parse(&mut self, node: &XmlNode<'_>) {
            self.id = node.element_as_i64("id");
            self.title = node.element_as_string("title");
        }
    }

    #[test]
    fn test_locate_descends_from_wrapper() {
        let doc = XmlDocument::parse(DOC).unwrap();
        assert_eq!(doc.root().name(), "GoodreadsResponse");

        let topics = doc.locate("group_folder/topics").unwrap();
        assert_eq!(topics.name(), "topics");
        assert_eq!(topics.attribute_as_i32("total"), 2);
        assert!(doc.locate("group_folder/missing").is_none());
    }

    #[test]
    fn test_locate_without_wrapper() {
        let doc = XmlDocument::parse("<topic><id>9</id></topic>").unwrap();
        let topic: Title = parse_root(&doc, "topic").unwrap();
        assert_eq!(topic.id, 9);
    }

    #[test]
    fn test_text_unescaping_and_cdata() {
        let doc = XmlDocument::parse(DOC).unwrap();
        let topics = doc.locate("group_folder/topics").unwrap();
        let titles: Vec<String> = topics
            .children_named("topic")
            .map(|t| t.element_as_string("title"))
            .collect();
        assert_eq!(titles, vec!["First & foremost", "Second <b>one</b>"]);
    }

    #[test]
    fn test_mixed_content_and_html_entities() {
        let doc = XmlDocument::parse("<a>Hello <i>big</i> world</a>").unwrap();
        assert_eq!(doc.root().text(), "Hello  world");

        let doc = XmlDocument::parse("<b>\n  Tom &amp; Jerry&nbsp;&hellip;\n</b>").unwrap();
        assert_eq!(doc.root().text(), "Tom & Jerry\u{a0}\u{2026}");
    }

    #[test]
    fn test_scalar_defaults() {
        let doc = XmlDocument::parse(DOC).unwrap();
        let book = doc.locate("book").unwrap();

        assert_eq!(book.element_as_i64("id"), 50);
        assert!((book.element_as_decimal("average_rating") - 4.21).abs() < f64::EPSILON);
        assert_eq!(book.element_as_i32("num_pages"), 0);
        assert_eq!(book.element_as_i32("missing"), 0);
        assert_eq!(book.element_as_string("missing"), "");
        assert!(book.element_as_opt_string("missing").is_none());
        assert!(book.element_as_bool("is_ebook"));
        assert!(!book.element_as_bool("missing"));
    }

    #[test]
    fn test_partial_date() {
        let doc = XmlDocument::parse(DOC).unwrap();
        let book = doc.locate("book").unwrap();

        let date = book.element_as_date("publication").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2001, 1, 1));
        assert!(book.element_as_date("original_publication").is_none());
    }

    #[test]
    fn test_invalid_date_is_none() {
        let doc = XmlDocument::parse(
            "<w><p_year>2001</p_year><p_month>2</p_month><p_day>30</p_day></w>",
        )
        .unwrap();
        assert!(doc.root().element_as_date("p").is_none());
    }

    #[test]
    fn test_datetime_formats() {
        let service = parse_datetime("Tue Jan 10 12:30:00 -0800 2017").unwrap();
        assert_eq!((service.year(), service.month(), service.day()), (2017, 1, 10));
        assert_eq!(service.hour(), 12);

        let rfc = parse_datetime("2017-01-10T12:30:00-08:00").unwrap();
        assert_eq!(rfc, service);

        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn test_count_map_last_write_wins() {
        let doc = XmlDocument::parse(DOC).unwrap();
        let book = doc.locate("book").unwrap();
        let shelves = book.element_as_count_map("popular_shelves", "shelf").unwrap();

        assert_eq!(shelves.len(), 2);
        assert_eq!(shelves["to-read"], 7);
        assert_eq!(shelves["fantasy"], 0);
        assert!(book.element_as_count_map("shelves", "shelf").is_none());
    }

    #[test]
    fn test_list_absent_versus_empty() {
        let doc = XmlDocument::parse(DOC).unwrap();
        let book = doc.locate("book").unwrap();

        let empty: Option<Vec<Title>> = book.element_as_list("authors", "author");
        assert_eq!(empty.map(|v| v.len()), Some(0));

        let absent: Option<Vec<Title>> = book.element_as_list("similar_books", "book");
        assert!(absent.is_none());

        let folder = doc.locate("group_folder").unwrap();
        let topics: Vec<Title> = folder.element_as_list("topics", "topic").unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[1].id, 2);
    }

    #[test]
    fn test_descendants_and_parent() {
        let doc = XmlDocument::parse(DOC).unwrap();
        let ids: Vec<&str> = doc.root().descendants("id").iter().map(|n| n.text()).collect();
        assert_eq!(ids, vec!["12", "1", "2", "50"]);

        let topic = doc.locate("group_folder/topics").unwrap().child("topic").unwrap();
        let folder = topic.parent().and_then(|p| p.parent()).unwrap();
        assert_eq!(folder.name(), "group_folder");
        assert!(doc.root().parent().is_none());
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(XmlDocument::parse(""), Err(XmlError::MissingRoot)));
        assert!(XmlDocument::parse("<a><b></b>").is_err());
        assert!(XmlDocument::parse("<a></b>").is_err());
        assert!(from_xml_str::<Title>("<a><topic/></a>", "topic").unwrap().is_some());
    }
}

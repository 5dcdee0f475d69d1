use crate::traits::Parseable;
use crate::xml::XmlNode;

/// An untouched response: status, content type and body text.
///
/// Used for endpoints that don't answer with a regular XML document, and for actions
/// whose outcome is only told by the status code.
#[derive(Debug, Clone)]
pub struct RawResult {
    /// The HTTP status code.
    pub status: u16,
    /// The `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// The body text.
    pub body: String,
}

impl RawResult {
    /// Returns whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns whether the status code is exactly `expected`.
    pub fn is_status(&self, expected: u16) -> bool {
        self.status == expected
    }
}

/// A page of results plus its position inside the complete result set.
#[derive(Debug, Clone)]
pub struct PaginatedList<T> {
    /// The items of this page, in document order.
    pub list: Vec<T>,
    /// The 1-based index of the first item of this page.
    pub start: i32,
    /// The 1-based index of the last item of this page.
    pub end: i32,
    /// The number of items in the complete result set.
    pub total: i32,
}

impl<T> Default for PaginatedList<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            start: 0,
            end: 0,
            total: 0,
        }
    }
}

impl<T: Parseable> Parseable for PaginatedList<T> {
    fn parse(&mut self, node: &XmlNode<'_>) {
        // listings carry the cursor as attributes, search results as sibling elements
        if node.attribute("start").is_some() {
            self.start = node.attribute_as_i32("start");
            self.end = node.attribute_as_i32("end");
            self.total = node.attribute_as_i32("total");
        } else {
            self.start = node.element_as_i32("results-start");
            self.end = node.element_as_i32("results-end");
            self.total = node.element_as_i32("total-results");
        }

        let items = node.child("results").unwrap_or(*node);
        self.list = items.children().map(|c| T::from_node(&c)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    #[derive(Debug, Default)]
    struct Item {
        id: i64,
    }

    impl Parseable for Item {
        fn parse(&mut self, node: &XmlNode<'_>) {
            self.id = node.element_as_i64("id");
        }
    }

    #[test]
    fn test_attribute_pagination() {
        let doc = XmlDocument::parse(
            r#"<GoodreadsResponse><owned_books start="21" end="22" total="40">
                <owned_book><id>1</id></owned_book>
                <owned_book><id>2</id></owned_book>
            </owned_books></GoodreadsResponse>"#,
        )
        .unwrap();
        let page: PaginatedList<Item> = crate::xml::parse_root(&doc, "owned_books").unwrap();

        assert_eq!((page.start, page.end, page.total), (21, 22, 40));
        assert_eq!(page.list.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_search_pagination() {
        let doc = XmlDocument::parse(
            r#"<GoodreadsResponse><search>
                <query><![CDATA[ender]]></query>
                <results-start>1</results-start>
                <results-end>1</results-end>
                <total-results>1</total-results>
                <results><work><id>7</id></work></results>
            </search></GoodreadsResponse>"#,
        )
        .unwrap();
        let page: PaginatedList<Item> = crate::xml::parse_root(&doc, "search").unwrap();

        assert_eq!((page.start, page.end, page.total), (1, 1, 1));
        assert_eq!(page.list.len(), 1);
        assert_eq!(page.list[0].id, 7);
    }

    #[test]
    fn test_raw_result_status() {
        let created = RawResult {
            status: 201,
            content_type: None,
            body: String::new(),
        };
        assert!(created.is_success());
        assert!(created.is_status(201));
        assert!(!created.is_status(200));
    }
}

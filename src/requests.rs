use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use reqwest::Method;

use crate::params::{Parameter, ParameterKind, Parameters};
use crate::xml::XmlError;

/// The format the service is asked to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// XML wrapped in a `GoodreadsResponse` element. Used by almost every endpoint.
    #[default]
    Xml,
    /// JSON. The endpoint path selects the format, so no `format` parameter is sent.
    Json,
}

/// Query parameters sent with every resource request.
#[derive(Debug, Clone)]
pub struct DefaultParameters {
    /// The developer API key, sent as `key`.
    pub api_key: String,
}

impl DefaultParameters {
    /// Creates the default parameters for an API key.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
        }
    }

    fn for_format(&self, format: ResponseFormat) -> Vec<Parameter> {
        let mut defaults = vec![Parameter::new(
            "key",
            self.api_key.as_str(),
            ParameterKind::QueryString,
        )];
        if format == ResponseFormat::Xml {
            defaults.push(Parameter::new("format", "xml", ParameterKind::QueryString));
        }
        defaults
    }
}

/// Everything needed to issue one request against the service.
///
/// Values are kept as given; placeholders are resolved and everything is encoded
/// when the request is sent.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Endpoint path relative to the base URL, with `{name}` placeholders.
    pub template: String,
    /// The HTTP method.
    pub method: Method,
    /// Path-segment, query-string and body-field parameters.
    pub parameters: Parameters,
    /// Slash-delimited path to the payload inside the response document.
    pub expected_root: Option<String>,
    /// Body object, only sent with non-GET requests.
    pub body: Option<XmlElement>,
    /// The format the response is expected in.
    pub format: ResponseFormat,
}

impl RequestSpec {
    /// Sets the path to the payload inside the response document.
    pub fn expect_root(mut self, path: &str) -> Self {
        self.expected_root = Some(path.to_string());
        self
    }

    /// Sets the body object.
    pub fn with_body(mut self, body: XmlElement) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns whether a body is written for this request.
    pub fn has_body(&self) -> bool {
        self.method != Method::GET && self.body.is_some()
    }

    /// Serializes the body object, with body-field parameters appended as child elements.
    ///
    /// Returns `None` for GET requests and requests without a body object.
    pub fn serialize_body(&self) -> Result<Option<String>, XmlError> {
        let Some(body) = self.body.as_ref().filter(|_| self.method != Method::GET) else {
            return Ok(None);
        };

        let mut root = body.clone();
        for field in self.parameters.of_kind(ParameterKind::BodyField) {
            root.children.push(XmlElement::new(&field.name).text(&field.value));
        }
        root.to_xml_string().map(Some)
    }
}

/// Creates [`RequestSpec`]s with the default parameters applied.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    defaults: DefaultParameters,
}

impl RequestBuilder {
    /// Creates a new request builder.
    pub fn new(defaults: DefaultParameters) -> Self {
        Self { defaults }
    }

    /// Builds a request for an XML endpoint.
    pub fn build(&self, template: &str, parameters: Parameters, method: Method) -> RequestSpec {
        self.build_for(template, parameters, method, ResponseFormat::Xml)
    }

    /// Builds a GET request for a JSON-only endpoint.
    pub fn build_json(&self, template: &str, parameters: Parameters) -> RequestSpec {
        self.build_for(template, parameters, Method::GET, ResponseFormat::Json)
    }

    fn build_for(
        &self,
        template: &str,
        parameters: Parameters,
        method: Method,
        format: ResponseFormat,
    ) -> RequestSpec {
        let mut all: Parameters = self.defaults.for_format(format).into_iter().collect();
        all.extend(parameters);

        RequestSpec {
            template: template.to_string(),
            method,
            parameters: all,
            expected_root: None,
            body: None,
            format,
        }
    }
}

/// A minimal XML element used as a request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// The element name.
    pub name: String,
    /// The text content.
    pub text: Option<String>,
    /// The child elements.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an empty element.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the text content.
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Appends a child element.
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Writes the element as a standalone document.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.write(&mut writer)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), XmlError> {
        if self.text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new(self.name.as_str())))?;
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new(self.name.as_str())))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(DefaultParameters::new("api-key"))
    }

    #[test]
    fn test_build_applies_defaults() {
        let spec = builder()
            .build(
                "book/show/{bookId}.xml",
                Parameters::new().segment("bookId", 50),
                Method::GET,
            )
            .expect_root("book");

        assert_eq!(spec.template, "book/show/{bookId}.xml");
        assert_eq!(spec.expected_root.as_deref(), Some("book"));
        assert_eq!(
            spec.parameters.get("key", ParameterKind::QueryString),
            Some("api-key")
        );
        assert_eq!(
            spec.parameters.get("format", ParameterKind::QueryString),
            Some("xml")
        );
        assert_eq!(
            spec.parameters.get("bookId", ParameterKind::PathSegment),
            Some("50")
        );
    }

    #[test]
    fn test_build_json_omits_format() {
        let spec = builder().build_json(
            "book/review_counts.json",
            Parameters::new().query("isbns", "1,2"),
        );

        assert_eq!(spec.format, ResponseFormat::Json);
        assert_eq!(spec.method, Method::GET);
        assert!(spec.parameters.get("format", ParameterKind::QueryString).is_none());
        assert_eq!(
            spec.parameters.get("key", ParameterKind::QueryString),
            Some("api-key")
        );
    }

    #[test]
    fn test_body_only_on_non_get() {
        let body = XmlElement::new("review").child(XmlElement::new("rating").text("5"));
        let params = Parameters::new().body("shelf", "read");

        let get = builder()
            .build("review", params.clone(), Method::GET)
            .with_body(body.clone());
        assert!(!get.has_body());
        assert!(get.serialize_body().unwrap().is_none());

        let post = builder()
            .build("review", params.clone(), Method::POST)
            .with_body(body);
        assert!(post.has_body());
        let xml = post.serialize_body().unwrap().unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><review><rating>5</rating><shelf>read</shelf></review>"
        );

        let no_body = builder().build("review", params, Method::POST);
        assert!(no_body.serialize_body().unwrap().is_none());
    }

    #[test]
    fn test_xml_element_escapes_text() {
        let xml = XmlElement::new("comment")
            .text("a < b & c")
            .to_xml_string()
            .unwrap();
        assert!(xml.ends_with("<comment>a &lt; b &amp; c</comment>"));

        let empty = XmlElement::new("empty").to_xml_string().unwrap();
        assert!(empty.ends_with("<empty/>"));
    }
}

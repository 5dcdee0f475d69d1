use crate::xml::XmlNode;

/// A domain object that can be hydrated from a response node.
///
/// `parse` must tolerate missing optional data: absent fields keep their default
/// value. The [`Default`] value doubles as the "resource not found" result of typed
/// requests whose expected root is missing from the response.
pub trait Parseable: Default {
    /// Populates `self` from the given node.
    fn parse(&mut self, node: &XmlNode<'_>);

    /// Creates a default value and populates it from the given node.
    fn from_node(node: &XmlNode<'_>) -> Self {
        let mut value = Self::default();
        value.parse(node);
        value
    }
}

/// An option that is sent to the service as a fixed query parameter.
pub trait QueryParameter: Copy {
    /// The name of the query parameter.
    const KEY: &'static str;

    /// The value sent for this option.
    fn value(&self) -> &'static str;
}

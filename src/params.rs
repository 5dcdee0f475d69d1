use chrono::NaiveDate;

use crate::traits::QueryParameter;

/// Where a parameter ends up in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Substituted into a `{name}` placeholder of the endpoint template.
    PathSegment,
    /// Appended to the query string.
    QueryString,
    /// Written into the request body. Only honoured on non-GET requests with a body.
    BodyField,
}

/// A single named request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// The name of the parameter.
    pub name: String,
    /// The stringified value of the parameter.
    pub value: String,
    /// Where the parameter is placed.
    pub kind: ParameterKind,
}

impl Parameter {
    /// Creates a new parameter of the given kind.
    pub fn new<K, V>(name: K, value: V, kind: ParameterKind) -> Self
    where
        K: Into<String>,
        V: ToParamValue,
    {
        Self {
            name: name.into(),
            value: value.to_param_value(),
            kind,
        }
    }
}

/// Values that can be used as a parameter value.
pub trait ToParamValue {
    /// Returns the textual form sent to the service.
    fn to_param_value(&self) -> String;
}

macro_rules! display_param_value {
    ($($t:ty),*) => {
        $(
            impl ToParamValue for $t {
                fn to_param_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_param_value!(str, String, i32, i64, u32, u64, usize, bool);

impl ToParamValue for NaiveDate {
    fn to_param_value(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl<T: ToParamValue + ?Sized> ToParamValue for &T {
    fn to_param_value(&self) -> String {
        (**self).to_param_value()
    }
}

/// An ordered collection of parameters for a request
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    inner: Vec<Parameter>,
}

impl Parameters {
    /// Creates a new empty collection of parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path-segment parameter
    pub fn segment<K: Into<String>, V: ToParamValue>(self, name: K, value: V) -> Self {
        self.param(Parameter::new(name, value, ParameterKind::PathSegment))
    }

    /// Adds a query-string parameter
    pub fn query<K: Into<String>, V: ToParamValue>(self, name: K, value: V) -> Self {
        self.param(Parameter::new(name, value, ParameterKind::QueryString))
    }

    /// Adds a query-string parameter if a value is present
    pub fn query_opt<K: Into<String>, V: ToParamValue>(self, name: K, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Adds a query option under its own key
    pub fn option<Q: QueryParameter>(self, option: Q) -> Self {
        self.query(Q::KEY, option.value())
    }

    /// Adds a query option if one is given
    pub fn option_opt<Q: QueryParameter>(self, option: Option<Q>) -> Self {
        match option {
            Some(option) => self.option(option),
            None => self,
        }
    }

    /// Adds a body-field parameter
    pub fn body<K: Into<String>, V: ToParamValue>(self, name: K, value: V) -> Self {
        self.param(Parameter::new(name, value, ParameterKind::BodyField))
    }

    /// Adds a parameter to the collection
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.inner.push(parameter);
        self
    }

    /// Adds a parameter to the collection in place
    pub fn push(&mut self, parameter: Parameter) {
        self.inner.push(parameter);
    }

    /// Returns all parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.inner.iter()
    }

    /// Returns the parameters of one kind in insertion order
    pub fn of_kind(&self, kind: ParameterKind) -> impl Iterator<Item = &Parameter> {
        self.inner.iter().filter(move |p| p.kind == kind)
    }

    /// Returns the value of the first parameter with this name and kind
    pub fn get(&self, name: &str, kind: ParameterKind) -> Option<&str> {
        self.of_kind(kind)
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Returns the number of parameters
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<T: IntoIterator<Item = Parameter>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl Extend<Parameter> for Parameters {
    fn extend<T: IntoIterator<Item = Parameter>>(&mut self, iter: T) {
        self.inner.extend(iter);
    }
}

impl IntoIterator for Parameters {
    type Item = Parameter;
    type IntoIter = std::vec::IntoIter<Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_stringified() {
        let date = NaiveDate::from_ymd_opt(2017, 3, 9).unwrap();
        let params = Parameters::new()
            .segment("bookId", 50_i64)
            .query("viewed", true)
            .query("q", "Ender's Game")
            .query_opt::<_, i32>("rating", None)
            .body("date", date);

        assert_eq!(params.len(), 4);
        assert_eq!(params.get("bookId", ParameterKind::PathSegment), Some("50"));
        assert_eq!(params.get("viewed", ParameterKind::QueryString), Some("true"));
        assert_eq!(params.get("q", ParameterKind::QueryString), Some("Ender's Game"));
        assert_eq!(params.get("date", ParameterKind::BodyField), Some("2017-03-09"));
        assert_eq!(params.get("bookId", ParameterKind::QueryString), None);
    }

    #[test]
    fn test_kinds_keep_insertion_order() {
        let params = Parameters::new()
            .query("b", 2)
            .segment("id", 1)
            .query("a", 1);

        let names: Vec<&str> = params
            .of_kind(ParameterKind::QueryString)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_options_use_their_key() {
        use crate::models::request::{OrderInfo, SortGroupList};

        let params = Parameters::new()
            .option(OrderInfo::Descending)
            .option_opt::<SortGroupList>(None);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("order", ParameterKind::QueryString), Some("d"));
    }
}

use crate::xml::XmlError;

/// Error type for the goodreads-rs crate.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum GoodreadsError {
    /// The client holds no user token, but an authorized client was requested.
    #[error("The credentials carry no OAuth user token.")]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::MissingCredentials))]
    MissingCredentials,

    /// A step of the OAuth handshake was answered with a non-success status.
    #[error("The authorization request failed with status {status}.")]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::Authorization))]
    Authorization {
        /// HTTP status code returned by the service.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The service answered a request with a status the operation cannot handle.
    #[error("The service responded with unexpected status {status}.")]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::UnexpectedStatus))]
    UnexpectedStatus {
        /// HTTP status code returned by the service.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// An endpoint template contains a placeholder without a matching path-segment parameter.
    #[error("No path-segment parameter for placeholder `{{{0}}}`.")]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::UnresolvedPlaceholder))]
    UnresolvedPlaceholder(String),

    /// The caller passed arguments the operation cannot be performed with.
    #[error("Invalid argument: {0}")]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::InvalidArgument))]
    InvalidArgument(String),

    /// The request to the server has failed.
    #[error(transparent)]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::ReqwestError))]
    ReqwestError(#[from] reqwest::Error),

    /// An invalid header value has been provided.
    #[error(transparent)]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::InvalidHeaderValue))]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    /// Url parsing error.
    #[error(transparent)]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::UrlParseError))]
    UrlParseError(#[from] url::ParseError),

    /// The response could not be read as XML.
    #[error(transparent)]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::XmlError))]
    XmlError(#[from] XmlError),

    /// The response could not be read as JSON.
    #[error(transparent)]
    #[diagnostic(code(goodreads_rs::error::GoodreadsError::JsonError))]
    JsonError(#[from] serde_json::Error),
}

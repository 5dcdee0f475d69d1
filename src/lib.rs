#![warn(missing_docs)]
#![crate_name = "goodreads_rs"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Goodreads Client
//!
//! `goodreads_rs` is a web client for the Goodreads API. It signs requests with OAuth 1.0a,
//! walks through the three-legged authorization handshake and hydrates the XML responses
//! into typed domain objects.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use goodreads_rs::GoodreadsClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = GoodreadsClient::builder()
//!         .credentials(goodreads_rs::Credentials::new("my-api-key", "my-api-secret"))
//!         .build();
//!
//!     let book = client.books().get_by_isbn("0812550706").await.expect("request failed");
//!     println!("{:#?}", book);
//!
//!     let request_token = client.begin_authorization(None).await.expect("handshake failed");
//!     println!("authorize at {:?}", request_token.authorize_url);
//!     // ... once the user has approved the request token:
//!     let access_token = client.complete_authorization(&request_token).await.expect("handshake failed");
//!     let client = client.authorize(&access_token).expect("access token incomplete");
//!     let updates = client.updates().friends(None, None, None).await.expect("request failed");
//!     println!("{:#?}", updates);
//! }
//! ```

extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate self as goodreads_rs;

/// Module containing the typed endpoint groups.
pub mod endpoints;
/// Module containing the error type.
pub mod error;
/// Module containing the macros.
pub mod macros;
/// Module containing the domain objects.
pub mod models;
/// Module containing the OAuth 1.0a signing and handshake helpers.
pub mod oauth;
/// Module containing request parameters.
pub mod params;
/// Module containing the request builder.
pub mod requests;
/// Module containing traits.
pub mod traits;
/// Module containing the XML response parser.
pub mod xml;

mod credentials;
/// Module containing common response types.
pub mod responses;

pub use oauth::{AccessToken, RequestToken};
pub use params::{ParameterKind, Parameters};
pub use requests::RequestSpec;
pub use reqwest::Method;
pub use responses::{PaginatedList, RawResult};
pub use traits::{Parseable, QueryParameter};

/// Module containing the client.
pub mod client;
pub use client::states::*;
pub use client::GoodreadsClient;
pub use credentials::Credentials;

/// Result type for the goodreads-rs crate.
pub type GrClientResult<T> = std::result::Result<T, error::GoodreadsError>;

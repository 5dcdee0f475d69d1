//! OAuth 1.0 request signing and the token types of the three-legged handshake.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use url::Url;

use crate::Credentials;

type HmacSha1 = Hmac<Sha1>;

/// The only signature method the service accepts.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// The protocol version sent with every signed request.
pub const OAUTH_VERSION: &str = "1.0";

/// Everything except the RFC 3986 unreserved characters.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A temporary token obtained in the first step of the handshake.
///
/// The tokens are `None` if the service omitted them from its reply; check them before
/// sending the user to `authorize_url`.
#[derive(Debug, Clone, Default)]
pub struct RequestToken {
    /// The request token.
    pub token: Option<String>,
    /// The request token secret.
    pub secret: Option<String>,
    /// The URL the user has to visit in order to grant access.
    pub authorize_url: Option<String>,
}

/// The token pair obtained in the last step of the handshake.
///
/// Persist it and pass it to [`Credentials::with_user_token`] on later runs.
#[derive(Debug, Clone, Default)]
pub struct AccessToken {
    /// The access token.
    pub token: Option<String>,
    /// The access token secret.
    pub secret: Option<String>,
}

/// Computes OAuth 1.0 `Authorization` headers for one key/token combination.
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: String,
    token: Option<String>,
    token_secret: Option<String>,
}

impl OAuthSigner {
    /// Signer for the request token step: consumer key only.
    pub fn for_request_token(credentials: &Credentials) -> OAuthSigner {
        OAuthSigner {
            consumer_key: credentials.api_key.clone(),
            consumer_secret: credentials.api_secret.clone(),
            token: None,
            token_secret: None,
        }
    }

    /// Signer for the access token step: consumer key plus the request token.
    pub fn for_access_token(credentials: &Credentials, request_token: &RequestToken) -> OAuthSigner {
        OAuthSigner {
            consumer_key: credentials.api_key.clone(),
            consumer_secret: credentials.api_secret.clone(),
            token: request_token.token.clone(),
            token_secret: request_token.secret.clone(),
        }
    }

    /// Signer for resource requests on behalf of a user.
    ///
    /// Returns `None` if the credentials carry no user token pair.
    pub fn for_protected_resource(credentials: &Credentials) -> Option<OAuthSigner> {
        let (token, token_secret) = credentials.user_token()?;
        Some(OAuthSigner {
            consumer_key: credentials.api_key.clone(),
            consumer_secret: credentials.api_secret.clone(),
            token: Some(token.to_string()),
            token_secret: Some(token_secret.to_string()),
        })
    }

    /// Builds the `Authorization` header value for a request, using a fresh nonce and the current time.
    ///
    /// `form_params` are the URL-encoded body fields of the request, if any; query
    /// parameters are taken from `url`.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &Url,
        form_params: &[(String, String)],
    ) -> String {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_header_with(method, url, form_params, &generate_nonce(), &timestamp)
    }

    /// Builds the `Authorization` header value with a fixed nonce and timestamp.
    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        form_params: &[(String, String)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let mut oauth_params = self.oauth_params(nonce, timestamp);
        let signature = self.signature(method, url, &oauth_params, form_params);
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let header_parts: Vec<String> = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect();

        format!("OAuth {}", header_parts.join(", "))
    }

    /// Computes the base64 HMAC-SHA1 signature of a request.
    pub fn signature(
        &self,
        method: &str,
        url: &Url,
        oauth_params: &[(String, String)],
        form_params: &[(String, String)],
    ) -> String {
        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        params.extend(oauth_params.iter().cloned());
        params.extend(form_params.iter().cloned());

        let base = signature_base_string(method, url, &params);
        tracing::trace!(signature_base = %base, "computed OAuth signature base string");

        sign(
            &base,
            &self.consumer_secret,
            self.token_secret.as_deref().unwrap_or(""),
        )
    }

    fn oauth_params(&self, nonce: &str, timestamp: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];
        if let Some(token) = &self.token {
            params.push(("oauth_token".to_string(), token.clone()));
        }
        params
    }
}

/// Builds the signature base string `METHOD&base-url&normalized-parameters`.
///
/// Parameters are encoded and then sorted by name and value, so the result does not
/// depend on the order they were added in.
pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_url(url)),
        percent_encode(&normalized)
    )
}

/// Signs a base string with `consumer_secret&token_secret`.
pub fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can accept any key length");
    mac.update(base.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Percent-encodes a string per RFC 3986.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// Reads `oauth_token` and `oauth_token_secret` from a URL-encoded handshake reply.
pub fn parse_token_response(body: &str) -> (Option<String>, Option<String>) {
    let mut token = None;
    let mut secret = None;
    for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        match key.as_ref() {
            "oauth_token" => token = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }
    (token, secret)
}

/// Scheme, authority and path of a URL, without query or fragment.
fn base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

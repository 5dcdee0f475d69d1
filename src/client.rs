use std::marker::PhantomData;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use typed_builder::TypedBuilder;
use url::Url;

use crate::client::states::*;
use crate::error::GoodreadsError;
use crate::oauth::{self, AccessToken, OAuthSigner, RequestToken};
use crate::params::{ParameterKind, Parameters};
use crate::requests::{DefaultParameters, RequestBuilder, RequestSpec, ResponseFormat};
use crate::responses::RawResult;
use crate::traits::Parseable;
use crate::xml::{parse_root, XmlDocument};
use crate::{Credentials, GrClientResult};

/// Origin of the Goodreads API.
pub const GOODREADS_URL: &str = "https://www.goodreads.com/";
/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "goodreads-rs";

const REQUEST_TOKEN_PATH: &str = "oauth/request_token";
const ACCESS_TOKEN_PATH: &str = "oauth/access_token";
const AUTHORIZE_PATH: &str = "oauth/authorize";

/// Characters escaped in substituted path segments.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The internal builder for constructing a `GoodreadsClient`
#[derive(TypedBuilder)]
#[builder(build_method(into = GoodreadsClient<Anonymous>))]
pub struct InternalGoodreadsClient {
    /// Application key pair, optionally with a user token pair
    credentials: Credentials,
    /// Origin of the API, including a trailing slash
    ///
    /// Example: `https://www.goodreads.com/`
    #[builder(
        default = Url::parse(GOODREADS_URL).expect("Failed to parse URL"),
        setter(transform = |url: &str| {
            let url = if url.ends_with('/') { url.to_string() } else { format!("{url}/") };
            Url::parse(&url).expect("Failed to parse URL")
        })
    )]
    base_url: Url,
    /// User agent sent with every request
    #[builder(default = DEFAULT_USER_AGENT.to_string(), setter(transform = |user_agent: &str| user_agent.to_string()))]
    user_agent: String,
    /// Timeout for the request, the HTTP client's default if unset
    #[builder(default, setter(strip_option))]
    timeout: Option<Duration>,
}

/// Contains the states the client can be in
pub mod states {
    /// The state of the client
    ///
    /// Anonymous: The client may or may not carry a user token, OAuth-only calls are unavailable
    #[derive(Debug, Clone, Copy)]
    pub struct Anonymous;
    /// The state of the client
    ///
    /// Authorized: The client carries a user token pair and signs every request
    #[derive(Debug, Clone, Copy)]
    pub struct Authorized;

    /// Marker trait for a client state
    pub trait AuthState {}

    impl AuthState for Anonymous {}
    impl AuthState for Authorized {}
}

/// The web client to consume the Goodreads API
#[derive(Debug, Clone)]
pub struct GoodreadsClient<State = Anonymous> {
    /// Origin of the API
    base_url: Url,
    /// Credentials of the client, never changed after construction
    credentials: Credentials,
    /// Builds request specs with the default parameters
    requests: RequestBuilder,
    /// Signs resource requests, present if the credentials carry a user token
    signer: Option<OAuthSigner>,
    /// The client
    client: reqwest::Client,

    state: PhantomData<State>,
}

impl From<InternalGoodreadsClient> for GoodreadsClient<Anonymous> {
    fn from(client: InternalGoodreadsClient) -> Self {
        let mut req_client = reqwest::Client::builder().user_agent(client.user_agent);
        if let Some(timeout) = client.timeout {
            req_client = req_client.timeout(timeout);
        }
        let req_client = req_client.build().expect("Failed to build client");

        GoodreadsClient::assemble(client.base_url, client.credentials, req_client)
    }
}

impl<State> GoodreadsClient<State> {
    fn assemble(base_url: Url, credentials: Credentials, client: reqwest::Client) -> Self {
        GoodreadsClient {
            requests: RequestBuilder::new(DefaultParameters::new(&credentials.api_key)),
            signer: OAuthSigner::for_protected_resource(&credentials),
            base_url,
            credentials,
            client,
            state: PhantomData,
        }
    }

    fn into_state<Next>(self, credentials: Credentials) -> GoodreadsClient<Next> {
        GoodreadsClient::assemble(self.base_url, credentials, self.client)
    }
}

impl GoodreadsClient {
    /// Creates a builder for the client
    pub fn builder() -> InternalGoodreadsClientBuilder {
        InternalGoodreadsClient::builder()
    }

    /// Obtains a request token and the URL the user has to visit to grant access.
    ///
    /// The tokens are `None` if the service's reply doesn't contain them.
    pub async fn begin_authorization(
        &self,
        callback_url: Option<&str>,
    ) -> GrClientResult<RequestToken> {
        let signer = OAuthSigner::for_request_token(&self.credentials);
        let body = self.handshake(REQUEST_TOKEN_PATH, &signer).await?;
        let (token, secret) = oauth::parse_token_response(&body);

        let authorize_url = match token.as_deref() {
            Some(token) => Some(self.authorize_url(token, callback_url)?),
            None => None,
        };

        Ok(RequestToken {
            token,
            secret,
            authorize_url,
        })
    }

    /// Exchanges an authorized request token for an access token.
    pub async fn complete_authorization(
        &self,
        request_token: &RequestToken,
    ) -> GrClientResult<AccessToken> {
        let signer = OAuthSigner::for_access_token(&self.credentials, request_token);
        let body = self.handshake(ACCESS_TOKEN_PATH, &signer).await?;
        let (token, secret) = oauth::parse_token_response(&body);

        Ok(AccessToken { token, secret })
    }

    /// Returns a client acting on behalf of the user who granted `access_token`.
    pub fn authorize(self, access_token: &AccessToken) -> GrClientResult<GoodreadsClient<Authorized>> {
        let (Some(token), Some(secret)) = (&access_token.token, &access_token.secret) else {
            return Err(GoodreadsError::MissingCredentials);
        };
        let credentials = self.credentials.clone().with_user_token(token, secret);
        self.into_state::<Anonymous>(credentials).into_authorized()
    }

    /// Promotes a client whose credentials already carry a user token pair.
    pub fn into_authorized(self) -> GrClientResult<GoodreadsClient<Authorized>> {
        if self.credentials.user_token().is_none() {
            return Err(GoodreadsError::MissingCredentials);
        }
        let credentials = self.credentials.clone();
        Ok(self.into_state(credentials))
    }

    fn authorize_url(&self, token: &str, callback_url: Option<&str>) -> GrClientResult<String> {
        let mut url = self.base_url.join(AUTHORIZE_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("oauth_token", token);
            if let Some(callback) = callback_url.filter(|c| !c.is_empty()) {
                pairs.append_pair("oauth_callback", callback);
            }
        }
        Ok(url.to_string())
    }

    async fn handshake(&self, path: &str, signer: &OAuthSigner) -> GrClientResult<String> {
        let url = self.base_url.join(path)?;
        let header = signer.authorization_header(Method::POST.as_str(), &url, &[]);
        tracing::debug!(%url, "requesting OAuth token");

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, HeaderValue::from_str(&header)?)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        if !(200..300).contains(&status) {
            return Err(GoodreadsError::Authorization { status, body });
        }
        Ok(body)
    }
}

impl GoodreadsClient<Authorized> {
    /// Returns the user token pair the client signs requests with.
    pub fn user_token(&self) -> (&str, &str) {
        self.credentials.user_token().unwrap_or(("", ""))
    }
}

impl<State: AuthState> GoodreadsClient<State> {
    /// Returns the credentials of the client.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds a request for an XML endpoint, with the default parameters applied.
    pub fn build(&self, template: &str, parameters: Parameters, method: Method) -> RequestSpec {
        self.requests.build(template, parameters, method)
    }

    /// Builds a GET request for a JSON-only endpoint, with the API key applied.
    pub fn build_json(&self, template: &str, parameters: Parameters) -> RequestSpec {
        self.requests.build_json(template, parameters)
    }

    /// Turns a request spec into an HTTP request: resolves placeholders, encodes the
    /// query, writes the body and signs the request if the client carries a user token.
    pub fn prepare(&self, spec: &RequestSpec) -> GrClientResult<reqwest::Request> {
        let path = resolve_template(&spec.template, &spec.parameters)?;
        let mut url = self.base_url.join(&path)?;

        let query: Vec<_> = spec.parameters.of_kind(ParameterKind::QueryString).collect();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for parameter in query {
                pairs.append_pair(&parameter.name, &parameter.value);
            }
        }

        let body = spec.serialize_body()?;
        if body.is_none() && spec.parameters.of_kind(ParameterKind::BodyField).next().is_some() {
            tracing::warn!(
                template = %spec.template,
                "dropping body-field parameters of a request without a body"
            );
        }

        let mut request = self.client.request(spec.method.clone(), url.clone());
        if let Some(signer) = &self.signer {
            let header = signer.authorization_header(spec.method.as_str(), &url, &[]);
            request = request.header(AUTHORIZATION, HeaderValue::from_str(&header)?);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/xml").body(body);
        }

        Ok(request.build()?)
    }

    /// Performs a request and returns the status and body untouched.
    pub async fn execute_raw(&self, spec: &RequestSpec) -> GrClientResult<RawResult> {
        let request = self.prepare(spec)?;
        tracing::debug!(
            method = %spec.method,
            template = %spec.template,
            expected_root = ?spec.expected_root,
            "sending request"
        );

        let response = self.client.execute(request).await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        tracing::debug!(status, template = %spec.template, "received response");

        Ok(RawResult {
            status,
            content_type,
            body,
        })
    }

    /// Performs a request and hydrates a `T` from the expected root of the response.
    ///
    /// A response without the expected root, an empty body or a body that is not XML
    /// yields `T::default()`, which is how missing resources are reported. Non-2xx
    /// responses are parsed as well, since some error bodies carry the root.
    pub async fn execute_typed<T: Parseable>(&self, spec: &RequestSpec) -> GrClientResult<T> {
        expect_format(spec, ResponseFormat::Xml)?;
        let raw = self.execute_raw(spec).await?;
        let root = spec.expected_root.as_deref().unwrap_or("");
        if !raw.is_success() {
            tracing::warn!(status = raw.status, root, "parsing response with non-success status");
        }

        if raw.body.trim().is_empty() {
            tracing::warn!(status = raw.status, root, "empty response body, returning default");
            return Ok(T::default());
        }

        let doc = match XmlDocument::parse(&raw.body) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(error = %err, root, "response is not XML, returning default");
                return Ok(T::default());
            }
        };

        Ok(parse_root::<T>(&doc, root).unwrap_or_else(|| {
            tracing::warn!(root, "expected root not found, returning default");
            T::default()
        }))
    }

    /// Performs a request against a JSON-only endpoint and deserializes the response.
    pub async fn execute_json<T: DeserializeOwned>(&self, spec: &RequestSpec) -> GrClientResult<T> {
        expect_format(spec, ResponseFormat::Json)?;
        let raw = self.execute_raw(spec).await?;
        if !raw.is_success() {
            return Err(GoodreadsError::UnexpectedStatus {
                status: raw.status,
                body: raw.body,
            });
        }
        Ok(serde_json::from_str(&raw.body)?)
    }
}

/// Rejects a request built for another response format before it is sent.
fn expect_format(spec: &RequestSpec, expected: ResponseFormat) -> GrClientResult<()> {
    if spec.format == expected {
        return Ok(());
    }
    Err(GoodreadsError::InvalidArgument(format!(
        "`{}` is built for a {:?} response, not {:?}",
        spec.template, spec.format, expected
    )))
}

/// Replaces every `{name}` placeholder with the encoded path-segment parameter `name`.
fn resolve_template(template: &str, parameters: &Parameters) -> GrClientResult<String> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + len];
        let value = parameters
            .get(name, ParameterKind::PathSegment)
            .ok_or_else(|| GoodreadsError::UnresolvedPlaceholder(name.to_string()))?;

        resolved.push_str(&rest[..open]);
        resolved.extend(utf8_percent_encode(value, PATH_SEGMENT));
        rest = &rest[open + len + 1..];
    }

    resolved.push_str(rest);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::XmlElement;

    fn anonymous() -> GoodreadsClient {
        GoodreadsClient::builder()
            .credentials(Credentials::new("api-key", "api-secret"))
            .build()
    }

    fn authorized() -> GoodreadsClient<Authorized> {
        GoodreadsClient::builder()
            .credentials(Credentials::new("api-key", "api-secret").with_user_token("tok", "tok-secret"))
            .base_url("http://localhost:8080")
            .build()
            .into_authorized()
            .unwrap()
    }

    #[test]
    fn test_resolve_template() {
        let params = Parameters::new()
            .segment("isbn", "0441172717")
            .segment("name", "a b/c")
            .query("isbn", "ignored");

        assert_eq!(
            resolve_template("book/isbn/{isbn}.xml", &params).unwrap(),
            "book/isbn/0441172717.xml"
        );
        assert_eq!(
            resolve_template("shelf/{name}", &params).unwrap(),
            "shelf/a%20b%2Fc"
        );
        assert_eq!(resolve_template("search", &params).unwrap(), "search");
    }

    #[test]
    fn test_resolve_template_missing_segment() {
        let params = Parameters::new().query("bookId", 1);
        let err = resolve_template("book/show/{bookId}.xml", &params).unwrap_err();
        assert!(matches!(err, GoodreadsError::UnresolvedPlaceholder(name) if name == "bookId"));
    }

    #[test]
    fn test_prepare_anonymous_request() {
        let client = anonymous();
        let spec = client.build(
            "book/show/{bookId}.xml",
            Parameters::new().segment("bookId", 50).query("text_only", true),
            Method::GET,
        );
        let request = client.prepare(&spec).unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://www.goodreads.com/book/show/50.xml?key=api-key&format=xml&text_only=true"
        );
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn test_prepare_signs_with_user_token() {
        let client = authorized();
        let spec = client.build(
            "group/join",
            Parameters::new().query("id", 1),
            Method::POST,
        );
        let request = client.prepare(&spec).unwrap();

        assert_eq!(request.url().host_str(), Some("localhost"));
        let header = request.headers().get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_token=\"tok\""));
        assert!(header.contains("oauth_consumer_key=\"api-key\""));
    }

    #[test]
    fn test_prepare_writes_xml_body() {
        let client = authorized();
        let spec = client
            .build(
                "review",
                Parameters::new().body("rating", 5),
                Method::POST,
            )
            .with_body(XmlElement::new("review"));
        let request = client.prepare(&spec).unwrap();

        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/xml"
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert!(String::from_utf8_lossy(body).ends_with("<review><rating>5</rating></review>"));
    }

    #[test]
    fn test_json_spec_has_no_format() {
        let client = anonymous();
        let spec = client.build_json(
            "book/review_counts.json",
            Parameters::new().query("isbns", "1,2"),
        );
        let request = client.prepare(&spec).unwrap();
        assert_eq!(
            request.url().query(),
            Some("key=api-key&isbns=1%2C2")
        );
    }

    #[test]
    fn test_authorize_requires_tokens() {
        let missing = AccessToken {
            token: Some("t".to_string()),
            secret: None,
        };
        assert!(matches!(
            anonymous().authorize(&missing),
            Err(GoodreadsError::MissingCredentials)
        ));
        assert!(matches!(
            anonymous().into_authorized(),
            Err(GoodreadsError::MissingCredentials)
        ));

        let granted = AccessToken {
            token: Some("t".to_string()),
            secret: Some("s".to_string()),
        };
        let client = anonymous().authorize(&granted).unwrap();
        assert_eq!(client.user_token(), ("t", "s"));
    }

    #[test]
    fn test_authorize_url() {
        let client = anonymous();
        assert_eq!(
            client.authorize_url("abc", Some("https://app.example/cb")).unwrap(),
            "https://www.goodreads.com/oauth/authorize?oauth_token=abc&oauth_callback=https%3A%2F%2Fapp.example%2Fcb"
        );
        assert_eq!(
            client.authorize_url("abc", None).unwrap(),
            "https://www.goodreads.com/oauth/authorize?oauth_token=abc"
        );
    }
}

//! Base request client
//!
//! Every resource service goes through [`BaseClient::do_request`]: it joins
//! the relative path onto the API URL, attaches the auth token and user
//! agent, performs exactly one HTTP exchange and maps error responses onto
//! [`ErrorKind`].

use std::fmt;
use std::sync::Arc;

use iam_core::{AuthMethod, Error, ErrorKind, Result};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Header carrying the Keystone token
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// A single API call: method, path relative to the API URL, optional JSON body
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attach an already encoded JSON body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Error body returned by the API for failing calls
///
/// Missing and `null` fields decode as empty strings.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Shared state behind every service: transport, API URL, auth, user agent
///
/// Read-only after construction; clone the surrounding `Arc` to share it.
pub struct BaseClient {
    http: reqwest::Client,
    api_url: Url,
    auth: Arc<dyn AuthMethod>,
    user_agent: String,
}

impl BaseClient {
    pub(crate) fn new(
        http: reqwest::Client,
        api_url: Url,
        auth: Arc<dyn AuthMethod>,
        user_agent: String,
    ) -> Self {
        Self {
            http,
            api_url,
            auth,
            user_agent,
        }
    }

    /// API base URL
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Perform one API call and return the raw response body
    ///
    /// Responses with status >= 400 are decoded into an [`Error`]. Network
    /// failures and cancellation of `ctx` yield
    /// [`ErrorKind::InternalAppError`]. No retries are made.
    pub async fn do_request(
        &self,
        ctx: &CancellationToken,
        request: RequestDescriptor,
    ) -> Result<Vec<u8>> {
        if ctx.is_cancelled() {
            return Err(Error::transport("request cancelled"));
        }

        let url = join_url(&self.api_url, &request.path)?;
        let RequestDescriptor { method, body, .. } = request;

        tracing::debug!(%method, %url, has_body = body.is_some(), "sending request");

        let exchange = async {
            let token = self.auth.token().await?;

            let mut builder = self
                .http
                .request(method.clone(), url.clone())
                .header(AUTH_TOKEN_HEADER, token)
                .header(USER_AGENT, self.user_agent.as_str());

            if let Some(body) = body {
                builder = builder.header(CONTENT_TYPE, "application/json").body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Error::transport(e.to_string()))?;
            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::transport(e.to_string()))?;
            Ok::<_, Error>((status, bytes))
        };

        let (status, bytes) = tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                tracing::warn!(%method, %url, "request cancelled");
                return Err(Error::transport("request cancelled"));
            }
            result = exchange => result.inspect_err(|e| {
                tracing::warn!(%method, %url, error = %e, "request failed");
            })?,
        };

        tracing::debug!(%method, %url, status = status.as_u16(), bytes = bytes.len(), "received response");

        if status.as_u16() >= 400 {
            let error = decode_error(status, &bytes);
            tracing::warn!(%method, %url, status = status.as_u16(), code = error.kind().as_str(), "API returned error");
            return Err(error);
        }

        Ok(bytes.to_vec())
    }
}

impl fmt::Debug for BaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseClient")
            .field("api_url", &self.api_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("auth", &"<redacted>")
            .finish()
    }
}

/// Append the segments of `path` to `base`
///
/// The base must be able to carry path segments. A trailing slash on the base
/// is not treated as a segment and empty segments are dropped; `.` and `..`
/// are rejected instead of being resolved.
pub(crate) fn join_url(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| Error::internal(format!("API URL '{base}' cannot carry a path")))?;
        segments.pop_if_empty();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(Error::internal(format!(
                    "Path '{path}' contains a relative segment"
                )));
            }
            segments.push(segment);
        }
    }
    tracing::trace!(%base, path, %url, "joined url");
    Ok(url)
}

/// Map an error response onto an [`Error`]
///
/// 401 is always [`ErrorKind::AuthTokenUnauthorized`] with the raw body as
/// description. Other bodies must be `{"code": .., "message": ..}` or `null`.
pub(crate) fn decode_error(status: StatusCode, body: &[u8]) -> Error {
    let status_code = status.as_u16();

    if status == StatusCode::UNAUTHORIZED {
        return Error::server(
            ErrorKind::AuthTokenUnauthorized,
            String::from_utf8_lossy(body),
            status_code,
        );
    }

    let envelope = match serde_json::from_slice::<Option<ErrorEnvelope>>(body) {
        Ok(envelope) => envelope.unwrap_or_default(),
        Err(e) => return Error::server(ErrorKind::InternalAppError, e.to_string(), status_code),
    };
    let code = envelope.code.unwrap_or_default();
    let message = envelope.message.unwrap_or_default();

    match ErrorKind::from_code(&code) {
        Some(kind) => Error::server(kind, message, status_code),
        None => Error::server(
            ErrorKind::Unknown,
            format!("{code} -- {message}"),
            status_code,
        ),
    }
}

pub(crate) fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub(crate) fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use iam_core::KeystoneTokenAuth;
    use wiremock::matchers::{any, body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(api_url: &str) -> BaseClient {
        BaseClient::new(
            reqwest::Client::new(),
            Url::parse(api_url).unwrap(),
            Arc::new(KeystoneTokenAuth::new("test-token")),
            "iam-rs/test".to_string(),
        )
    }

    #[test]
    fn test_join_url_appends_segments() {
        let base = Url::parse("http://example.org/").unwrap();
        let url = join_url(&base, "iam/v1/users").unwrap();
        assert_eq!(url.as_str(), "http://example.org/iam/v1/users");
    }

    #[test]
    fn test_join_url_keeps_base_path() {
        let base = Url::parse("http://example.org/api").unwrap();
        let url = join_url(&base, "iam/v1/users").unwrap();
        assert_eq!(url.as_str(), "http://example.org/api/iam/v1/users");

        let base = Url::parse("http://example.org/api/").unwrap();
        let url = join_url(&base, "/iam//v1/users/").unwrap();
        assert_eq!(url.as_str(), "http://example.org/api/iam/v1/users");
    }

    #[test]
    fn test_join_url_rejects_relative_segments() {
        let base = Url::parse("http://example.org/").unwrap();
        let err = join_url(&base, "iam/v1/users/../groups").unwrap_err();
        assert!(err.is(ErrorKind::InternalAppError));
        assert!(join_url(&base, "./users").is_err());
    }

    #[test]
    fn test_join_url_rejects_opaque_base() {
        let base = Url::parse("mailto:ops@example.org").unwrap();
        let err = join_url(&base, "users").unwrap_err();
        assert!(err.is(ErrorKind::InternalAppError));
    }

    #[test]
    fn test_decode_error_unauthorized_keeps_raw_body() {
        let err = decode_error(StatusCode::UNAUTHORIZED, b"<html>nope</html>");
        assert!(err.is(ErrorKind::AuthTokenUnauthorized));
        assert_eq!(err.description(), "<html>nope</html>");
        assert_eq!(err.status(), Some(401));

        let err = decode_error(
            StatusCode::UNAUTHORIZED,
            br#"{"code":"REQUEST_FORBIDDEN","message":"x"}"#,
        );
        assert!(err.is(ErrorKind::AuthTokenUnauthorized));
    }

    #[test]
    fn test_decode_error_known_code() {
        let err = decode_error(
            StatusCode::FORBIDDEN,
            br#"{"code":"REQUEST_FORBIDDEN","message":"nope"}"#,
        );
        assert!(err.is(ErrorKind::Forbidden));
        assert_eq!(err.description(), "nope");
    }

    #[test]
    fn test_decode_error_unknown_code() {
        let err = decode_error(
            StatusCode::BAD_REQUEST,
            br#"{"code":"TOTALLY_NEW","message":"something"}"#,
        );
        assert!(err.is(ErrorKind::Unknown));
        assert!(err.description().contains("TOTALLY_NEW"));
        assert!(err.description().contains("something"));
    }

    #[test]
    fn test_decode_error_null_message_keeps_kind() {
        let err = decode_error(
            StatusCode::NOT_FOUND,
            br#"{"code":"USER_NOT_FOUND","message":null}"#,
        );
        assert!(err.is(ErrorKind::UserNotFound));
        assert_eq!(err.description(), "");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_decode_error_missing_code() {
        let err = decode_error(StatusCode::BAD_REQUEST, br#"{"message":"m"}"#);
        assert!(err.is(ErrorKind::Unknown));
        assert_eq!(err.description(), " -- m");
    }

    #[test]
    fn test_decode_error_null_body() {
        let err = decode_error(StatusCode::BAD_GATEWAY, b"null");
        assert!(err.is(ErrorKind::Unknown));
        assert_eq!(err.description(), " -- ");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_decode_error_malformed_body() {
        let err = decode_error(StatusCode::INTERNAL_SERVER_ERROR, b"upstream timeout");
        assert!(err.is(ErrorKind::InternalAppError));
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_get_sends_auth_and_user_agent_without_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iam/v1/users"))
            .and(header(AUTH_TOKEN_HEADER, "test-token"))
            .and(header("user-agent", "iam-rs/test"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"users":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let body = client
            .do_request(
                &CancellationToken::new(),
                RequestDescriptor::new(Method::GET, "iam/v1/users"),
            )
            .await
            .unwrap();
        assert_eq!(body, br#"{"users":[]}"#);

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("content-type").is_none());
    }

    #[tokio::test]
    async fn test_delete_and_head_have_no_content_type() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(204))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let ctx = CancellationToken::new();
        for verb in [Method::DELETE, Method::HEAD] {
            let body = client
                .do_request(&ctx, RequestDescriptor::new(verb, "v1/federations/saml/1"))
                .await
                .unwrap();
            assert!(body.is_empty());
        }

        for request in server.received_requests().await.unwrap() {
            assert!(request.headers.get("content-type").is_none());
        }
    }

    #[tokio::test]
    async fn test_body_sets_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/iam/v1/groups"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"name": "ops"})))
            .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let request = RequestDescriptor::new(Method::POST, "iam/v1/groups")
            .with_body(br#"{"name":"ops"}"#.to_vec());
        client
            .do_request(&CancellationToken::new(), request)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_success_returns_exact_bytes() {
        let server = MockServer::start().await;
        let payload: &[u8] = b"\x00not json at all\xff";
        Mock::given(any())
            .respond_with(ResponseTemplate::new(202).set_body_bytes(payload))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let body = client
            .do_request(
                &CancellationToken::new(),
                RequestDescriptor::new(Method::GET, "anything"),
            )
            .await
            .unwrap();
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .do_request(
                &CancellationToken::new(),
                RequestDescriptor::new(Method::GET, "iam/v1/roles"),
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::AuthTokenUnauthorized));
        assert_eq!(err.description(), "token expired");
    }

    #[tokio::test]
    async fn test_forbidden_response() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string(r#"{"code":"REQUEST_FORBIDDEN","message":"nope"}"#),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .do_request(
                &CancellationToken::new(),
                RequestDescriptor::new(Method::GET, "iam/v1/roles"),
            )
            .await
            .unwrap_err();
        assert_eq!(err, ErrorKind::Forbidden);
        assert_eq!(err.description(), "nope");
        assert_eq!(err.to_string(), "iam: REQUEST_FORBIDDEN: nope");
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_skips_network() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let ctx = CancellationToken::new();
        ctx.cancel();

        let err = client
            .do_request(&ctx, RequestDescriptor::new(Method::GET, "iam/v1/users"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InternalAppError));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_cancel_during_exchange_returns_promptly() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let ctx = CancellationToken::new();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let err = client
            .do_request(&ctx, RequestDescriptor::new(Method::GET, "slow"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InternalAppError));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_transport_failure_is_internal_app_error() {
        // Nothing listens on port 1
        let client = test_client("http://127.0.0.1:1/");
        let err = client
            .do_request(
                &CancellationToken::new(),
                RequestDescriptor::new(Method::GET, "iam/v1/users"),
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InternalAppError));
        assert!(err.is_transport());
        assert!(!err.description().is_empty());
    }

    #[test]
    fn test_debug_hides_auth() {
        let client = test_client("http://example.org/");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("example.org"));
    }
}

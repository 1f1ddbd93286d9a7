// Resource API HTTP client
//
// Wraps `reqwest::Client` with URL construction against the configured
// API base, CSRF header attachment from the session cookie jar, and the
// single response normalization path every operation goes through.
// Typed per-resource methods live in `resources/`.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::endpoints::Endpoints;
use crate::envelope::{ListResponse, Payload};
use crate::error::Error;
use crate::request::{QueryParams, ResourceKind};
use crate::transport::TransportConfig;

/// Cookie the backend issues the anti-forgery token in.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the backend expects the anti-forgery token echoed back in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Cookie holding the authenticated session id.
pub const SESSION_COOKIE: &str = "sessionid";

/// Async client for the blog REST API.
///
/// Stateless apart from the cookie jar: every call is translated into
/// exactly one HTTP request and its response into either a payload or an
/// [`Error`]. Authentication rides on the session cookie, never on an
/// explicit token.
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    /// Shared with `http`; read for the CSRF token and session presence.
    cookie_jar: Option<Arc<Jar>>,
}

impl ApiClient {
    /// Create a client from resolved endpoints and a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (session auth and CSRF both require cookies).
    pub fn new(endpoints: Endpoints, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            endpoints,
            cookie_jar,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Without a jar reference the client cannot read the CSRF cookie, so
    /// unsafe requests go out without `X-CSRFToken`.
    pub fn with_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self {
            http,
            endpoints,
            cookie_jar: None,
        }
    }

    /// The underlying HTTP client (for the session login flow).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Look up a cookie value the jar would send to `url`.
    pub fn cookie(&self, url: &Url, name: &str) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let header = jar.cookies(url)?;
        let raw = header.to_str().ok()?;
        raw.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_owned())
        })
    }

    /// The current CSRF token for the API origin, if the backend issued one.
    pub fn csrf_token(&self) -> Option<String> {
        self.cookie(self.endpoints.api_base(), CSRF_COOKIE)
    }

    // ── Request construction ─────────────────────────────────────────

    /// Start a request, attaching `X-CSRFToken` to everything except a
    /// plain anonymous read.
    ///
    /// A read counts as authenticated when the jar would send a session
    /// cookie to `url`.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{method} {url}");
        let safe_method = matches!(method, Method::GET | Method::HEAD | Method::OPTIONS);
        let token = if safe_method && self.cookie(&url, SESSION_COOKIE).is_none() {
            None
        } else {
            self.cookie(&url, CSRF_COOKIE)
        };
        let builder = self.http.request(method, url);
        match token {
            Some(token) => {
                trace!("attaching CSRF token");
                builder.header(CSRF_HEADER, token)
            }
            None => builder,
        }
    }

    /// Send a prepared request and normalize its response.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Payload, Error> {
        let resp = builder.send().await?;
        normalize_response(resp).await
    }

    /// Send an arbitrary request against a path relative to the API base.
    ///
    /// Escape hatch for endpoints without a typed wrapper; goes through the
    /// same CSRF and normalization handling as every other call.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        body: Option<&serde_json::Value>,
    ) -> Result<Payload, Error> {
        let url = self.endpoints.api_url(path)?;
        let mut builder = self.request(method, url);
        if !params.is_empty() {
            builder = builder.query(params.as_slice());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, Error> {
        self.send_raw(Method::GET, path, params, None)
            .await?
            .into_json()
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.endpoints.api_url(path)?;
        let builder = self.request(method, url).json(body);
        self.execute(builder).await?.into_json()
    }

    // ── Generic resource operations ──────────────────────────────────

    /// `GET /{kind}/?{params}`
    pub async fn list<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        params: &QueryParams,
    ) -> Result<ListResponse<T>, Error> {
        self.get_json(&kind.collection_path(), params).await
    }

    /// `GET /{kind}/{id}/`
    pub async fn get<T: DeserializeOwned>(&self, kind: ResourceKind, id: i64) -> Result<T, Error> {
        self.get_json(&kind.item_path(id), &QueryParams::new())
            .await
    }

    /// `POST /{kind}/`
    pub async fn create<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        kind: ResourceKind,
        body: &B,
    ) -> Result<T, Error> {
        self.send_json(Method::POST, &kind.collection_path(), body)
            .await
    }

    /// `PUT /{kind}/{id}/` (full replace)
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        kind: ResourceKind,
        id: i64,
        body: &B,
    ) -> Result<T, Error> {
        self.send_json(Method::PUT, &kind.item_path(id), body).await
    }

    /// `PATCH /{kind}/{id}/`
    pub async fn partial_update<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        kind: ResourceKind,
        id: i64,
        body: &B,
    ) -> Result<T, Error> {
        self.send_json(Method::PATCH, &kind.item_path(id), body)
            .await
    }

    /// `DELETE /{kind}/{id}/`. Any success body is discarded.
    pub async fn delete(&self, kind: ResourceKind, id: i64) -> Result<(), Error> {
        self.send_raw(Method::DELETE, &kind.item_path(id), &QueryParams::new(), None)
            .await
            .map(|_| ())
    }
}

// ── Response normalization ───────────────────────────────────────────

/// Turn any response into a payload or a [`Error::RequestFailed`].
///
/// Failure statuses become a message; success bodies are parsed as JSON
/// only when the content type says so.
pub(crate) async fn normalize_response(resp: reqwest::Response) -> Result<Payload, Error> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = failure_message(status, &body);
        debug!(status = status.as_u16(), %message, "request failed");
        return Err(Error::RequestFailed {
            status: status.as_u16(),
            message,
        });
    }

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    let body = resp.text().await?;

    if !content_type.contains("json") {
        return Ok(Payload::Text { content_type, body });
    }

    if body.trim().is_empty() {
        return Ok(Payload::Json(serde_json::Value::Null));
    }

    serde_json::from_str(&body).map(Payload::Json).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Pick the most specific message a failed response offers.
///
/// `detail`/`message` string field of a JSON object, then the raw body,
/// then the status line.
fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        let field = ["detail", "message"]
            .iter()
            .find_map(|key| map.get(*key).and_then(serde_json::Value::as_str));
        if let Some(message) = field {
            return message.to_owned();
        }
    }

    if !body.is_empty() {
        return body.to_owned();
    }

    format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_detail() {
        let msg = failure_message(
            StatusCode::UNAUTHORIZED,
            r#"{"detail":"Authentication required"}"#,
        );
        assert_eq!(msg, "Authentication required");
    }

    #[test]
    fn failure_message_falls_back_to_message_field() {
        let msg = failure_message(StatusCode::BAD_REQUEST, r#"{"message":"bad input"}"#);
        assert_eq!(msg, "bad input");
    }

    #[test]
    fn failure_message_uses_raw_json_without_known_fields() {
        let body = r#"{"name":["This field is required."]}"#;
        assert_eq!(failure_message(StatusCode::BAD_REQUEST, body), body);
    }

    #[test]
    fn failure_message_uses_raw_text() {
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn failure_message_falls_back_to_status_line() {
        assert_eq!(
            failure_message(StatusCode::NOT_FOUND, ""),
            "HTTP 404: Not Found"
        );
    }

    #[test]
    fn csrf_token_read_from_jar() {
        let jar = Arc::new(Jar::default());
        let endpoints = Endpoints::for_environment(crate::Environment::Development, None)
            .unwrap();
        jar.add_cookie_str("csrftoken=tok123; Path=/", endpoints.api_base());

        let transport = TransportConfig {
            cookie_jar: Some(Arc::clone(&jar)),
            ..TransportConfig::default()
        };
        let client = ApiClient::new(endpoints, &transport).unwrap();
        assert_eq!(client.csrf_token().as_deref(), Some("tok123"));
    }

    #[test]
    fn csrf_token_absent_without_jar() {
        let endpoints = Endpoints::for_environment(crate::Environment::Development, None)
            .unwrap();
        let client = ApiClient::with_client(reqwest::Client::new(), endpoints);
        assert!(client.csrf_token().is_none());
    }
}

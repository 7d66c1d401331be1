//! Shared request execution.
//!
//! Every public operation describes itself as a [`Call`] and runs through
//! [`Transport::send`], which owns the success/error contract: 2xx bodies must
//! parse as the expected type, anything else becomes a
//! [`QuantlixError::Request`] carrying the server's `detail`.

use crate::error::QuantlixError;
use reqwest::header::HeaderValue;
use reqwest::{Client, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Header carrying the API key on authenticated requests.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// A single API call relative to the base URL.
///
/// Not `Debug`: the body may hold a password.
pub(crate) struct Call {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl Call {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub(crate) fn query_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub(crate) fn json<B: Serialize>(mut self, body: &B) -> Result<Self, QuantlixError> {
        let value = serde_json::to_value(body)
            .map_err(|e| QuantlixError::InvalidRequest(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// HTTP transport bound to one base URL.
#[derive(Clone, Debug)]
pub(crate) struct Transport {
    http: Client,
    base_url: String,
}

impl Transport {
    pub(crate) fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, QuantlixError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: normalize_base_url(base_url),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a call and decode the 2xx body as `T`.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        call: Call,
        api_key: Option<&SecretString>,
    ) -> Result<T, QuantlixError> {
        let url = format!("{}{}", self.base_url, call.path);
        let mut request = self.http.request(call.method.clone(), url);

        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, api_key_header(key)?);
        }
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(
            method = %call.method,
            path = %call.path,
            status = status.as_u16(),
            "Quantlix API response"
        );

        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(request_error(status, &body));
        }

        serde_json::from_slice(&body).map_err(|source| QuantlixError::MalformedResponse {
            path: call.path,
            source,
        })
    }
}

/// Strip trailing slashes so `http://host/` and `http://host` build identical URLs.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Percent-encode a caller-supplied ID for use as a single path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Build the key header, marked sensitive so it is never rendered by `Debug`.
pub(crate) fn api_key_header(key: &SecretString) -> Result<HeaderValue, QuantlixError> {
    let mut value =
        HeaderValue::from_str(key.expose_secret()).map_err(|_| QuantlixError::InvalidApiKey)?;
    value.set_sensitive(true);
    Ok(value)
}

fn request_error(status: StatusCode, body: &[u8]) -> QuantlixError {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| json.get("detail").cloned())
        .and_then(|detail| match detail {
            Value::Null => None,
            Value::String(s) => Some(s),
            // FastAPI validation errors arrive as a list of objects
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| status.to_string());

    QuantlixError::Request {
        status: status.as_u16(),
        detail,
    }
}

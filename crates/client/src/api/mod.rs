//! Typed HTTP client for the storefront REST API.
//!
//! One method per endpoint, grouped by area in the submodules. Every request
//! carries the bearer token when one is set. Non-success responses become
//! [`ClientError::Api`] with the server's `detail` message, or the caller's
//! fallback when the body carries none.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod orders;

/// Body returned by mutation endpoints that do not echo the entity back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut client = Self::new(base_url);
        client.token = Some(token.into());
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send and decode a JSON body.
    async fn send<T>(&self, req: RequestBuilder, fallback: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let resp = self.dispatch(req, fallback).await?;
        resp.json::<T>()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// Send and discard whatever body comes back.
    async fn send_empty(&self, req: RequestBuilder, fallback: &str) -> ClientResult<()> {
        self.dispatch(req, fallback).await.map(|_| ())
    }

    async fn dispatch(&self, req: RequestBuilder, fallback: &str) -> ClientResult<Response> {
        let resp = req
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = extract_detail(&body).unwrap_or_else(|| fallback.to_string());
        tracing::warn!(status = status.as_u16(), %detail, "request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Pull the human-readable message out of a `{"detail": ...}` error body.
///
/// `detail` is either a string or a list of validation errors carrying `msg`.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        serde_json::Value::Array(errors) => {
            let msgs: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}

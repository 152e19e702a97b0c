use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use crate::{
    config::StorefrontConfig,
    error::{ApiError, ApiResult},
    response::{error_message, peel_envelope},
};

/// The one HTTP wrapper every other component calls through. Owns the base
/// URL and bearer-token attachment; clones share the token so any widget
/// holding a handle sees a sign-in immediately.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(config: &StorefrontConfig) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        // A trailing slash keeps Url::join from eating the last path segment.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .map_err(|err| ApiError::Config(anyhow::anyhow!("invalid base url: {err}")))?;

        Ok(Self {
            http,
            base,
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Gate for privileged operations: fail before any network dispatch when
    /// no token is stored, so the caller can redirect to login.
    pub async fn require_token(&self) -> ApiResult<()> {
        if self.has_token().await {
            Ok(())
        } else {
            Err(ApiError::AuthRequired)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(Method::GET, path, None, None).await?;
        decode(body)
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let body = self.send(Method::GET, path, Some(query), None).await?;
        decode(body)
    }

    /// Raw body for endpoints whose shape is not uniform; callers normalize.
    pub async fn get_raw(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        self.send(Method::GET, path, Some(query), None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let payload = serde_json::to_value(body)?;
        let body = self.send(Method::POST, path, None, Some(payload)).await?;
        decode(body)
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let payload = serde_json::to_value(body)?;
        let body = self.send(Method::PUT, path, None, Some(payload)).await?;
        decode(body)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(Method::DELETE, path, None, None).await?;
        decode(body)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!(%method, %url, "dispatching request");

        let mut request = self.http.request(method, url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthRequired);
        }

        let text = response.text().await?;
        let parsed: Value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: error_message(&parsed, fallback),
            });
        }

        Ok(parsed)
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::Config(anyhow::anyhow!("invalid request path {path}: {err}")))
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    Ok(serde_json::from_value(peel_envelope(body))?)
}

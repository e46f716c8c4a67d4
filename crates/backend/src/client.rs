//! HTTP transport for the remote service.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use opi_core::Principal;

use crate::BackendError;
use crate::cache::{CacheKey, CacheValue};

/// Remote service endpoint configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the service, e.g. `https://api.okpi.example`.
    pub base_url: Url,
    /// API version path segment (e.g. `v1`).
    pub api_version: String,
}

/// Client for the remote data/identity service.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the
/// response cache. A clone carrying a caller principal (see
/// [`with_principal`](Self::with_principal)) still shares both.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_version: String,
    principal: Option<Principal>,
    cache: Cache<CacheKey, CacheValue>,
}

impl BackendClient {
    /// Create a new client for the given endpoint.
    ///
    /// No request timeout is configured on purpose: a hung remote call
    /// leaves the caller's decision at pending, which is the accepted
    /// degraded mode for this service.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_version: config.api_version.clone(),
                principal: None,
                cache,
            }),
        }
    }

    /// A clone of this client that forwards the given caller principal
    /// with every request.
    #[must_use]
    pub fn with_principal(&self, principal: Principal) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: self.inner.client.clone(),
                base_url: self.inner.base_url.clone(),
                api_version: self.inner.api_version.clone(),
                principal: Some(principal),
                cache: self.inner.cache.clone(),
            }),
        }
    }

    /// The principal this client forwards, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.inner.principal.as_ref()
    }

    /// Call a named service method with JSON-serializable arguments.
    pub(crate) async fn call<T, A>(&self, method: &str, args: &A) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
        A: Serialize + ?Sized,
    {
        let endpoint = format!(
            "{}api/{}/{method}",
            self.inner.base_url, self.inner.api_version
        );
        let request_id = uuid::Uuid::new_v4();

        debug!(%method, %request_id, "calling backend");

        let mut request = self
            .inner
            .client
            .post(&endpoint)
            .header("X-Request-Id", request_id.to_string())
            .json(args);

        if let Some(principal) = &self.inner.principal {
            request = request.header("X-Caller-Principal", principal.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(BackendError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(method.to_owned()));
        }

        if !status.is_success() {
            tracing::error!(
                %method,
                %request_id,
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "backend returned non-success status"
            );
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(
                    %method,
                    %request_id,
                    error = %err,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "failed to parse backend response"
                );
                Err(BackendError::Parse(err))
            }
        }
    }

    /// Call a method whose result we discard.
    pub(crate) async fn call_unit<A>(&self, method: &str, args: &A) -> Result<(), BackendError>
    where
        A: Serialize + ?Sized,
    {
        self.call::<serde_json::Value, A>(method, args).await?;
        Ok(())
    }

    /// The shared response cache for list endpoints.
    pub(crate) fn cache(&self) -> &Cache<CacheKey, CacheValue> {
        &self.inner.cache
    }

    /// Drop cached entries touched by a mutation.
    pub(crate) async fn invalidate(&self, keys: &[CacheKey]) {
        for key in keys {
            self.inner.cache.invalidate(key).await;
        }
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("api_version", &self.inner.api_version)
            .field("principal", &self.inner.principal)
            .finish_non_exhaustive()
    }
}

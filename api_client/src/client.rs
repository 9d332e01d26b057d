//! Request pipeline
//!
//! GET requests go through the response cache unless marked with
//! [`RequestOptions::skip_cache`]. Successful payloads are written back under
//! the same key. A `401` triggers at most one refresh-and-retry per request;
//! a second `401` or a failed refresh logs the session out.

use crate::errors::ApiError;
use crate::storage::TokenStorage;
use cache_system::CacheManager;
use config::ApiConfig;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use type_mapping::ParamMap;
use url::Url;

/// Storage key of the bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

type LogoutHook = Box<dyn Fn() + Send + Sync>;

/// Per-request options
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Bypass the response cache for this request (the result is still stored)
    pub skip_cache: bool,
}

impl RequestOptions {
    pub fn skip_cache() -> Self {
        Self { skip_cache: true }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

pub struct ApiClient {
    http: Client,
    base_url: Url,
    refresh_url: Url,
    cache: CacheManager,
    storage: Arc<dyn TokenStorage>,
    logout_hooks: RwLock<Vec<LogoutHook>>,
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("cache", &self.cache)
            .field("storage", &self.storage)
            .finish()
    }
}

impl ApiClient {
    /// Build the client. The refresh credential travels as a cookie, so the
    /// underlying client keeps a cookie store.
    pub fn new(
        config: &ApiConfig,
        cache: CacheManager,
        storage: Arc<dyn TokenStorage>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)?;
        let refresh_url = base_url.join(config.refresh_path.trim_start_matches('/'))?;

        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            refresh_url,
            cache,
            storage,
            logout_hooks: RwLock::new(Vec::new()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Register a side effect to run when the session is logged out
    pub fn on_logout<F>(&self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if let Ok(mut hooks) = self.logout_hooks.write() {
            hooks.push(Box::new(hook));
        }
    }

    pub fn access_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.storage.get(ACCESS_TOKEN_KEY)?)
    }

    pub fn set_access_token(&self, token: &str) -> Result<(), ApiError> {
        Ok(self.storage.set(ACCESS_TOKEN_KEY, token)?)
    }

    /// Resolve an endpoint path against the versioned base URL
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// GET `path` with `params` and decode the JSON payload
    pub async fn get_json<T>(&self, path: &str, params: &ParamMap) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.get_with(path, params, RequestOptions::default()).await
    }

    pub async fn get_with<T>(
        &self,
        path: &str,
        params: &ParamMap,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let payload = self.get_value(path, params, options).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// GET `path` and return the raw JSON payload
    pub async fn get_value(
        &self,
        path: &str,
        params: &ParamMap,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        let cache_key = CacheManager::build_key(url.as_str(), params);

        if !options.skip_cache {
            if let Some(cached) = self.cache.get(&cache_key).await {
                return Ok(cached);
            }
        }

        tracing::debug!(url = %url, params = %params.to_json(), "GET");
        let payload = self.send_authorized(&url, params).await?;
        self.cache.set(&cache_key, payload.clone()).await;
        Ok(payload)
    }

    async fn send_authorized(&self, url: &Url, params: &ParamMap) -> Result<Value, ApiError> {
        let response = self.send_get(url, params).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return read_json(response).await;
        }

        if let Err(err) = self.refresh_token().await {
            tracing::warn!(error = %err, "token refresh failed");
            self.logout();
            return Err(ApiError::Unauthorized);
        }

        let retried = self.send_get(url, params).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %url, "request still unauthorized after refresh");
            self.logout();
            return Err(ApiError::Unauthorized);
        }
        read_json(retried).await
    }

    async fn send_get(&self, url: &Url, params: &ParamMap) -> Result<Response, ApiError> {
        let mut request = self
            .http
            .get(url.clone())
            .query(&params.to_query_pairs());

        if let Some(token) = self.storage.get(ACCESS_TOKEN_KEY)? {
            request = request.bearer_auth(token);
        }

        Ok(request.send().await?)
    }

    /// Exchange the refresh cookie for a new access token and persist it
    pub async fn refresh_token(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.refresh_url.clone())
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let payload = read_json(response).await?;
        let refreshed: RefreshResponse = serde_json::from_value(payload)?;
        self.storage.set(ACCESS_TOKEN_KEY, &refreshed.access)?;
        tracing::debug!("access token refreshed");
        Ok(())
    }

    /// Clear the stored token and run logout hooks
    pub fn logout(&self) {
        if let Err(err) = self.storage.remove(ACCESS_TOKEN_KEY) {
            tracing::warn!(error = %err, "failed to clear access token");
        }
        if let Ok(hooks) = self.logout_hooks.read() {
            for hook in hooks.iter() {
                hook();
            }
        }
    }
}

async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    if body.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStorage;
    use config::CacheConfig;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(
            &ApiConfig::new(base.to_string()),
            CacheManager::new(CacheConfig::default()).unwrap(),
            Arc::new(MemoryTokenStorage::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_versioned_base() {
        let client = client("http://localhost:8000/api/v1/");
        assert_eq!(
            client.endpoint("/staff/district/").unwrap().as_str(),
            "http://localhost:8000/api/v1/staff/district/"
        );
        assert_eq!(
            client.refresh_url.as_str(),
            "http://localhost:8000/api/v1/auth/refresh/"
        );
    }

    #[test]
    fn test_logout_clears_token_and_runs_hooks() {
        let client = client("http://localhost:8000/api/v1/");
        client.set_access_token("abc").unwrap();

        let fired = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = fired.clone();
        client.on_logout(move || flag.store(true, std::sync::atomic::Ordering::SeqCst));

        client.logout();
        assert!(fired.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(client.access_token().unwrap(), None);
    }
}

//! HTTP client for the transaction bridge API
//!
//! Every operation issues exactly one request and hands back the response
//! body untouched. Nothing is retried or cached; failures surface as
//! [`ApiError`] to whoever awaited the call.

use crate::error::{ApiError, ApiResult};
use fireweb_config::ApiConfig;
use fireweb_utils::join_path;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const PARSE_ENDPOINT: &str = "/parse";
pub const RECORD_ENDPOINT: &str = "/record";
pub const TRANSACTIONS_ENDPOINT: &str = "/transactions";
pub const ACCOUNTS_ENDPOINT: &str = "/accounts";
pub const DEFAULT_ACCOUNT_ENDPOINT: &str = "/default_account";
pub const UPDATE_DEFAULT_ENDPOINT: &str = "/default";
pub const TAGS_AND_CATEGORIES_ENDPOINT: &str = "/tags-and-categories";

const TEXT_PLAIN: &str = "text/plain";
const APPLICATION_JSON: &str = "application/json";

/// Bridge API client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Origin plus base path, e.g. `http://127.0.0.1:5001/api`
    base: String,
    timeout: Duration,
    http: Client,
}

impl ApiClient {
    /// Create a client for `base_url` with every endpoint under `base_path`
    pub fn new(base_url: &str, base_path: &str, timeout: Duration) -> ApiResult<Self> {
        let origin = Url::parse(base_url.trim()).map_err(|_| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
        })?;
        if origin.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        let base = join_path(origin.as_str(), base_path);
        let base = base.trim_end_matches('/').to_string();
        log::debug!(target: "fireweb::api", "API client ready: base={} timeout={:?}", base, timeout);

        Ok(Self { base, timeout, http })
    }

    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(
            &config.base_url,
            &config.base_path,
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for an endpoint
    pub fn url(&self, endpoint: &str) -> String {
        join_path(&self.base, endpoint)
    }

    // ==================== Operations ====================

    /// Send raw transaction text to the server-side parser
    ///
    /// The text goes out verbatim as `text/plain`, empty strings included.
    pub async fn parse_transactions(&self, text: &str) -> ApiResult<Value> {
        let request = self
            .request(Method::POST, PARSE_ENDPOINT)
            .header(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN))
            .body(text.to_owned());
        self.execute(request, PARSE_ENDPOINT).await
    }

    /// Record structured transactions
    pub async fn record_transactions<T>(&self, transactions: &T) -> ApiResult<Value>
    where
        T: Serialize + ?Sized,
    {
        self.post_json(RECORD_ENDPOINT, transactions).await
    }

    pub async fn get_transactions(&self) -> ApiResult<Value> {
        self.get(TRANSACTIONS_ENDPOINT).await
    }

    pub async fn get_accounts(&self) -> ApiResult<Value> {
        self.get(ACCOUNTS_ENDPOINT).await
    }

    pub async fn get_default_account(&self) -> ApiResult<Value> {
        self.get(DEFAULT_ACCOUNT_ENDPOINT).await
    }

    /// Update the default account settings
    pub async fn update_default_account<T>(&self, data: &T) -> ApiResult<Value>
    where
        T: Serialize + ?Sized,
    {
        self.post_json(UPDATE_DEFAULT_ENDPOINT, data).await
    }

    pub async fn get_tags_and_categories(&self) -> ApiResult<Value> {
        self.get(TAGS_AND_CATEGORIES_ENDPOINT).await
    }

    // ==================== Transport ====================

    fn request(&self, method: Method, endpoint: &str) -> reqwest::RequestBuilder {
        self.http.request(method, self.url(endpoint))
    }

    async fn get(&self, endpoint: &str) -> ApiResult<Value> {
        let request = self.request(Method::GET, endpoint);
        self.execute(request, endpoint).await
    }

    async fn post_json<T>(&self, endpoint: &str, payload: &T) -> ApiResult<Value>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
        let request = self
            .request(Method::POST, endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
            .body(body);
        self.execute(request, endpoint).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder, endpoint: &str) -> ApiResult<Value> {
        log::debug!(target: "fireweb::api", "-> {}{}", self.base, endpoint);

        let response = request
            .send()
            .await
            .map_err(|e| self.classify(e, endpoint))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify(e, endpoint))?;

        log::debug!(target: "fireweb::api", "<- {} {} ({} bytes)", status.as_u16(), endpoint, body.len());

        if !status.is_success() {
            log::warn!(target: "fireweb::api", "{} {} failed with status {}", self.base, endpoint, status);
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(decode_body(&body))
    }

    fn classify(&self, error: reqwest::Error, endpoint: &str) -> ApiError {
        if error.is_timeout() {
            log::warn!(target: "fireweb::api", "{} timed out after {:?}", endpoint, self.timeout);
            ApiError::Timeout {
                endpoint: endpoint.to_string(),
                after: self.timeout,
            }
        } else {
            log::warn!(target: "fireweb::api", "{} transport failure: {}", endpoint, error);
            ApiError::Transport {
                endpoint: endpoint.to_string(),
                source: error,
            }
        }
    }
}

/// Decode a response body the lenient way
///
/// Empty bodies become `null`, JSON bodies their value, anything else the raw text.
pub fn decode_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

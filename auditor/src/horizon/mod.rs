//! # Horizon Client Module
//!
//! This module provides read access to the Stellar ledger through a
//! Horizon API server.
//!
//! ## Responsibilities
//!
//! - List the accounts holding a trustline to an asset, page by page
//! - Turn HTTP and protocol failures into a typed [`FetchError`]
//!
//! The audit only depends on the [`LedgerSource`] trait, so the
//! pagination and classification logic can run against an in-memory
//! ledger in tests.
//!
//! ## Request Flow
//!
//! ```text
//! 1. AccountFetcher asks for a page (asset, limit, cursor)
//!              ↓
//! 2. HorizonClient GET /accounts?asset=...&limit=...&cursor=...
//!              ↓
//! 3. 2xx: decode the HAL page into Account records
//!    other: decode the problem document into FetchError::Problem
//! ```
//!
//! There are no retries: a failed request fails the audit.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{AppConfig, Asset};
use crate::models::{Account, AccountsPage, AccountsRequest, Problem};

/// Errors talking to the ledger.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, timeout or TLS failure
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Horizon answered with an error document
    #[error("Horizon rejected request to {url}: {problem}")]
    Problem { url: String, problem: Problem },

    /// The response body was not what Horizon promises
    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Read access to holder accounts on the ledger.
#[async_trait]
pub trait LedgerSource {
    /// Fetch one page of accounts holding `asset`, in ascending paging
    /// token order, starting after `cursor` (from the beginning if `None`).
    async fn accounts_page(
        &self,
        asset: &Asset,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Vec<Account>, FetchError>;
}

/// Horizon HTTP client.
///
/// ## Usage
///
/// ```rust,ignore
/// let config = AppConfig::from_env()?;
/// let client = HorizonClient::new(&config)?;
///
/// let page = client.accounts_page(&tft, 50, None).await?;
/// println!("First page: {} accounts", page.len());
/// ```
#[derive(Clone)]
pub struct HorizonClient {
    /// The Horizon base URL, without trailing slash.
    base_url: String,

    client: Client,
}

impl HorizonClient {
    /// Create a new HorizonClient.
    ///
    /// ## Arguments
    ///
    /// * `config` - Application configuration containing the Horizon URL
    ///   and request timeout
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        info!("Horizon client initialized:");
        info!("  URL: {}", config.horizon_url);
        info!("  Timeout: {}s", config.request_timeout_secs);

        Ok(Self {
            base_url: config.horizon_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build the `GET /accounts` request for one page.
    fn accounts_request(&self, asset: &Asset, limit: u32, cursor: Option<&str>) -> RequestBuilder {
        let url = format!("{}/accounts", self.base_url);
        let request = AccountsRequest::new(asset.to_string(), limit, cursor.map(str::to_string));

        debug!(
            "GET {} asset={} limit={} cursor={:?}",
            url, request.asset, request.limit, request.cursor
        );

        self.client.get(url).query(&request)
    }
}

/// Turn an error response into a [`Problem`].
///
/// Horizon sends RFC 7807 documents, but proxies in front of it answer
/// with HTML or plain text. Those are kept as the detail, cut to 200
/// characters.
fn problem_from(status: StatusCode, body: &str) -> Problem {
    match serde_json::from_str::<Problem>(body) {
        Ok(mut problem) => {
            if problem.status == 0 {
                problem.status = status.as_u16();
            }
            problem
        }
        Err(_) => Problem {
            title: status.canonical_reason().unwrap_or("HTTP error").to_string(),
            status: status.as_u16(),
            detail: body.chars().take(200).collect(),
            ..Problem::default()
        },
    }
}

#[async_trait]
impl LedgerSource for HorizonClient {
    async fn accounts_page(
        &self,
        asset: &Asset,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Vec<Account>, FetchError> {
        let url = format!("{}/accounts", self.base_url);

        let response = self
            .accounts_request(asset, limit, cursor)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
            let problem = problem_from(status, &body);
            return Err(FetchError::Problem { url, problem });
        }

        let page: AccountsPage = response.json().await.map_err(|e| FetchError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        debug!("Received {} accounts from {}", page.embedded.records.len(), url);

        Ok(page.embedded.records)
    }
}

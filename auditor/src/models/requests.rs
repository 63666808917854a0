//! # Horizon Request Models
//!
//! Query parameters for the Horizon endpoints the audit calls.

use serde::Serialize;

/// Query for `GET /accounts`: all accounts holding a trustline to `asset`.
///
/// ## Example Query
///
/// ```text
/// /accounts?asset=TFT:GBOV...&limit=50&order=asc&cursor=GDRX...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountsRequest {
    /// Asset in `CODE:ISSUER` form.
    pub asset: String,

    /// Page size.
    pub limit: u32,

    /// Always `asc` so paging tokens move forward.
    pub order: &'static str,

    /// Paging token of the last record seen. Omitted on the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl AccountsRequest {
    pub fn new(asset: String, limit: u32, cursor: Option<String>) -> Self {
        Self {
            asset,
            limit,
            order: "asc",
            cursor,
        }
    }
}

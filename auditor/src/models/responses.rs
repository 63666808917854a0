//! # Horizon Response Models
//!
//! Response bodies of the Horizon API. Collections are wrapped in a HAL
//! envelope; errors are RFC 7807 problem documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Account;

/// A page of a Horizon collection.
///
/// ## Example Response
///
/// ```json
/// {
///     "_links": { "next": { "href": "..." } },
///     "_embedded": {
///         "records": [ { "account_id": "GDRX...", ... } ]
///     }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "_embedded")]
    pub embedded: Embedded<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedded<T> {
    pub records: Vec<T>,
}

/// A page of accounts.
pub type AccountsPage = Page<Account>;

/// Error body returned with any non-2xx status.
///
/// ## Example Response
///
/// ```json
/// {
///     "type": "https://stellar.org/horizon-errors/bad_request",
///     "title": "Bad Request",
///     "status": 400,
///     "detail": "The request you sent was invalid in some way.",
///     "extras": { "invalid_field": "asset" }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type", default)]
    pub problem_type: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub status: u16,

    #[serde(default)]
    pub detail: String,

    #[serde(default)]
    pub extras: Option<serde_json::Value>,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.status, self.detail)?;
        if let Some(extras) = &self.extras {
            write!(f, " {}", extras)?;
        }
        Ok(())
    }
}

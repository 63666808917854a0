//! # Account Model
//!
//! A ledger account as Horizon returns it from the `/accounts` endpoint.
//! Only the fields the audit reads are kept.
//!
//! ## Example Record
//!
//! ```json
//! {
//!     "account_id": "GDRX...",
//!     "paging_token": "GDRX...",
//!     "balances": [
//!         {
//!             "balance": "100.0000000",
//!             "asset_type": "credit_alphanum4",
//!             "asset_code": "TFT",
//!             "asset_issuer": "GBOV..."
//!         },
//!         { "balance": "2.5000000", "asset_type": "native" }
//!     ],
//!     "signers": [
//!         { "key": "GDRX...", "type": "ed25519_public_key", "weight": 1 }
//!     ],
//!     "data": { "tft-vesting": "dmVzdGluZw==" }
//! }
//! ```

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Asset;

/// A metadata entry could not be decoded.
#[derive(Error, Debug)]
#[error("Data entry '{key}' of account {account} is not valid base64: {source}")]
pub struct DataError {
    pub account: String,
    pub key: String,
    #[source]
    pub source: base64::DecodeError,
}

/// How a signer key authorizes transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerType {
    /// A plain account key.
    Ed25519PublicKey,

    /// Hash of a transaction that is allowed to execute without other
    /// signatures. Escrow accounts use it as their unlock mechanism.
    #[serde(rename = "preauth_tx")]
    PreAuthTx,

    /// Hash-x signer.
    Sha256Hash,

    Ed25519SignedPayload,

    #[serde(other)]
    Unknown,
}

/// One signer of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub key: String,

    #[serde(rename = "type")]
    pub signer_type: SignerType,

    pub weight: u32,
}

/// One balance line of an account.
///
/// The amount stays in its textual form until somebody needs the value;
/// see [`crate::utils::parse_amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Amount as a decimal string with seven fractional digits.
    pub balance: String,

    /// `native`, `credit_alphanum4`, `credit_alphanum12` or `liquidity_pool_shares`.
    pub asset_type: String,

    /// Absent for the native asset and pool shares.
    #[serde(default)]
    pub asset_code: Option<String>,

    #[serde(default)]
    pub asset_issuer: Option<String>,
}

impl Balance {
    /// Whether this line holds `asset`.
    pub fn is_asset(&self, asset: &Asset) -> bool {
        asset.matches(self.asset_code.as_deref(), self.asset_issuer.as_deref())
    }
}

/// A ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account's public key. Unique across the ledger.
    #[serde(rename = "account_id")]
    pub id: String,

    /// Cursor for requesting the page after this record.
    pub paging_token: String,

    #[serde(default)]
    pub balances: Vec<Balance>,

    #[serde(default)]
    pub signers: Vec<Signer>,

    /// Metadata entries, base64 encoded as on the wire.
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl Account {
    /// Look up and decode the metadata entry `key`.
    ///
    /// ## Returns
    ///
    /// * `Ok(Some(bytes))` - Entry present
    /// * `Ok(None)` - No entry under `key`
    /// * `Err(DataError)` - Entry present but not valid base64
    pub fn data_entry(&self, key: &str) -> Result<Option<Vec<u8>>, DataError> {
        let Some(encoded) = self.data.get(key) else {
            return Ok(None);
        };

        STANDARD
            .decode(encoded)
            .map(Some)
            .map_err(|source| DataError {
                account: self.id.clone(),
                key: key.to_string(),
                source,
            })
    }

    /// The first balance line holding `asset`, if any.
    pub fn balance_of(&self, asset: &Asset) -> Option<&Balance> {
        self.balances.iter().find(|b| b.is_asset(asset))
    }
}

//! # Configuration Module
//!
//! This module holds every setting the audit needs. There are two layers:
//!
//! - [`AuditConfig`]: the audit rules. Which assets are tracked, which
//!   metadata key marks a vesting account, which signer keys belong to
//!   the vesting infrastructure. These are compiled in and passed into the
//!   classifiers explicitly so tests can substitute their own.
//! - [`AppConfig`]: runtime settings (Horizon endpoint, page size, output
//!   destination) loaded from environment variables. Every variable has a
//!   default, so the tool runs without any parameters.
//!
//! ## Usage
//!
//! ```rust,ignore
//! dotenvy::dotenv().ok();
//! let app = AppConfig::from_env()?;
//! let rules = AuditConfig::default();
//! println!("Horizon: {}", app.horizon_url);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HORIZON_URL` | Horizon API endpoint | `https://horizon.stellar.org` |
//! | `PAGE_SIZE` | Accounts requested per page (1-200) | `50` |
//! | `REQUEST_TIMEOUT_SECS` | Per-request HTTP timeout | `30` |
//! | `REPORT_PATH` | Write the CSV here instead of stdout | unset |

use std::env;
use std::fmt;

use thiserror::Error;

use crate::models::SignerType;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Failed to parse a value
    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

/// Issuer of the TFT token on the Stellar public network.
pub const TFT_ISSUER: &str = "GBOVQKJYHXRR3DX6NOX2RRYFRCUMSADGDESTDNBDS6CDVLGVESRTAC47";

/// Issuer of the TFTA token on the Stellar public network.
pub const TFTA_ISSUER: &str = "GBUT4GP5GJ6B3XW5PXENHQA7TXJI5GOPW3NF4W3ZIW6OOO4ISY6WNLN2";

/// Metadata key that flags an account as a vesting account.
pub const VESTING_DATA_KEY: &str = "tft-vesting";

/// Signer keys operated by the vesting service itself.
///
/// These co-sign every vesting account and must never be mistaken for
/// the beneficiary.
pub const VESTING_OPERATOR_KEYS: [&str; 9] = [
    "GALQ4TZA6VRBBBBYMM3KSBSXJDLC5A7YIGH4SAS6AJ7N4ZA6P6IHWH43",
    "GARF35OFGW2XFHFG764UVO2UTUOSDRVL5DU7RXMM7JJJOSVWKK7GATXU",
    "GCHUIUY5MOBWOXEKZJEQU2DCUG4WHRXM4KAWCEUQK3NTQGBK5RZ6FQBR",
    "GDMMVCANURBLP6O64QWJM3L2EZTDSGTFL4B2BNXKAQPWYDX6WNAFNWK4",
    "GDORF4CKQ2GDOBXXU7R3EXV3XRN6LFCGNYTHMYXDPZ5NECZ6YZLJGAA2",
    "GDOSJPACWZ2DWSDNNKCVIKMUL3BNVVV3IERJPAZXM3PJMDNXYJIZFUL3",
    "GDSKTNDAIBUBGQZXEJ64F3P37T7Y45ZOZQCRZY2I46F4UT66KG4JJSOU",
    "GDTFYNE5MKGFL625FNUQUHILILFNNRSRYAAXADFFLMOOF5E6V5FLLSBG",
    "GDTTKKRECHQMYWJWKQ5UTONRMNK54WRN3PB4U7JZAPUHLPI75ALN7ORU",
];

/// Signer weight the vesting service assigns to the beneficiary.
pub const VESTING_BENEFICIARY_WEIGHT: u32 = 5;

/// Largest page Horizon will serve for the accounts endpoint.
pub const MAX_PAGE_SIZE: u32 = 200;

/// An issued asset on the ledger.
///
/// The textual form is `CODE:ISSUER`, which is also what Horizon expects
/// in the `asset` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    /// Asset code, e.g. `TFT`.
    pub code: String,

    /// Issuing account's public key.
    pub issuer: String,
}

impl Asset {
    pub fn new(code: &str, issuer: &str) -> Self {
        Self {
            code: code.to_string(),
            issuer: issuer.to_string(),
        }
    }

    /// Whether a balance line with this code and issuer refers to this asset.
    pub fn matches(&self, code: Option<&str>, issuer: Option<&str>) -> bool {
        code == Some(self.code.as_str()) && issuer == Some(self.issuer.as_str())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code, self.issuer)
    }
}

/// The audit rules.
///
/// ## Example
///
/// ```rust,ignore
/// let rules = AuditConfig::default();
/// assert_eq!(rules.escrow_assets[0].code, "TFT");
/// assert!(rules.is_vesting_operator("GALQ4TZA6VRBBBBYMM3KSBSXJDLC5A7YIGH4SAS6AJ7N4ZA6P6IHWH43"));
/// ```
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Assets whose holders are audited and whose escrowed balances are
    /// reported as locked. One "Unlocked" and one "Locked" column each.
    pub escrow_assets: Vec<Asset>,

    /// The asset counted in the "Vested" column.
    pub vesting_asset: Asset,

    /// Metadata key marking a vesting account.
    pub vesting_data_key: String,

    /// Signer keys of the vesting infrastructure.
    pub vesting_operators: Vec<String>,

    /// Weight identifying the beneficiary among a vesting account's signers.
    pub vesting_beneficiary_weight: u32,

    /// Signer type acting as the unlock mechanism of an escrow account.
    pub unlock_signer_type: SignerType,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            escrow_assets: vec![
                Asset::new("TFT", TFT_ISSUER),
                Asset::new("TFTA", TFTA_ISSUER),
            ],
            vesting_asset: Asset::new("TFT", TFT_ISSUER),
            vesting_data_key: VESTING_DATA_KEY.to_string(),
            vesting_operators: VESTING_OPERATOR_KEYS.iter().map(|k| k.to_string()).collect(),
            vesting_beneficiary_weight: VESTING_BENEFICIARY_WEIGHT,
            unlock_signer_type: SignerType::PreAuthTx,
        }
    }
}

impl AuditConfig {
    /// Whether `key` belongs to the vesting service.
    pub fn is_vesting_operator(&self, key: &str) -> bool {
        self.vesting_operators.iter().any(|k| k == key)
    }
}

/// Runtime settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // ==========================================
    // LEDGER SETTINGS
    // ==========================================

    /// Horizon API endpoint URL.
    ///
    /// Common values:
    /// - Public network: `https://horizon.stellar.org`
    /// - Testnet: `https://horizon-testnet.stellar.org`
    pub horizon_url: String,

    /// Number of accounts requested per page.
    ///
    /// A page shorter than this ends pagination.
    pub page_size: u32,

    /// Timeout for a single HTTP request (in seconds).
    pub request_timeout_secs: u64,

    // ==========================================
    // OUTPUT SETTINGS
    // ==========================================

    /// Destination of the CSV report. `None` writes to stdout.
    pub report_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            horizon_url: "https://horizon.stellar.org".to_string(),
            page_size: 50,
            request_timeout_secs: 30,
            report_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Use `dotenvy::dotenv()` before calling this to load from `.env` file.
    ///
    /// ## Returns
    ///
    /// - `Ok(AppConfig)` - Configuration loaded successfully
    /// - `Err(ConfigError)` - A variable is set but invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get_or_default = |key: &str, default: String| lookup(key).unwrap_or(default);

        let page_size: u32 = get_or_default("PAGE_SIZE", defaults.page_size.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError("PAGE_SIZE".to_string(), format!("{}", e)))?;

        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue(
                "PAGE_SIZE".to_string(),
                format!("{} (must be between 1 and {})", page_size, MAX_PAGE_SIZE),
            ));
        }

        let request_timeout_secs: u64 = get_or_default(
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout_secs.to_string(),
        )
        .parse()
        .map_err(|e| {
            ConfigError::ParseError("REQUEST_TIMEOUT_SECS".to_string(), format!("{}", e))
        })?;

        if request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "REQUEST_TIMEOUT_SECS".to_string(),
                "0 (must be at least 1)".to_string(),
            ));
        }

        let report_path = lookup("REPORT_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(|p| shellexpand::tilde(&p).into_owned());

        Ok(Self {
            horizon_url: get_or_default("HORIZON_URL", defaults.horizon_url)
                .trim_end_matches('/')
                .to_string(),
            page_size,
            request_timeout_secs,
            report_path,
        })
    }
}

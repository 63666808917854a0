//! # Utilities Module
//!
//! Helpers for amounts and log output used across the auditor.
//!
//! Ledger amounts are decimal strings with seven fractional digits
//! (one stroop = 0.0000001). They are parsed into exact decimals, never
//! floats, so sums across many accounts do not drift.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Number of fractional digits of a ledger amount.
pub const AMOUNT_SCALE: usize = 7;

/// A balance amount could not be parsed.
#[derive(Error, Debug)]
#[error("Invalid amount '{value}': {source}")]
pub struct ParseError {
    pub value: String,
    #[source]
    pub source: rust_decimal::Error,
}

/// Parse a ledger amount string.
///
/// ## Examples
///
/// ```rust,ignore
/// assert_eq!(parse_amount("100.0000000")?, Decimal::new(100, 0));
/// assert!(parse_amount("1,000").is_err());
/// ```
pub fn parse_amount(value: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(value.trim()).map_err(|source| ParseError {
        value: value.to_string(),
        source,
    })
}

/// Format an amount with seven fractional digits, e.g. `100.0000000`.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.*}", AMOUNT_SCALE, amount)
}

/// Truncate a string to a maximum length.
///
/// Useful for logging long public keys.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let half = (max_len - 3) / 2;
        format!("{}...{}", &s[..half], &s[s.len() - half..])
    }
}

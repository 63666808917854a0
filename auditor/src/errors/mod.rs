//! # Audit Errors
//!
//! Every error that can end an audit run. None of them is recoverable: a
//! report built from a partial ledger snapshot would misstate balances, so
//! the run stops and nothing is written.

use std::error::Error as StdError;

use thiserror::Error;

use crate::config::ConfigError;
use crate::horizon::FetchError;
use crate::models::DataError;
use crate::utils::ParseError;

#[derive(Error, Debug)]
pub enum AuditError {
    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The ledger could not be read
    #[error("Ledger fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// An account's metadata could not be decoded
    #[error("Account data error: {0}")]
    Data(#[from] DataError),

    /// A balance amount is malformed
    #[error("Balance parse error: {0}")]
    Parse(#[from] ParseError),

    /// The report could not be written
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

impl AuditError {
    /// The underlying errors, outermost first, for logging.
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(self.source(), |cause| (*cause).source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_causes_follow_source_chain() {
        let invalid = reqwest::Client::new().get("not a url").build().unwrap_err();
        let error = AuditError::from(FetchError::Client(invalid));

        let causes: Vec<String> = error.causes().map(|c| c.to_string()).collect();

        assert!(causes.len() >= 2);
        assert!(causes[0].starts_with("Failed to create HTTP client"));
    }

    #[test]
    fn test_io_error_cause() {
        let error = AuditError::from(io::Error::new(io::ErrorKind::Other, "disk full"));

        let causes: Vec<String> = error.causes().map(|c| c.to_string()).collect();

        assert_eq!(causes, vec!["disk full".to_string()]);
    }

    #[test]
    fn test_config_error_has_one_cause() {
        let error = AuditError::from(ConfigError::InvalidValue(
            "PAGE_SIZE".to_string(),
            "0".to_string(),
        ));

        assert_eq!(error.causes().count(), 1);
        assert!(error.to_string().contains("PAGE_SIZE"));
    }
}

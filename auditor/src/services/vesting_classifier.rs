//! # Vesting Classifier
//!
//! Recognizes vesting accounts created by the TFT vesting service.
//!
//! A vesting account carries the `tft-vesting` metadata entry. Its signers
//! are the account itself, the vesting service's operator keys and the
//! beneficiary, who is the only plain key signer with weight 5.

use crate::config::AuditConfig;
use crate::models::{Account, DataError, SignerType};

pub struct VestingClassifier<'a> {
    config: &'a AuditConfig,
}

impl<'a> VestingClassifier<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    /// The beneficiary of `account` if it is a vesting account.
    ///
    /// ## Returns
    ///
    /// * `Ok(Some(key))` - Vesting account releasing funds to `key`
    /// * `Ok(None)` - No vesting marker, or no signer qualifies as beneficiary
    /// * `Err(DataError)` - The vesting marker could not be decoded
    pub fn beneficiary<'s>(&self, account: &'s Account) -> Result<Option<&'s str>, DataError> {
        let marker = account.data_entry(&self.config.vesting_data_key)?;
        if marker.map_or(true, |m| m.is_empty()) {
            return Ok(None);
        }

        let beneficiary = account
            .signers
            .iter()
            .filter(|s| s.signer_type == SignerType::Ed25519PublicKey)
            .filter(|s| s.key != account.id)
            .filter(|s| !self.config.is_vesting_operator(&s.key))
            .find(|s| s.weight == self.config.vesting_beneficiary_weight)
            .map(|s| s.key.as_str());

        Ok(beneficiary)
    }
}

//! # Escrow Classifier
//!
//! Recognizes escrow accounts: accounts whose funds are locked for another
//! holder until a pre-authorized transaction releases them.
//!
//! ## Signer Pattern
//!
//! ```text
//! escrow account E
//!   ├── E itself             (ed25519 key)
//!   ├── beneficiary B        (ed25519 key, must be a holder too)
//!   └── unlock transaction   (preauth_tx)
//! ```
//!
//! Any other signer layout, including one where the self key shows up
//! twice or not at all, is not an escrow.

use crate::config::AuditConfig;
use crate::models::{Account, AccountSet, Signer};

/// Number of signers on an escrow account.
const ESCROW_SIGNER_COUNT: usize = 3;

pub struct EscrowClassifier<'a> {
    config: &'a AuditConfig,
}

impl<'a> EscrowClassifier<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    /// The beneficiary of `account` if it is an escrow account.
    ///
    /// ## Arguments
    ///
    /// * `account` - The candidate escrow account
    /// * `accounts` - All holder accounts; the beneficiary must be one of them
    ///
    /// ## Returns
    ///
    /// * `Some(id)` - `account` escrows funds for holder `id`
    /// * `None` - Not an escrow account
    pub fn beneficiary<'s>(&self, account: &Account, accounts: &'s AccountSet) -> Option<&'s str> {
        if account.signers.len() != ESCROW_SIGNER_COUNT {
            return None;
        }

        let principals: Vec<&Signer> = account
            .signers
            .iter()
            .filter(|s| s.signer_type != self.config.unlock_signer_type)
            .collect();

        let candidate = match principals.as_slice() {
            [a, b] if a.key == account.id && b.key != account.id => &b.key,
            [a, b] if b.key == account.id && a.key != account.id => &a.key,
            _ => return None,
        };

        accounts
            .get(candidate)
            .filter(|target| target.id != account.id)
            .map(|target| target.id.as_str())
    }
}

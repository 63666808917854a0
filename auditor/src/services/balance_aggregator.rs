//! # Balance Aggregator Service
//!
//! Runs both classifiers over the account set and sums the balances held
//! by escrow and vesting accounts onto their beneficiaries.
//!
//! ## Aggregation Flow
//!
//! ```text
//! Pass 1, every account:
//!     escrow for B?  → locked[asset][B] += balance(asset), per escrow asset
//!
//! Pass 2, every account:
//!     vesting for B? → vested[B] += balance(vesting asset)
//! ```
//!
//! The passes are independent: an account can be recorded as both an
//! escrow and a vesting source. Which annotation the report shows is the
//! report builder's decision.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::{Asset, AuditConfig};
use crate::errors::AuditError;
use crate::models::{Account, AccountSet};
use crate::services::{EscrowClassifier, VestingClassifier};
use crate::utils::{format_amount, parse_amount, truncate_string, ParseError};

/// The account's own balance of `asset`, zero without a trustline.
pub fn direct_balance(account: &Account, asset: &Asset) -> Result<Decimal, ParseError> {
    match account.balance_of(asset) {
        Some(line) => parse_amount(&line.balance),
        None => Ok(Decimal::ZERO),
    }
}

/// Relations and per-beneficiary sums of one audit run.
///
/// Built once by [`BalanceAggregator::aggregate`], read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Holdings {
    /// Escrow account → beneficiary.
    escrows: HashMap<String, String>,

    /// Vesting account → beneficiary.
    vestings: HashMap<String, String>,

    /// Beneficiary → locked amount, one map per escrow asset, in
    /// configuration order.
    locked: Vec<HashMap<String, Decimal>>,

    /// Beneficiary → vested amount of the vesting asset.
    vested: HashMap<String, Decimal>,
}

impl Holdings {
    /// Beneficiary of escrow account `id`.
    pub fn escrow_beneficiary(&self, id: &str) -> Option<&str> {
        self.escrows.get(id).map(String::as_str)
    }

    /// Beneficiary of vesting account `id`.
    pub fn vesting_beneficiary(&self, id: &str) -> Option<&str> {
        self.vestings.get(id).map(String::as_str)
    }

    /// Amount of the `asset_index`-th escrow asset locked for `id`.
    pub fn locked(&self, asset_index: usize, id: &str) -> Decimal {
        self.locked
            .get(asset_index)
            .and_then(|m| m.get(id))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Amount vesting for `id`.
    pub fn vested(&self, id: &str) -> Decimal {
        self.vested.get(id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn escrow_count(&self) -> usize {
        self.escrows.len()
    }

    pub fn vesting_count(&self) -> usize {
        self.vestings.len()
    }

    /// Total locked per escrow asset, in configuration order.
    pub fn total_locked(&self) -> Vec<Decimal> {
        self.locked.iter().map(|m| m.values().copied().sum()).collect()
    }

    pub fn total_vested(&self) -> Decimal {
        self.vested.values().copied().sum()
    }
}

/// Classifies accounts and aggregates locked and vested balances.
///
/// ## Usage
///
/// ```rust,ignore
/// let aggregator = BalanceAggregator::new(&rules);
/// let holdings = aggregator.aggregate(&accounts)?;
/// println!("Locked TFT for GDRX...: {}", holdings.locked(0, "GDRX..."));
/// ```
pub struct BalanceAggregator<'a> {
    config: &'a AuditConfig,
}

impl<'a> BalanceAggregator<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    /// Classify every account in `accounts` and sum the balances.
    ///
    /// ## Errors
    ///
    /// * `AuditError::Data` - A vesting marker could not be decoded
    /// * `AuditError::Parse` - A tracked balance is not a valid amount
    pub fn aggregate(&self, accounts: &AccountSet) -> Result<Holdings, AuditError> {
        let mut holdings = Holdings {
            locked: vec![HashMap::new(); self.config.escrow_assets.len()],
            ..Holdings::default()
        };

        self.map_escrows(accounts, &mut holdings)?;
        self.map_vestings(accounts, &mut holdings)?;

        self.log_summary(&holdings);
        Ok(holdings)
    }

    fn map_escrows(&self, accounts: &AccountSet, holdings: &mut Holdings) -> Result<(), AuditError> {
        let classifier = EscrowClassifier::new(self.config);

        for account in accounts.iter() {
            let Some(target) = classifier.beneficiary(account, accounts) else {
                continue;
            };

            debug!(
                "Escrow {} locks funds for {}",
                truncate_string(&account.id, 16),
                truncate_string(target, 16)
            );
            holdings.escrows.insert(account.id.clone(), target.to_string());

            for (index, asset) in self.config.escrow_assets.iter().enumerate() {
                for line in account.balances.iter().filter(|b| b.is_asset(asset)) {
                    let amount = parse_amount(&line.balance)?;
                    *holdings.locked[index].entry(target.to_string()).or_default() += amount;
                }
            }
        }

        Ok(())
    }

    fn map_vestings(&self, accounts: &AccountSet, holdings: &mut Holdings) -> Result<(), AuditError> {
        let classifier = VestingClassifier::new(self.config);
        let asset = &self.config.vesting_asset;

        for account in accounts.iter() {
            let Some(target) = classifier.beneficiary(account)? else {
                continue;
            };

            if !accounts.contains(target) {
                warn!(
                    "Vesting account {} releases to {}, which holds no tracked asset",
                    account.id, target
                );
            }
            holdings.vestings.insert(account.id.clone(), target.to_string());

            for line in account.balances.iter().filter(|b| b.is_asset(asset)) {
                let amount = parse_amount(&line.balance)?;
                *holdings.vested.entry(target.to_string()).or_default() += amount;
            }
        }

        Ok(())
    }

    fn log_summary(&self, holdings: &Holdings) {
        info!(
            "Found {} escrow accounts and {} vesting accounts",
            holdings.escrow_count(),
            holdings.vesting_count()
        );

        for (asset, total) in self.config.escrow_assets.iter().zip(holdings.total_locked()) {
            info!("   Locked {}: {}", asset.code, format_amount(total));
        }
        info!(
            "   Vested {}: {}",
            self.config.vesting_asset.code,
            format_amount(holdings.total_vested())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{
        account, escrow, key_signer, with_balance, with_data, with_signers,
    };

    fn tft() -> Asset {
        AuditConfig::default().escrow_assets[0].clone()
    }

    fn tfta() -> Asset {
        AuditConfig::default().escrow_assets[1].clone()
    }

    fn aggregate(accounts: Vec<Account>) -> Result<Holdings, AuditError> {
        let config = AuditConfig::default();
        let set: AccountSet = accounts.into_iter().collect();
        BalanceAggregator::new(&config).aggregate(&set)
    }

    #[test]
    fn test_escrow_locks_both_assets() {
        let x = with_balance(with_balance(escrow("GX", "GY"), &tft(), "100.0000000"), &tfta(), "7.5");
        let holdings = aggregate(vec![x, account("GY")]).unwrap();

        assert_eq!(holdings.escrow_beneficiary("GX"), Some("GY"));
        assert_eq!(holdings.locked(0, "GY"), Decimal::new(100, 0));
        assert_eq!(holdings.locked(1, "GY"), Decimal::new(75, 1));
        assert_eq!(holdings.locked(0, "GX"), Decimal::ZERO);
    }

    #[test]
    fn test_locked_sums_over_escrows() {
        let a = with_balance(escrow("GA", "GY"), &tft(), "10.0000001");
        let b = with_balance(escrow("GB", "GY"), &tft(), "20.0000002");
        let c = with_balance(escrow("GC", "GZ"), &tft(), "5");
        let holdings = aggregate(vec![a, b, c, account("GY"), account("GZ")]).unwrap();

        assert_eq!(holdings.locked(0, "GY"), Decimal::new(300_000_003, 7));
        assert_eq!(holdings.locked(0, "GZ"), Decimal::new(5, 0));
        assert_eq!(holdings.total_locked(), vec![Decimal::new(350_000_003, 7), Decimal::ZERO]);
        assert_eq!(holdings.escrow_count(), 3);
    }

    #[test]
    fn test_untracked_assets_are_ignored() {
        let other = Asset::new("TFT", "GNOTTHEISSUER");
        let x = with_balance(escrow("GX", "GY"), &other, "999");
        let holdings = aggregate(vec![x, account("GY")]).unwrap();

        assert_eq!(holdings.escrow_beneficiary("GX"), Some("GY"));
        assert_eq!(holdings.locked(0, "GY"), Decimal::ZERO);
    }

    #[test]
    fn test_vesting_counts_vesting_asset_only() {
        let z = with_signers(
            with_data(account("GZ"), "tft-vesting", b"1"),
            vec![key_signer("GZ", 10), key_signer("GW", 5)],
        );
        let z = with_balance(with_balance(z, &tft(), "50.0000000"), &tfta(), "3");
        let holdings = aggregate(vec![z, account("GW")]).unwrap();

        assert_eq!(holdings.vesting_beneficiary("GZ"), Some("GW"));
        assert_eq!(holdings.vested("GW"), Decimal::new(50, 0));
        assert_eq!(holdings.locked(1, "GW"), Decimal::ZERO);
        assert_eq!(holdings.total_vested(), Decimal::new(50, 0));
    }

    #[test]
    fn test_vesting_beneficiary_outside_set_is_still_recorded() {
        let z = with_signers(
            with_data(account("GZ"), "tft-vesting", b"1"),
            vec![key_signer("GW", 5)],
        );
        let holdings = aggregate(vec![with_balance(z, &tft(), "1")]).unwrap();

        assert_eq!(holdings.vesting_beneficiary("GZ"), Some("GW"));
        assert_eq!(holdings.vested("GW"), Decimal::ONE);
    }

    #[test]
    fn test_malformed_locked_balance_fails() {
        let x = with_balance(escrow("GX", "GY"), &tft(), "12,5");
        let result = aggregate(vec![x, account("GY")]);

        assert!(matches!(result, Err(AuditError::Parse(_))));
    }

    #[test]
    fn test_bad_vesting_marker_fails() {
        let mut z = account("GZ");
        z.data.insert("tft-vesting".to_string(), "***".to_string());

        assert!(matches!(aggregate(vec![z]), Err(AuditError::Data(_))));
    }

    #[test]
    fn test_direct_balance() {
        let a = with_balance(account("GA"), &tft(), "42.0000000");

        assert_eq!(direct_balance(&a, &tft()).unwrap(), Decimal::new(42, 0));
        assert_eq!(direct_balance(&a, &tfta()).unwrap(), Decimal::ZERO);
    }
}

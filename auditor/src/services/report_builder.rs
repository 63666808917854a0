//! # Report Builder Service
//!
//! Renders the audit as CSV: one header line, then one row per holder
//! account in account set order.
//!
//! ## Row Layout
//!
//! ```text
//! Account,TFT Unlocked,TFT Locked,TFTA Unlocked,TFTA Locked,Vested,Name
//! GDRX...,12.0000000,100.0000000,0.0000000,0.0000000,0.0000000,
//! GCXQ...,100.0000000,0.0000000,0.0000000,0.0000000,0.0000000,Escrow account for GDRX...
//! ```
//!
//! "Unlocked" is the account's own balance, "Locked" what escrow accounts
//! hold for it, "Vested" what vesting accounts hold for it. Amounts have
//! seven fractional digits. The last column names the account's role.

use std::fmt;

use rust_decimal::Decimal;

use crate::config::AuditConfig;
use crate::models::{Account, AccountSet};
use crate::services::balance_aggregator::{direct_balance, Holdings};
use crate::utils::{format_amount, ParseError};

/// What an account is, for the annotation column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRole<'a> {
    Escrow { beneficiary: &'a str },
    Vesting { beneficiary: &'a str },
    Holder,
}

impl<'a> AccountRole<'a> {
    /// Escrow is checked before vesting: an account recorded as both is
    /// reported as an escrow account.
    pub fn of(account: &Account, holdings: &'a Holdings) -> Self {
        if let Some(beneficiary) = holdings.escrow_beneficiary(&account.id) {
            AccountRole::Escrow { beneficiary }
        } else if let Some(beneficiary) = holdings.vesting_beneficiary(&account.id) {
            AccountRole::Vesting { beneficiary }
        } else {
            AccountRole::Holder
        }
    }
}

impl fmt::Display for AccountRole<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Escrow { beneficiary } => write!(f, "Escrow account for {}", beneficiary),
            AccountRole::Vesting { beneficiary } => write!(f, "Vesting account for {}", beneficiary),
            AccountRole::Holder => Ok(()),
        }
    }
}

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow<'a> {
    pub account: &'a str,

    /// (unlocked, locked) per escrow asset, in configuration order.
    pub assets: Vec<(Decimal, Decimal)>,

    pub vested: Decimal,

    pub role: AccountRole<'a>,
}

impl fmt::Display for ReportRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.account)?;
        for (unlocked, locked) in &self.assets {
            write!(f, ",{},{}", format_amount(*unlocked), format_amount(*locked))?;
        }
        write!(f, ",{},{}", format_amount(self.vested), self.role)
    }
}

/// Builds the CSV report from the account set and aggregated holdings.
///
/// ## Usage
///
/// ```rust,ignore
/// let report = ReportBuilder::new(&rules).render(&accounts, &holdings)?;
/// std::io::stdout().write_all(report.as_bytes())?;
/// ```
pub struct ReportBuilder<'a> {
    config: &'a AuditConfig,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a AuditConfig) -> Self {
        Self { config }
    }

    /// The header line, without newline.
    pub fn header(&self) -> String {
        let mut header = String::from("Account");
        for asset in &self.config.escrow_assets {
            header.push_str(&format!(",{0} Unlocked,{0} Locked", asset.code));
        }
        header.push_str(",Vested,Name");
        header
    }

    /// The row for `account`.
    pub fn row<'s>(&self, account: &'s Account, holdings: &'s Holdings) -> Result<ReportRow<'s>, ParseError> {
        let assets = self
            .config
            .escrow_assets
            .iter()
            .enumerate()
            .map(|(index, asset)| -> Result<(Decimal, Decimal), ParseError> {
                Ok((direct_balance(account, asset)?, holdings.locked(index, &account.id)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReportRow {
            account: &account.id,
            assets,
            vested: holdings.vested(&account.id),
            role: AccountRole::of(account, holdings),
        })
    }

    /// Render the complete report.
    ///
    /// The whole report is built in memory, so a malformed balance
    /// anywhere fails the call before any output exists.
    pub fn render(&self, accounts: &AccountSet, holdings: &Holdings) -> Result<String, ParseError> {
        let mut out = self.header();
        out.push('\n');

        for account in accounts.iter() {
            out.push_str(&self.row(account, holdings)?.to_string());
            out.push('\n');
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Asset;
    use crate::services::fixtures::{
        account, escrow, key_signer, with_balance, with_data, with_signers,
    };
    use crate::services::BalanceAggregator;

    fn render(accounts: Vec<Account>) -> String {
        let config = AuditConfig::default();
        let set: AccountSet = accounts.into_iter().collect();
        let holdings = BalanceAggregator::new(&config).aggregate(&set).unwrap();
        ReportBuilder::new(&config).render(&set, &holdings).unwrap()
    }

    fn tft() -> Asset {
        AuditConfig::default().escrow_assets[0].clone()
    }

    fn tfta() -> Asset {
        AuditConfig::default().escrow_assets[1].clone()
    }

    #[test]
    fn test_header() {
        let config = AuditConfig::default();
        assert_eq!(
            ReportBuilder::new(&config).header(),
            "Account,TFT Unlocked,TFT Locked,TFTA Unlocked,TFTA Locked,Vested,Name"
        );
    }

    #[test]
    fn test_escrow_scenario() {
        let x = with_balance(escrow("GX", "GY"), &tft(), "100.0000000");
        let y = with_balance(account("GY"), &tfta(), "1.25");

        let report = render(vec![x, y]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "GX,100.0000000,0.0000000,0.0000000,0.0000000,0.0000000,Escrow account for GY"
        );
        assert_eq!(
            lines[2],
            "GY,0.0000000,100.0000000,1.2500000,0.0000000,0.0000000,"
        );
    }

    #[test]
    fn test_vesting_scenario() {
        let z = with_signers(
            with_data(account("GZ"), "tft-vesting", b"1"),
            vec![key_signer("GZ", 10), key_signer("GW", 5)],
        );
        let z = with_balance(z, &tft(), "50.0000000");

        let report = render(vec![account("GW"), z]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            lines[1],
            "GW,0.0000000,0.0000000,0.0000000,0.0000000,50.0000000,"
        );
        assert_eq!(
            lines[2],
            "GZ,50.0000000,0.0000000,0.0000000,0.0000000,0.0000000,Vesting account for GW"
        );
    }

    #[test]
    fn test_escrow_annotation_takes_precedence() {
        let both = with_data(escrow("GX", "GY"), "tft-vesting", b"1");
        let both = with_signers(
            both.clone(),
            vec![key_signer("GX", 1), key_signer("GY", 5), both.signers[2].clone()],
        );
        let config = AuditConfig::default();
        let set: AccountSet = vec![both, account("GY")].into_iter().collect();
        let holdings = BalanceAggregator::new(&config).aggregate(&set).unwrap();

        assert_eq!(holdings.vesting_beneficiary("GX"), Some("GY"));

        let row = ReportBuilder::new(&config)
            .row(set.get("GX").unwrap(), &holdings)
            .unwrap();
        assert_eq!(row.role, AccountRole::Escrow { beneficiary: "GY" });
    }

    #[test]
    fn test_rows_follow_account_set_order() {
        let report = render(vec![account("GC"), account("GA"), account("GB")]);
        let ids: Vec<&str> = report
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();

        assert_eq!(ids, vec!["GC", "GA", "GB"]);
    }

    #[test]
    fn test_malformed_direct_balance_fails() {
        let config = AuditConfig::default();
        let set: AccountSet = vec![with_balance(account("GA"), &tft(), "abc")]
            .into_iter()
            .collect();
        let holdings = BalanceAggregator::new(&config).aggregate(&set).unwrap();

        assert!(ReportBuilder::new(&config).render(&set, &holdings).is_err());
    }
}

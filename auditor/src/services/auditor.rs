//! # Auditor Service
//!
//! Drives one audit run from ledger fetch to rendered report.
//!
//! ## Pipeline
//!
//! ```text
//! AccountFetcher ──► AccountSet ──► BalanceAggregator ──► Holdings
//!                        │                                   │
//!                        └──────────► ReportBuilder ◄────────┘
//!                                          │
//!                                       CSV text
//! ```
//!
//! Everything runs sequentially and any error ends the run.

use tracing::info;

use crate::config::{AppConfig, AuditConfig};
use crate::errors::AuditError;
use crate::horizon::LedgerSource;
use crate::services::{AccountFetcher, BalanceAggregator, ReportBuilder};

/// One audit over a ledger.
///
/// ## Usage
///
/// ```rust,ignore
/// let auditor = Auditor::new(&horizon, &app_config, &rules);
/// let report = auditor.run().await?;
/// ```
pub struct Auditor<'a, L: LedgerSource + ?Sized> {
    ledger: &'a L,
    app: &'a AppConfig,
    rules: &'a AuditConfig,
}

impl<'a, L: LedgerSource + ?Sized> Auditor<'a, L> {
    pub fn new(ledger: &'a L, app: &'a AppConfig, rules: &'a AuditConfig) -> Self {
        Self { ledger, app, rules }
    }

    /// Run the audit and return the complete CSV report.
    pub async fn run(&self) -> Result<String, AuditError> {
        let accounts = AccountFetcher::new(self.ledger, self.app.page_size)
            .fetch_account_set(&self.rules.escrow_assets)
            .await?;

        let holdings = BalanceAggregator::new(self.rules).aggregate(&accounts)?;

        let report = ReportBuilder::new(self.rules).render(&accounts, &holdings)?;
        info!("Report ready: {} rows", accounts.len());

        Ok(report)
    }
}

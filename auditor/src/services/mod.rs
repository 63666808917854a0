//! # Services Module
//!
//! This module contains the audit logic. Each service handles one step of
//! the run.
//!
//! ## Services Overview
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `AccountFetcher` | Paginate holder accounts, merge into one set |
//! | `EscrowClassifier` | Detect escrow accounts and their beneficiary |
//! | `VestingClassifier` | Detect vesting accounts and their beneficiary |
//! | `BalanceAggregator` | Sum locked and vested balances per beneficiary |
//! | `ReportBuilder` | Render the CSV report |
//! | `Auditor` | Run the steps above in order |
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Auditor                                 │
//! │                                                                  │
//! │  ┌────────────────┐   ┌───────────────────┐   ┌──────────────┐  │
//! │  │ AccountFetcher │──►│ BalanceAggregator │──►│ReportBuilder │  │
//! │  └────────────────┘   └───────────────────┘   └──────────────┘  │
//! │          │                 │           │                         │
//! │          ▼                 ▼           ▼                         │
//! │   ┌────────────┐  ┌──────────────┐ ┌───────────────┐            │
//! │   │LedgerSource│  │EscrowClassif.│ │VestingClassif.│            │
//! │   └────────────┘  └──────────────┘ └───────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod account_fetcher;
pub mod auditor;
pub mod balance_aggregator;
pub mod escrow_classifier;
pub mod report_builder;
pub mod vesting_classifier;

#[cfg(test)]
pub mod fixtures;

pub use account_fetcher::AccountFetcher;
pub use auditor::Auditor;
pub use balance_aggregator::{BalanceAggregator, Holdings};
pub use escrow_classifier::EscrowClassifier;
pub use report_builder::ReportBuilder;
pub use vesting_classifier::VestingClassifier;

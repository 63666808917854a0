//! # TFT Holder Audit
//!
//! Audits the Stellar ledger for the TFT and TFTA tokens. Every holder
//! account is fetched from Horizon and classified as a plain holder, an
//! escrow account or a vesting account. Balances held by escrow and
//! vesting accounts are attributed to their beneficiaries, and the result
//! is written as a CSV report.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          AUDIT RUN                               │
//! │                                                                  │
//! │  ┌─────────────┐                                                 │
//! │  │   Config    │  AppConfig (env)  +  AuditConfig (rules)        │
//! │  └─────────────┘                                                 │
//! │         │                                                        │
//! │  ┌──────┴────────────────────────────────────────────────────┐  │
//! │  │                    SERVICE LAYER                           │  │
//! │  │  AccountFetcher → BalanceAggregator → ReportBuilder        │  │
//! │  │                   (Escrow + Vesting classifiers)           │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │         │                                                        │
//! │  ┌──────┴──────┐                                                 │
//! │  │   Horizon   │  GET /accounts?asset=...                        │
//! │  │   API       │                                                 │
//! │  └─────────────┘                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod errors;
pub mod horizon;
pub mod models;
pub mod services;
pub mod utils;

//! # Ledger Models
//!
//! Data structures exchanged with the Horizon API.
//!
//! ## Organization
//!
//! - `account.rs` - Account records (balances, signers, metadata)
//! - `account_set.rs` - The deduplicated holder set of a run
//! - `requests.rs` - Query parameters
//! - `responses.rs` - Page envelopes and error documents
//!
//! ## Serialization
//!
//! Field names follow Horizon's snake_case JSON.

pub mod account;
pub mod account_set;
pub mod requests;
pub mod responses;

pub use account::*;
pub use account_set::AccountSet;
pub use requests::*;
pub use responses::*;

//! # Account Fetcher Service
//!
//! Collects every holder account of the tracked assets from the ledger.
//!
//! ## Pagination Flow
//!
//! ```text
//! For each tracked asset, one page at a time:
//! 1. Request `page_size` accounts after `cursor`
//!               ↓
//! 2. Append the records
//!               ↓
//! 3. cursor = paging token of the last record
//!               ↓
//! 4. Page shorter than `page_size`? done : goto 1
//! ```
//!
//! The per-asset lists are then merged into one [`AccountSet`], which
//! drops repeated ids and keeps the position of the first occurrence.

use tracing::{debug, info};

use crate::config::Asset;
use crate::horizon::{FetchError, LedgerSource};
use crate::models::{Account, AccountSet};

/// Pages through holder accounts of a [`LedgerSource`].
///
/// ## Usage
///
/// ```rust,ignore
/// let fetcher = AccountFetcher::new(&horizon, config.page_size);
/// let accounts = fetcher.fetch_account_set(&rules.escrow_assets).await?;
/// ```
pub struct AccountFetcher<'a, L: LedgerSource + ?Sized> {
    ledger: &'a L,
    page_size: u32,
}

impl<'a, L: LedgerSource + ?Sized> AccountFetcher<'a, L> {
    pub fn new(ledger: &'a L, page_size: u32) -> Self {
        Self { ledger, page_size }
    }

    /// Fetch all accounts holding `asset`, in ledger order.
    ///
    /// Any failed page aborts the whole fetch.
    pub async fn fetch_holders(&self, asset: &Asset) -> Result<Vec<Account>, FetchError> {
        info!("Fetching holders of {}", asset.code);

        let mut holders = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self
                .ledger
                .accounts_page(asset, self.page_size, cursor.as_deref())
                .await?;
            pages += 1;

            let page_len = page.len();
            debug!("Page {} of {}: {} accounts", pages, asset.code, page_len);

            if let Some(last) = page.last() {
                cursor = Some(last.paging_token.clone());
            }
            holders.extend(page);

            if page_len < self.page_size as usize {
                break;
            }
        }

        info!(
            "Fetched {} holders of {} in {} pages",
            holders.len(),
            asset.code,
            pages
        );
        Ok(holders)
    }

    /// Fetch the holders of every asset in `assets` and merge them.
    ///
    /// Assets are fetched one after the other, in the given order. An
    /// account holding several of them is kept once, at the position of
    /// its first occurrence.
    pub async fn fetch_account_set(&self, assets: &[Asset]) -> Result<AccountSet, FetchError> {
        let mut set = AccountSet::new();
        let mut duplicates = 0;

        for asset in assets {
            for account in self.fetch_holders(asset).await? {
                if !set.insert(account) {
                    duplicates += 1;
                }
            }
        }

        info!(
            "Unified account set: {} accounts ({} duplicates dropped)",
            set.len(),
            duplicates
        );
        Ok(set)
    }
}

//! # Account Set
//!
//! The unified, deduplicated set of holder accounts for one audit run.

use indexmap::IndexMap;

use super::Account;

/// Accounts keyed by id, in the order they were first seen.
///
/// Report rows follow this order. Inserting an id that is already present
/// keeps the first record and its position.
#[derive(Debug, Clone, Default)]
pub struct AccountSet {
    accounts: IndexMap<String, Account>,
}

impl AccountSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `account` unless its id is already present.
    ///
    /// Returns `true` if the account was new.
    pub fn insert(&mut self, account: Account) -> bool {
        if self.accounts.contains_key(&account.id) {
            return false;
        }
        self.accounts.insert(account.id.clone(), account);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}

impl FromIterator<Account> for AccountSet {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        let mut set = AccountSet::new();
        for account in iter {
            set.insert(account);
        }
        set
    }
}

//! Test doubles and account builders shared by the service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::config::Asset;
use crate::horizon::{FetchError, LedgerSource};
use crate::models::{Account, Balance, Problem, Signer, SignerType};

/// A bare account whose paging token is its id.
pub fn account(id: &str) -> Account {
    Account {
        id: id.to_string(),
        paging_token: id.to_string(),
        balances: vec![],
        signers: vec![],
        data: HashMap::new(),
    }
}

pub fn signer(key: &str, signer_type: SignerType, weight: u32) -> Signer {
    Signer {
        key: key.to_string(),
        signer_type,
        weight,
    }
}

pub fn key_signer(key: &str, weight: u32) -> Signer {
    signer(key, SignerType::Ed25519PublicKey, weight)
}

pub fn preauth_signer(hash: &str) -> Signer {
    signer(hash, SignerType::PreAuthTx, 1)
}

pub fn with_signers(mut account: Account, signers: Vec<Signer>) -> Account {
    account.signers = signers;
    account
}

pub fn with_balance(mut account: Account, asset: &Asset, amount: &str) -> Account {
    account.balances.push(Balance {
        balance: amount.to_string(),
        asset_type: if asset.code.len() <= 4 {
            "credit_alphanum4".to_string()
        } else {
            "credit_alphanum12".to_string()
        },
        asset_code: Some(asset.code.clone()),
        asset_issuer: Some(asset.issuer.clone()),
    });
    account
}

/// Attach the metadata entry `key` holding `value`.
pub fn with_data(mut account: Account, key: &str, value: &[u8]) -> Account {
    account.data.insert(key.to_string(), STANDARD.encode(value));
    account
}

/// An escrow account `id` with signers {id, beneficiary, preauth}.
pub fn escrow(id: &str, beneficiary: &str) -> Account {
    with_signers(
        account(id),
        vec![
            key_signer(id, 1),
            key_signer(beneficiary, 1),
            preauth_signer(&format!("T{}", id)),
        ],
    )
}

/// In-memory ledger serving pages by paging token, recording each request.
#[derive(Default)]
pub struct MockLedger {
    holders: HashMap<Asset, Vec<Account>>,
    failing: Vec<Asset>,
    requests: Mutex<Vec<Option<String>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holders(mut self, asset: &Asset, accounts: Vec<Account>) -> Self {
        self.holders.insert(asset.clone(), accounts);
        self
    }

    /// Every request for `asset` answers with a server error.
    pub fn failing_on(mut self, asset: &Asset) -> Self {
        self.failing.push(asset.clone());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn cursors(&self) -> Vec<Option<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerSource for MockLedger {
    async fn accounts_page(
        &self,
        asset: &Asset,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Vec<Account>, FetchError> {
        self.requests.lock().unwrap().push(cursor.map(str::to_string));

        if self.failing.contains(asset) {
            return Err(FetchError::Problem {
                url: "mock://accounts".to_string(),
                problem: Problem {
                    title: "Internal Server Error".to_string(),
                    status: 500,
                    ..Problem::default()
                },
            });
        }

        let holders = self.holders.get(asset).map(Vec::as_slice).unwrap_or(&[]);
        let start = match cursor {
            Some(token) => holders
                .iter()
                .position(|a| a.paging_token == token)
                .map_or(holders.len(), |i| i + 1),
            None => 0,
        };

        Ok(holders
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

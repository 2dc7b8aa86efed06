//! Collaborator boundaries the ledger composes with.
//!
//! Token transfer/approval bookkeeping, payment collection, and upgrade
//! mechanics are standard components, not problems this crate solves. The
//! ledger consumes them through the traits below; the in-memory
//! implementations keep a single-process deployment self-contained and give
//! tests a faithful counterparty.

use scrimshaw_types::{Address, CodeHash, LedgerError, TokenId, U256};
use std::collections::{HashMap, HashSet};

/// ERC721-style ownership/approval bookkeeping plus the enumerable index.
///
/// `record_mint` and `record_transfer` are the index-updater hooks: an
/// implementation must keep `total_supply` and the by-index views consistent
/// with every call.
pub trait TokenHooks {
    fn owner_of(&self, token_id: &TokenId) -> Option<Address>;
    fn balance_of(&self, account: &Address) -> U256;

    /// Whether `caller` may act on `token_id` (owner, per-token approvee, or
    /// operator for the owner).
    fn is_approved_or_owner(&self, caller: &Address, token_id: &TokenId) -> bool;

    fn record_mint(&mut self, to: &Address, token_id: TokenId);
    fn record_transfer(
        &mut self,
        from: &Address,
        to: &Address,
        token_id: &TokenId,
    ) -> Result<(), LedgerError>;

    fn total_supply(&self) -> U256;
    fn token_by_index(&self, index: &U256) -> Option<TokenId>;
    fn token_of_owner_by_index(&self, owner: &Address, index: &U256) -> Option<TokenId>;

    /// The owner-or-approved gate used by engrave and transfer entry points.
    fn require_owner_or_approved(
        &self,
        caller: &Address,
        token_id: &TokenId,
    ) -> Result<(), LedgerError> {
        if self.owner_of(token_id).is_none() {
            return Err(LedgerError::NotFound);
        }
        if !self.is_approved_or_owner(caller, token_id) {
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }
}

/// Collects mint payment in the configured fungible token.
pub trait PaymentHook {
    fn pull_payment(
        &mut self,
        from: &Address,
        payment_token: &Address,
        amount: &U256,
    ) -> Result<(), LedgerError>;
}

/// Installs a new code image on upgrade.
pub trait UpgradeHook {
    fn upgrade(&mut self, new_code: &CodeHash) -> Result<(), LedgerError>;
}

fn as_index(value: &U256) -> Option<usize> {
    if value.high != 0 {
        return None;
    }
    usize::try_from(value.low).ok()
}

/// In-memory token bookkeeping with an enumerable index.
///
/// Mirrors the observable behavior of the standard ERC721 + enumerable
/// component pair: per-token approvals clear on transfer, operator approvals
/// are per (owner, operator), and removal from the per-owner index is
/// swap-remove (order within an owner's list is not stable across
/// transfers).
#[derive(Default)]
pub struct TokenIndex {
    owners: HashMap<TokenId, Address>,
    approvals: HashMap<TokenId, Address>,
    operators: HashSet<(Address, Address)>,
    all_tokens: Vec<TokenId>,
    owned: HashMap<Address, Vec<TokenId>>,
}

impl TokenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Approves `to` for a single token. `caller` must own it.
    pub fn approve(
        &mut self,
        caller: &Address,
        to: Address,
        token_id: &TokenId,
    ) -> Result<(), LedgerError> {
        let owner = self.owner_of(token_id).ok_or(LedgerError::NotFound)?;
        if owner != *caller {
            return Err(LedgerError::Unauthorized);
        }
        self.approvals.insert(*token_id, to);
        Ok(())
    }

    pub fn get_approved(&self, token_id: &TokenId) -> Option<Address> {
        self.approvals.get(token_id).copied()
    }

    /// Grants or revokes `operator` over every token `caller` owns.
    pub fn set_approval_for_all(&mut self, caller: &Address, operator: Address, approved: bool) {
        if approved {
            self.operators.insert((*caller, operator));
        } else {
            self.operators.remove(&(*caller, operator));
        }
    }

    pub fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.operators.contains(&(*owner, *operator))
    }

    fn remove_from_owned(&mut self, owner: &Address, token_id: &TokenId) {
        if let Some(tokens) = self.owned.get_mut(owner) {
            if let Some(position) = tokens.iter().position(|t| t == token_id) {
                tokens.swap_remove(position);
            }
            if tokens.is_empty() {
                self.owned.remove(owner);
            }
        }
    }
}

impl TokenHooks for TokenIndex {
    fn owner_of(&self, token_id: &TokenId) -> Option<Address> {
        self.owners.get(token_id).copied()
    }

    fn balance_of(&self, account: &Address) -> U256 {
        U256::from_u64(
            self.owned
                .get(account)
                .map(|tokens| tokens.len())
                .unwrap_or(0) as u64,
        )
    }

    fn is_approved_or_owner(&self, caller: &Address, token_id: &TokenId) -> bool {
        let Some(owner) = self.owner_of(token_id) else {
            return false;
        };
        owner == *caller
            || self.approvals.get(token_id) == Some(caller)
            || self.is_approved_for_all(&owner, caller)
    }

    fn record_mint(&mut self, to: &Address, token_id: TokenId) {
        debug_assert!(!self.owners.contains_key(&token_id), "token minted twice");
        self.owners.insert(token_id, *to);
        self.all_tokens.push(token_id);
        self.owned.entry(*to).or_default().push(token_id);
    }

    fn record_transfer(
        &mut self,
        from: &Address,
        to: &Address,
        token_id: &TokenId,
    ) -> Result<(), LedgerError> {
        let owner = self.owner_of(token_id).ok_or(LedgerError::NotFound)?;
        if owner != *from {
            return Err(LedgerError::Unauthorized);
        }
        self.approvals.remove(token_id);
        self.owners.insert(*token_id, *to);
        self.remove_from_owned(from, token_id);
        self.owned.entry(*to).or_default().push(*token_id);
        Ok(())
    }

    fn total_supply(&self) -> U256 {
        U256::from_u64(self.all_tokens.len() as u64)
    }

    fn token_by_index(&self, index: &U256) -> Option<TokenId> {
        self.all_tokens.get(as_index(index)?).copied()
    }

    fn token_of_owner_by_index(&self, owner: &Address, index: &U256) -> Option<TokenId> {
        self.owned.get(owner)?.get(as_index(index)?).copied()
    }
}

/// In-memory fungible balances for mint payments.
///
/// `pull_payment` debits the payer and accrues the collected total per
/// payment token, refusing (without partial effects) when the payer's
/// balance is short.
#[derive(Default)]
pub struct Escrow {
    balances: HashMap<(Address, Address), U256>,
    collected: HashMap<Address, U256>,
}

impl Escrow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `holder` with `amount` of `payment_token`.
    pub fn fund(&mut self, payment_token: Address, holder: Address, amount: U256) {
        let balance = self
            .balances
            .entry((payment_token, holder))
            .or_insert(U256::ZERO);
        *balance = balance.checked_add(&amount).unwrap_or(U256::MAX);
    }

    pub fn balance(&self, payment_token: &Address, holder: &Address) -> U256 {
        self.balances
            .get(&(*payment_token, *holder))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn collected(&self, payment_token: &Address) -> U256 {
        self.collected
            .get(payment_token)
            .copied()
            .unwrap_or(U256::ZERO)
    }
}

impl PaymentHook for Escrow {
    fn pull_payment(
        &mut self,
        from: &Address,
        payment_token: &Address,
        amount: &U256,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self.balance(payment_token, from);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientPayment)?;
        self.balances.insert((*payment_token, *from), remaining);
        let collected = self
            .collected
            .entry(*payment_token)
            .or_insert(U256::ZERO);
        *collected = collected.checked_add(amount).unwrap_or(U256::MAX);
        Ok(())
    }
}

/// Records installed code images across upgrades.
#[derive(Default)]
pub struct CodeRegistry {
    installed: Vec<CodeHash>,
}

impl CodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&CodeHash> {
        self.installed.last()
    }

    pub fn history(&self) -> &[CodeHash] {
        &self.installed
    }
}

impl UpgradeHook for CodeRegistry {
    fn upgrade(&mut self, new_code: &CodeHash) -> Result<(), LedgerError> {
        self.installed.push(*new_code);
        Ok(())
    }
}

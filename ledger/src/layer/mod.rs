//! The atomic execution layer.
//!
//! Every mutation runs against a [`Layer`]: a pending overlay on top of
//! committed state. Handlers read through the overlay (so a batch observes
//! its own earlier writes, e.g. for nonce assignment) and stage writes into
//! it. On success the facade commits the overlay in one pass; on any typed
//! rejection the overlay is dropped and the ledger is untouched.

use scrimshaw_types::{
    Address, ArtifactId, Call, Event, Key, LedgerError, MintConfig, Tag, TagHistory, TagRegistry,
    TokenId, Value,
};
use std::collections::BTreeMap;

use crate::collaborators::{PaymentHook, TokenHooks, UpgradeHook};
use crate::facade::CollectionMetadata;
use crate::state::{State, Status};

mod handlers;

/// Mutable references to everything a call can touch besides keyed state:
/// the facade-held configuration and the external collaborators.
///
/// Handlers follow validate-then-mutate ordering against these references so
/// a rejection never leaves partial effects outside the droppable overlay.
pub struct Externals<'a, T: TokenHooks, P: PaymentHook, U: UpgradeHook> {
    pub owner: &'a mut Address,
    pub mint: &'a mut MintConfig,
    pub metadata: &'a mut CollectionMetadata,
    pub version: &'a mut u32,
    pub enforce_unique_tags: bool,
    pub tokens: &'a mut T,
    pub payments: &'a mut P,
    pub upgrades: &'a mut U,
}

impl<T: TokenHooks, P: PaymentHook, U: UpgradeHook> Externals<'_, T, P, U> {
    fn require_owner(&self, caller: &Address) -> Result<(), LedgerError> {
        // A renounced (zero) owner fails every caller, permanently.
        if self.owner.is_zero() || *caller != *self.owner {
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }
}

pub struct Layer<'a, S: State> {
    state: &'a S,
    pending: BTreeMap<Key, Status>,
}

impl<'a, S: State> Layer<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self {
            state,
            pending: BTreeMap::new(),
        }
    }

    /// Reads through the pending overlay into committed state.
    pub fn get(&self, key: &Key) -> Result<Option<Value>, LedgerError> {
        Ok(match self.pending.get(key) {
            Some(Status::Update(value)) => Some(value.clone()),
            Some(Status::Delete) => None,
            None => self
                .state
                .get(key)
                .map_err(|err| LedgerError::Internal(err.to_string()))?,
        })
    }

    fn insert(&mut self, key: Key, value: Value) {
        self.pending.insert(key, Status::Update(value));
    }

    /// Drains the overlay into an ordered change set for [`State::apply`].
    pub fn commit(self) -> Vec<(Key, Status)> {
        self.pending.into_iter().collect()
    }

    pub(crate) fn registry(&self) -> Result<TagRegistry, LedgerError> {
        Ok(match self.get(&Key::TagRegistry)? {
            Some(Value::TagRegistry(registry)) => registry,
            _ => TagRegistry::default(),
        })
    }

    pub(crate) fn history(
        &self,
        artifact_id: &ArtifactId,
        tag: &Tag,
    ) -> Result<TagHistory, LedgerError> {
        Ok(match self.get(&Key::TagHistory(*artifact_id, *tag))? {
            Some(Value::TagHistory(history)) => history,
            _ => TagHistory::default(),
        })
    }

    pub(crate) fn artifact_id(&self, token_id: &TokenId) -> Result<Option<ArtifactId>, LedgerError> {
        Ok(match self.get(&Key::TokenArtifact(*token_id))? {
            Some(Value::ArtifactId(artifact_id)) => Some(artifact_id),
            _ => None,
        })
    }

    /// Dispatches one call. Returns the events to journal, in the order the
    /// corresponding effects were applied.
    pub fn apply<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        call: &Call,
    ) -> Result<Vec<Event>, LedgerError> {
        match call {
            Call::Mint { amounts, tos } => self.handle_mint(ext, caller, amounts, tos),
            Call::Engrave {
                token_ids,
                artifacts,
            } => self.handle_engrave(ext, caller, token_ids, artifacts),
            Call::TransferAndSaveArtifact {
                froms,
                tos,
                token_ids,
            } => self.handle_transfer_and_save_artifact(ext, caller, froms, tos, token_ids),
            Call::TransferBatch { tos, token_ids } => {
                self.handle_transfer_batch(ext, caller, tos, token_ids)
            }
            Call::SetTags {
                modify_tags,
                new_tags,
            } => self.handle_set_tags(ext, caller, modify_tags.as_deref(), new_tags.as_deref()),
            Call::SetBaseUri { new_base_uri } => {
                self.handle_set_base_uri(ext, caller, new_base_uri)
            }
            Call::SetContractUri { new_contract_uri } => {
                self.handle_set_contract_uri(ext, caller, new_contract_uri)
            }
            Call::SetMintPrice { new_mint_price } => {
                self.handle_set_mint_price(ext, caller, new_mint_price)
            }
            Call::SetMintToken { new_mint_token } => {
                self.handle_set_mint_token(ext, caller, new_mint_token)
            }
            Call::SetIsMinting { enabled } => self.handle_set_is_minting(ext, caller, *enabled),
            Call::TransferOwnership { new_owner } => {
                self.handle_transfer_ownership(ext, caller, new_owner)
            }
            Call::RenounceOwnership => self.handle_renounce_ownership(ext, caller),
            Call::UpgradeContract { new_code } => {
                self.handle_upgrade_contract(ext, caller, new_code)
            }
        }
    }
}

//! The externally callable ledger surface.
//!
//! [`Ledger`] composes the keyed state store, the owned configuration
//! record, the collaborator boundaries, and the append-only output journal.
//! Mutations route through [`Ledger::execute`], which runs the call on a
//! pending overlay and commits only on success; views read committed state
//! directly.

use scrimshaw_types::{
    Address, Artifact, ArtifactId, Call, CodeHash, Engraving, EngravingVersion, Event,
    LedgerConfig, LedgerError, MintConfig, Output, Tag, TagRegistryEntry, TokenId, U256,
    CONTRACT_VERSION, MAX_URI_LENGTH,
};
use tracing::debug;

use crate::collaborators::{
    CodeRegistry, Escrow, PaymentHook, TokenHooks, TokenIndex, UpgradeHook,
};
use crate::layer::{Externals, Layer};
use crate::state::{Memory, State};
use crate::views;

/// Collection-level naming and URI configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionMetadata {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub contract_uri: String,
}

fn ensure_uri(uri: &str) -> Result<(), LedgerError> {
    if uri.len() > MAX_URI_LENGTH {
        return Err(LedgerError::OutOfRange {
            index: uri.len() as u32,
            len: MAX_URI_LENGTH as u32,
        });
    }
    Ok(())
}

/// The artifact engraving & versioning ledger.
pub struct Ledger<S = Memory, T = TokenIndex, P = Escrow, U = CodeRegistry>
where
    S: State,
    T: TokenHooks,
    P: PaymentHook,
    U: UpgradeHook,
{
    state: S,
    owner: Address,
    mint: MintConfig,
    metadata: CollectionMetadata,
    version: u32,
    enforce_unique_tags: bool,
    tokens: T,
    payments: P,
    upgrades: U,
    journal: Vec<Output>,
}

impl Ledger<Memory, TokenIndex, Escrow, CodeRegistry> {
    /// A fully in-memory ledger with the default collaborators.
    pub fn in_memory(config: LedgerConfig) -> Result<Self, LedgerError> {
        Self::new(
            config,
            Memory::new(),
            TokenIndex::new(),
            Escrow::new(),
            CodeRegistry::new(),
        )
    }
}

impl<S, T, P, U> Ledger<S, T, P, U>
where
    S: State,
    T: TokenHooks,
    P: PaymentHook,
    U: UpgradeHook,
{
    pub fn new(
        config: LedgerConfig,
        state: S,
        tokens: T,
        payments: P,
        upgrades: U,
    ) -> Result<Self, LedgerError> {
        if config.owner.is_zero() || config.mint_token.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        ensure_uri(&config.base_uri)?;
        ensure_uri(&config.contract_uri)?;
        Ok(Self {
            state,
            owner: config.owner,
            mint: MintConfig::new(
                config.mint_price,
                config.mint_token,
                config.max_supply,
                config.minting_enabled,
            ),
            metadata: CollectionMetadata {
                name: config.name,
                symbol: config.symbol,
                base_uri: config.base_uri,
                contract_uri: config.contract_uri,
            },
            version: CONTRACT_VERSION,
            enforce_unique_tags: config.enforce_unique_tags,
            tokens,
            payments,
            upgrades,
            journal: Vec::new(),
        })
    }

    /// Executes one call atomically: either every effect commits (state
    /// writes, collaborator bookkeeping, journal entries) or none do.
    pub fn execute(&mut self, caller: Address, call: Call) -> Result<Vec<Event>, LedgerError> {
        let mut layer = Layer::new(&self.state);
        let mut ext = Externals {
            owner: &mut self.owner,
            mint: &mut self.mint,
            metadata: &mut self.metadata,
            version: &mut self.version,
            enforce_unique_tags: self.enforce_unique_tags,
            tokens: &mut self.tokens,
            payments: &mut self.payments,
            upgrades: &mut self.upgrades,
        };
        let events = match layer.apply(&mut ext, &caller, &call) {
            Ok(events) => events,
            Err(err) => {
                debug!(%caller, ?err, "call rejected");
                return Err(err);
            }
        };
        let changes = layer.commit();
        self.state
            .apply(changes)
            .map_err(|err| LedgerError::Internal(err.to_string()))?;
        for event in &events {
            self.journal.push(Output::Event(event.clone()));
        }
        self.journal.push(Output::Call { caller, call });
        Ok(events)
    }

    // === Mutations ===

    pub fn mint(
        &mut self,
        caller: Address,
        amounts: Vec<U256>,
        tos: Vec<Address>,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::Mint { amounts, tos })
    }

    pub fn engrave(
        &mut self,
        caller: Address,
        token_ids: Vec<TokenId>,
        artifacts: Vec<Artifact>,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(
            caller,
            Call::Engrave {
                token_ids,
                artifacts,
            },
        )
    }

    pub fn transfer_and_save_artifact(
        &mut self,
        caller: Address,
        froms: Vec<Address>,
        tos: Vec<Address>,
        token_ids: Vec<TokenId>,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(
            caller,
            Call::TransferAndSaveArtifact {
                froms,
                tos,
                token_ids,
            },
        )
    }

    pub fn transfer_batch(
        &mut self,
        caller: Address,
        tos: Vec<Address>,
        token_ids: Vec<TokenId>,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::TransferBatch { tos, token_ids })
    }

    pub fn set_tags(
        &mut self,
        caller: Address,
        modify_tags: Option<Vec<TagRegistryEntry>>,
        new_tags: Option<Vec<Tag>>,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(
            caller,
            Call::SetTags {
                modify_tags,
                new_tags,
            },
        )
    }

    pub fn set_base_uri(
        &mut self,
        caller: Address,
        new_base_uri: String,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::SetBaseUri { new_base_uri })
    }

    pub fn set_contract_uri(
        &mut self,
        caller: Address,
        new_contract_uri: String,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::SetContractUri { new_contract_uri })
    }

    pub fn set_mint_price(
        &mut self,
        caller: Address,
        new_mint_price: U256,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::SetMintPrice { new_mint_price })
    }

    pub fn set_mint_token(
        &mut self,
        caller: Address,
        new_mint_token: Address,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::SetMintToken { new_mint_token })
    }

    pub fn set_is_minting(
        &mut self,
        caller: Address,
        enabled: bool,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::SetIsMinting { enabled })
    }

    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::TransferOwnership { new_owner })
    }

    pub fn renounce_ownership(&mut self, caller: Address) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::RenounceOwnership)
    }

    pub fn upgrade_contract(
        &mut self,
        caller: Address,
        new_code: CodeHash,
    ) -> Result<Vec<Event>, LedgerError> {
        self.execute(caller, Call::UpgradeContract { new_code })
    }

    // === Views ===

    pub fn is_minting(&self) -> bool {
        self.mint.minting_enabled
    }

    pub fn mint_price(&self) -> U256 {
        self.mint.price
    }

    pub fn mint_token(&self) -> Address {
        self.mint.payment_token
    }

    pub fn max_supply(&self) -> U256 {
        self.mint.max_supply
    }

    /// One artifact exists per minted token.
    pub fn total_artifacts(&self) -> U256 {
        self.mint.total_minted
    }

    /// Enumerable supply as reported by the token collaborator.
    pub fn total_supply(&self) -> U256 {
        self.tokens.total_supply()
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    #[doc(alias = "contractURI")]
    pub fn contract_uri(&self) -> &str {
        &self.metadata.contract_uri
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Metadata URI for a minted token: the base URI followed by the decimal
    /// token id.
    pub fn token_uri(&self, token_id: &TokenId) -> Result<String, LedgerError> {
        views::token_to_artifact(&self.state, token_id)?;
        Ok(format!("{}{}", self.metadata.base_uri, token_id))
    }

    pub fn official_tags(&self) -> Result<Vec<Tag>, LedgerError> {
        views::official_tags(&self.state)
    }

    pub fn token_ids_to_artifact_ids(
        &self,
        token_ids: &[TokenId],
    ) -> Result<Vec<ArtifactId>, LedgerError> {
        token_ids
            .iter()
            .map(|token_id| views::token_to_artifact(&self.state, token_id))
            .collect()
    }

    /// Current snapshots for a batch of minted tokens.
    pub fn get_artifacts(&self, token_ids: &[TokenId]) -> Result<Vec<Artifact>, LedgerError> {
        token_ids
            .iter()
            .map(|token_id| {
                let artifact_id = views::token_to_artifact(&self.state, token_id)?;
                views::current_artifact(&self.state, &artifact_id)
            })
            .collect()
    }

    /// Version counts for parallel (artifact, tag) pairs; zero for pairs
    /// never engraved.
    pub fn artifact_tag_nonces(
        &self,
        artifact_ids: &[ArtifactId],
        tags: &[Tag],
    ) -> Result<Vec<u32>, LedgerError> {
        LedgerError::ensure_same_length(artifact_ids.len(), tags.len())?;
        artifact_ids
            .iter()
            .zip(tags)
            .map(|(artifact_id, tag)| views::nonce_count(&self.state, artifact_id, tag))
            .collect()
    }

    /// Mixed-version snapshots: for each artifact, every requested tag
    /// pinned at its own nonce.
    pub fn get_historic_artifacts(
        &self,
        artifact_ids: &[ArtifactId],
        tags: &[Vec<Tag>],
        tag_nonces: &[Vec<u32>],
    ) -> Result<Vec<Artifact>, LedgerError> {
        LedgerError::ensure_same_length(artifact_ids.len(), tags.len())?;
        LedgerError::ensure_same_length(artifact_ids.len(), tag_nonces.len())?;
        artifact_ids
            .iter()
            .zip(tags.iter().zip(tag_nonces))
            .map(|(artifact_id, (tags, nonces))| {
                views::historic_artifact(&self.state, artifact_id, tags, nonces)
            })
            .collect()
    }

    /// Point read of one version.
    pub fn version_at(
        &self,
        artifact_id: &ArtifactId,
        tag: &Tag,
        nonce: u32,
    ) -> Result<Engraving, LedgerError> {
        views::version_at(&self.state, artifact_id, tag, nonce)
    }

    /// The full audit chain for one (artifact, tag) pair, oldest first.
    pub fn engraving_history(
        &self,
        artifact_id: &ArtifactId,
        tag: &Tag,
    ) -> Result<Vec<EngravingVersion>, LedgerError> {
        views::engraving_history(&self.state, artifact_id, tag)
    }

    /// The append-only output journal: events, then the call that produced
    /// them, per successful call.
    pub fn outputs(&self) -> &[Output] {
        &self.journal
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut T {
        &mut self.tokens
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn payments_mut(&mut self) -> &mut P {
        &mut self.payments
    }

    pub fn upgrades(&self) -> &U {
        &self.upgrades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{self, ALICE, BOB, OWNER, PAYMENT_TOKEN};

    #[test]
    fn construction_rejects_zero_addresses() {
        let mut config = mocks::test_config();
        config.owner = Address::ZERO;
        assert_eq!(
            Ledger::in_memory(config).err(),
            Some(LedgerError::ZeroAddress)
        );

        let mut config = mocks::test_config();
        config.mint_token = Address::ZERO;
        assert_eq!(
            Ledger::in_memory(config).err(),
            Some(LedgerError::ZeroAddress)
        );
    }

    #[test]
    fn fresh_ledger_reports_configured_views() {
        let ledger = mocks::funded_ledger();
        assert!(ledger.is_minting());
        assert_eq!(ledger.mint_price(), U256::from_u64(mocks::MINT_PRICE));
        assert_eq!(ledger.mint_token(), PAYMENT_TOKEN);
        assert_eq!(ledger.max_supply(), U256::from_u64(mocks::MAX_SUPPLY));
        assert_eq!(ledger.total_artifacts(), U256::ZERO);
        assert_eq!(ledger.total_supply(), U256::ZERO);
        assert_eq!(ledger.owner(), OWNER);
        assert_eq!(ledger.name(), "Scrimshaw");
        assert_eq!(ledger.symbol(), "SCRIM");
        assert_eq!(ledger.version(), CONTRACT_VERSION);
        assert_eq!(ledger.official_tags().unwrap(), Vec::new());
        assert!(ledger.outputs().is_empty());
    }

    #[test]
    fn token_uri_appends_decimal_id_for_minted_tokens_only() {
        let mut ledger = mocks::funded_ledger();
        ledger
            .mint(ALICE, vec![U256::from_u64(2)], vec![ALICE])
            .unwrap();

        assert_eq!(
            ledger.token_uri(&U256::from_u64(2)).unwrap(),
            "https://scrimshaw.example/nft/2"
        );
        assert_eq!(
            ledger.token_uri(&U256::from_u64(3)),
            Err(LedgerError::NotFound)
        );
    }

    #[test]
    fn journal_records_events_then_call() {
        let mut ledger = mocks::funded_ledger();
        ledger.mint(ALICE, vec![U256::ONE], vec![ALICE]).unwrap();

        let outputs = ledger.outputs();
        assert_eq!(outputs.len(), 2);
        assert!(matches!(
            &outputs[0],
            Output::Event(Event::Transfer { from, to, token_id })
                if *from == Address::ZERO && *to == ALICE && *token_id == U256::ONE
        ));
        assert!(matches!(
            &outputs[1],
            Output::Call { caller, call: Call::Mint { .. } } if *caller == ALICE
        ));
    }

    #[test]
    fn rejected_call_leaves_no_journal_entry() {
        let mut ledger = mocks::funded_ledger();
        assert_eq!(
            ledger.set_is_minting(BOB, false),
            Err(LedgerError::Unauthorized)
        );
        assert!(ledger.outputs().is_empty());
        assert!(ledger.is_minting());
    }

    #[test]
    fn upgrade_bumps_version_and_records_code() {
        let mut ledger = mocks::funded_ledger();
        let code = CodeHash::new([5u8; 32]);
        let events = ledger.upgrade_contract(OWNER, code).unwrap();
        assert_eq!(events, vec![Event::ContractUpgraded { new_code: code }]);
        assert_eq!(ledger.version(), CONTRACT_VERSION + 1);
        assert_eq!(ledger.upgrades().current(), Some(&code));

        assert_eq!(
            ledger.upgrade_contract(OWNER, CodeHash::ZERO),
            Err(LedgerError::ZeroAddress)
        );
    }

    #[test]
    fn ownership_handover_gates_follow_the_new_owner() {
        let mut ledger = mocks::funded_ledger();
        ledger.transfer_ownership(OWNER, ALICE).unwrap();
        assert_eq!(ledger.owner(), ALICE);
        assert_eq!(
            ledger.set_is_minting(OWNER, false),
            Err(LedgerError::Unauthorized)
        );
        ledger.set_is_minting(ALICE, false).unwrap();
        assert!(!ledger.is_minting());

        ledger.renounce_ownership(ALICE).unwrap();
        assert_eq!(ledger.owner(), Address::ZERO);
        // Nobody can pass the gate afterwards, not even the zero address.
        assert_eq!(
            ledger.set_is_minting(Address::ZERO, true),
            Err(LedgerError::Unauthorized)
        );
    }
}

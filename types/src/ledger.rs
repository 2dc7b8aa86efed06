//! Calls, events, state keys/values, and configuration for the engraving
//! ledger.
//!
//! Every mutation of the ledger is expressible as a [`Call`]; every state
//! change is reported as an [`Event`]. Successful calls are journaled as
//! [`Output`]s (events first, then the call that produced them, mirroring
//! input order) so downstream indexers can reconstruct history
//! deterministically.

use crate::codec::{read_string, string_encode_size, write_string};
use crate::engraving::{
    Artifact, Engraving, TagHistory, TagRegistry, TagRegistryEntry, MAX_REGISTRY_TAGS,
};
use crate::primitives::{Address, ArtifactId, CodeHash, Tag, TokenId, U256};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};

/// Version reported by a freshly constructed ledger; each successful
/// `upgrade_contract` increments it.
pub const CONTRACT_VERSION: u32 = 1;

/// Maximum entries accepted by one batched call.
pub const MAX_BATCH: usize = 128;

/// Maximum byte length of configured names, symbols, and URIs.
pub const MAX_URI_LENGTH: usize = 2048;

/// The mint gate's mutable knobs plus the running mint counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintConfig {
    pub price: U256,
    pub payment_token: Address,
    pub max_supply: U256,
    pub minting_enabled: bool,
    pub total_minted: U256,
}

impl MintConfig {
    pub fn new(price: U256, payment_token: Address, max_supply: U256, minting_enabled: bool) -> Self {
        Self {
            price,
            payment_token,
            max_supply,
            minting_enabled,
            total_minted: U256::ZERO,
        }
    }
}

/// Constructor arguments for a ledger instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub owner: Address,
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
    pub contract_uri: String,
    pub mint_token: Address,
    pub mint_price: U256,
    pub max_supply: U256,
    #[serde(default)]
    pub minting_enabled: bool,
    /// When set, no two registry slots may carry the same label.
    #[serde(default)]
    pub enforce_unique_tags: bool,
}

/// A mutation of the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum Call {
    /// Mint `amounts[i]` sequential tokens to `tos[i]`.
    /// Binary: [0] [count:u32] [amount:u256]* [count:u32] [to:address]*
    Mint { amounts: Vec<U256>, tos: Vec<Address> },

    /// Append every engraving of `artifacts[i]` onto `token_ids[i]`.
    /// Binary: [1] [count:u32] [tokenId:u256]* [count:u32] [artifact]*
    Engrave {
        token_ids: Vec<TokenId>,
        artifacts: Vec<Artifact>,
    },

    /// Transfer-from batch that keeps each token's artifact binding intact.
    /// Binary: [2] [count:u32] [from:address]* [count:u32] [to:address]* [count:u32] [tokenId:u256]*
    TransferAndSaveArtifact {
        froms: Vec<Address>,
        tos: Vec<Address>,
        token_ids: Vec<TokenId>,
    },

    /// Owner/operator batch send of the caller's tokens.
    /// Binary: [3] [count:u32] [to:address]* [count:u32] [tokenId:u256]*
    TransferBatch {
        tos: Vec<Address>,
        token_ids: Vec<TokenId>,
    },

    /// Rename existing registry slots and/or append new ones.
    /// Binary: [4] [hasModify:u8] ([count:u32] [entry]*)? [hasNew:u8] ([count:u32] [tag]*)?
    SetTags {
        modify_tags: Option<Vec<TagRegistryEntry>>,
        new_tags: Option<Vec<Tag>>,
    },

    /// Binary: [5] [uri:string]
    SetBaseUri { new_base_uri: String },

    /// Binary: [6] [uri:string]
    SetContractUri { new_contract_uri: String },

    /// Binary: [7] [price:u256]
    SetMintPrice { new_mint_price: U256 },

    /// Binary: [8] [token:address]
    SetMintToken { new_mint_token: Address },

    /// Binary: [9] [enabled:u8]
    SetIsMinting { enabled: bool },

    /// Binary: [10] [owner:address]
    TransferOwnership { new_owner: Address },

    /// Binary: [11]
    RenounceOwnership,

    /// Binary: [12] [code:hash]
    UpgradeContract { new_code: CodeHash },
}

fn read_batch<B: Buf, T, F>(reader: &mut B, mut read_one: F) -> Result<Vec<T>, Error>
where
    F: FnMut(&mut B) -> Result<T, Error>,
{
    let count = u32::read(reader)? as usize;
    if count > MAX_BATCH {
        return Err(Error::Invalid("Call", "batch too large"));
    }
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(read_one(reader)?);
    }
    Ok(items)
}

impl Write for Call {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Mint { amounts, tos } => {
                0u8.write(writer);
                (amounts.len() as u32).write(writer);
                for amount in amounts {
                    amount.write(writer);
                }
                (tos.len() as u32).write(writer);
                for to in tos {
                    to.write(writer);
                }
            }
            Self::Engrave {
                token_ids,
                artifacts,
            } => {
                1u8.write(writer);
                (token_ids.len() as u32).write(writer);
                for token_id in token_ids {
                    token_id.write(writer);
                }
                (artifacts.len() as u32).write(writer);
                for artifact in artifacts {
                    artifact.write(writer);
                }
            }
            Self::TransferAndSaveArtifact {
                froms,
                tos,
                token_ids,
            } => {
                2u8.write(writer);
                (froms.len() as u32).write(writer);
                for from in froms {
                    from.write(writer);
                }
                (tos.len() as u32).write(writer);
                for to in tos {
                    to.write(writer);
                }
                (token_ids.len() as u32).write(writer);
                for token_id in token_ids {
                    token_id.write(writer);
                }
            }
            Self::TransferBatch { tos, token_ids } => {
                3u8.write(writer);
                (tos.len() as u32).write(writer);
                for to in tos {
                    to.write(writer);
                }
                (token_ids.len() as u32).write(writer);
                for token_id in token_ids {
                    token_id.write(writer);
                }
            }
            Self::SetTags {
                modify_tags,
                new_tags,
            } => {
                4u8.write(writer);
                match modify_tags {
                    Some(entries) => {
                        true.write(writer);
                        (entries.len() as u32).write(writer);
                        for entry in entries {
                            entry.write(writer);
                        }
                    }
                    None => false.write(writer),
                }
                match new_tags {
                    Some(tags) => {
                        true.write(writer);
                        (tags.len() as u32).write(writer);
                        for tag in tags {
                            tag.write(writer);
                        }
                    }
                    None => false.write(writer),
                }
            }
            Self::SetBaseUri { new_base_uri } => {
                5u8.write(writer);
                write_string(new_base_uri, writer);
            }
            Self::SetContractUri { new_contract_uri } => {
                6u8.write(writer);
                write_string(new_contract_uri, writer);
            }
            Self::SetMintPrice { new_mint_price } => {
                7u8.write(writer);
                new_mint_price.write(writer);
            }
            Self::SetMintToken { new_mint_token } => {
                8u8.write(writer);
                new_mint_token.write(writer);
            }
            Self::SetIsMinting { enabled } => {
                9u8.write(writer);
                enabled.write(writer);
            }
            Self::TransferOwnership { new_owner } => {
                10u8.write(writer);
                new_owner.write(writer);
            }
            Self::RenounceOwnership => 11u8.write(writer),
            Self::UpgradeContract { new_code } => {
                12u8.write(writer);
                new_code.write(writer);
            }
        }
    }
}

impl Read for Call {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let call = match reader.get_u8() {
            0 => Self::Mint {
                amounts: read_batch(reader, |r| U256::read(r))?,
                tos: read_batch(reader, |r| Address::read(r))?,
            },
            1 => Self::Engrave {
                token_ids: read_batch(reader, |r| U256::read(r))?,
                artifacts: read_batch(reader, |r| Artifact::read(r))?,
            },
            2 => Self::TransferAndSaveArtifact {
                froms: read_batch(reader, |r| Address::read(r))?,
                tos: read_batch(reader, |r| Address::read(r))?,
                token_ids: read_batch(reader, |r| U256::read(r))?,
            },
            3 => Self::TransferBatch {
                tos: read_batch(reader, |r| Address::read(r))?,
                token_ids: read_batch(reader, |r| U256::read(r))?,
            },
            4 => {
                let modify_tags = if bool::read(reader)? {
                    let count = u32::read(reader)? as usize;
                    if count > MAX_REGISTRY_TAGS {
                        return Err(Error::Invalid("Call", "too many slot modifications"));
                    }
                    let mut entries = Vec::with_capacity(count);
                    for _ in 0..count {
                        entries.push(TagRegistryEntry::read(reader)?);
                    }
                    Some(entries)
                } else {
                    None
                };
                let new_tags = if bool::read(reader)? {
                    let count = u32::read(reader)? as usize;
                    if count > MAX_REGISTRY_TAGS {
                        return Err(Error::Invalid("Call", "too many new tags"));
                    }
                    let mut tags = Vec::with_capacity(count);
                    for _ in 0..count {
                        tags.push(Tag::read(reader)?);
                    }
                    Some(tags)
                } else {
                    None
                };
                Self::SetTags {
                    modify_tags,
                    new_tags,
                }
            }
            5 => Self::SetBaseUri {
                new_base_uri: read_string(reader, MAX_URI_LENGTH)?,
            },
            6 => Self::SetContractUri {
                new_contract_uri: read_string(reader, MAX_URI_LENGTH)?,
            },
            7 => Self::SetMintPrice {
                new_mint_price: U256::read(reader)?,
            },
            8 => Self::SetMintToken {
                new_mint_token: Address::read(reader)?,
            },
            9 => Self::SetIsMinting {
                enabled: bool::read(reader)?,
            },
            10 => Self::TransferOwnership {
                new_owner: Address::read(reader)?,
            },
            11 => Self::RenounceOwnership,
            12 => Self::UpgradeContract {
                new_code: CodeHash::read(reader)?,
            },
            i => return Err(Error::InvalidEnum(i)),
        };
        Ok(call)
    }
}

impl EncodeSize for Call {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Mint { amounts, tos } => {
                    4 + amounts.len() * U256::SIZE + 4 + tos.len() * Address::SIZE
                }
                Self::Engrave {
                    token_ids,
                    artifacts,
                } => {
                    4 + token_ids.len() * U256::SIZE
                        + 4
                        + artifacts.iter().map(|a| a.encode_size()).sum::<usize>()
                }
                Self::TransferAndSaveArtifact {
                    froms,
                    tos,
                    token_ids,
                } => {
                    4 + froms.len() * Address::SIZE
                        + 4
                        + tos.len() * Address::SIZE
                        + 4
                        + token_ids.len() * U256::SIZE
                }
                Self::TransferBatch { tos, token_ids } => {
                    4 + tos.len() * Address::SIZE + 4 + token_ids.len() * U256::SIZE
                }
                Self::SetTags {
                    modify_tags,
                    new_tags,
                } => {
                    bool::SIZE
                        + modify_tags
                            .as_ref()
                            .map(|entries| 4 + entries.len() * TagRegistryEntry::SIZE)
                            .unwrap_or(0)
                        + bool::SIZE
                        + new_tags
                            .as_ref()
                            .map(|tags| 4 + tags.len() * Tag::SIZE)
                            .unwrap_or(0)
                }
                Self::SetBaseUri { new_base_uri } => string_encode_size(new_base_uri),
                Self::SetContractUri { new_contract_uri } => string_encode_size(new_contract_uri),
                Self::SetMintPrice { .. } => U256::SIZE,
                Self::SetMintToken { .. } => Address::SIZE,
                Self::SetIsMinting { .. } => bool::SIZE,
                Self::TransferOwnership { .. } => Address::SIZE,
                Self::RenounceOwnership => 0,
                Self::UpgradeContract { .. } => CodeHash::SIZE,
            }
    }
}

/// A state key. Values live in flat storage addressed by these keys; the
/// engraving arena is the composite (artifact, tag) key.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Clone, Debug)]
pub enum Key {
    /// token -> artifact mapping (tag 0)
    TokenArtifact(TokenId),
    /// the ordered official-tag catalogue (tag 1)
    TagRegistry,
    /// version chain for one (artifact, tag) pair (tag 2)
    TagHistory(ArtifactId, Tag),
}

impl Write for Key {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::TokenArtifact(token_id) => {
                0u8.write(writer);
                token_id.write(writer);
            }
            Self::TagRegistry => 1u8.write(writer),
            Self::TagHistory(artifact_id, tag) => {
                2u8.write(writer);
                artifact_id.write(writer);
                tag.write(writer);
            }
        }
    }
}

impl Read for Key {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let key = match reader.get_u8() {
            0 => Self::TokenArtifact(U256::read(reader)?),
            1 => Self::TagRegistry,
            2 => Self::TagHistory(U256::read(reader)?, Tag::read(reader)?),
            i => return Err(Error::InvalidEnum(i)),
        };
        Ok(key)
    }
}

impl EncodeSize for Key {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::TokenArtifact(_) => U256::SIZE,
                Self::TagRegistry => 0,
                Self::TagHistory(_, _) => U256::SIZE + Tag::SIZE,
            }
    }
}

/// A state value.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Value {
    /// artifact id bound to a minted token (tag 0)
    ArtifactId(ArtifactId),
    /// the tag catalogue (tag 1)
    TagRegistry(TagRegistry),
    /// a (artifact, tag) version chain (tag 2)
    TagHistory(TagHistory),
}

impl Write for Value {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::ArtifactId(artifact_id) => {
                0u8.write(writer);
                artifact_id.write(writer);
            }
            Self::TagRegistry(registry) => {
                1u8.write(writer);
                registry.write(writer);
            }
            Self::TagHistory(history) => {
                2u8.write(writer);
                history.write(writer);
            }
        }
    }
}

impl Read for Value {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = match reader.get_u8() {
            0 => Self::ArtifactId(U256::read(reader)?),
            1 => Self::TagRegistry(TagRegistry::read(reader)?),
            2 => Self::TagHistory(TagHistory::read(reader)?),
            i => return Err(Error::InvalidEnum(i)),
        };
        Ok(value)
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::ArtifactId(_) => U256::SIZE,
                Self::TagRegistry(registry) => registry.encode_size(),
                Self::TagHistory(history) => history.encode_size(),
            }
    }
}

/// A state change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::large_enum_variant)]
pub enum Event {
    /// A new version was appended to a token's artifact (tag 0).
    ArtifactEngraved {
        token_id: TokenId,
        old_engraving: Option<Engraving>,
        new_engraving: Engraving,
    },
    /// A new slot was appended to the registry (tag 1).
    TagRegistered { new_tag: Tag },
    /// An existing slot was renamed (tag 2).
    TagReregistered { old_tag: Tag, new_tag: Tag },
    /// Pass-through token transfer; `from` is zero on mint (tag 3).
    Transfer {
        from: Address,
        to: Address,
        token_id: TokenId,
    },
    /// Pass-through ownership handover (tag 4).
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    /// Pass-through upgrade notification (tag 5).
    ContractUpgraded { new_code: CodeHash },
}

impl Write for Event {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::ArtifactEngraved {
                token_id,
                old_engraving,
                new_engraving,
            } => {
                0u8.write(writer);
                token_id.write(writer);
                match old_engraving {
                    Some(engraving) => {
                        true.write(writer);
                        engraving.write(writer);
                    }
                    None => false.write(writer),
                }
                new_engraving.write(writer);
            }
            Self::TagRegistered { new_tag } => {
                1u8.write(writer);
                new_tag.write(writer);
            }
            Self::TagReregistered { old_tag, new_tag } => {
                2u8.write(writer);
                old_tag.write(writer);
                new_tag.write(writer);
            }
            Self::Transfer {
                from,
                to,
                token_id,
            } => {
                3u8.write(writer);
                from.write(writer);
                to.write(writer);
                token_id.write(writer);
            }
            Self::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => {
                4u8.write(writer);
                previous_owner.write(writer);
                new_owner.write(writer);
            }
            Self::ContractUpgraded { new_code } => {
                5u8.write(writer);
                new_code.write(writer);
            }
        }
    }
}

impl Read for Event {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let event = match reader.get_u8() {
            0 => {
                let token_id = U256::read(reader)?;
                let old_engraving = if bool::read(reader)? {
                    Some(Engraving::read(reader)?)
                } else {
                    None
                };
                let new_engraving = Engraving::read(reader)?;
                Self::ArtifactEngraved {
                    token_id,
                    old_engraving,
                    new_engraving,
                }
            }
            1 => Self::TagRegistered {
                new_tag: Tag::read(reader)?,
            },
            2 => Self::TagReregistered {
                old_tag: Tag::read(reader)?,
                new_tag: Tag::read(reader)?,
            },
            3 => Self::Transfer {
                from: Address::read(reader)?,
                to: Address::read(reader)?,
                token_id: U256::read(reader)?,
            },
            4 => Self::OwnershipTransferred {
                previous_owner: Address::read(reader)?,
                new_owner: Address::read(reader)?,
            },
            5 => Self::ContractUpgraded {
                new_code: CodeHash::read(reader)?,
            },
            i => return Err(Error::InvalidEnum(i)),
        };
        Ok(event)
    }
}

impl EncodeSize for Event {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::ArtifactEngraved {
                    old_engraving,
                    new_engraving,
                    ..
                } => {
                    U256::SIZE
                        + bool::SIZE
                        + old_engraving
                            .as_ref()
                            .map(|e| e.encode_size())
                            .unwrap_or(0)
                        + new_engraving.encode_size()
                }
                Self::TagRegistered { .. } => Tag::SIZE,
                Self::TagReregistered { .. } => 2 * Tag::SIZE,
                Self::Transfer { .. } => 2 * Address::SIZE + U256::SIZE,
                Self::OwnershipTransferred { .. } => 2 * Address::SIZE,
                Self::ContractUpgraded { .. } => CodeHash::SIZE,
            }
    }
}

/// One entry of the append-only output journal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum Output {
    /// An emitted event (tag 0).
    Event(Event),
    /// The call that produced the preceding events (tag 1).
    Call { caller: Address, call: Call },
}

impl Write for Output {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Event(event) => {
                0u8.write(writer);
                event.write(writer);
            }
            Self::Call { caller, call } => {
                1u8.write(writer);
                caller.write(writer);
                call.write(writer);
            }
        }
    }
}

impl Read for Output {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let output = match reader.get_u8() {
            0 => Self::Event(Event::read(reader)?),
            1 => Self::Call {
                caller: Address::read(reader)?,
                call: Call::read(reader)?,
            },
            i => return Err(Error::InvalidEnum(i)),
        };
        Ok(output)
    }
}

impl EncodeSize for Output {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Event(event) => event.encode_size(),
                Self::Call { call, .. } => Address::SIZE + call.encode_size(),
            }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use commonware_codec::DecodeExt as _;

    fn addr(seed: u8) -> Address {
        let mut bytes = [0u8; 32];
        bytes[31] = seed;
        Address::new(bytes)
    }

    fn roundtrip_call(call: Call) {
        let mut buf = BytesMut::new();
        call.write(&mut buf);
        assert_eq!(buf.len(), call.encode_size(), "encode_size for {call:?}");
        assert_eq!(Call::decode(buf.as_ref()).unwrap(), call);
    }

    #[test]
    fn call_binary_roundtrips() {
        roundtrip_call(Call::Mint {
            amounts: vec![U256::from_u64(2), U256::ONE],
            tos: vec![addr(1), addr(2)],
        });
        roundtrip_call(Call::Engrave {
            token_ids: vec![U256::ONE],
            artifacts: vec![Artifact::new(vec![Engraving::new(
                Tag::from_label("origin"),
                b"smithy".to_vec(),
            )])],
        });
        roundtrip_call(Call::SetTags {
            modify_tags: Some(vec![TagRegistryEntry {
                index: 0,
                tag: Tag::from_label("renamed"),
            }]),
            new_tags: None,
        });
        roundtrip_call(Call::SetTags {
            modify_tags: None,
            new_tags: Some(vec![Tag::from_label("a"), Tag::from_label("b")]),
        });
        roundtrip_call(Call::SetBaseUri {
            new_base_uri: "https://example.com/nft/".to_string(),
        });
        roundtrip_call(Call::RenounceOwnership);
        roundtrip_call(Call::UpgradeContract {
            new_code: CodeHash::new([7u8; 32]),
        });
    }

    #[test]
    fn call_read_rejects_oversized_batches() {
        let mut buf = BytesMut::new();
        0u8.write(&mut buf);
        ((MAX_BATCH + 1) as u32).write(&mut buf);
        for _ in 0..(MAX_BATCH + 1) {
            U256::ONE.write(&mut buf);
        }
        0u32.write(&mut buf);
        assert!(Call::decode(buf.as_ref()).is_err());
    }

    #[test]
    fn key_and_value_roundtrip() {
        for key in [
            Key::TokenArtifact(U256::from_u64(5)),
            Key::TagRegistry,
            Key::TagHistory(U256::from_u64(5), Tag::from_label("origin")),
        ] {
            let mut buf = BytesMut::new();
            key.write(&mut buf);
            assert_eq!(buf.len(), key.encode_size());
            assert_eq!(Key::decode(buf.as_ref()).unwrap(), key);
        }

        let value = Value::TagHistory(TagHistory {
            versions: vec![Engraving::new(Tag::from_label("origin"), vec![1, 2, 3])],
        });
        let mut buf = BytesMut::new();
        value.write(&mut buf);
        assert_eq!(buf.len(), value.encode_size());
        assert_eq!(Value::decode(buf.as_ref()).unwrap(), value);
    }

    #[test]
    fn event_roundtrip_covers_optional_old_engraving() {
        let first = Event::ArtifactEngraved {
            token_id: U256::ONE,
            old_engraving: None,
            new_engraving: Engraving::new(Tag::from_label("origin"), vec![1]),
        };
        let second = Event::ArtifactEngraved {
            token_id: U256::ONE,
            old_engraving: Some(Engraving::new(Tag::from_label("origin"), vec![1])),
            new_engraving: Engraving::new(Tag::from_label("origin"), vec![2]),
        };
        for event in [first, second] {
            let mut buf = BytesMut::new();
            event.write(&mut buf);
            assert_eq!(buf.len(), event.encode_size());
            assert_eq!(Event::decode(buf.as_ref()).unwrap(), event);
        }
    }

    #[test]
    fn output_journal_entry_roundtrip() {
        let output = Output::Call {
            caller: addr(9),
            call: Call::SetIsMinting { enabled: true },
        };
        let mut buf = BytesMut::new();
        output.write(&mut buf);
        assert_eq!(buf.len(), output.encode_size());
        assert_eq!(Output::decode(buf.as_ref()).unwrap(), output);
    }

    #[test]
    fn ledger_config_defaults_off_switches() {
        let config: LedgerConfig = serde_json::from_value(serde_json::json!({
            "owner": addr(1).to_string(),
            "name": "Scrimshaw",
            "symbol": "SCRIM",
            "base_uri": "https://example.com/nft/",
            "contract_uri": "https://example.com/contract.json",
            "mint_token": addr(2).to_string(),
            "mint_price": "1000",
            "max_supply": "10000",
        }))
        .unwrap();
        assert!(!config.minting_enabled);
        assert!(!config.enforce_unique_tags);
        assert_eq!(config.mint_price, U256::from_u64(1000));
    }
}

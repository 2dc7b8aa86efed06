//! Common types for the scrimshaw engraving ledger.
//!
//! Everything that crosses the ledger boundary lives here: the scalar
//! primitives, the engraving/artifact model, the call/event/output enums
//! with their wire codecs, and the rejection taxonomy.

pub(crate) mod codec;
pub mod engraving;
pub mod error;
pub mod ledger;
pub mod primitives;

pub use engraving::{
    Artifact, Engraving, EngravingVersion, TagHistory, TagRegistry, TagRegistryEntry,
    MAX_ARTIFACT_ENGRAVINGS, MAX_ENGRAVING_DATA, MAX_REGISTRY_TAGS,
};
pub use error::LedgerError;
pub use ledger::{
    Call, Event, Key, LedgerConfig, MintConfig, Output, Value, CONTRACT_VERSION, MAX_BATCH,
    MAX_URI_LENGTH,
};
pub use primitives::{Address, ArtifactId, CodeHash, Tag, TokenId, U256};

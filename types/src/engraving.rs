//! Engravings, artifacts, and the tag registry.
//!
//! An engraving is a single tagged metadata payload attached to an artifact.
//! Engravings are immutable once recorded; successive writes to the same
//! (artifact, tag) pair form a dense, append-only version chain.

use crate::codec::{bytes_encode_size, read_bytes, write_bytes};
use crate::primitives::{ArtifactId, Tag};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use commonware_utils::{from_hex, hex};
use serde::{Deserialize, Serialize};

/// Maximum payload length for a single engraving.
pub const MAX_ENGRAVING_DATA: usize = 4096;

/// Maximum engravings carried by one artifact payload.
pub const MAX_ARTIFACT_ENGRAVINGS: usize = 64;

/// Maximum number of registry slots.
pub const MAX_REGISTRY_TAGS: usize = 256;

mod serde_data_hex {
    use super::{from_hex, hex};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        from_hex(&s).ok_or_else(|| serde::de::Error::custom("invalid hex string"))
    }
}

/// A single tagged metadata payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engraving {
    pub tag: Tag,
    #[serde(with = "serde_data_hex")]
    pub data: Vec<u8>,
}

impl Engraving {
    pub fn new(tag: Tag, data: Vec<u8>) -> Self {
        Self { tag, data }
    }
}

impl Write for Engraving {
    fn write(&self, writer: &mut impl BufMut) {
        self.tag.write(writer);
        write_bytes(&self.data, writer);
    }
}

impl Read for Engraving {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let tag = Tag::read(reader)?;
        let data = read_bytes(reader, MAX_ENGRAVING_DATA)?;
        Ok(Self { tag, data })
    }
}

impl EncodeSize for Engraving {
    fn encode_size(&self) -> usize {
        Tag::SIZE + bytes_encode_size(&self.data)
    }
}

/// A materialized artifact view: one engraving per tag, ordered by the tag
/// registry at evaluation time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub collection: Vec<Engraving>,
}

impl Artifact {
    pub fn new(collection: Vec<Engraving>) -> Self {
        Self { collection }
    }
}

impl Write for Artifact {
    fn write(&self, writer: &mut impl BufMut) {
        (self.collection.len() as u32).write(writer);
        for engraving in &self.collection {
            engraving.write(writer);
        }
    }
}

impl Read for Artifact {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let count = u32::read(reader)? as usize;
        if count > MAX_ARTIFACT_ENGRAVINGS {
            return Err(Error::Invalid("Artifact", "too many engravings"));
        }
        let mut collection = Vec::with_capacity(count);
        for _ in 0..count {
            collection.push(Engraving::read(reader)?);
        }
        Ok(Self { collection })
    }
}

impl EncodeSize for Artifact {
    fn encode_size(&self) -> usize {
        4 + self
            .collection
            .iter()
            .map(|engraving| engraving.encode_size())
            .sum::<usize>()
    }
}

/// One row of a tag's version chain, as surfaced by audit views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngravingVersion {
    pub artifact_id: ArtifactId,
    pub tag: Tag,
    pub nonce: u32,
    pub engraving: Engraving,
}

/// A registry slot: the stable index plus its current label.
///
/// Also the element type of slot modifications in `set_tags`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRegistryEntry {
    pub index: u32,
    pub tag: Tag,
}

impl Write for TagRegistryEntry {
    fn write(&self, writer: &mut impl BufMut) {
        self.index.write(writer);
        self.tag.write(writer);
    }
}

impl Read for TagRegistryEntry {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            index: u32::read(reader)?,
            tag: Tag::read(reader)?,
        })
    }
}

impl FixedSize for TagRegistryEntry {
    const SIZE: usize = 4 + Tag::SIZE;
}

/// The ordered catalogue of official tags.
///
/// Slots are append-only; a slot's label may be overwritten (rename) but the
/// slot itself is never removed, so indices stay stable for the lifetime of
/// the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRegistry {
    pub tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn len(&self) -> u32 {
        self.tags.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Write for TagRegistry {
    fn write(&self, writer: &mut impl BufMut) {
        (self.tags.len() as u32).write(writer);
        for tag in &self.tags {
            tag.write(writer);
        }
    }
}

impl Read for TagRegistry {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let count = u32::read(reader)? as usize;
        if count > MAX_REGISTRY_TAGS {
            return Err(Error::Invalid("TagRegistry", "too many tags"));
        }
        let mut tags = Vec::with_capacity(count);
        for _ in 0..count {
            tags.push(Tag::read(reader)?);
        }
        Ok(Self { tags })
    }
}

impl EncodeSize for TagRegistry {
    fn encode_size(&self) -> usize {
        4 + self.tags.len() * Tag::SIZE
    }
}

/// The dense version chain for one (artifact, tag) pair.
///
/// Nonce `k` is `versions[k]`; the chain grows by appending only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagHistory {
    pub versions: Vec<Engraving>,
}

impl TagHistory {
    pub fn nonce_count(&self) -> u32 {
        self.versions.len() as u32
    }

    pub fn latest(&self) -> Option<&Engraving> {
        self.versions.last()
    }
}

impl Write for TagHistory {
    fn write(&self, writer: &mut impl BufMut) {
        (self.versions.len() as u32).write(writer);
        for engraving in &self.versions {
            engraving.write(writer);
        }
    }
}

impl Read for TagHistory {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let count = u32::read(reader)? as usize;
        let mut versions = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            versions.push(Engraving::read(reader)?);
        }
        Ok(Self { versions })
    }
}

impl EncodeSize for TagHistory {
    fn encode_size(&self) -> usize {
        4 + self
            .versions
            .iter()
            .map(|engraving| engraving.encode_size())
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use commonware_codec::DecodeExt as _;

    #[test]
    fn engraving_binary_roundtrip() {
        let engraving = Engraving::new(Tag::from_label("origin"), b"forged in moria".to_vec());
        let mut buf = BytesMut::new();
        engraving.write(&mut buf);
        assert_eq!(buf.len(), engraving.encode_size());
        assert_eq!(Engraving::decode(buf.as_ref()).unwrap(), engraving);
    }

    #[test]
    fn engraving_read_rejects_oversized_payload() {
        let mut buf = BytesMut::new();
        Tag::from_label("origin").write(&mut buf);
        ((MAX_ENGRAVING_DATA + 1) as u32).write(&mut buf);
        buf.extend_from_slice(&vec![0u8; MAX_ENGRAVING_DATA + 1]);
        assert!(Engraving::decode(buf.as_ref()).is_err());
    }

    #[test]
    fn artifact_preserves_collection_order() {
        let artifact = Artifact::new(vec![
            Engraving::new(Tag::from_label("b"), vec![2]),
            Engraving::new(Tag::from_label("a"), vec![1]),
        ]);
        let mut buf = BytesMut::new();
        artifact.write(&mut buf);
        let decoded = Artifact::decode(buf.as_ref()).unwrap();
        assert_eq!(decoded.collection[0].tag, Tag::from_label("b"));
        assert_eq!(decoded.collection[1].tag, Tag::from_label("a"));
    }

    #[test]
    fn registry_lookup_and_bounds() {
        let registry = TagRegistry {
            tags: vec![Tag::from_label("a"), Tag::from_label("b")],
        };
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&Tag::from_label("a")));
        assert!(!registry.contains(&Tag::from_label("c")));

        let mut buf = BytesMut::new();
        registry.write(&mut buf);
        assert_eq!(buf.len(), registry.encode_size());
        assert_eq!(TagRegistry::decode(buf.as_ref()).unwrap(), registry);
    }

    #[test]
    fn tag_history_latest_is_last_version() {
        let mut history = TagHistory::default();
        assert_eq!(history.nonce_count(), 0);
        assert!(history.latest().is_none());

        history
            .versions
            .push(Engraving::new(Tag::from_label("x"), vec![0]));
        history
            .versions
            .push(Engraving::new(Tag::from_label("x"), vec![1]));
        assert_eq!(history.nonce_count(), 2);
        assert_eq!(history.latest().unwrap().data, vec![1]);
    }

    #[test]
    fn engraving_json_uses_hex_payload() {
        let engraving = Engraving::new(Tag::from_label("ab"), vec![0xde, 0xad]);
        let json = serde_json::to_value(&engraving).unwrap();
        assert_eq!(json["data"], "dead");
        let back: Engraving = serde_json::from_value(json).unwrap();
        assert_eq!(back, engraving);
    }
}

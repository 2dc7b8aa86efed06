use anyhow::Result;
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use scrimshaw_types::{Key, Value};
use std::collections::HashMap;

/// Flat key/value storage for ledger state.
///
/// The ledger executes strictly serialized calls, so the store is a plain
/// synchronous seam: a backend only has to answer point reads and accept the
/// batched change set of a committed call.
pub trait State {
    fn get(&self, key: &Key) -> Result<Option<Value>>;
    fn insert(&mut self, key: Key, value: Value) -> Result<()>;
    fn delete(&mut self, key: &Key) -> Result<()>;

    /// Applies a committed change set in order.
    fn apply(&mut self, changes: Vec<(Key, Status)>) -> Result<()> {
        for (key, status) in changes {
            match status {
                Status::Update(value) => self.insert(key, value)?,
                Status::Delete => self.delete(&key)?,
            }
        }
        Ok(())
    }
}

/// A pending change to one key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum Status {
    Update(Value),
    Delete,
}

impl Write for Status {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Status::Update(value) => {
                0u8.write(writer);
                value.write(writer);
            }
            Status::Delete => 1u8.write(writer),
        }
    }
}

impl Read for Status {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let kind = u8::read(reader)?;
        match kind {
            0 => Ok(Status::Update(Value::read(reader)?)),
            1 => Ok(Status::Delete),
            _ => Err(Error::InvalidEnum(kind)),
        }
    }
}

impl EncodeSize for Status {
    fn encode_size(&self) -> usize {
        1 + match self {
            Status::Update(value) => value.encode_size(),
            Status::Delete => 0,
        }
    }
}

/// The in-memory store backing a ledger instance.
#[derive(Default)]
pub struct Memory {
    state: HashMap<Key, Value>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated keys; used by tests for snapshot comparison.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl State for Memory {
    fn get(&self, key: &Key) -> Result<Option<Value>> {
        Ok(self.state.get(key).cloned())
    }

    fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        self.state.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &Key) -> Result<()> {
        self.state.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use commonware_codec::DecodeExt as _;
    use scrimshaw_types::{TagRegistry, U256};

    #[test]
    fn memory_apply_processes_changes_in_order() {
        let mut state = Memory::new();
        let key = Key::TokenArtifact(U256::ONE);
        state
            .apply(vec![
                (key.clone(), Status::Update(Value::ArtifactId(U256::ONE))),
                (
                    key.clone(),
                    Status::Update(Value::ArtifactId(U256::from_u64(2))),
                ),
            ])
            .unwrap();
        assert_eq!(
            state.get(&key).unwrap(),
            Some(Value::ArtifactId(U256::from_u64(2)))
        );

        state.apply(vec![(key.clone(), Status::Delete)]).unwrap();
        assert_eq!(state.get(&key).unwrap(), None);
        assert!(state.is_empty());
    }

    #[test]
    fn status_binary_roundtrip() {
        for status in [
            Status::Update(Value::TagRegistry(TagRegistry::default())),
            Status::Delete,
        ] {
            let mut buf = BytesMut::new();
            status.write(&mut buf);
            assert_eq!(buf.len(), status.encode_size());
            assert_eq!(Status::decode(buf.as_ref()).unwrap(), status);
        }
    }
}

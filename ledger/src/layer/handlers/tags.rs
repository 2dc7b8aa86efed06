use super::super::*;
use scrimshaw_types::{TagRegistryEntry, MAX_REGISTRY_TAGS};

impl<'a, S: State> Layer<'a, S> {
    /// Renames existing registry slots and/or appends new ones, in that
    /// order. Owner-gated. Renaming a slot never touches the version chains
    /// recorded under its previous label.
    pub(crate) fn handle_set_tags<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        modify_tags: Option<&[TagRegistryEntry]>,
        new_tags: Option<&[Tag]>,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;

        let mut registry = self.registry()?;
        let mut events = Vec::new();

        // Modifications apply before appends.
        for entry in modify_tags.unwrap_or_default() {
            let len = registry.len();
            if entry.index >= len {
                return Err(LedgerError::OutOfRange {
                    index: entry.index,
                    len,
                });
            }
            if ext.enforce_unique_tags {
                // A rename that keeps the slot's own label is not a collision.
                let collides = registry
                    .tags
                    .iter()
                    .enumerate()
                    .any(|(i, tag)| i as u32 != entry.index && *tag == entry.tag);
                if collides {
                    return Err(LedgerError::DuplicateTag);
                }
            }
            let old_tag = registry.tags[entry.index as usize];
            registry.tags[entry.index as usize] = entry.tag;
            events.push(Event::TagReregistered {
                old_tag,
                new_tag: entry.tag,
            });
        }

        for tag in new_tags.unwrap_or_default() {
            if registry.tags.len() >= MAX_REGISTRY_TAGS {
                return Err(LedgerError::OutOfRange {
                    index: registry.len(),
                    len: MAX_REGISTRY_TAGS as u32,
                });
            }
            if ext.enforce_unique_tags && registry.contains(tag) {
                return Err(LedgerError::DuplicateTag);
            }
            registry.tags.push(*tag);
            events.push(Event::TagRegistered { new_tag: *tag });
        }

        self.insert(Key::TagRegistry, Value::TagRegistry(registry));
        Ok(events)
    }
}

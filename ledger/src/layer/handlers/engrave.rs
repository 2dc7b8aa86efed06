use super::super::*;
use super::ensure_batch_size;
use scrimshaw_types::{Artifact, TokenId, MAX_ARTIFACT_ENGRAVINGS, MAX_ENGRAVING_DATA};

impl<'a, S: State> Layer<'a, S> {
    /// Appends every engraving of `artifacts[i]` onto `token_ids[i]`.
    ///
    /// Appends stage into the overlay only, so any rejection mid-batch rolls
    /// the whole call back. Reading nonce chains through the overlay makes a
    /// batch that touches the same (artifact, tag) pair twice assign dense
    /// consecutive nonces.
    pub(crate) fn handle_engrave<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        token_ids: &[TokenId],
        artifacts: &[Artifact],
    ) -> Result<Vec<Event>, LedgerError> {
        LedgerError::ensure_same_length(token_ids.len(), artifacts.len())?;
        ensure_batch_size(token_ids.len())?;

        let registry = self.registry()?;
        let mut events = Vec::new();
        for (token_id, artifact) in token_ids.iter().zip(artifacts) {
            let artifact_id = self.artifact_id(token_id)?.ok_or(LedgerError::NotFound)?;
            ext.tokens.require_owner_or_approved(caller, token_id)?;
            if artifact.collection.len() > MAX_ARTIFACT_ENGRAVINGS {
                return Err(LedgerError::OutOfRange {
                    index: artifact.collection.len() as u32,
                    len: MAX_ARTIFACT_ENGRAVINGS as u32,
                });
            }

            for engraving in &artifact.collection {
                if engraving.data.len() > MAX_ENGRAVING_DATA {
                    return Err(LedgerError::OutOfRange {
                        index: engraving.data.len() as u32,
                        len: MAX_ENGRAVING_DATA as u32,
                    });
                }
                // Writers may only use currently registered labels.
                if !registry.contains(&engraving.tag) {
                    return Err(LedgerError::NotFound);
                }

                let mut history = self.history(&artifact_id, &engraving.tag)?;
                let old_engraving = history.latest().cloned();
                history.versions.push(engraving.clone());
                self.insert(
                    Key::TagHistory(artifact_id, engraving.tag),
                    Value::TagHistory(history),
                );
                events.push(Event::ArtifactEngraved {
                    token_id: *token_id,
                    old_engraving,
                    new_engraving: engraving.clone(),
                });
            }
        }

        Ok(events)
    }
}

//! Read-side reconstruction of artifacts from committed state.
//!
//! Reads are history-addressed: a version written under a label stays
//! reachable by that label even after the registry slot is renamed. Only the
//! current-artifact view consults the registry, because "the artifact" is
//! defined as the latest version per *currently registered* tag.

use scrimshaw_types::{
    Artifact, ArtifactId, Engraving, EngravingVersion, Key, LedgerError, Tag, TagHistory,
    TagRegistry, TokenId, Value,
};

use crate::state::State;

fn read<S: State>(state: &S, key: &Key) -> Result<Option<Value>, LedgerError> {
    state
        .get(key)
        .map_err(|err| LedgerError::Internal(err.to_string()))
}

/// The registry's current ordered label set.
pub fn official_tags<S: State>(state: &S) -> Result<Vec<Tag>, LedgerError> {
    Ok(registry(state)?.tags)
}

pub(crate) fn registry<S: State>(state: &S) -> Result<TagRegistry, LedgerError> {
    Ok(match read(state, &Key::TagRegistry)? {
        Some(Value::TagRegistry(registry)) => registry,
        _ => TagRegistry::default(),
    })
}

fn history<S: State>(
    state: &S,
    artifact_id: &ArtifactId,
    tag: &Tag,
) -> Result<TagHistory, LedgerError> {
    Ok(match read(state, &Key::TagHistory(*artifact_id, *tag))? {
        Some(Value::TagHistory(history)) => history,
        _ => TagHistory::default(),
    })
}

/// Resolves a minted token to its artifact. Fails with `NotFound` for
/// unminted tokens.
pub fn token_to_artifact<S: State>(
    state: &S,
    token_id: &TokenId,
) -> Result<ArtifactId, LedgerError> {
    match read(state, &Key::TokenArtifact(*token_id))? {
        Some(Value::ArtifactId(artifact_id)) => Ok(artifact_id),
        _ => Err(LedgerError::NotFound),
    }
}

/// Number of versions recorded for the pair; zero if never engraved.
pub fn nonce_count<S: State>(
    state: &S,
    artifact_id: &ArtifactId,
    tag: &Tag,
) -> Result<u32, LedgerError> {
    Ok(history(state, artifact_id, tag)?.nonce_count())
}

/// The version recorded at `nonce`. Fails with `NotFound` past the chain end.
pub fn version_at<S: State>(
    state: &S,
    artifact_id: &ArtifactId,
    tag: &Tag,
    nonce: u32,
) -> Result<Engraving, LedgerError> {
    history(state, artifact_id, tag)?
        .versions
        .get(nonce as usize)
        .cloned()
        .ok_or(LedgerError::NotFound)
}

/// The latest version for the pair. Fails with `NotFound` if never engraved.
pub fn latest<S: State>(
    state: &S,
    artifact_id: &ArtifactId,
    tag: &Tag,
) -> Result<Engraving, LedgerError> {
    history(state, artifact_id, tag)?
        .latest()
        .cloned()
        .ok_or(LedgerError::NotFound)
}

/// The current artifact: for every registered tag (in registry order) with
/// at least one version, its latest engraving. Never-engraved tags are
/// omitted, not padded.
pub fn current_artifact<S: State>(
    state: &S,
    artifact_id: &ArtifactId,
) -> Result<Artifact, LedgerError> {
    let registry = registry(state)?;
    let mut collection = Vec::new();
    for tag in &registry.tags {
        if let Some(engraving) = history(state, artifact_id, tag)?.latest() {
            collection.push(engraving.clone());
        }
    }
    Ok(Artifact::new(collection))
}

/// A mixed-version snapshot: each requested tag pinned at its own nonce,
/// independently of the others. Fails with `LengthMismatch` on arity skew
/// and `NotFound` on any out-of-range nonce.
pub fn historic_artifact<S: State>(
    state: &S,
    artifact_id: &ArtifactId,
    tags: &[Tag],
    nonces: &[u32],
) -> Result<Artifact, LedgerError> {
    LedgerError::ensure_same_length(tags.len(), nonces.len())?;
    let mut collection = Vec::with_capacity(tags.len());
    for (tag, nonce) in tags.iter().zip(nonces) {
        collection.push(version_at(state, artifact_id, tag, *nonce)?);
    }
    Ok(Artifact::new(collection))
}

/// The full audit chain for one (artifact, tag) pair, oldest first.
pub fn engraving_history<S: State>(
    state: &S,
    artifact_id: &ArtifactId,
    tag: &Tag,
) -> Result<Vec<EngravingVersion>, LedgerError> {
    Ok(history(state, artifact_id, tag)?
        .versions
        .into_iter()
        .enumerate()
        .map(|(nonce, engraving)| EngravingVersion {
            artifact_id: *artifact_id,
            tag: *tag,
            nonce: nonce as u32,
            engraving,
        })
        .collect())
}

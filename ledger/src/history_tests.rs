//! History-shape properties: dense monotonic nonces, rename semantics,
//! mixed-version snapshots, and injective token -> artifact mapping.

use crate::mocks::{self, mint_to, registered_ledger, rename, ALICE, BOB, OWNER};
use crate::TokenHooks as _;
use proptest::prelude::*;
use scrimshaw_types::{Artifact, Engraving, Event, LedgerError, Tag, U256};

fn engraving(label: &str, data: &[u8]) -> Engraving {
    Engraving::new(Tag::from_label(label), data.to_vec())
}

fn single(label: &str, data: &[u8]) -> Artifact {
    Artifact::new(vec![engraving(label, data)])
}

#[test]
fn nonces_grow_densely_and_versions_never_change() {
    let mut ledger = registered_ledger(&["origin"]);
    let token = mint_to(&mut ledger, ALICE, 1)[0];
    let artifact = ledger.token_ids_to_artifact_ids(&[token]).unwrap()[0];
    let origin = Tag::from_label("origin");

    for i in 0u8..5 {
        ledger
            .engrave(ALICE, vec![token], vec![single("origin", &[i])])
            .unwrap();
        assert_eq!(
            ledger.artifact_tag_nonces(&[artifact], &[origin]).unwrap(),
            vec![i as u32 + 1]
        );
    }

    // Every written version is still exactly what was appended.
    for k in 0u32..5 {
        assert_eq!(
            ledger.version_at(&artifact, &origin, k).unwrap().data,
            vec![k as u8]
        );
    }
    assert_eq!(
        ledger.version_at(&artifact, &origin, 5),
        Err(LedgerError::NotFound)
    );
}

#[test]
fn one_batch_touching_a_pair_twice_assigns_consecutive_nonces() {
    let mut ledger = registered_ledger(&["origin"]);
    let token = mint_to(&mut ledger, ALICE, 1)[0];
    let artifact = ledger.token_ids_to_artifact_ids(&[token]).unwrap()[0];
    let origin = Tag::from_label("origin");

    // Same token twice in one call, plus an artifact carrying two engravings
    // for the same tag: four appends, one atomic batch.
    let events = ledger
        .engrave(
            ALICE,
            vec![token, token],
            vec![
                Artifact::new(vec![engraving("origin", &[0]), engraving("origin", &[1])]),
                single("origin", &[2]),
            ],
        )
        .unwrap();

    assert_eq!(
        ledger.artifact_tag_nonces(&[artifact], &[origin]).unwrap(),
        vec![3]
    );
    for k in 0u32..3 {
        assert_eq!(
            ledger.version_at(&artifact, &origin, k).unwrap().data,
            vec![k as u8]
        );
    }

    // The event chain threads old -> new in append order.
    let olds: Vec<Option<Vec<u8>>> = events
        .iter()
        .map(|event| match event {
            Event::ArtifactEngraved { old_engraving, .. } => {
                old_engraving.as_ref().map(|e| e.data.clone())
            }
            other => panic!("unexpected event: {other:?}"),
        })
        .collect();
    assert_eq!(olds, vec![None, Some(vec![0]), Some(vec![1])]);
}

#[test]
fn rename_changes_label_but_preserves_recorded_history() {
    let mut ledger = registered_ledger(&["origin", "material"]);
    let token = mint_to(&mut ledger, ALICE, 1)[0];
    let artifact = ledger.token_ids_to_artifact_ids(&[token]).unwrap()[0];
    let origin = Tag::from_label("origin");
    let provenance = Tag::from_label("provenance");

    ledger
        .engrave(ALICE, vec![token], vec![single("origin", b"v0")])
        .unwrap();
    ledger
        .engrave(ALICE, vec![token], vec![single("origin", b"v1")])
        .unwrap();

    let events = ledger
        .set_tags(OWNER, Some(vec![rename(0, "provenance")]), None)
        .unwrap();
    assert_eq!(
        events,
        vec![Event::TagReregistered {
            old_tag: origin,
            new_tag: provenance,
        }]
    );
    assert_eq!(
        ledger.official_tags().unwrap(),
        vec![provenance, Tag::from_label("material")]
    );

    // Versions written under the old label are untouched and still
    // addressable by it.
    assert_eq!(
        ledger.version_at(&artifact, &origin, 0).unwrap().data,
        b"v0".to_vec()
    );
    assert_eq!(
        ledger.version_at(&artifact, &origin, 1).unwrap().data,
        b"v1".to_vec()
    );
    assert_eq!(
        ledger.artifact_tag_nonces(&[artifact], &[origin]).unwrap(),
        vec![2]
    );

    // The old label is no longer a registered write target...
    assert_eq!(
        ledger.engrave(ALICE, vec![token], vec![single("origin", b"v2")]),
        Err(LedgerError::NotFound)
    );
    // ...and the new label starts its own chain.
    ledger
        .engrave(ALICE, vec![token], vec![single("provenance", b"p0")])
        .unwrap();
    assert_eq!(
        ledger
            .artifact_tag_nonces(&[artifact, artifact], &[provenance, origin])
            .unwrap(),
        vec![1, 2]
    );
}

#[test]
fn current_artifact_follows_registry_order_and_omits_unengraved_tags() {
    let mut ledger = registered_ledger(&["a", "b", "c"]);
    let token = mint_to(&mut ledger, ALICE, 1)[0];

    // Engrave out of registry order: c first, then a. b stays untouched.
    ledger
        .engrave(ALICE, vec![token], vec![single("c", b"cc")])
        .unwrap();
    ledger
        .engrave(ALICE, vec![token], vec![single("a", b"aa")])
        .unwrap();

    let artifacts = ledger.get_artifacts(&[token]).unwrap();
    let tags: Vec<Tag> = artifacts[0].collection.iter().map(|e| e.tag).collect();
    assert_eq!(tags, vec![Tag::from_label("a"), Tag::from_label("c")]);

    assert_eq!(
        ledger.get_artifacts(&[U256::from_u64(999)]),
        Err(LedgerError::NotFound)
    );
}

#[test]
fn mixed_version_snapshot_pins_tags_independently() {
    let mut ledger = registered_ledger(&["a", "b"]);
    let token = mint_to(&mut ledger, ALICE, 1)[0];
    let artifact = ledger.token_ids_to_artifact_ids(&[token]).unwrap()[0];
    let a = Tag::from_label("a");
    let b = Tag::from_label("b");

    for i in 0u8..3 {
        ledger
            .engrave(ALICE, vec![token], vec![single("a", &[i])])
            .unwrap();
    }
    ledger
        .engrave(ALICE, vec![token], vec![single("b", &[100])])
        .unwrap();

    let snapshots = ledger
        .get_historic_artifacts(&[artifact], &[vec![a, b]], &[vec![1, 0]])
        .unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].collection[0].data, vec![1]);
    assert_eq!(snapshots[0].collection[1].data, vec![100]);

    // Out-of-range nonce for b.
    assert_eq!(
        ledger.get_historic_artifacts(&[artifact], &[vec![a, b]], &[vec![1, 1]]),
        Err(LedgerError::NotFound)
    );
    // Inner arity skew.
    assert_eq!(
        ledger.get_historic_artifacts(&[artifact], &[vec![a, b]], &[vec![1]]),
        Err(LedgerError::LengthMismatch { left: 2, right: 1 })
    );
    // Outer arity skew.
    assert_eq!(
        ledger.get_historic_artifacts(&[artifact], &[vec![a], vec![b]], &[vec![0]]),
        Err(LedgerError::LengthMismatch { left: 1, right: 2 })
    );
}

#[test]
fn minting_is_injective_and_stable_across_transfers() {
    let mut ledger = mocks::funded_ledger();
    ledger
        .mint(
            ALICE,
            vec![U256::from_u64(2), U256::from_u64(3)],
            vec![ALICE, BOB],
        )
        .unwrap();

    let tokens: Vec<U256> = (1..=5).map(U256::from_u64).collect();
    let artifacts = ledger.token_ids_to_artifact_ids(&tokens).unwrap();
    let mut deduped = artifacts.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), artifacts.len(), "artifact ids must be unique");
    assert_eq!(ledger.total_artifacts(), U256::from_u64(5));
    assert_eq!(ledger.total_supply(), U256::from_u64(5));

    // The mapping survives a transfer untouched.
    ledger
        .transfer_batch(ALICE, vec![BOB], vec![tokens[0]])
        .unwrap();
    assert_eq!(
        ledger.token_ids_to_artifact_ids(&tokens).unwrap(),
        artifacts
    );
}

#[test]
fn transfer_and_save_artifact_preserves_history() {
    let mut ledger = registered_ledger(&["origin"]);
    let token = mint_to(&mut ledger, ALICE, 1)[0];
    let artifact = ledger.token_ids_to_artifact_ids(&[token]).unwrap()[0];

    ledger
        .engrave(ALICE, vec![token], vec![single("origin", b"etched")])
        .unwrap();
    ledger
        .transfer_and_save_artifact(ALICE, vec![ALICE], vec![BOB], vec![token])
        .unwrap();

    assert_eq!(ledger.tokens().owner_of(&token), Some(BOB));
    assert_eq!(ledger.token_ids_to_artifact_ids(&[token]).unwrap()[0], artifact);
    assert_eq!(
        ledger
            .version_at(&artifact, &Tag::from_label("origin"), 0)
            .unwrap()
            .data,
        b"etched".to_vec()
    );
    // The new holder writes the next version.
    ledger
        .engrave(BOB, vec![token], vec![single("origin", b"re-etched")])
        .unwrap();
    assert_eq!(
        ledger
            .artifact_tag_nonces(&[artifact], &[Tag::from_label("origin")])
            .unwrap(),
        vec![2]
    );
}

#[test]
fn engraving_history_returns_the_full_audit_chain() {
    let mut ledger = registered_ledger(&["origin"]);
    let token = mint_to(&mut ledger, ALICE, 1)[0];
    let artifact = ledger.token_ids_to_artifact_ids(&[token]).unwrap()[0];
    let origin = Tag::from_label("origin");

    for i in 0u8..3 {
        ledger
            .engrave(ALICE, vec![token], vec![single("origin", &[i])])
            .unwrap();
    }

    let chain = ledger.engraving_history(&artifact, &origin).unwrap();
    assert_eq!(chain.len(), 3);
    for (i, version) in chain.iter().enumerate() {
        assert_eq!(version.artifact_id, artifact);
        assert_eq!(version.tag, origin);
        assert_eq!(version.nonce, i as u32);
        assert_eq!(version.engraving.data, vec![i as u8]);
    }

    assert!(ledger
        .engraving_history(&artifact, &Tag::from_label("other"))
        .unwrap()
        .is_empty());
}

proptest! {
    // Appends interleaved across two tags always yield dense per-tag chains
    // whose contents replay the appends in order.
    #[test]
    fn interleaved_appends_keep_chains_dense(choices in proptest::collection::vec(any::<bool>(), 1..24)) {
        let mut ledger = registered_ledger(&["a", "b"]);
        let token = mint_to(&mut ledger, ALICE, 1)[0];
        let artifact = ledger.token_ids_to_artifact_ids(&[token]).unwrap()[0];

        let mut expected_a = Vec::new();
        let mut expected_b = Vec::new();
        for (i, choice) in choices.iter().enumerate() {
            let label = if *choice { "a" } else { "b" };
            ledger
                .engrave(ALICE, vec![token], vec![single(label, &[i as u8])])
                .unwrap();
            if *choice {
                expected_a.push(i as u8);
            } else {
                expected_b.push(i as u8);
            }
        }

        for (label, expected) in [("a", expected_a), ("b", expected_b)] {
            let tag = Tag::from_label(label);
            prop_assert_eq!(
                ledger.artifact_tag_nonces(&[artifact], &[tag]).unwrap(),
                vec![expected.len() as u32]
            );
            for (k, data) in expected.iter().enumerate() {
                prop_assert_eq!(
                    ledger.version_at(&artifact, &tag, k as u32).unwrap().data,
                    vec![*data]
                );
            }
        }
    }
}

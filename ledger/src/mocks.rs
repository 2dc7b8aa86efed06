//! Test fixtures: well-known addresses, a funded ledger, and tag helpers.

use scrimshaw_types::{Address, LedgerConfig, Tag, TagRegistryEntry, TokenId, U256};

use crate::facade::Ledger;

const fn seeded(byte: u8) -> Address {
    let mut bytes = [0u8; 32];
    bytes[31] = byte;
    Address::new(bytes)
}

pub const OWNER: Address = seeded(0xAA);
pub const ALICE: Address = seeded(0x01);
pub const BOB: Address = seeded(0x02);
pub const CAROL: Address = seeded(0x03);
pub const PAYMENT_TOKEN: Address = seeded(0xEE);

pub const MINT_PRICE: u64 = 100;
pub const MAX_SUPPLY: u64 = 1_000;
pub const STARTING_BALANCE: u64 = 1_000_000;

pub fn test_config() -> LedgerConfig {
    LedgerConfig {
        owner: OWNER,
        name: "Scrimshaw".to_string(),
        symbol: "SCRIM".to_string(),
        base_uri: "https://scrimshaw.example/nft/".to_string(),
        contract_uri: "https://scrimshaw.example/contract.json".to_string(),
        mint_token: PAYMENT_TOKEN,
        mint_price: U256::from_u64(MINT_PRICE),
        max_supply: U256::from_u64(MAX_SUPPLY),
        minting_enabled: true,
        enforce_unique_tags: false,
    }
}

/// An in-memory ledger with minting enabled and funded test accounts.
pub fn funded_ledger() -> Ledger {
    let mut ledger = Ledger::in_memory(test_config()).expect("valid test config");
    for account in [ALICE, BOB, CAROL] {
        ledger
            .payments_mut()
            .fund(PAYMENT_TOKEN, account, U256::from_u64(STARTING_BALANCE));
    }
    ledger
}

/// A funded ledger whose registry carries the given labels, in order.
pub fn registered_ledger(labels: &[&str]) -> Ledger {
    let mut ledger = funded_ledger();
    let tags = labels.iter().map(|label| Tag::from_label(label)).collect();
    ledger
        .set_tags(OWNER, None, Some(tags))
        .expect("register tags");
    ledger
}

/// Mints `count` tokens to `to` and returns the assigned ids.
pub fn mint_to(ledger: &mut Ledger, to: Address, count: u64) -> Vec<TokenId> {
    let events = ledger
        .mint(to, vec![U256::from_u64(count)], vec![to])
        .expect("mint");
    events
        .into_iter()
        .map(|event| match event {
            scrimshaw_types::Event::Transfer { token_id, .. } => token_id,
            other => panic!("unexpected mint event: {other:?}"),
        })
        .collect()
}

/// A slot rename for `set_tags`.
pub fn rename(index: u32, label: &str) -> TagRegistryEntry {
    TagRegistryEntry {
        index,
        tag: Tag::from_label(label),
    }
}

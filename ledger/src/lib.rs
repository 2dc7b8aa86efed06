//! Scrimshaw execution layer.
//!
//! This crate contains the atomic call execution logic ([`Ledger`]) for the
//! artifact engraving & versioning ledger: a per-token, per-tag append-only
//! metadata history with point-in-time reconstruction, a mutable tag
//! registry, and mint-gated issuance.
//!
//! ## Atomicity requirements
//! - Every entry point validates all preconditions before mutating; a typed
//!   rejection means nothing changed.
//! - State writes stage into a pending overlay ([`Layer`]) and commit in one
//!   pass; collaborator and configuration mutations follow
//!   validate-then-mutate ordering.
//! - Batches process in caller order and event emission mirrors input
//!   order; downstream indexers replay the output journal relying on it.
//!
//! ## History invariants
//! Version chains per (artifact, tag) pair are dense (`0..count`), append
//! only, and immutable once written. Renaming a registry slot changes the
//! label used by future writes; it never rewrites recorded versions.

pub mod collaborators;
pub mod views;

mod facade;
mod layer;
mod state;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod history_tests;

pub use collaborators::{CodeRegistry, Escrow, PaymentHook, TokenHooks, TokenIndex, UpgradeHook};
pub use facade::{CollectionMetadata, Ledger};
pub use layer::{Externals, Layer};
pub use state::{Memory, State, Status};

//! Core verification engine for provably-fair crash game chains.
//!
//! The server commits to a chain of seed hashes where each game's hash is the
//! SHA-256 of the next game's hash. Revealing games in order lets a client
//! check every new game against an already trusted one by hashing forward,
//! and derive each game's multiplier from its seed with a salted HMAC.
//!
//! # Main Components
//!
//! - [`hash`] - SHA-256 chain steps and the salted HMAC digest
//! - [`outcome`] - Deterministic crash multiplier derivation
//! - [`checkpoint::CheckpointCache`] - Sparse cache of proven chain positions
//! - [`verifier::ChainVerifier`] - Proves new claims against the trust anchor
//! - [`window`] - Reconstructs runs of historical games from checkpoints
//! - [`session::Session`] - Serialized, fail-closed access for concurrent callers
//! - [`config::ChainConfig`] - Salt, bootstrap anchor and walk parameters

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod game;
pub mod hash;
pub mod outcome;
pub mod session;
pub mod verifier;
pub mod window;

#[cfg(test)]
pub(crate) mod test_chain;

pub use checkpoint::CheckpointCache;
pub use config::{Anchor, ChainConfig};
pub use error::{Error, Result};
pub use game::{Game, GameClaim, Outcome, SeedHash};
pub use session::Session;
pub use verifier::{ChainProof, ChainVerifier};
pub use window::{build_range, Window};

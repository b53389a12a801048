//! Chain verification against the trust anchor.
//!
//! Verification is split in two:
//! 1. [`prove_link`] checks a claimed game against an anchor without touching
//!    any state and returns a [`ChainProof`] holding the checkpoints it passed.
//! 2. [`ChainVerifier::apply`] commits a proof: it advances the anchor and
//!    records the checkpoints.
//!
//! [`ChainVerifier::verify`] runs both in one call. A proof can only be built
//! by [`prove_link`] and carries the chain parameters it was checked under, so
//! `apply` refuses proofs made for another salt or slot interval.

use crate::checkpoint::CheckpointCache;
use crate::config::{Anchor, ChainConfig};
use crate::error::{Error, Result};
use crate::game::{Game, GameClaim, SeedHash};
use crate::hash::hash_once;
use crate::outcome;
use crate::window::{build_range, Window};

/// Evidence that a game descends to the anchor it was checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainProof {
    game: Game,
    anchor: Anchor,
    checkpoints: Vec<(u64, SeedHash)>,
    steps: u64,
    salt: Vec<u8>,
    checkpoint_interval: u64,
}

impl ChainProof {
    /// The verified game, the next anchor.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Anchor the walk ended on.
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    /// Periodic slots passed during the walk, in descending order.
    pub fn checkpoints(&self) -> &[(u64, SeedHash)] {
        &self.checkpoints
    }

    /// Hash applications performed.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn proved_under(&self, config: &ChainConfig) -> bool {
        self.salt == config.salt && self.checkpoint_interval == config.checkpoint_interval
    }
}

/// Check `claim` against `anchor`.
///
/// The outcome is checked first, since it costs one HMAC, and only then is the
/// claimed hash walked down to the anchor position. `progress` receives the
/// percentage walked every `config.progress_interval` steps.
///
/// A claim at the anchor's own position succeeds only if it is the anchor.
pub fn prove_link<F>(
    config: &ChainConfig,
    claim: &Game,
    anchor: &Game,
    mut progress: F,
) -> Result<ChainProof>
where
    F: FnMut(f64),
{
    if claim.sequence < anchor.sequence {
        return Err(Error::OutOfOrderClaim {
            claimed: claim.sequence,
            anchor: anchor.sequence,
        });
    }

    let expected = outcome::derive(&config.salt, &claim.hash);
    if expected != claim.outcome {
        return Err(Error::OutcomeMismatch {
            sequence: claim.sequence,
            expected,
            claimed: claim.outcome,
        });
    }

    let distance = claim.sequence - anchor.sequence;
    let mut hash = claim.hash;
    let mut sequence = claim.sequence;
    let mut checkpoints = Vec::new();

    for step in 1..=distance {
        hash = hash_once(hash.as_bytes());
        sequence -= 1;

        if config.is_checkpoint_slot(sequence) {
            checkpoints.push((sequence, hash));
        }

        if step % config.progress_interval == 0 {
            progress(step as f64 * 100.0 / distance as f64);
        }
    }

    if hash != anchor.hash {
        return Err(Error::ChainDiscontinuity {
            sequence: claim.sequence,
            anchor: anchor.sequence,
        });
    }

    Ok(ChainProof {
        game: *claim,
        anchor: Anchor {
            sequence: anchor.sequence,
            hash: anchor.hash,
        },
        checkpoints,
        steps: distance,
        salt: config.salt.clone(),
        checkpoint_interval: config.checkpoint_interval,
    })
}

/// Owns the trust anchor and the checkpoint cache of one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainVerifier {
    config: ChainConfig,
    anchor: Game,
    cache: CheckpointCache,
}

impl ChainVerifier {
    /// Start from the configured bootstrap anchor.
    pub fn new(config: ChainConfig) -> Result<Self> {
        config.validate()?;

        let anchor = config.bootstrap_game();
        let mut cache = CheckpointCache::new();
        cache.insert(anchor.sequence, anchor.hash);

        tracing::debug!(
            "Bootstrapped at game {} ({})",
            anchor.sequence,
            anchor.hash
        );

        Ok(Self {
            config,
            anchor,
            cache,
        })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// The most recently verified game.
    pub fn anchor(&self) -> &Game {
        &self.anchor
    }

    pub fn cache(&self) -> &CheckpointCache {
        &self.cache
    }

    /// Check `claim` against the current anchor under this verifier's config.
    pub fn prove<F>(&self, claim: &Game, progress: F) -> Result<ChainProof>
    where
        F: FnMut(f64),
    {
        prove_link(&self.config, claim, &self.anchor, progress)
    }

    /// Verify `claim` and, on success, make it the new anchor.
    ///
    /// On any error the anchor and cache are left exactly as they were.
    pub fn verify<F>(&mut self, claim: &Game, progress: F) -> Result<Game>
    where
        F: FnMut(f64),
    {
        match self.prove(claim, progress) {
            Ok(proof) => {
                self.apply(proof)?;
                Ok(self.anchor)
            }
            Err(e) => {
                tracing::warn!("Rejected game {}: {}", claim.sequence, e);
                Err(e)
            }
        }
    }

    /// Decode a wire claim and [`verify`](Self::verify) it.
    pub fn verify_claim<F>(&mut self, claim: &GameClaim, progress: F) -> Result<Game>
    where
        F: FnMut(f64),
    {
        let game = claim.decode()?;
        self.verify(&game, progress)
    }

    /// Commit a proof produced by [`prove_link`] against the current anchor.
    ///
    /// The proof must have been made under this verifier's salt and slot
    /// interval. The previous anchor's entry is evicted unless it is a
    /// periodic slot, so the cache holds one transient entry at most.
    pub fn apply(&mut self, proof: ChainProof) -> Result<()> {
        if !proof.proved_under(&self.config) {
            return Err(Error::ForeignProof {
                sequence: proof.game.sequence,
            });
        }
        if proof.anchor.sequence != self.anchor.sequence || proof.anchor.hash != self.anchor.hash {
            return Err(Error::StaleProof {
                proved_against: proof.anchor.sequence,
                anchor: self.anchor.sequence,
            });
        }

        let previous = self.anchor.sequence;
        if !self.config.is_checkpoint_slot(previous) {
            self.cache.remove(previous);
        }

        for (sequence, _) in &proof.checkpoints {
            tracing::debug!("Checkpoint at game {}", sequence);
        }
        self.cache.extend(proof.checkpoints);
        self.cache.insert(proof.game.sequence, proof.game.hash);
        self.anchor = proof.game;

        tracing::info!(
            "Anchor advanced {} -> {} ({} hashes, outcome {})",
            previous,
            self.anchor.sequence,
            proof.steps,
            self.anchor.outcome
        );
        Ok(())
    }

    /// Reconstruct games `start` down to `start - length + 1` from the cache.
    pub fn window(&self, start: u64, length: u64) -> Result<Window<'_>> {
        build_range(&self.cache, &self.config.salt, start, length)
    }
}

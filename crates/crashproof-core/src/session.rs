//! Serialized, fail-closed access to a [`ChainVerifier`].
//!
//! One coarse lock covers both verification and window reconstruction, so
//! only one verification runs at a time and no window is built from a cache
//! that is being written. The first invalid game compromises the session for
//! good: a chain that served one forged game is not trusted again until a new
//! session is started from the bootstrap anchor.

use std::sync::{Mutex, MutexGuard};

use crate::config::ChainConfig;
use crate::error::{Error, Result};
use crate::game::{Game, GameClaim};
use crate::verifier::ChainVerifier;

struct SessionState {
    verifier: ChainVerifier,
    /// Sequence number of the game that broke the chain.
    compromised_by: Option<u64>,
}

pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(config: ChainConfig) -> Result<Self> {
        Ok(Self {
            state: Mutex::new(SessionState {
                verifier: ChainVerifier::new(config)?,
                compromised_by: None,
            }),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionState>> {
        self.state
            .lock()
            .map_err(|_| Error::LockPoisoned)
    }

    fn ensure_trusted(state: &SessionState) -> Result<()> {
        match state.compromised_by {
            Some(sequence) => Err(Error::Compromised { sequence }),
            None => Ok(()),
        }
    }

    /// Verify a newly published game and advance the anchor.
    ///
    /// Games not newer than the anchor are rejected as out of order and leave
    /// the session usable. Outcome or chain failures compromise it.
    pub fn submit<F>(&self, claim: &GameClaim, progress: F) -> Result<Game>
    where
        F: FnMut(f64),
    {
        let mut state = self.lock()?;
        Self::ensure_trusted(&state)?;

        let anchor = state.verifier.anchor().sequence;
        if claim.sequence_number <= anchor {
            tracing::warn!(
                "Ignoring game {} at or below anchor {}",
                claim.sequence_number,
                anchor
            );
            return Err(Error::OutOfOrderClaim {
                claimed: claim.sequence_number,
                anchor,
            });
        }

        let result = state.verifier.verify_claim(claim, progress);
        if let Err(e) = &result {
            if e.is_chain_failure() {
                tracing::error!("Chain compromised at game {}: {}", claim.sequence_number, e);
                state.compromised_by = Some(claim.sequence_number);
            }
        }
        result
    }

    /// Rebuild games `start` down to `start - length + 1`.
    pub fn window(&self, start: u64, length: u64) -> Result<Vec<Game>> {
        let state = self.lock()?;
        Self::ensure_trusted(&state)?;
        let games = state.verifier.window(start, length)?.collect();
        Ok(games)
    }

    /// The most recently verified game.
    pub fn anchor(&self) -> Result<Game> {
        Ok(*self.lock()?.verifier.anchor())
    }

    pub fn is_compromised(&self) -> bool {
        self.lock()
            .map(|state| state.compromised_by.is_some())
            .unwrap_or(true)
    }
}

use thiserror::Error;

use crate::game::Outcome;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Outcome mismatch for game {sequence}: seed derives {expected}, claim says {claimed}")]
    OutcomeMismatch {
        sequence: u64,
        expected: Outcome,
        claimed: Outcome,
    },

    #[error("Chain discontinuity: game {sequence} does not hash down to anchor {anchor}")]
    ChainDiscontinuity { sequence: u64, anchor: u64 },

    #[error("Out of order claim: game {claimed} is not newer than anchor {anchor}")]
    OutOfOrderClaim { claimed: u64, anchor: u64 },

    #[error("Stale proof: proved against anchor {proved_against}, current anchor is {anchor}")]
    StaleProof { proved_against: u64, anchor: u64 },

    #[error("Proof for game {sequence} was made under different chain parameters")]
    ForeignProof { sequence: u64 },

    #[error("No checkpoint at or above game {start}")]
    MissingCheckpoint { start: u64 },

    #[error("Invalid seed hash: {0}")]
    InvalidHash(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Chain compromised by invalid game {sequence}; restart from the bootstrap anchor")]
    Compromised { sequence: u64 },

    #[error("Verifier lock poisoned")]
    LockPoisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error proves the served chain is not genuine.
    ///
    /// Only these failures compromise a session; the rest are usage or
    /// environment errors.
    pub fn is_chain_failure(&self) -> bool {
        matches!(
            self,
            Error::OutcomeMismatch { .. } | Error::ChainDiscontinuity { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

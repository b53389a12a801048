//! Reconstruction of historical games from the checkpoint cache.

use crate::checkpoint::CheckpointCache;
use crate::error::{Error, Result};
use crate::game::{Game, SeedHash};
use crate::hash::{hash_n, hash_once};

/// Games `start` down to `lower`, derived lazily from one seed hash.
///
/// Nothing is shared with the cache once built; cloning a window restarts it
/// from `start`.
#[derive(Debug, Clone)]
pub struct Window<'a> {
    salt: &'a [u8],
    next: Option<(u64, SeedHash)>,
    start: u64,
    lower: u64,
    walked: u64,
}

/// Rebuild up to `length` games ending at `start`, newest first.
///
/// The hash of `start` is recovered from the nearest checkpoint at or above
/// it, so the cost is bounded by the distance to that checkpoint plus
/// `length`. A verified position always has a checkpoint at or above it;
/// finding none is reported as [`Error::MissingCheckpoint`].
pub fn build_range<'a>(
    cache: &CheckpointCache,
    salt: &'a [u8],
    start: u64,
    length: u64,
) -> Result<Window<'a>> {
    if length == 0 {
        return Ok(Window {
            salt,
            next: None,
            start,
            lower: start,
            walked: 0,
        });
    }

    let (checkpoint, hash) = cache
        .nearest_at_or_above(start)
        .ok_or(Error::MissingCheckpoint { start })?;

    let walked = checkpoint - start;
    let hash = hash_n(&hash, walked);
    let lower = start.saturating_sub(length - 1);

    tracing::debug!(
        "Window {}..={} from checkpoint {} ({} hashes)",
        lower,
        start,
        checkpoint,
        walked
    );

    Ok(Window {
        salt,
        next: Some((start, hash)),
        start,
        lower,
        walked,
    })
}

impl Window<'_> {
    /// Newest sequence number in the window.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Oldest sequence number in the window.
    pub fn lower(&self) -> u64 {
        self.lower
    }

    /// Hashes applied to get from the checkpoint down to `start`.
    pub fn walked(&self) -> u64 {
        self.walked
    }
}

impl Iterator for Window<'_> {
    type Item = Game;

    fn next(&mut self) -> Option<Game> {
        let (sequence, hash) = self.next?;
        let game = Game::from_seed(sequence, hash, self.salt);

        self.next = if sequence > self.lower {
            Some((sequence - 1, hash_once(hash.as_bytes())))
        } else {
            None
        };

        Some(game)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Saturates for a window spanning the whole u64 range.
        let remaining = self
            .next
            .map(|(sequence, _)| {
                let count = (sequence - self.lower).saturating_add(1);
                usize::try_from(count).unwrap_or(usize::MAX)
            })
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Window<'_> {}

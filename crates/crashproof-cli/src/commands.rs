//! Command implementations for the crashproof CLI.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use crashproof_core::{ChainConfig, Error, Game, SeedHash, Session};

use crate::feed;

/// Load the chain config, falling back to the built-in chain.
pub fn load_config(path: Option<&Path>) -> Result<ChainConfig> {
    match path {
        Some(path) => ChainConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display())),
        None => Ok(ChainConfig::default()),
    }
}

/// Outcome command: derive the multiplier for one seed.
pub fn outcome(config: &ChainConfig, hash: &str) -> Result<()> {
    let seed: SeedHash = hash.trim().parse()?;
    let game = Game::from_seed(0, seed, &config.salt);
    println!("{}  {}", seed, game.outcome);
    Ok(())
}

/// Feed every claim into the session. Stops at the first claim that fails
/// verification; games at or below the anchor are skipped.
fn ingest<R: BufRead>(session: &Session, reader: R) -> Result<usize> {
    let mut verified = 0;

    for claim in feed::read_claims(reader) {
        let claim = claim?;
        let sequence = claim.sequence_number;

        match session.submit(&claim, |pct| {
            tracing::info!("Game {}: {:.0}% of chain walked", sequence, pct)
        }) {
            Ok(game) => {
                verified += 1;
                tracing::debug!("Verified game {} ({})", game.sequence, game.outcome);
            }
            Err(Error::OutOfOrderClaim { .. }) => continue,
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Game {} failed verification", sequence)))
            }
        }
    }

    Ok(verified)
}

/// Verify command: check published games against the bootstrap anchor.
pub fn verify(config: ChainConfig, claims: Option<&Path>) -> Result<()> {
    let session = Session::new(config)?;
    let verified = ingest(&session, feed::open(claims)?)?;
    let anchor = session.anchor()?;

    println!("Verified {} game(s)", verified);
    println!("  Anchor: game {}", anchor.sequence);
    println!("  Hash: {}", anchor.hash);
    println!("  Outcome: {}", anchor.outcome);
    Ok(())
}

/// Window command: verify, then list historical games newest first.
pub fn window(
    config: ChainConfig,
    claims: Option<&Path>,
    start: Option<u64>,
    length: u64,
    json: bool,
) -> Result<()> {
    let session = Session::new(config)?;
    ingest(&session, feed::open(claims)?)?;

    let start = match start {
        Some(start) => start,
        None => session.anchor()?.sequence,
    };
    let games = session.window(start, length)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    println!("{:>12}  {:>10}  {}", "game", "bust", "hash");
    for game in &games {
        println!("{:>12}  {:>10}  {}", game.sequence, game.outcome.to_string(), game.hash);
    }
    Ok(())
}

/// Config command: print the effective config.
pub fn show_config(config: &ChainConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crashproof_core::hash::hash_once;
    use crashproof_core::{Anchor, GameClaim, Outcome};
    use std::io::Cursor;

    /// Hashes of games `0..=tip`, indexed by sequence.
    fn chain(tip: u64) -> Vec<SeedHash> {
        let mut hashes = vec![SeedHash([0x5a; 32])];
        for _ in 0..tip {
            let next = hash_once(hashes.last().unwrap().as_bytes());
            hashes.push(next);
        }
        hashes.reverse();
        hashes
    }

    fn session(hashes: &[SeedHash]) -> Session {
        let config = ChainConfig::new(
            b"ingest salt".to_vec(),
            Anchor {
                sequence: 0,
                hash: hashes[0],
            },
        );
        Session::new(config).unwrap()
    }

    fn line(hashes: &[SeedHash], sequence: u64, salt: &[u8]) -> String {
        let game = Game::from_seed(sequence, hashes[sequence as usize], salt);
        serde_json::to_string(&GameClaim::from(&game)).unwrap()
    }

    #[test]
    fn should_skip_games_at_or_below_anchor() {
        let hashes = chain(20);
        let session = session(&hashes);
        let salt = b"ingest salt";

        let input = [
            line(&hashes, 5, salt),
            line(&hashes, 5, salt),
            line(&hashes, 3, salt),
            line(&hashes, 12, salt),
        ]
        .join("\n");

        let verified = ingest(&session, Cursor::new(input)).unwrap();
        assert_eq!(verified, 2);
        assert_eq!(session.anchor().unwrap().sequence, 12);
        assert!(!session.is_compromised());
    }

    #[test]
    fn should_stop_at_forged_game() {
        let hashes = chain(20);
        let session = session(&hashes);
        let salt = b"ingest salt";

        let honest = Game::from_seed(8, hashes[8], salt);
        let forged = GameClaim::from(&Game {
            outcome: Outcome(honest.outcome.0 + 1),
            ..honest
        });

        // The trailing garbage would fail to parse if it were ever read.
        let input = [
            line(&hashes, 4, salt),
            serde_json::to_string(&forged).unwrap(),
            line(&hashes, 15, salt),
            "not a claim".to_string(),
        ]
        .join("\n");

        let err = ingest(&session, Cursor::new(input)).unwrap_err();
        assert!(err.to_string().contains("Game 8 failed verification"));
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::OutcomeMismatch { sequence: 8, .. })
        ));
        assert_eq!(session.anchor().unwrap().sequence, 4);
        assert!(session.is_compromised());
    }

    #[test]
    fn should_stop_at_broken_link() {
        let hashes = chain(20);
        let session = session(&hashes);
        let salt = b"ingest salt";

        let mut input = line(&hashes, 10, salt);
        input.push('\n');
        // Game 11 on a foreign chain.
        let stranger = Game::from_seed(11, SeedHash([0x01; 32]), salt);
        input.push_str(&serde_json::to_string(&GameClaim::from(&stranger)).unwrap());
        input.push('\n');
        input.push_str(&line(&hashes, 20, salt));

        let err = ingest(&session, Cursor::new(input)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ChainDiscontinuity { sequence: 11, anchor: 10 })
        ));
        assert_eq!(session.anchor().unwrap().sequence, 10);
    }
}

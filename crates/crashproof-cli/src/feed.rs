//! Newline-delimited JSON game feed.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use crashproof_core::GameClaim;

/// Open the claims file, or stdin when no path is given.
pub fn open(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open claims file '{}'", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Parse one claim per non-blank line.
pub fn read_claims<R: BufRead>(reader: R) -> impl Iterator<Item = Result<GameClaim>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line_no = index + 1;
            let line = match line.with_context(|| format!("Failed to read line {}", line_no)) {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(
                serde_json::from_str::<GameClaim>(&line)
                    .with_context(|| format!("Invalid claim on line {}", line_no)),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn should_skip_blank_lines() {
        let input = concat!(
            r#"{"sequenceNumber":1,"seedHash":"11","outcome":100}"#,
            "\n\n   \n",
            r#"{"sequenceNumber":2,"seedHash":"22","outcome":250}"#,
            "\n",
        );
        let claims: Vec<GameClaim> = read_claims(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[1].sequence_number, 2);
        assert_eq!(claims[1].outcome, 250);
    }

    #[test]
    fn should_report_line_of_bad_claim() {
        let input = "{\"sequenceNumber\":1,\"seedHash\":\"11\",\"outcome\":100}\nnot json\n";
        let results: Vec<Result<GameClaim>> = read_claims(Cursor::new(input)).collect();
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::util::{self, Output};

/// Persisted best score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: usize,
    /// When the record was last written (ISO 8601 format)
    pub updated_at: DateTime<Utc>,
}

/// The single high-score slot the engine is seeded with.
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the stored high score, or 0 when the file does not exist yet.
    pub fn load(&self) -> anyhow::Result<usize> {
        let exists = self
            .path
            .try_exists()
            .with_context(|| format!("Failed to access high score file: {}", self.path.display()))?;
        if !exists {
            debug!(path = %self.path.display(), "no high score file yet");
            return Ok(0);
        }
        let record: HighScoreRecord = util::read_json_file("high score", &self.path)?;
        debug!(high_score = record.high_score, updated_at = %record.updated_at, "high score loaded");
        Ok(record.high_score)
    }

    pub fn store(&self, high_score: usize) -> anyhow::Result<()> {
        let record = HighScoreRecord {
            high_score,
            updated_at: Utc::now(),
        };
        let mut output = Output::open(self.path.clone())?;
        output.write_json(&record)?;
        info!(high_score, path = %self.path.display(), "high score saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_zero() {
        let file = HighScoreFile::new(std::env::temp_dir().join("quadris-missing/none.json"));
        assert_eq!(file.load().unwrap(), 0);
    }

    #[test]
    fn test_store_then_load() {
        let dir = std::env::temp_dir().join(format!("quadris-high-score-{}", std::process::id()));
        let file = HighScoreFile::new(dir.join("high_score.json"));
        file.store(4200).unwrap();
        assert_eq!(file.load().unwrap(), 4200);
        file.store(4300).unwrap();
        assert_eq!(file.load().unwrap(), 4300);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("quadris-corrupt-{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        let err = HighScoreFile::new(&path).load().unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("high score"), "{err}");
    }
}

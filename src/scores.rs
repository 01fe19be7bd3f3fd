use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to access score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid score data in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of the score file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedScores {
    #[serde(default)]
    pub hi_score: u32,
}

/// Reads and writes the persisted high score.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored high score. A missing or empty file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<u32>, ScoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ScoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let scores: SavedScores =
            serde_json::from_str(&contents).map_err(|source| ScoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(scores.hi_score))
    }

    /// Writes `hi_score` to the score file. The parent directory is not
    /// created.
    pub fn save(&self, hi_score: u32) -> Result<(), ScoreError> {
        let contents = serde_json::to_string_pretty(&SavedScores { hi_score }).map_err(
            |source| ScoreError::Json {
                path: self.path.clone(),
                source,
            },
        )?;
        fs::write(&self.path, contents).map_err(|source| ScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(hi_score, path = %self.path.display(), "high score saved");
        Ok(())
    }

    /// Loads the high score, falling back to 0 on any problem. When the file
    /// held nothing usable it is rewritten with the default.
    pub fn load_or_init(&self) -> u32 {
        match self.load() {
            Ok(Some(hi_score)) => hi_score,
            Ok(None) => {
                self.save_or_log(0);
                0
            }
            Err(err) => {
                warn!("{err}; starting with a high score of 0");
                self.save_or_log(0);
                0
            }
        }
    }

    /// Saves, logging instead of failing.
    pub fn save_or_log(&self, hi_score: u32) {
        if let Err(err) = self.save(hi_score) {
            warn!("{err}");
        }
    }
}

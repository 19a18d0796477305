//! Leaderboard configuration.

use std::path::PathBuf;

/// Score file name inside the application data directory.
pub const DEFAULT_SCORES_FILE: &str = "scores.json";

/// Per-user application directory name under the local data dir.
pub const APP_DIR_NAME: &str = "tetris-controls";

/// `<local data dir>/tetris-controls/scores.json`, or the bare file name
/// relative to the working directory when the platform has no data dir.
pub fn default_scores_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME).join(DEFAULT_SCORES_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_FILE))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoresConfig {
    pub path: PathBuf,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            path: default_scores_path(),
        }
    }
}

impl ScoresConfig {
    /// `TETRIS_SCORES_PATH` overrides the file location; blank values are ignored.
    pub fn from_env() -> Self {
        let path = std::env::var("TETRIS_SCORES_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_scores_path);

        Self { path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

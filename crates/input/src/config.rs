//! Input timing configuration.

use crate::types::{AUTOREPEAT_DELAY_MS, AUTOREPEAT_RATE_MS, TRACKBALL_OBSOLESCENCE_MS};

/// Timing knobs for the touch and trackball decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    pub autorepeat_delay_ms: u64,
    pub autorepeat_rate_ms: u64,
    pub trackball_obsolescence_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            autorepeat_delay_ms: AUTOREPEAT_DELAY_MS,
            autorepeat_rate_ms: AUTOREPEAT_RATE_MS,
            trackball_obsolescence_ms: TRACKBALL_OBSOLESCENCE_MS,
        }
    }
}

impl InputConfig {
    /// Read overrides from the environment, falling back to the defaults.
    ///
    /// - `TETRIS_AUTOREPEAT_DELAY_MS`
    /// - `TETRIS_AUTOREPEAT_RATE_MS`
    /// - `TETRIS_TRACKBALL_OBSOLESCENCE_MS`
    pub fn from_env() -> Self {
        use std::env;

        let read_ms = |key: &str, default: u64| -> u64 {
            env::var(key)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            autorepeat_delay_ms: read_ms("TETRIS_AUTOREPEAT_DELAY_MS", AUTOREPEAT_DELAY_MS),
            autorepeat_rate_ms: read_ms("TETRIS_AUTOREPEAT_RATE_MS", AUTOREPEAT_RATE_MS),
            trackball_obsolescence_ms: read_ms(
                "TETRIS_TRACKBALL_OBSOLESCENCE_MS",
                TRACKBALL_OBSOLESCENCE_MS,
            ),
        }
    }

    pub fn with_autorepeat(mut self, delay_ms: u64, rate_ms: u64) -> Self {
        self.autorepeat_delay_ms = delay_ms;
        self.autorepeat_rate_ms = rate_ms;
        self
    }

    pub fn with_trackball_obsolescence_ms(mut self, window_ms: u64) -> Self {
        self.trackball_obsolescence_ms = window_ms;
        self
    }
}

//! Configuration for a game session.

use std::path::PathBuf;
use std::time::Duration;

/// Default location of the save file.
pub const DEFAULT_SAVE_PATH: &str = "game_save.json";

/// Default time the player has to answer a prompt.
pub const DEFAULT_INPUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible dodge rolls.
    pub seed: u64,
    /// How long a prompt waits before the player hesitates.
    pub input_timeout: Duration,
    /// Where `save` and `load` read and write.
    pub save_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            input_timeout: DEFAULT_INPUT_TIMEOUT,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the prompt timeout. A zero timeout is raised to one second.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.input_timeout = timeout.max(Duration::from_secs(1));
        self
    }

    /// Set the save file location.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// The prompt timeout in whole seconds, for display.
    pub fn timeout_secs(&self) -> u64 {
        self.input_timeout.as_secs()
    }
}

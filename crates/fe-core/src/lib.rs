//! Engine for the Forest Escape text adventure.
//!
//! Provides a hand-wired story graph, player and enemy state, turn-based
//! combat with timed input, versioned save files, a session journal, and the
//! game session state machine that ties them together.

/// Turn-based combat.
pub mod combat;
/// Session configuration.
pub mod config;
/// Enemy state.
pub mod enemy;
/// Error types for the engine.
pub mod error;
/// Timed line input.
pub mod input;
/// Session event journal.
pub mod journal;
/// Command parsing and item resolution.
pub mod parser;
/// Player state management.
pub mod player;
/// Save file reading and writing.
pub mod save;
/// Game session management.
pub mod session;
/// Story graph and nodes.
pub mod story;

pub use combat::{Combat, CombatAction, CombatEvent, CombatOutcome};
pub use config::GameConfig;
pub use enemy::{Enemy, EnemySpec};
pub use error::{GameError, GameResult};
pub use input::{Input, TimedLines};
pub use journal::{Journal, JournalEntry};
pub use parser::{Command, parse_command};
pub use player::{LevelUp, Player};
pub use save::{SAVE_VERSION, SaveFile, load_player, read_save, save_player};
pub use session::{GameSession, Phase};
pub use story::{Ending, NodeId, NodeKind, StoryGraph, StoryNode};

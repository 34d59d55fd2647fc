//! Error types for the adventure engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::story::NodeId;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while playing.
#[derive(Debug, Error)]
pub enum GameError {
    /// A node id is referenced that the story graph does not contain.
    #[error("story node not found: {0}")]
    NodeNotFound(NodeId),

    /// Item gates keep redirecting without reaching a node.
    #[error("item gates redirect in a cycle starting at {0}")]
    GateCycle(NodeId),

    /// Input that is neither a number nor a known command.
    #[error("Enter a number, 'inventory', 'save', 'load', or 'use <item>'.")]
    UnknownCommand(String),

    /// A numbered choice outside the displayed menu.
    #[error("Invalid choice: {0}.")]
    InvalidChoice(i64),

    /// `use` named an item the player does not carry.
    #[error("You don't have {0}!")]
    ItemNotInInventory(String),

    /// `use` named a carried item that does nothing at this node.
    #[error("Can't use {0} here.")]
    CannotUseHere(String),

    /// The game already reached an ending.
    #[error("the game is over")]
    GameOver,

    /// Writing the save file failed.
    #[error("Failed to save game to {path}: {source}")]
    SaveFailed {
        /// Save file location.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading the save file failed.
    #[error("Failed to load game from {path}: {source}")]
    LoadFailed {
        /// Save file location.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The save file is not valid JSON or does not match the schema.
    #[error("Failed to load game: corrupt save data ({0})")]
    CorruptSave(String),

    /// The save file was written by an incompatible schema version.
    #[error("Failed to load game: unsupported save version {found} (expected {expected})")]
    UnsupportedSaveVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}

impl GameError {
    /// Whether the error only rejects one input and the game can go on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::NodeNotFound(_) | Self::GateCycle(_) | Self::GameOver
        )
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::CorruptSave(err.to_string())
    }
}

//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// The player arrived at a node.
    NodeEntered {
        /// Node id.
        node: String,
        /// When the player arrived.
        timestamp: DateTime<Utc>,
    },
    /// The player picked a menu entry.
    ChoiceMade {
        /// Node the choice was made at.
        node: String,
        /// Menu text of the choice.
        label: String,
        /// When the choice was made.
        timestamp: DateTime<Utc>,
    },
    /// An item was added to the inventory.
    ItemGained {
        /// Item name.
        item: String,
        /// When it was picked up.
        timestamp: DateTime<Utc>,
    },
    /// An item was spent.
    ItemUsed {
        /// Item name.
        item: String,
        /// When it was used.
        timestamp: DateTime<Utc>,
    },
    /// A fight began.
    CombatStarted {
        /// Enemy name.
        enemy: String,
        /// Whether the player fought with a weapon.
        armed: bool,
        /// When the fight started.
        timestamp: DateTime<Utc>,
    },
    /// One round of a fight.
    CombatRound {
        /// Round number.
        round: u32,
        /// The player's action.
        action: String,
        /// Damage the player dealt.
        damage_dealt: u32,
        /// Damage the player took.
        damage_taken: u32,
        /// Player health after the round.
        player_health: u32,
        /// Enemy health after the round.
        enemy_health: u32,
        /// When the round was resolved.
        timestamp: DateTime<Utc>,
    },
    /// A fight ended.
    CombatEnded {
        /// Enemy name.
        enemy: String,
        /// Whether the player survived.
        survived: bool,
        /// When the fight ended.
        timestamp: DateTime<Utc>,
    },
    /// The player gained a level.
    LevelUp {
        /// The new level.
        level: u32,
        /// When the level was gained.
        timestamp: DateTime<Utc>,
    },
    /// A prompt timed out.
    Hesitated {
        /// Node the player was at.
        node: String,
        /// When the prompt expired.
        timestamp: DateTime<Utc>,
    },
    /// The player was saved.
    Saved {
        /// Save file path.
        path: String,
        /// When the save was written.
        timestamp: DateTime<Utc>,
    },
    /// The player was loaded.
    Loaded {
        /// Save file path.
        path: String,
        /// When the save was read.
        timestamp: DateTime<Utc>,
    },
    /// The game ended.
    GameOver {
        /// Ending name.
        ending: String,
        /// When the game ended.
        timestamp: DateTime<Utc>,
    },
}

//! Player state management.

use serde::{Deserialize, Serialize};

/// Health and max health of a fresh player.
pub const STARTING_HEALTH: u32 = 100;
/// Attack power of a fresh player.
pub const STARTING_ATTACK: u32 = 10;
/// XP needed per level: level N ends at N * 50 total XP.
pub const XP_PER_LEVEL: u32 = 50;
/// Max health gained per level.
pub const LEVEL_UP_HEALTH: u32 = 20;
/// Attack power gained per level.
pub const LEVEL_UP_ATTACK: u32 = 5;

/// The player's stats and inventory.
///
/// Health always stays within `0..=max_health` and level starts at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    inventory: Vec<String>,
    health: u32,
    max_health: u32,
    attack_power: u32,
    level: u32,
    xp: u32,
}

/// A level gained while collecting XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// The new level.
    pub level: u32,
    /// Max health after the level-up.
    pub max_health: u32,
    /// Attack power after the level-up.
    pub attack_power: u32,
}

impl std::fmt::Display for LevelUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Level Up! You are now Level {}. Max HP: {}, Attack: {}",
            self.level, self.max_health, self.attack_power
        )
    }
}

impl Player {
    /// Create a fresh level 1 player with an empty inventory.
    pub fn new() -> Self {
        Self {
            inventory: Vec::new(),
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            attack_power: STARTING_ATTACK,
            level: 1,
            xp: 0,
        }
    }

    /// Items carried, in pickup order.
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Current health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Maximum health.
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Attack power before weapon modifiers.
    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    /// Current level (1-based).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total XP collected.
    pub fn xp(&self) -> u32 {
        self.xp
    }

    /// Whether the player still has health left.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Check if the player carries an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Add an item to the inventory. Duplicates are kept.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Remove one copy of an item. Returns false if it was not carried.
    pub fn remove_item(&mut self, item: &str) -> bool {
        if let Some(pos) = self.inventory.iter().position(|i| i == item) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Apply a health change, clamped to `0..=max_health`. Returns the new health.
    pub fn change_health(&mut self, amount: i32) -> u32 {
        let next =
            (i64::from(self.health) + i64::from(amount)).clamp(0, i64::from(self.max_health));
        self.health = next as u32;
        self.health
    }

    /// Raise attack power, e.g. when picking up a weapon.
    pub fn boost_attack(&mut self, amount: u32) {
        self.attack_power = self.attack_power.saturating_add(amount);
    }

    /// Total XP at which the current level ends.
    pub fn xp_for_next_level(&self) -> u32 {
        self.level.saturating_mul(XP_PER_LEVEL)
    }

    /// Collect XP and apply one level-up per threshold crossed.
    ///
    /// Leveling stops once the next threshold no longer fits in a `u32`.
    pub fn gain_xp(&mut self, amount: u32) -> Vec<LevelUp> {
        self.xp = self.xp.saturating_add(amount);

        let mut gained = Vec::new();
        while self.level.checked_mul(XP_PER_LEVEL).is_some_and(|next| self.xp >= next) {
            self.level += 1;
            self.max_health = self.max_health.saturating_add(LEVEL_UP_HEALTH);
            self.health = self.max_health;
            self.attack_power = self.attack_power.saturating_add(LEVEL_UP_ATTACK);
            gained.push(LevelUp {
                level: self.level,
                max_health: self.max_health,
                attack_power: self.attack_power,
            });
        }
        gained
    }

    /// One-line status summary.
    pub fn status_line(&self) -> String {
        format!(
            "Health: {}/{} | Level: {} | XP: {}",
            self.health, self.max_health, self.level, self.xp
        )
    }

    /// Check the invariants a saved player must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.level == 0 {
            return Err("level must be at least 1".to_string());
        }
        if self.max_health == 0 {
            return Err("max health must be positive".to_string());
        }
        if self.health == 0 {
            return Err("health must be positive".to_string());
        }
        if self.health > self.max_health {
            return Err(format!(
                "health {} exceeds max health {}",
                self.health, self.max_health
            ));
        }
        if self.xp >= self.xp_for_next_level() {
            return Err(format!(
                "xp {} already reaches level {}'s threshold of {}",
                self.xp,
                self.level,
                self.xp_for_next_level()
            ));
        }
        Ok(())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

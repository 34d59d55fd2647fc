//! Combat-only enemy state.

/// Blueprint for the enemy of an encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemySpec {
    /// Display name.
    pub name: String,
    /// Starting health.
    pub health: u32,
    /// Damage dealt per hit.
    pub attack_power: u32,
}

impl EnemySpec {
    /// Create an enemy blueprint.
    pub fn new(name: impl Into<String>, health: u32, attack_power: u32) -> Self {
        Self {
            name: name.into(),
            health,
            attack_power,
        }
    }

    /// Spawn a fresh enemy for one encounter.
    pub fn spawn(&self) -> Enemy {
        Enemy {
            name: self.name.clone(),
            health: self.health,
            attack_power: self.attack_power,
        }
    }
}

/// An enemy in a live encounter. Created per fight and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    name: String,
    health: u32,
    attack_power: u32,
}

impl Enemy {
    /// Create an enemy directly.
    pub fn new(name: impl Into<String>, health: u32, attack_power: u32) -> Self {
        Self {
            name: name.into(),
            health,
            attack_power,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remaining health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Damage dealt per hit.
    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    /// Whether the enemy can still fight.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, flooring health at zero. Returns the remaining health.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }
}

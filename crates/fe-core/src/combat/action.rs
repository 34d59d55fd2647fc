//! Combat actions and event logging.

/// What the player did in a combat round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatAction {
    /// Strike the enemy.
    Attack,
    /// Try to avoid the enemy's blow.
    Dodge,
    /// The prompt timed out.
    Hesitate,
    /// Input that is not a combat action.
    Fumble(String),
}

impl CombatAction {
    /// Parse combat input: `1`/`attack` or `2`/`dodge`. Anything else fumbles.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "1" | "attack" | "a" => Self::Attack,
            "2" | "dodge" | "d" => Self::Dodge,
            _ => Self::Fumble(input.trim().to_string()),
        }
    }
}

impl std::fmt::Display for CombatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::Dodge => write!(f, "Dodge"),
            Self::Hesitate => write!(f, "Hesitate"),
            Self::Fumble(input) => write!(f, "Fumble ({input:?})"),
        }
    }
}

/// A recorded combat round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatEvent {
    /// Round number (1-based).
    pub round: u32,
    /// The enemy's name.
    pub enemy: String,
    /// What the player did.
    pub action: CombatAction,
    /// Damage the player dealt.
    pub damage_dealt: u32,
    /// Damage the player took.
    pub damage_taken: u32,
    /// Whether a dodge succeeded.
    pub dodged: bool,
    /// Player health after the round.
    pub player_health: u32,
    /// Enemy health after the round.
    pub enemy_health: u32,
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.action {
            CombatAction::Attack => {
                write!(
                    f,
                    "{} takes {} damage. HP left: {}",
                    self.enemy, self.damage_dealt, self.enemy_health
                )?;
            }
            CombatAction::Dodge if self.dodged => write!(f, "You dodged the attack!")?,
            CombatAction::Dodge => write!(f, "Dodge failed!")?,
            CombatAction::Hesitate => write!(f, "You hesitated!")?,
            CombatAction::Fumble(_) => write!(f, "Invalid action!")?,
        }
        if self.damage_taken > 0 {
            write!(
                f,
                "\n{} hits you for {}. Current HP: {}",
                self.enemy, self.damage_taken, self.player_health
            )?;
        }
        Ok(())
    }
}

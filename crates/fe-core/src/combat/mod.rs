//! Turn-based combat between the player and one enemy.
//!
//! Each round the player attacks, dodges, or fails to act in time. The enemy
//! strikes back with its full attack power unless it is dead or the dodge
//! worked. The fight ends when either side reaches zero health.

pub mod action;

pub use action::{CombatAction, CombatEvent};

use rand::Rng;

use crate::enemy::Enemy;
use crate::player::Player;
use crate::story::Encounter;

/// Percent chance that a dodge avoids the enemy's blow.
pub const DODGE_CHANCE: u32 = 50;

/// How a finished fight went for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// The enemy fell and the player survived.
    Victory,
    /// The player fell.
    Defeat,
}

impl CombatOutcome {
    /// Whether the player survived.
    pub fn survived(&self) -> bool {
        matches!(self, Self::Victory)
    }
}

/// The state of an ongoing fight.
#[derive(Debug, Clone)]
pub struct Combat {
    enemy: Enemy,
    armed: bool,
    round: u32,
    log: Vec<CombatEvent>,
}

impl Combat {
    /// Create a fight against `enemy`. An armed player deals full damage.
    pub fn new(enemy: Enemy, armed: bool) -> Self {
        Self {
            enemy,
            armed,
            round: 0,
            log: Vec::new(),
        }
    }

    /// Start the fight described by an encounter. The player is armed if
    /// the encounter names a weapon and the player carries it.
    pub fn from_encounter(encounter: &Encounter, player: &Player) -> Self {
        let armed = encounter
            .weapon
            .as_deref()
            .is_some_and(|weapon| player.has_item(weapon));
        Self::new(encounter.enemy.spawn(), armed)
    }

    /// The enemy.
    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Whether the player fights with a weapon.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Rounds fought so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// All rounds fought so far.
    pub fn log(&self) -> &[CombatEvent] {
        &self.log
    }

    /// Damage of one player attack: full attack power when armed, half otherwise.
    pub fn attack_damage(&self, player: &Player) -> u32 {
        if self.armed {
            player.attack_power()
        } else {
            player.attack_power() / 2
        }
    }

    /// Resolve one round and record it.
    pub fn resolve_round<R: Rng + ?Sized>(
        &mut self,
        player: &mut Player,
        action: CombatAction,
        rng: &mut R,
    ) -> CombatEvent {
        self.round += 1;

        let mut damage_dealt = 0;
        let mut dodged = false;
        let enemy_strikes = match &action {
            CombatAction::Attack => {
                damage_dealt = self.attack_damage(player);
                self.enemy.take_damage(damage_dealt);
                self.enemy.is_alive()
            }
            CombatAction::Dodge => {
                dodged = rng.random_range(0..100) < DODGE_CHANCE;
                !dodged
            }
            CombatAction::Hesitate | CombatAction::Fumble(_) => true,
        };

        let damage_taken = if enemy_strikes {
            let hit = self.enemy.attack_power();
            player.change_health(-i32::try_from(hit).unwrap_or(i32::MAX));
            hit
        } else {
            0
        };

        let event = CombatEvent {
            round: self.round,
            enemy: self.enemy.name().to_string(),
            action,
            damage_dealt,
            damage_taken,
            dodged,
            player_health: player.health(),
            enemy_health: self.enemy.health(),
        };
        self.log.push(event.clone());
        event
    }

    /// The result once one side has fallen, `None` while both stand.
    pub fn outcome(&self, player: &Player) -> Option<CombatOutcome> {
        if !player.is_alive() {
            Some(CombatOutcome::Defeat)
        } else if !self.enemy.is_alive() {
            Some(CombatOutcome::Victory)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::EnemySpec;
    use crate::story::ids;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn goblin() -> Enemy {
        Enemy::new("Goblin", 50, 15)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn unarmed_attack_deals_half() {
        let mut player = Player::new();
        let mut combat = Combat::new(goblin(), false);
        let event = combat.resolve_round(&mut player, CombatAction::Attack, &mut rng());
        assert_eq!(event.damage_dealt, 5);
        assert_eq!(combat.enemy().health(), 45);
        assert_eq!(event.damage_taken, 15);
        assert_eq!(player.health(), 85);
    }

    #[test]
    fn armed_attack_deals_full_power() {
        let mut player = Player::new();
        player.boost_attack(10);
        let mut combat = Combat::new(goblin(), true);
        combat.resolve_round(&mut player, CombatAction::Attack, &mut rng());
        assert_eq!(combat.enemy().health(), 30);
    }

    #[test]
    fn killing_blow_prevents_retaliation() {
        let mut player = Player::new();
        let mut combat = Combat::new(Enemy::new("Rat", 5, 15), true);
        let event = combat.resolve_round(&mut player, CombatAction::Attack, &mut rng());
        assert_eq!(event.damage_taken, 0);
        assert_eq!(player.health(), 100);
        assert_eq!(combat.outcome(&player), Some(CombatOutcome::Victory));
    }

    #[test]
    fn hesitation_costs_a_full_hit() {
        let mut player = Player::new();
        let mut combat = Combat::new(goblin(), false);
        let event = combat.resolve_round(&mut player, CombatAction::Hesitate, &mut rng());
        assert_eq!(event.damage_taken, 15);
        assert_eq!(player.health(), 85);
        assert_eq!(combat.enemy().health(), 50);
    }

    #[test]
    fn fumble_costs_a_full_hit() {
        let mut player = Player::new();
        let mut combat = Combat::new(goblin(), false);
        let action = CombatAction::parse("flee");
        combat.resolve_round(&mut player, action, &mut rng());
        assert_eq!(player.health(), 85);
    }

    #[test]
    fn dodge_either_avoids_or_takes_full_damage() {
        let mut rng = rng();
        let mut dodged = 0;
        let mut hit = 0;
        for _ in 0..200 {
            let mut player = Player::new();
            let mut combat = Combat::new(goblin(), false);
            let event = combat.resolve_round(&mut player, CombatAction::Dodge, &mut rng);
            if event.dodged {
                assert_eq!(player.health(), 100);
                dodged += 1;
            } else {
                assert_eq!(player.health(), 85);
                hit += 1;
            }
        }
        // Both branches occur at a 50% chance.
        assert!(dodged > 50);
        assert!(hit > 50);
    }

    #[test]
    fn unarmed_fight_is_lost() {
        let mut player = Player::new();
        let mut combat = Combat::new(goblin(), false);
        let mut rng = rng();
        while combat.outcome(&player).is_none() {
            combat.resolve_round(&mut player, CombatAction::Attack, &mut rng);
        }
        // 7 retaliations of 15 exceed 100 health before 10 hits of 5 land.
        assert_eq!(combat.outcome(&player), Some(CombatOutcome::Defeat));
        assert_eq!(combat.round(), 7);
        assert_eq!(combat.enemy().health(), 15);
        assert!(!CombatOutcome::Defeat.survived());
    }

    #[test]
    fn armed_fight_is_won_in_three_rounds() {
        let mut player = Player::new();
        player.add_item("sword");
        player.boost_attack(10);
        let encounter = Encounter {
            enemy: EnemySpec::new("Goblin", 50, 15),
            weapon: Some("sword".to_string()),
            xp_reward: 30,
            victory: ids::AFTERMATH,
            defeat: ids::COLLAPSE,
        };
        let mut combat = Combat::from_encounter(&encounter, &player);
        assert!(combat.is_armed());

        let mut rng = rng();
        while combat.outcome(&player).is_none() {
            combat.resolve_round(&mut player, CombatAction::Attack, &mut rng);
        }
        assert_eq!(combat.outcome(&player), Some(CombatOutcome::Victory));
        assert_eq!(combat.log().len(), 3);
        assert_eq!(player.health(), 70);
    }

    #[test]
    fn weapon_must_be_carried() {
        let player = Player::new();
        let encounter = Encounter {
            enemy: EnemySpec::new("Goblin", 50, 15),
            weapon: Some("sword".to_string()),
            xp_reward: 30,
            victory: ids::AFTERMATH,
            defeat: ids::COLLAPSE,
        };
        assert!(!Combat::from_encounter(&encounter, &player).is_armed());
    }
}

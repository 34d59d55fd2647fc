//! Game session management.
//!
//! `GameSession` walks the story graph with the player's state. It is a
//! state machine fed one [`Input`] at a time: while exploring, input is a
//! menu command; while fighting, input is a combat action. The frontend
//! shows [`GameSession::screen`], waits for input with the configured
//! timeout, and hands the result to [`GameSession::process`].

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::combat::{Combat, CombatAction, CombatOutcome};
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::input::Input;
use crate::journal::{Journal, JournalEntry};
use crate::parser::{Command, parse_command, resolve_item};
use crate::player::Player;
use crate::save::{load_player, save_player};
use crate::story::{ChoiceEffect, Encounter, Ending, NodeId, NodeKind, StoryGraph};

/// What the session is waiting for.
#[derive(Debug, Clone)]
pub enum Phase {
    /// A menu command at the current node.
    Exploring,
    /// A combat action.
    Fighting {
        /// The live fight.
        combat: Combat,
        /// The encounter being fought.
        encounter: Encounter,
    },
    /// Nothing; the game ended.
    Over(Ending),
}

/// A single playthrough.
pub struct GameSession {
    graph: StoryGraph,
    player: Player,
    config: GameConfig,
    current: NodeId,
    phase: Phase,
    journal: Journal,
    rng: StdRng,
}

impl GameSession {
    /// Create a session for the forest story.
    pub fn new(config: GameConfig) -> Self {
        Self::start_on(StoryGraph::forest(), config)
    }

    /// Create a session for a custom story graph.
    #[cfg(test)]
    fn with_graph(graph: StoryGraph, config: GameConfig) -> GameResult<Self> {
        graph.validate()?;
        Ok(Self::start_on(graph, config))
    }

    fn start_on(graph: StoryGraph, config: GameConfig) -> Self {
        let current = graph.start();
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            graph,
            player: Player::new(),
            config,
            current,
            phase: Phase::Exploring,
            journal: Journal::new(),
            rng,
        }
    }

    /// The story graph.
    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[cfg(test)]
    fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The node the player is at.
    pub fn current_node(&self) -> NodeId {
        self.current
    }

    /// What the session is waiting for.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The live fight, if any.
    pub fn combat(&self) -> Option<&Combat> {
        match &self.phase {
            Phase::Fighting { combat, .. } => Some(combat),
            _ => None,
        }
    }

    /// The ending reached, if the game is over.
    pub fn ending(&self) -> Option<Ending> {
        match self.phase {
            Phase::Over(ending) => Some(ending),
            _ => None,
        }
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.ending().is_some()
    }

    /// The session journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Enter the start node.
    pub fn begin(&mut self) -> GameResult<String> {
        self.enter(self.graph.start())
    }

    /// Move the player to a node and apply its arrival behavior.
    ///
    /// Item gates redirect or spend the item, combat nodes start a fight,
    /// and ending nodes end the game. Returns the arrival text.
    pub fn enter(&mut self, id: NodeId) -> GameResult<String> {
        let mut out = Vec::new();
        self.arrive(id, &mut out)?;
        Ok(out.join("\n"))
    }

    /// Render the current prompt.
    pub fn screen(&self) -> GameResult<String> {
        let node = self.graph.node(self.current)?;
        let screen = match &self.phase {
            Phase::Exploring => {
                let mut lines = vec![
                    String::new(),
                    node.description.clone(),
                    self.player.status_line(),
                    "Type 'inventory', 'save', 'load', 'use <item>', or choose an option:"
                        .to_string(),
                ];
                for (i, choice) in node.choices().iter().enumerate() {
                    lines.push(format!("{}. {}", i + 1, choice.label));
                }
                lines.join("\n")
            }
            Phase::Fighting { combat, .. } => format!(
                "\n{} | {}: {} HP\nChoose action ({}s): 1. Attack  2. Dodge",
                self.player.status_line(),
                combat.enemy().name(),
                combat.enemy().health(),
                self.config.timeout_secs()
            ),
            Phase::Over(_) => String::new(),
        };
        Ok(screen)
    }

    /// Consume one input and return the resulting text.
    ///
    /// Errors describe rejected input; the session state is unchanged.
    pub fn process(&mut self, input: Input) -> GameResult<String> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if input == Input::Closed {
            return Ok(self.abandon());
        }

        match self.phase {
            Phase::Fighting { .. } => self.process_combat(input),
            _ => self.process_explore(input),
        }
    }

    fn process_explore(&mut self, input: Input) -> GameResult<String> {
        let line = match input {
            Input::Line(line) => line,
            _ => {
                self.journal.append(JournalEntry::Hesitated {
                    node: self.current.to_string(),
                    timestamp: Utc::now(),
                });
                return Ok("Time's up! You hesitate too long.".to_string());
            }
        };

        match parse_command(&line) {
            Command::Choose(number) => self.do_choose(number),
            Command::Inventory => Ok(self.do_inventory()),
            Command::Save => self.do_save(),
            Command::Load => self.do_load(),
            Command::Use { item } => self.do_use(&item),
            Command::Help => Ok(self.do_help()),
            Command::Quit => Ok(self.abandon()),
            Command::Unknown { input } => Err(GameError::UnknownCommand(input)),
        }
    }

    fn do_choose(&mut self, number: i64) -> GameResult<String> {
        let node = self.graph.node(self.current)?;
        let choice = usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| node.choices().get(index))
            .cloned()
            .ok_or(GameError::InvalidChoice(number))?;

        self.journal.append(JournalEntry::ChoiceMade {
            node: self.current.to_string(),
            label: choice.label.clone(),
            timestamp: Utc::now(),
        });

        let mut out = Vec::new();
        for effect in &choice.effects {
            match effect {
                ChoiceEffect::GiveItem(item) => {
                    self.player.add_item(item.clone());
                    self.journal.append(JournalEntry::ItemGained {
                        item: item.clone(),
                        timestamp: Utc::now(),
                    });
                    out.push(format!("You picked up: {item}"));
                }
                ChoiceEffect::BoostAttack(amount) => {
                    self.player.boost_attack(*amount);
                    out.push(format!(
                        "Attack power increased by {amount}. Attack: {}",
                        self.player.attack_power()
                    ));
                }
            }
        }

        self.arrive(choice.target, &mut out)?;
        Ok(out.join("\n"))
    }

    fn do_inventory(&self) -> String {
        if self.player.inventory().is_empty() {
            "Your inventory is empty.".to_string()
        } else {
            format!("Inventory: {}", self.player.inventory().join(", "))
        }
    }

    fn do_save(&mut self) -> GameResult<String> {
        save_player(&self.config.save_path, &self.player)?;
        self.journal.append(JournalEntry::Saved {
            path: self.config.save_path.display().to_string(),
            timestamp: Utc::now(),
        });
        Ok("Game saved successfully!".to_string())
    }

    fn do_load(&mut self) -> GameResult<String> {
        self.player = load_player(&self.config.save_path)?;
        self.journal.append(JournalEntry::Loaded {
            path: self.config.save_path.display().to_string(),
            timestamp: Utc::now(),
        });
        Ok("Game loaded successfully!".to_string())
    }

    fn do_use(&mut self, typed: &str) -> GameResult<String> {
        let item = resolve_item(self.player.inventory(), typed)
            .map(str::to_string)
            .ok_or_else(|| GameError::ItemNotInInventory(typed.to_string()))?;

        let target = self
            .graph
            .node(self.current)?
            .item_use(&item)
            .map(|u| u.target)
            .ok_or_else(|| GameError::CannotUseHere(item.clone()))?;

        let mut out = vec![format!("You use the {item}.")];
        self.arrive(target, &mut out)?;
        Ok(out.join("\n"))
    }

    fn do_help(&self) -> String {
        format!(
            "Commands:\n  \
             <number>    choose a numbered option\n  \
             inventory   list what you carry\n  \
             save        save your progress to {}\n  \
             load        restore your last save\n  \
             use <item>  use an item here\n  \
             help        show this help\n  \
             quit        leave the game\n\
             You have {} seconds to answer each prompt.",
            self.config.save_path.display(),
            self.config.timeout_secs()
        )
    }

    fn process_combat(&mut self, input: Input) -> GameResult<String> {
        let action = match input {
            Input::Line(line) => CombatAction::parse(&line),
            _ => CombatAction::Hesitate,
        };

        let Phase::Fighting { combat, encounter } = &mut self.phase else {
            return Err(GameError::GameOver);
        };

        let event = combat.resolve_round(&mut self.player, action, &mut self.rng);
        self.journal.append(JournalEntry::CombatRound {
            round: event.round,
            action: event.action.to_string(),
            damage_dealt: event.damage_dealt,
            damage_taken: event.damage_taken,
            player_health: event.player_health,
            enemy_health: event.enemy_health,
            timestamp: Utc::now(),
        });

        let mut out = vec![event.to_string()];
        let Some(outcome) = combat.outcome(&self.player) else {
            return Ok(out.join("\n"));
        };

        let encounter = encounter.clone();
        self.journal.append(JournalEntry::CombatEnded {
            enemy: encounter.enemy.name.clone(),
            survived: outcome.survived(),
            timestamp: Utc::now(),
        });

        let next = match outcome {
            CombatOutcome::Victory => {
                out.push(format!("The {} is defeated!", encounter.enemy.name));
                let level_ups = self.player.gain_xp(encounter.xp_reward);
                out.push(format!(
                    "Gained {} XP. Total XP: {}",
                    encounter.xp_reward,
                    self.player.xp()
                ));
                for level_up in level_ups {
                    self.journal.append(JournalEntry::LevelUp {
                        level: level_up.level,
                        timestamp: Utc::now(),
                    });
                    out.push(level_up.to_string());
                }
                encounter.victory
            }
            CombatOutcome::Defeat => encounter.defeat,
        };

        self.arrive(next, &mut out)?;
        Ok(out.join("\n"))
    }

    /// End the game early.
    fn abandon(&mut self) -> String {
        self.finish(Ending::Abandoned);
        "You turn away from the forest.".to_string()
    }

    fn finish(&mut self, ending: Ending) {
        self.phase = Phase::Over(ending);
        self.journal.append(JournalEntry::GameOver {
            ending: ending.to_string(),
            timestamp: Utc::now(),
        });
    }

    fn arrive(&mut self, id: NodeId, out: &mut Vec<String>) -> GameResult<()> {
        let mut target = id;
        // Each redirect moves to a different node; more hops than nodes means a cycle.
        for _ in 0..=self.graph.len() {
            let node = self.graph.node(target)?;
            self.current = target;
            self.journal.append(JournalEntry::NodeEntered {
                node: target.to_string(),
                timestamp: Utc::now(),
            });

            let mut kind = &node.kind;
            let mut redirect = None;
            while let NodeKind::ItemGate {
                item,
                fallback,
                unlocked,
            } = kind
            {
                if self.player.remove_item(item) {
                    self.journal.append(JournalEntry::ItemUsed {
                        item: item.clone(),
                        timestamp: Utc::now(),
                    });
                    out.push(format!("You used: {item}"));
                    kind = unlocked;
                } else {
                    out.push(format!("You need a {item} to proceed!"));
                    redirect = Some(*fallback);
                    break;
                }
            }
            if let Some(fallback) = redirect {
                target = fallback;
                continue;
            }

            match kind {
                NodeKind::Narrative { .. } => {
                    self.phase = Phase::Exploring;
                }
                NodeKind::Combat(encounter) => {
                    let combat = Combat::from_encounter(encounter, &self.player);
                    out.push(node.description.clone());
                    out.push(format!(
                        "Combat begins! {} (HP: {}) vs You (HP: {})",
                        combat.enemy().name(),
                        combat.enemy().health(),
                        self.player.health()
                    ));
                    self.journal.append(JournalEntry::CombatStarted {
                        enemy: combat.enemy().name().to_string(),
                        armed: combat.is_armed(),
                        timestamp: Utc::now(),
                    });
                    self.phase = Phase::Fighting {
                        combat,
                        encounter: encounter.clone(),
                    };
                }
                NodeKind::Ending(ending) => {
                    out.push(node.description.clone());
                    let ending = *ending;
                    self.finish(ending);
                }
                NodeKind::ItemGate { .. } => {}
            }
            return Ok(());
        }
        Err(GameError::GateCycle(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::ids;
    use tempfile::TempDir;

    fn session() -> GameSession {
        let mut session = GameSession::new(GameConfig::default());
        session.begin().unwrap();
        session
    }

    fn send(session: &mut GameSession, text: &str) -> GameResult<String> {
        session.process(Input::line(text))
    }

    /// Fight with attacks only until the fight ends.
    fn attack_until_over(session: &mut GameSession) -> String {
        let mut last = String::new();
        while session.combat().is_some() {
            last = send(session, "1").unwrap();
        }
        last
    }

    #[test]
    fn starts_at_clearing() {
        let session = session();
        assert_eq!(session.current_node(), ids::CLEARING);
        let screen = session.screen().unwrap();
        assert!(screen.contains("You wake up in a dark forest"));
        assert!(screen.contains("Health: 100/100 | Level: 1 | XP: 0"));
        assert!(screen.contains("1. Go north"));
        assert!(screen.contains("2. Pick up the sword"));
    }

    #[test]
    fn choosing_moves_to_target() {
        let mut session = session();
        send(&mut session, "1").unwrap();
        assert_eq!(session.current_node(), ids::NORTH_PATH);
        send(&mut session, "2").unwrap();
        assert_eq!(session.current_node(), ids::CLEARING);
    }

    #[test]
    fn sword_choice_applies_effects() {
        let mut session = session();
        let out = send(&mut session, "2").unwrap();
        assert!(out.contains("You picked up: sword"));
        assert!(session.player().has_item("sword"));
        assert_eq!(session.player().attack_power(), 20);
        assert_eq!(session.current_node(), ids::SWORD);
    }

    #[test]
    fn out_of_range_choice_changes_nothing() {
        let mut session = session();
        let before = session.screen().unwrap();
        for input in ["0", "3", "-1"] {
            let err = send(&mut session, input).unwrap_err();
            assert!(matches!(err, GameError::InvalidChoice(_)));
        }
        assert_eq!(session.current_node(), ids::CLEARING);
        assert_eq!(session.screen().unwrap(), before);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let mut session = session();
        let err = send(&mut session, "dance").unwrap_err();
        assert!(matches!(err, GameError::UnknownCommand(_)));
        assert!(err.to_string().contains("Enter a number"));
        assert_eq!(session.current_node(), ids::CLEARING);
    }

    #[test]
    fn garbled_line_is_an_unknown_command() {
        let mut session = session();
        let err = send(&mut session, "\u{FFFD}\u{FFFD}").unwrap_err();
        assert!(matches!(err, GameError::UnknownCommand(_)));
        assert!(!session.is_over());
        assert_eq!(session.current_node(), ids::CLEARING);
    }

    #[test]
    fn timeout_is_hesitation_without_mutation() {
        let mut session = session();
        let before_screen = session.screen().unwrap();
        let before_player = session.player().clone();

        let out = session.process(Input::Timeout).unwrap();

        assert!(out.contains("hesitate"));
        assert_eq!(session.current_node(), ids::CLEARING);
        assert_eq!(session.player(), &before_player);
        assert_eq!(session.screen().unwrap(), before_screen);
        assert!(matches!(
            session.journal().entries().last(),
            Some(JournalEntry::Hesitated { .. })
        ));
    }

    #[test]
    fn inventory_listing() {
        let mut session = session();
        assert_eq!(
            send(&mut session, "inventory").unwrap(),
            "Your inventory is empty."
        );
        send(&mut session, "2").unwrap();
        assert_eq!(send(&mut session, "inventory").unwrap(), "Inventory: sword");
    }

    #[test]
    fn gate_without_key_redirects() {
        let mut session = session();
        let out = session.enter(ids::MEADOW).unwrap();
        assert!(out.contains("You need a key to proceed!"));
        assert_eq!(session.current_node(), ids::GATE);
        assert!(!session.is_over());
    }

    #[test]
    fn gate_choice_without_key_redirects() {
        let mut session = session();
        session.enter(ids::GATE).unwrap();
        let out = send(&mut session, "1").unwrap();
        assert!(out.contains("You need a key"));
        assert_eq!(session.current_node(), ids::GATE);
        assert!(session.ending().is_none());
    }

    #[test]
    fn use_key_at_gate_escapes() {
        let mut session = session();
        session.player_mut().add_item("key");
        session.enter(ids::GATE).unwrap();
        let out = send(&mut session, "use key").unwrap();
        assert!(out.contains("escape into a bright meadow"));
        assert_eq!(session.ending(), Some(Ending::Escape));
        assert!(!session.player().has_item("key"));
    }

    #[test]
    fn use_missing_item() {
        let mut session = session();
        let err = send(&mut session, "use key").unwrap_err();
        assert!(matches!(err, GameError::ItemNotInInventory(_)));
    }

    #[test]
    fn use_item_in_wrong_place() {
        let mut session = session();
        send(&mut session, "2").unwrap();
        let err = send(&mut session, "use sword").unwrap_err();
        assert!(matches!(err, GameError::CannotUseHere(_)));
        assert_eq!(err.to_string(), "Can't use sword here.");
    }

    #[test]
    fn use_resolves_misspelled_item() {
        let mut session = session();
        session.player_mut().add_item("key");
        session.enter(ids::GATE).unwrap();
        send(&mut session, "use keys").unwrap();
        assert_eq!(session.ending(), Some(Ending::Escape));
    }

    #[test]
    fn entering_combat_node_starts_fight() {
        let mut session = session();
        send(&mut session, "1").unwrap();
        let out = send(&mut session, "1").unwrap();
        assert!(out.contains("You face the Goblin with bare hands."));
        assert!(out.contains("Combat begins! Goblin (HP: 50) vs You (HP: 100)"));
        let combat = session.combat().unwrap();
        assert!(!combat.is_armed());
        assert!(session.screen().unwrap().contains("1. Attack  2. Dodge"));
    }

    #[test]
    fn combat_timeout_is_a_hit() {
        let mut session = session();
        session.enter(ids::BRAWL).unwrap();
        let out = session.process(Input::Timeout).unwrap();
        assert!(out.contains("You hesitated!"));
        assert_eq!(session.player().health(), 85);
    }

    #[test]
    fn combat_invalid_input_is_a_hit() {
        let mut session = session();
        session.enter(ids::BRAWL).unwrap();
        let out = send(&mut session, "inventory").unwrap();
        assert!(out.contains("Invalid action!"));
        assert_eq!(session.player().health(), 85);
    }

    #[test]
    fn armed_victory_grants_xp_and_moves_on() {
        let mut session = session();
        send(&mut session, "2").unwrap();
        send(&mut session, "1").unwrap();
        assert!(session.combat().unwrap().is_armed());

        let out = attack_until_over(&mut session);

        assert!(out.contains("Gained 30 XP. Total XP: 30"));
        assert_eq!(session.current_node(), ids::AFTERMATH);
        assert_eq!(session.player().health(), 70);
        assert_eq!(session.player().xp(), 30);
        assert!(matches!(session.phase(), Phase::Exploring));
    }

    #[test]
    fn unarmed_defeat_is_death() {
        let mut session = session();
        send(&mut session, "1").unwrap();
        send(&mut session, "1").unwrap();

        let out = attack_until_over(&mut session);

        assert!(out.contains("You succumb to your wounds"));
        assert_eq!(session.ending(), Some(Ending::Death));
        assert_eq!(session.current_node(), ids::COLLAPSE);
        assert!(!session.player().is_alive());
        assert!(matches!(
            send(&mut session, "1").unwrap_err(),
            GameError::GameOver
        ));
    }

    #[test]
    fn full_escape_path() {
        let mut session = session();
        for input in ["2", "1"] {
            send(&mut session, input).unwrap();
        }
        attack_until_over(&mut session);
        let out = send(&mut session, "1").unwrap();
        assert!(out.contains("You picked up: key"));
        assert_eq!(session.current_node(), ids::GATE);

        let out = send(&mut session, "1").unwrap();
        assert!(out.contains("You used: key"));
        assert!(out.contains("escape into a bright meadow"));
        assert_eq!(session.ending(), Some(Ending::Escape));

        let md = session.journal().export_markdown();
        assert!(md.contains("**Combat** vs Goblin (armed)"));
        assert!(md.contains("**Ending**: Escape"));
    }

    #[test]
    fn victory_can_level_up() {
        let mut session = session();
        session.player_mut().gain_xp(40);
        session.player_mut().add_item("sword");
        session.player_mut().boost_attack(10);
        session.enter(ids::DUEL).unwrap();

        let out = attack_until_over(&mut session);

        assert!(out.contains("Level Up! You are now Level 2"));
        assert_eq!(session.player().level(), 2);
        assert_eq!(session.player().health(), 120);
    }

    #[test]
    fn save_then_load_restores_player() {
        let dir = TempDir::new().unwrap();
        let config = GameConfig::default().with_save_path(dir.path().join("save.json"));
        let mut session = GameSession::new(config);
        session.begin().unwrap();

        send(&mut session, "2").unwrap();
        assert_eq!(send(&mut session, "save").unwrap(), "Game saved successfully!");
        let saved = session.player().clone();

        session.player_mut().add_item("pebble");
        session.player_mut().change_health(-50);

        assert_eq!(send(&mut session, "load").unwrap(), "Game loaded successfully!");
        assert_eq!(session.player(), &saved);
        assert_eq!(session.current_node(), ids::SWORD);
    }

    #[test]
    fn failed_load_keeps_state() {
        let dir = TempDir::new().unwrap();
        let config = GameConfig::default().with_save_path(dir.path().join("missing.json"));
        let mut session = GameSession::new(config);
        session.begin().unwrap();
        send(&mut session, "2").unwrap();
        let before = session.player().clone();

        let err = send(&mut session, "load").unwrap_err();

        assert!(err.to_string().starts_with("Failed to load game"));
        assert_eq!(session.player(), &before);
    }

    #[test]
    fn closed_input_abandons() {
        let mut session = session();
        session.process(Input::Closed).unwrap();
        assert_eq!(session.ending(), Some(Ending::Abandoned));
    }

    #[test]
    fn quit_command_abandons() {
        let mut session = session();
        send(&mut session, "quit").unwrap();
        assert!(session.is_over());
    }

    #[test]
    fn help_mentions_commands() {
        let mut session = session();
        let out = send(&mut session, "help").unwrap();
        assert!(out.contains("use <item>"));
        assert!(out.contains("10 seconds"));
    }

    #[test]
    fn custom_graph_is_validated() {
        use crate::story::{Choice, StoryNode};

        let mut graph = StoryGraph::new(ids::CLEARING);
        graph.add_node(
            StoryNode::narrative(ids::CLEARING, "Start")
                .with_choice(Choice::new("On", ids::GATE)),
        );
        assert!(GameSession::with_graph(graph, GameConfig::default()).is_err());
    }

    #[test]
    fn gate_cycle_is_an_error() {
        use crate::story::StoryNode;

        let mut graph = StoryGraph::new(ids::GATE);
        graph.add_node(
            StoryNode::ending(ids::GATE, "Locked", Ending::Escape).gated("key", ids::MEADOW),
        );
        graph.add_node(
            StoryNode::ending(ids::MEADOW, "Locked", Ending::Escape).gated("key", ids::GATE),
        );
        let mut session = GameSession::with_graph(graph, GameConfig::default()).unwrap();
        assert!(matches!(
            session.begin().unwrap_err(),
            GameError::GateCycle(_)
        ));
    }
}

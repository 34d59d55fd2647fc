//! The story graph and the hand-wired forest story.

mod node;

pub use node::{
    Choice, ChoiceEffect, Encounter, Ending, ItemUse, NodeId, NodeKind, StoryNode,
};

use std::collections::BTreeMap;

use crate::enemy::EnemySpec;
use crate::error::{GameError, GameResult};

/// Node ids of the forest story.
pub mod ids {
    use super::NodeId;

    /// Starting clearing with the rusty sword.
    pub const CLEARING: NodeId = NodeId::new("clearing");
    /// Path north where the goblin waits.
    pub const NORTH_PATH: NodeId = NodeId::new("north_path");
    /// After picking up the sword.
    pub const SWORD: NodeId = NodeId::new("sword");
    /// Goblin fight with bare hands.
    pub const BRAWL: NodeId = NodeId::new("brawl");
    /// Goblin fight with the sword.
    pub const DUEL: NodeId = NodeId::new("duel");
    /// After the goblin falls, the key hangs on a branch.
    pub const AFTERMATH: NodeId = NodeId::new("aftermath");
    /// In front of the locked gate.
    pub const GATE: NodeId = NodeId::new("gate");
    /// Escape ending behind the gate.
    pub const MEADOW: NodeId = NodeId::new("meadow");
    /// Death ending.
    pub const COLLAPSE: NodeId = NodeId::new("collapse");
}

/// Item granted by the sword choice.
pub const SWORD_ITEM: &str = "sword";
/// Item that opens the gate.
pub const KEY_ITEM: &str = "key";
/// Attack bonus for picking up the sword.
pub const SWORD_ATTACK_BONUS: u32 = 10;
/// XP for defeating the goblin.
pub const GOBLIN_XP: u32 = 30;

/// Immutable mapping from node ids to story nodes.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    nodes: BTreeMap<NodeId, StoryNode>,
    start: NodeId,
}

impl StoryGraph {
    /// Create an empty graph that will start at `start`.
    pub fn new(start: NodeId) -> Self {
        Self {
            nodes: BTreeMap::new(),
            start,
        }
    }

    /// Add a node, replacing any node with the same id.
    pub fn add_node(&mut self, node: StoryNode) {
        self.nodes.insert(node.id, node);
    }

    /// The entry node id.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> GameResult<&StoryNode> {
        self.nodes.get(&id).ok_or(GameError::NodeNotFound(id))
    }

    /// All nodes, ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that the start node and every edge target exist.
    pub fn validate(&self) -> GameResult<()> {
        self.node(self.start)?;
        for node in self.nodes.values() {
            for target in node.kind.targets() {
                self.node(target)?;
            }
        }
        Ok(())
    }

    /// The forest escape story.
    pub fn forest() -> Self {
        let goblin = EnemySpec::new("Goblin", 50, 15);
        let mut graph = Self::new(ids::CLEARING);

        graph.add_node(
            StoryNode::narrative(
                ids::CLEARING,
                "You wake up in a dark forest. A path leads north, and a rusty sword lies to your right.",
            )
            .with_choice(Choice::new("Go north", ids::NORTH_PATH))
            .with_choice(
                Choice::new("Pick up the sword", ids::SWORD)
                    .with_effect(ChoiceEffect::GiveItem(SWORD_ITEM.to_string()))
                    .with_effect(ChoiceEffect::BoostAttack(SWORD_ATTACK_BONUS)),
            ),
        );

        graph.add_node(
            StoryNode::narrative(ids::NORTH_PATH, "You walk north and encounter a Goblin!")
                .with_choice(Choice::new("Fight", ids::BRAWL))
                .with_choice(Choice::new("Run back", ids::CLEARING)),
        );

        graph.add_node(
            StoryNode::narrative(
                ids::SWORD,
                "You pick up the rusty sword, increasing your attack power.",
            )
            .with_choice(Choice::new("Go north", ids::DUEL)),
        );

        graph.add_node(StoryNode::combat(
            ids::BRAWL,
            "You face the Goblin with bare hands.",
            Encounter {
                enemy: goblin.clone(),
                weapon: None,
                xp_reward: GOBLIN_XP,
                victory: ids::AFTERMATH,
                defeat: ids::COLLAPSE,
            },
        ));

        graph.add_node(StoryNode::combat(
            ids::DUEL,
            "You face the Goblin with your sword.",
            Encounter {
                enemy: goblin,
                weapon: Some(SWORD_ITEM.to_string()),
                xp_reward: GOBLIN_XP,
                victory: ids::AFTERMATH,
                defeat: ids::COLLAPSE,
            },
        ));

        graph.add_node(
            StoryNode::narrative(
                ids::AFTERMATH,
                "You defeated the Goblin! A locked gate is ahead, with a key on a branch.",
            )
            .with_choice(
                Choice::new("Take the key", ids::GATE)
                    .with_effect(ChoiceEffect::GiveItem(KEY_ITEM.to_string())),
            )
            .with_choice(Choice::new("Go back", ids::CLEARING)),
        );

        graph.add_node(
            StoryNode::narrative(ids::GATE, "You have the key. The gate stands before you.")
                .with_choice(Choice::new("Use the key", ids::MEADOW))
                .with_choice(Choice::new("Go back", ids::CLEARING))
                .with_item_use(KEY_ITEM, ids::MEADOW),
        );

        graph.add_node(
            StoryNode::ending(
                ids::MEADOW,
                "You unlock the gate and escape into a bright meadow! (Game Over)",
                Ending::Escape,
            )
            .gated(KEY_ITEM, ids::GATE),
        );

        graph.add_node(StoryNode::ending(
            ids::COLLAPSE,
            "You succumb to your wounds and collapse. (Game Over)",
            Ending::Death,
        ));

        graph
    }
}

//! Story nodes and the edges between them.

use crate::enemy::EnemySpec;

/// Identifier of a story node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(&'static str);

impl NodeId {
    /// Create a node id.
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    /// The id as a string.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A side effect applied when a choice is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceEffect {
    /// Give an item to the player.
    GiveItem(String),
    /// Raise the player's attack power.
    BoostAttack(u32),
}

/// A numbered menu entry leading to another node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Menu text.
    pub label: String,
    /// Node the choice leads to.
    pub target: NodeId,
    /// Effects applied before moving, in order.
    pub effects: Vec<ChoiceEffect>,
}

impl Choice {
    /// Create a choice without effects.
    pub fn new(label: impl Into<String>, target: NodeId) -> Self {
        Self {
            label: label.into(),
            target,
            effects: Vec::new(),
        }
    }

    /// Attach an effect.
    pub fn with_effect(mut self, effect: ChoiceEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// An item that can be used at a node with `use <item>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUse {
    /// Item name.
    pub item: String,
    /// Node reached by using the item.
    pub target: NodeId,
}

/// A scripted fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    /// The enemy to spawn.
    pub enemy: EnemySpec,
    /// Weapon that grants full damage when carried. `None` means bare hands.
    pub weapon: Option<String>,
    /// XP granted on victory.
    pub xp_reward: u32,
    /// Node reached when the player wins.
    pub victory: NodeId,
    /// Node reached when the player falls.
    pub defeat: NodeId,
}

/// How a playthrough ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The player escaped.
    Escape,
    /// The player died.
    Death,
    /// The player left before the story ended.
    Abandoned,
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Escape => write!(f, "Escape"),
            Self::Death => write!(f, "Death"),
            Self::Abandoned => write!(f, "Abandoned"),
        }
    }
}

/// What happens when the player arrives at a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Show a menu of choices.
    Narrative {
        /// Menu entries, in display order.
        choices: Vec<Choice>,
        /// Items usable here.
        item_uses: Vec<ItemUse>,
    },
    /// Start a fight.
    Combat(Encounter),
    /// Require an item. Without it the player is sent to `fallback`; with it
    /// the item is spent and `unlocked` applies.
    ItemGate {
        /// Required item.
        item: String,
        /// Node reached without the item.
        fallback: NodeId,
        /// Behavior once the gate is passed.
        unlocked: Box<NodeKind>,
    },
    /// End the game.
    Ending(Ending),
}

impl NodeKind {
    /// Short name of the kind, for listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Narrative { .. } => "narrative",
            Self::Combat(_) => "combat",
            Self::ItemGate { .. } => "item gate",
            Self::Ending(_) => "ending",
        }
    }

    /// Every node id this kind can lead to.
    pub fn targets(&self) -> Vec<NodeId> {
        match self {
            Self::Narrative { choices, item_uses } => choices
                .iter()
                .map(|c| c.target)
                .chain(item_uses.iter().map(|u| u.target))
                .collect(),
            Self::Combat(encounter) => vec![encounter.victory, encounter.defeat],
            Self::ItemGate {
                fallback, unlocked, ..
            } => {
                let mut targets = vec![*fallback];
                targets.extend(unlocked.targets());
                targets
            }
            Self::Ending(_) => Vec::new(),
        }
    }
}

/// A single narrative beat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryNode {
    /// Node id.
    pub id: NodeId,
    /// Text shown on arrival.
    pub description: String,
    /// Arrival behavior.
    pub kind: NodeKind,
}

impl StoryNode {
    /// Create a narrative node with no choices yet.
    pub fn narrative(id: NodeId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            kind: NodeKind::Narrative {
                choices: Vec::new(),
                item_uses: Vec::new(),
            },
        }
    }

    /// Create a combat node.
    pub fn combat(id: NodeId, description: impl Into<String>, encounter: Encounter) -> Self {
        Self {
            id,
            description: description.into(),
            kind: NodeKind::Combat(encounter),
        }
    }

    /// Create an ending node.
    pub fn ending(id: NodeId, description: impl Into<String>, ending: Ending) -> Self {
        Self {
            id,
            description: description.into(),
            kind: NodeKind::Ending(ending),
        }
    }

    /// Add a menu choice. Ignored unless the node is narrative.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        if let NodeKind::Narrative { choices, .. } = &mut self.kind {
            choices.push(choice);
        }
        self
    }

    /// Allow `use <item>` here. Ignored unless the node is narrative.
    pub fn with_item_use(mut self, item: impl Into<String>, target: NodeId) -> Self {
        if let NodeKind::Narrative { item_uses, .. } = &mut self.kind {
            item_uses.push(ItemUse {
                item: item.into(),
                target,
            });
        }
        self
    }

    /// Put the node behind an item gate.
    pub fn gated(mut self, item: impl Into<String>, fallback: NodeId) -> Self {
        let unlocked = std::mem::replace(&mut self.kind, NodeKind::Ending(Ending::Abandoned));
        self.kind = NodeKind::ItemGate {
            item: item.into(),
            fallback,
            unlocked: Box::new(unlocked),
        };
        self
    }

    /// Menu entries, empty for non-narrative nodes.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            NodeKind::Narrative { choices, .. } => choices,
            _ => &[],
        }
    }

    /// The item use registered for `item` at this node.
    pub fn item_use(&self, item: &str) -> Option<&ItemUse> {
        match &self.kind {
            NodeKind::Narrative { item_uses, .. } => item_uses.iter().find(|u| u.item == item),
            _ => None,
        }
    }
}

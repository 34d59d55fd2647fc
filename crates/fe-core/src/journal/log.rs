//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Forest Escape Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::NodeEntered { node, timestamp } => {
                    out.push_str(&format!("## {node}\n*{}*\n\n", timestamp.format("%H:%M:%S")));
                }
                JournalEntry::CombatStarted { enemy, armed, .. } => {
                    let with = if *armed { "armed" } else { "bare hands" };
                    out.push_str(&format!("**Combat** vs {enemy} ({with})\n\n"));
                }
                JournalEntry::GameOver { ending, .. } => {
                    out.push_str(&format!("---\n\n**Ending**: {ending}\n"));
                }
                other => {
                    out.push_str(&format!("- {}\n", describe(other)));
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Forest Escape Journal\n=====================\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::NodeEntered { node, timestamp } => {
                    out.push_str(&format!("--- {node} ({}) ---\n", timestamp.format("%H:%M:%S")));
                }
                JournalEntry::GameOver { ending, .. } => {
                    out.push_str(&format!("\nEnding: {ending}\n"));
                }
                other => {
                    out.push_str(&describe(other));
                    out.push('\n');
                }
            }
        }
        out
    }
}

fn describe(entry: &JournalEntry) -> String {
    match entry {
        JournalEntry::NodeEntered { node, .. } => format!("Entered {node}"),
        JournalEntry::ChoiceMade { node, label, .. } => format!("Chose \"{label}\" at {node}"),
        JournalEntry::ItemGained { item, .. } => format!("Picked up {item}"),
        JournalEntry::ItemUsed { item, .. } => format!("Used {item}"),
        JournalEntry::CombatStarted { enemy, armed, .. } => {
            let with = if *armed { "armed" } else { "bare hands" };
            format!("Combat vs {enemy} ({with})")
        }
        JournalEntry::CombatRound {
            round,
            action,
            damage_dealt,
            damage_taken,
            player_health,
            enemy_health,
            ..
        } => format!(
            "Round {round}: {action}, dealt {damage_dealt}, took {damage_taken} (you {player_health} HP, enemy {enemy_health} HP)"
        ),
        JournalEntry::CombatEnded {
            enemy, survived, ..
        } => {
            if *survived {
                format!("Defeated {enemy}")
            } else {
                format!("Fell to {enemy}")
            }
        }
        JournalEntry::LevelUp { level, .. } => format!("Reached level {level}"),
        JournalEntry::Hesitated { node, .. } => format!("Hesitated at {node}"),
        JournalEntry::Saved { path, .. } => format!("Saved to {path}"),
        JournalEntry::Loaded { path, .. } => format!("Loaded from {path}"),
        JournalEntry::GameOver { ending, .. } => format!("Ending: {ending}"),
    }
}

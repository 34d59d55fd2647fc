//! Command parsing for player input outside combat.

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick the numbered menu entry (1-based as typed).
    Choose(i64),
    /// List inventory.
    Inventory,
    /// Save the player to the save file.
    Save,
    /// Load the player from the save file.
    Load,
    /// Use an item.
    Use {
        /// The item name.
        item: String,
    },
    /// Show help.
    Help,
    /// Leave the game.
    Quit,
    /// Unknown command.
    Unknown {
        /// The original input.
        input: String,
    },
}

/// Verb synonyms for command parsing.
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];
const USE_VERBS: &[&str] = &["use"];
const HELP_VERBS: &[&str] = &["help", "h", "?"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit"];

/// Parse a player input string into a command.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let lower = input.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    let Some(verb) = words.first().copied() else {
        return Command::Unknown {
            input: String::new(),
        };
    };
    let rest = &words[1..];

    if rest.is_empty() {
        if let Ok(number) = verb.parse::<i64>() {
            return Command::Choose(number);
        }
        if INVENTORY_VERBS.contains(&verb) {
            return Command::Inventory;
        }
        if verb == "save" {
            return Command::Save;
        }
        if verb == "load" {
            return Command::Load;
        }
        if HELP_VERBS.contains(&verb) {
            return Command::Help;
        }
        if QUIT_VERBS.contains(&verb) {
            return Command::Quit;
        }
    } else if USE_VERBS.contains(&verb) {
        return Command::Use {
            item: rest.join(" "),
        };
    }

    Command::Unknown {
        input: input.to_string(),
    }
}

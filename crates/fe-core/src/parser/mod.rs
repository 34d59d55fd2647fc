//! Player input parsing and item name resolution.

pub mod command;
pub mod resolver;

pub use command::{Command, parse_command};
pub use resolver::resolve_item;

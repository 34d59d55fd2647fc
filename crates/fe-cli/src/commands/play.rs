use std::fs;
use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use fe_core::{Ending, GameConfig, GameSession, Input, TimedLines};

pub fn run(config: GameConfig, journal: Option<&Path>) -> Result<(), String> {
    let timeout = config.input_timeout;
    let mut session = GameSession::new(config);
    let input = TimedLines::stdin();

    println!("{}", "Welcome to the Forest Escape Adventure!".bold());
    println!("  Type 'help' for commands. You have {}s per prompt.", timeout.as_secs());
    print_output(&session.begin().map_err(|e| e.to_string())?);

    while !session.is_over() {
        println!("{}", session.screen().map_err(|e| e.to_string())?);
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let answer = input.wait_line(timeout);
        if answer == Input::Timeout {
            // Keep the next output off the prompt line.
            println!();
        }

        match session.process(answer) {
            Ok(output) => print_output(&output),
            Err(e) if e.is_recoverable() => println!("{}", e.to_string().yellow()),
            Err(e) => return Err(e.to_string()),
        }
    }

    match session.ending() {
        Some(Ending::Escape) => println!("\n  {}", "You escaped the forest.".green().bold()),
        Some(Ending::Death) => println!("\n  {}", "You did not survive.".red().bold()),
        _ => println!(),
    }
    println!("Thanks for playing!");

    if let Some(path) = journal {
        let text = if path.extension().is_some_and(|ext| ext == "txt") {
            session.journal().export_text()
        } else {
            session.journal().export_markdown()
        };
        fs::write(path, text)
            .map_err(|e| format!("failed to write journal {}: {e}", path.display()))?;
        println!("  Journal written to {}", path.display());
    }

    Ok(())
}

fn print_output(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

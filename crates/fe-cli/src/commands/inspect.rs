use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path) -> Result<(), String> {
    let save = fe_core::read_save(path).map_err(|e| e.to_string())?;
    let player = &save.player;

    let inventory = if player.inventory().is_empty() {
        "(empty)".to_string()
    } else {
        player.inventory().join(", ")
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Version".to_string(), save.version.to_string()]);
    table.add_row(vec![
        "Saved".to_string(),
        save.saved_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    ]);
    table.add_row(vec![
        "Health".to_string(),
        format!("{}/{}", player.health(), player.max_health()),
    ]);
    table.add_row(vec!["Level".to_string(), player.level().to_string()]);
    table.add_row(vec!["XP".to_string(), player.xp().to_string()]);
    table.add_row(vec!["Attack".to_string(), player.attack_power().to_string()]);
    table.add_row(vec!["Inventory".to_string(), inventory]);

    println!("{table}");

    Ok(())
}

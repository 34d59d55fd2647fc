use comfy_table::{ContentArrangement, Table};

use fe_core::StoryGraph;

pub fn run() -> Result<(), String> {
    let graph = StoryGraph::forest();
    graph.validate().map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Kind", "Exits"]);

    for node in graph.nodes() {
        let exits: Vec<String> = node.kind.targets().iter().map(|t| t.to_string()).collect();
        let exits = if exits.is_empty() {
            "-".to_string()
        } else {
            exits.join(", ")
        };
        let id = if node.id == graph.start() {
            format!("{} (start)", node.id)
        } else {
            node.id.to_string()
        };
        table.add_row(vec![id, node.kind.name().to_string(), exits]);
    }

    println!("{table}");
    println!();
    println!("  {} nodes", graph.len());

    Ok(())
}

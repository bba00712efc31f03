//! `urlgate list` – show all registry entries.

use anyhow::Result;

use crate::cli::Gate;

pub async fn run_list(gate: &Gate, json: bool) -> Result<()> {
    let entries = gate.list_all().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No entries in registry.");
    } else {
        println!("{:<12} {:<12} {}", "AUTHORIZED", "CREATED", "URL");
        for e in entries {
            println!("{:<12} {:<12} {}", e.authorized, e.created_at, e.url);
        }
    }
    Ok(())
}

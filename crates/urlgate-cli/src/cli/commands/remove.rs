//! `urlgate remove <url>` – delete a registry entry.

use anyhow::Result;

use crate::cli::Gate;

pub async fn run_remove(gate: &Gate, url: &str) -> Result<()> {
    let result = gate.remove(url).await?;
    println!("{} {}", result.code(), url.trim());
    Ok(())
}

//! `urlgate get <url>` – show one registry entry.

use anyhow::Result;

use crate::cli::Gate;

pub async fn run_get(gate: &Gate, url: &str) -> Result<()> {
    match gate.lookup(url).await? {
        Some(entry) => println!(
            "{} authorized={} created_at={}",
            entry.url, entry.authorized, entry.created_at
        ),
        None => println!("NOT_FOUND {}", url.trim()),
    }
    Ok(())
}

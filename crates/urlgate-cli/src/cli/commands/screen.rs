//! `urlgate screen <url> -w <word>...` – screening only, no registry writes.

use anyhow::Result;

use crate::cli::Gate;

pub async fn run_screen(gate: &Gate, url: &str, words: &[String]) -> Result<()> {
    let verdict = gate.screener().screen(url, words).await?;
    if verdict.matched {
        println!("MATCHED {} ({})", url.trim(), verdict.matched_word);
    } else {
        println!("CLEAN {}", url.trim());
    }
    Ok(())
}

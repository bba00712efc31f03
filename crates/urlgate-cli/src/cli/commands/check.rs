//! `urlgate check <url> -w <word>...` – screen a page, then admit it if clean.

use anyhow::{Context, Result};
use std::path::PathBuf;
use urlgate_core::screen::SearchRequest;

use crate::cli::Gate;

/// Where the search request comes from.
#[derive(Debug)]
pub enum CheckInput {
    Args { url: String, words: Vec<String> },
    File(PathBuf),
}

async fn load_request(input: CheckInput) -> Result<SearchRequest> {
    match input {
        CheckInput::Args { url, words } => Ok(SearchRequest::new(url, words)),
        CheckInput::File(path) => {
            let data = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("read {}", path.display()))?;
            Ok(SearchRequest::from_json(&data)?)
        }
    }
}

pub async fn run_check(gate: &Gate, input: CheckInput, json: bool) -> Result<()> {
    let req = load_request(input).await?;
    let out = gate.check(&req).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let code = out.result.code();
    if out.verdict.matched {
        println!(
            "{} {} (forbidden word: {})",
            code, out.url, out.verdict.matched_word
        );
    } else {
        println!("{} {}", code, out.url);
    }
    Ok(())
}

//! Offline reference scanning — `zenhub-mover scan`.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

use zenhub_mover::references::{TextBlock, TextSource, extract_issue_refs};

pub fn cmd_scan(files: &[PathBuf]) -> Result<()> {
    let mut blocks = Vec::new();

    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        blocks.push(TextBlock::new(TextSource::Input, text));
    } else {
        for path in files {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            blocks.push(TextBlock::new(TextSource::Input, text));
        }
    }

    for issue in extract_issue_refs(&blocks) {
        println!("{}", issue.as_str());
    }
    Ok(())
}

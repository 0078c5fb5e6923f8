//! GitHub Actions step outputs.
//!
//! Workflow steps publish results by appending `key=value` lines to the
//! file named by `GITHUB_OUTPUT`. Outside a workflow run the variable is
//! unset and emitting is a no-op, so the binary stays usable locally.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub fn emit(key: &str, value: &str) -> Result<()> {
    match std::env::var("GITHUB_OUTPUT") {
        Ok(path) if !path.is_empty() => append_line(Path::new(&path), key, value),
        _ => Ok(()),
    }
}

fn append_line(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file {}", path.display()))?;
    writeln!(file, "{}={}", key, value)
        .with_context(|| format!("failed to write output {}", key))?;
    Ok(())
}

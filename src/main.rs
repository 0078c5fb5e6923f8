//! `depcanary` — extract a normalized dependency inventory from lockfiles
//! and submit it to the scanning worker.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and resolve env fallbacks ([`config`]).
//! 2. Take the configured lockfile list, or discover one ([`discover`]).
//! 3. Parse each lockfile into dependency records ([`parser`]).
//! 4. Deduplicate and assemble the inventory document ([`inventory`]).
//! 5. Publish step outputs ([`outputs`]) and render the report ([`report`]).
//! 6. Submit to the worker when one is configured ([`submit`]).

mod cli;
mod config;
mod discover;
mod inventory;
mod models;
mod outputs;
mod parser;
mod report;
mod submit;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::Cli;
use config::ScanConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ScanConfig::resolve(&cli);

    // Explicit lockfile list wins; otherwise walk the working directory.
    let entries = match &config.lockfiles {
        Some(list) => config::parse_lockfile_list(list),
        None => {
            if !cli.quiet {
                eprintln!(
                    "  {} no lockfile list configured, discovering under {}",
                    "→".cyan(),
                    config.workdir.display()
                );
            }
            discover::discover_lockfiles(&config.workdir)
        }
    };

    if entries.is_empty() {
        eprintln!(
            "  {} no lockfiles to scan in {}",
            "⚠".yellow(),
            config.workdir.display()
        );
    }

    // Parse, then normalize into the final record set.
    let records = parser::parse_lockfiles(&entries, &config, cli.quiet);
    let records = inventory::normalize(records, config.include_dev);

    let doc = inventory::build_inventory(&config.project_id, records);
    let path = inventory::write_inventory(&doc, &config.workdir)?;

    outputs::emit("package_count", &doc.dependencies.len().to_string())?;
    outputs::emit("inventory_file", &path.display().to_string())?;

    report::render(&doc.dependencies, &path, cli.verbose, cli.quiet)?;

    match &config.worker_url {
        Some(worker_url) => {
            // Submit the bytes that were written, not a re-serialization.
            let body = std::fs::read_to_string(&path)?;
            let token = config.token.as_deref();
            if let Err(e) = submit::submit_inventory(worker_url, token, body, cli.quiet).await {
                if config.fail_on_error {
                    eprintln!("  {} inventory submission failed: {:#}", "✗".red(), e);
                    std::process::exit(1);
                }
                eprintln!(
                    "  {} inventory submission failed: {:#} (continuing)",
                    "⚠".yellow(),
                    e
                );
            }
        }
        None => {
            if !cli.quiet {
                eprintln!(
                    "  {} no worker URL configured, skipping submission",
                    "→".cyan()
                );
            }
        }
    }

    Ok(())
}

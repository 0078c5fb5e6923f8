//! Per-ecosystem lockfile parsers and the dispatch loop that drives them.
//!
//! Every parser is pure — file content in, dependency records out — so each
//! one is testable without touching the filesystem. Failures stay contained
//! to one entry: a malformed or unreadable lockfile contributes zero records
//! and the run continues.

use std::fs;

use anyhow::Result;
use colored::Colorize;

use crate::config::ScanConfig;
use crate::models::{DependencyRecord, LockfileEntry, LockfileKind};

pub mod cargo;
pub mod composer;
pub mod golang;
pub mod maven;
pub mod npm;
pub mod nuget;
pub mod poetry;
pub mod requirements;
pub mod rubygems;

/// A single-format lockfile parser.
///
/// `source` is the originating path, recorded on every emitted record.
/// `include_dev` is the cross-cutting inclusion policy: a parser that can
/// classify a record as dev drops it entirely when the flag is off, rather
/// than emitting it flagged.
pub trait LockfileParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        include_dev: bool,
    ) -> Result<Vec<DependencyRecord>>;
}

/// Select the parser for a declared kind. The `go` kind covers two formats;
/// the filename decides (`go.sum` checksums vs. everything else as go.mod).
fn parser_for(kind: LockfileKind, path: &str) -> Box<dyn LockfileParser> {
    match kind {
        LockfileKind::Npm => Box::new(npm::NpmParser),
        LockfileKind::Requirements => Box::new(requirements::RequirementsParser),
        LockfileKind::Poetry => Box::new(poetry::PoetryParser),
        LockfileKind::Go => {
            if path.ends_with("go.sum") {
                Box::new(golang::GoSumParser)
            } else {
                Box::new(golang::GoModParser)
            }
        }
        LockfileKind::Rubygems => Box::new(rubygems::GemfileLockParser),
        LockfileKind::Cargo => Box::new(cargo::CargoLockParser),
        LockfileKind::Composer => Box::new(composer::ComposerLockParser),
        LockfileKind::Nuget => Box::new(nuget::NugetParser),
        LockfileKind::Maven => Box::new(maven::PomParser),
    }
}

/// Parse every `(kind, path)` entry in order and concatenate the results.
///
/// Input order is preserved so the deduplicator's first-occurrence-wins rule
/// stays deterministic. Unrecognized kinds, unreadable files and parse
/// failures are per-entry warnings, never fatal — one bad lockfile must not
/// block inventory generation for the rest of the repository.
pub fn parse_lockfiles(
    entries: &[LockfileEntry],
    config: &ScanConfig,
    quiet: bool,
) -> Vec<DependencyRecord> {
    let mut records = Vec::new();

    for entry in entries {
        let path = entry.path.display().to_string();

        let kind = match LockfileKind::parse(&entry.kind) {
            Some(kind) => kind,
            None => {
                eprintln!(
                    "  {} unrecognized lockfile kind {:?}, skipping {}",
                    "⚠".yellow(),
                    entry.kind,
                    path
                );
                continue;
            }
        };

        // Lossy decode: a stray invalid byte should degrade one token, not
        // discard the whole file.
        let content = match fs::read(&entry.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                eprintln!("  {} {}: {}", "⚠".yellow(), path, e);
                continue;
            }
        };

        match parser_for(kind, &path).parse(&content, &path, config.include_dev) {
            Ok(parsed) => {
                if !quiet {
                    eprintln!("  {} {} {} records", "→".cyan(), path, parsed.len());
                }
                records.extend(parsed);
            }
            Err(e) => {
                eprintln!("  {} {}: {}", "⚠".yellow(), path, e);
            }
        }
    }

    records
}

//! Inventory assembly: dedupe the raw parse output and write the
//! `.canary-inventory.json` document the ingest worker expects.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};

use crate::models::{DependencyRecord, Ecosystem, Inventory};

pub const INVENTORY_FILE: &str = ".canary-inventory.json";
pub const SOURCE_TAG: &str = "github-action";

/// Drop dev records when they are excluded and collapse duplicates.
///
/// Two records are duplicates when ecosystem, name and version all match;
/// the first occurrence wins, so its `dev` and `lockfile_source` fields are
/// the ones that survive. Parsers already skip dev packages when excluded,
/// but records handed in by other paths get the same filter here.
pub fn normalize(records: Vec<DependencyRecord>, include_dev: bool) -> Vec<DependencyRecord> {
    let mut seen: HashSet<(Ecosystem, String, String)> = HashSet::new();
    let mut deduped = Vec::new();

    for record in records {
        if !include_dev && record.dev == Some(true) {
            continue;
        }
        let key = (record.ecosystem, record.name.clone(), record.version.clone());
        if seen.insert(key) {
            deduped.push(record);
        }
    }

    deduped
}

/// Assemble the inventory document, stamped with the current time.
pub fn build_inventory(project_id: &str, dependencies: Vec<DependencyRecord>) -> Inventory {
    Inventory {
        project_id: project_id.to_string(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        source: SOURCE_TAG.to_string(),
        dependencies,
    }
}

/// Serialize the inventory to `.canary-inventory.json` under `workdir`.
pub fn write_inventory(inventory: &Inventory, workdir: &Path) -> Result<PathBuf> {
    let path = workdir.join(INVENTORY_FILE);
    let json = serde_json::to_string_pretty(inventory)?;
    fs::write(&path, json)
        .with_context(|| format!("failed to write inventory to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(
        ecosystem: Ecosystem,
        name: &str,
        version: &str,
        dev: Option<bool>,
        source: &str,
    ) -> DependencyRecord {
        DependencyRecord {
            ecosystem,
            name: name.to_string(),
            version: version.to_string(),
            dev,
            source: Some(source.to_string()),
        }
    }

    #[test]
    fn test_duplicates_collapse_first_wins() {
        let records = vec![
            record(Ecosystem::Npm, "lodash", "4.17.21", Some(false), "a/package-lock.json"),
            record(Ecosystem::Npm, "lodash", "4.17.21", Some(true), "b/package-lock.json"),
            record(Ecosystem::Npm, "lodash", "4.17.20", Some(false), "a/package-lock.json"),
        ];
        let deduped = normalize(records, true);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].version, "4.17.21");
        assert_eq!(deduped[0].source.as_deref(), Some("a/package-lock.json"));
        assert_eq!(deduped[0].dev, Some(false));
        assert_eq!(deduped[1].version, "4.17.20");
    }

    #[test]
    fn test_same_name_different_ecosystems_both_kept() {
        let records = vec![
            record(Ecosystem::Npm, "redis", "4.0.0", Some(false), "package-lock.json"),
            record(Ecosystem::Pypi, "redis", "4.0.0", Some(false), "requirements.txt"),
        ];
        assert_eq!(normalize(records, true).len(), 2);
    }

    #[test]
    fn test_dev_records_filtered_when_excluded() {
        let records = vec![
            record(Ecosystem::Npm, "express", "4.18.2", Some(false), "package-lock.json"),
            record(Ecosystem::Npm, "jest", "29.0.0", Some(true), "package-lock.json"),
            record(Ecosystem::Go, "github.com/pkg/errors", "v0.9.1", None, "go.sum"),
        ];
        let deduped = normalize(records, false);
        assert_eq!(deduped.len(), 2);
        assert!(deduped.iter().all(|r| r.dev != Some(true)));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let records = vec![
            record(Ecosystem::Cargo, "serde", "1.0.188", None, "Cargo.lock"),
            record(Ecosystem::Cargo, "serde", "1.0.188", None, "Cargo.lock"),
        ];
        let once = normalize(records, true);
        let twice = normalize(once.clone(), true);
        assert_eq!(once.len(), 1);
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_empty_inventory_document_shape() {
        let inventory = build_inventory("acme/api", Vec::new());
        assert_eq!(inventory.project_id, "acme/api");
        assert_eq!(inventory.source, "github-action");
        assert!(inventory.dependencies.is_empty());
        // RFC 3339 UTC with millisecond precision, e.g. 2024-01-01T00:00:00.000Z
        assert!(inventory.generated_at.ends_with('Z'));
        assert!(inventory.generated_at.contains('.'));
    }

    #[test]
    fn test_write_inventory_round_trip() {
        let dir = TempDir::new().unwrap();
        let inventory = build_inventory(
            "acme/api",
            vec![record(Ecosystem::Npm, "express", "4.18.2", Some(false), "package-lock.json")],
        );

        let path = write_inventory(&inventory, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), ".canary-inventory.json");

        let written = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["project_id"], "acme/api");
        assert_eq!(parsed["source"], "github-action");
        assert_eq!(parsed["dependencies"][0]["name"], "express");
        assert_eq!(parsed["dependencies"][0]["lockfile_source"], "package-lock.json");
    }
}

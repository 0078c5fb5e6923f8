use anyhow::Result;
use serde_json::Value;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for `packages.lock.json`.
///
/// The `dependencies` object maps each target framework to its resolved
/// package map. Packages repeating across frameworks fall out in the
/// deduplication pass. The resolved version lives in `resolved`, with
/// `version` and `requested` as fallbacks for older lockfile shapes.
pub struct NugetParser;

impl super::LockfileParser for NugetParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        _include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let json: Value = serde_json::from_str(content)?;
        let mut records = Vec::new();

        if let Some(frameworks) = json.get("dependencies").and_then(|v| v.as_object()) {
            for packages in frameworks.values() {
                let packages = match packages.as_object() {
                    Some(map) => map,
                    None => continue,
                };
                for (name, info) in packages {
                    if name.is_empty() {
                        continue;
                    }
                    let version = ["resolved", "version", "requested"]
                        .iter()
                        .find_map(|key| info.get(*key).and_then(|v| v.as_str()));
                    let version = match version {
                        Some(v) if !v.is_empty() => v,
                        _ => continue,
                    };
                    records.push(DependencyRecord {
                        ecosystem: Ecosystem::Nuget,
                        name: name.clone(),
                        version: version.to_string(),
                        dev: None,
                        source: Some(source.to_string()),
                    });
                }
            }
        }

        Ok(records)
    }
}

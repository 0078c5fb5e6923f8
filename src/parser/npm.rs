use anyhow::Result;
use serde_json::Value;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for `package-lock.json`.
///
/// Lockfile v2/v3 lists every installed package in the `packages` map keyed
/// by install path; v1 nests `dependencies` objects recursively. Both shapes
/// are handled. In the v1 shape, dev classification comes from which
/// top-level tree (`dependencies` vs `devDependencies`) a package sits in,
/// and nested packages inherit it.
pub struct NpmParser;

impl super::LockfileParser for NpmParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let json: Value = serde_json::from_str(content)?;
        let mut records = Vec::new();

        if let Some(packages) = json.get("packages").and_then(|v| v.as_object()) {
            for (pkg_path, info) in packages {
                // The empty key is the root project itself, not a dependency.
                if pkg_path.is_empty() {
                    continue;
                }

                let version = match info.get("version").and_then(|v| v.as_str()) {
                    Some(v) if !v.is_empty() => v,
                    _ => continue,
                };

                // "node_modules/@scope/foo" → "@scope/foo";
                // "a/node_modules/b/node_modules/c" → "c".
                let name = pkg_path
                    .rsplit("node_modules/")
                    .next()
                    .unwrap_or(pkg_path.as_str());
                if name.is_empty() {
                    continue;
                }

                let dev = info.get("dev").and_then(|v| v.as_bool()).unwrap_or(false);
                if dev && !include_dev {
                    continue;
                }

                records.push(make_record(name, version, dev, source));
            }
        } else {
            // v1 fallback: recursively nested dependency trees.
            if let Some(tree) = json.get("dependencies").and_then(|v| v.as_object()) {
                collect_v1(tree, false, source, include_dev, &mut records);
            }
            if let Some(tree) = json.get("devDependencies").and_then(|v| v.as_object()) {
                collect_v1(tree, true, source, include_dev, &mut records);
            }
        }

        Ok(records)
    }
}

fn collect_v1(
    tree: &serde_json::Map<String, Value>,
    dev: bool,
    source: &str,
    include_dev: bool,
    records: &mut Vec<DependencyRecord>,
) {
    if dev && !include_dev {
        return;
    }
    for (name, info) in tree {
        if let Some(version) = info.get("version").and_then(|v| v.as_str()) {
            if !name.is_empty() && !version.is_empty() {
                records.push(make_record(name, version, dev, source));
            }
        }
        if let Some(nested) = info.get("dependencies").and_then(|v| v.as_object()) {
            collect_v1(nested, dev, source, include_dev, records);
        }
    }
}

fn make_record(name: &str, version: &str, dev: bool, source: &str) -> DependencyRecord {
    DependencyRecord {
        ecosystem: Ecosystem::Npm,
        name: name.to_string(),
        version: version.to_string(),
        dev: Some(dev),
        source: Some(source.to_string()),
    }
}

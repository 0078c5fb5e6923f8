use anyhow::Result;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for `go.sum`.
///
/// Each line is `module version hash`. Modules appear twice, once for the
/// source tree and once for the `/go.mod` digest; the suffix is stripped so
/// both lines name the same module and the deduplication pass collapses
/// them. Go draws no dev distinction, so `dev` is left unset.
pub struct GoSumParser;

impl super::LockfileParser for GoSumParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        _include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let mut records = Vec::new();
        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 2 {
                continue;
            }
            // A corrupt line can carry a bare `/go.mod` version field, which
            // strips to nothing.
            let version = fields[1].strip_suffix("/go.mod").unwrap_or(fields[1]);
            if version.is_empty() {
                continue;
            }
            records.push(make_record(fields[0], version, source));
        }
        Ok(records)
    }
}

/// Parser for `go.mod`, used when a module has no `go.sum` checked in.
/// Only `require` directives are read; replace and exclude are ignored.
pub struct GoModParser;

impl super::LockfileParser for GoModParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        _include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let mut records = Vec::new();
        let mut in_require_block = false;

        for raw in content.lines() {
            let line = raw.split("//").next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            if in_require_block {
                if line == ")" {
                    in_require_block = false;
                } else {
                    push_require(line, source, &mut records);
                }
                continue;
            }

            if line == "require (" {
                in_require_block = true;
            } else if let Some(rest) = line.strip_prefix("require ") {
                if rest.trim() == "(" {
                    in_require_block = true;
                } else {
                    push_require(rest, source, &mut records);
                }
            }
        }

        Ok(records)
    }
}

fn push_require(line: &str, source: &str, records: &mut Vec<DependencyRecord>) {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() >= 2 {
        records.push(make_record(fields[0], fields[1], source));
    }
}

fn make_record(name: &str, version: &str, source: &str) -> DependencyRecord {
    DependencyRecord {
        ecosystem: Ecosystem::Go,
        name: name.to_string(),
        version: version.to_string(),
        dev: None,
        source: Some(source.to_string()),
    }
}

use anyhow::Result;
use regex::Regex;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for pip `requirements*.txt` files.
///
/// Requirements files are not true lockfiles, so versions are best-effort:
/// a pinned or ranged specifier yields its version operand, anything else
/// records `*`. Whether the file is a dev manifest is inferred from its
/// path (`requirements-dev.txt`, `test-requirements.txt` and friends).
pub struct RequirementsParser;

impl super::LockfileParser for RequirementsParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let dev = source.contains("dev") || source.contains("test");
        if dev && !include_dev {
            return Ok(Vec::new());
        }

        // Name, optional extras (discarded), optional version after an
        // operator. The version stops at whitespace, comma or semicolon so
        // environment markers and multi-clause specifiers don't leak in.
        let req_re = Regex::new(r"^([A-Za-z0-9_.-]+)(?:\[[^\]]*\])?\s*(?:[=<>~!]+\s*([^;,\s]+))?")?;

        let mut records = Vec::new();
        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
                continue;
            }

            if let Some(caps) = req_re.captures(line) {
                let name = caps[1].to_lowercase();
                let version = caps
                    .get(2)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| "*".to_string());
                records.push(DependencyRecord {
                    ecosystem: Ecosystem::Pypi,
                    name,
                    version,
                    dev: Some(dev),
                    source: Some(source.to_string()),
                });
            }
        }

        Ok(records)
    }
}

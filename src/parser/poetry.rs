use anyhow::Result;
use serde::Deserialize;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for `poetry.lock`.
pub struct PoetryParser;

#[derive(Deserialize)]
struct PoetryLock {
    #[serde(default)]
    package: Vec<PoetryPackage>,
}

#[derive(Deserialize)]
struct PoetryPackage {
    name: String,
    version: String,
    category: Option<String>,
}

impl super::LockfileParser for PoetryParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let lock: PoetryLock = toml::from_str(content)?;
        let mut records = Vec::new();

        for package in lock.package {
            if package.name.is_empty() || package.version.is_empty() {
                continue;
            }
            // Poetry 1.x tags dev packages with category = "dev"; 2.x lock
            // files drop the field entirely, in which case everything counts
            // as runtime.
            let dev = package.category.as_deref() == Some("dev");
            if dev && !include_dev {
                continue;
            }
            records.push(DependencyRecord {
                ecosystem: Ecosystem::Pypi,
                name: package.name.to_lowercase(),
                version: package.version,
                dev: Some(dev),
                source: Some(source.to_string()),
            });
        }

        Ok(records)
    }
}

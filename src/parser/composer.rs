use anyhow::Result;
use serde::Deserialize;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for `composer.lock`.
pub struct ComposerLockParser;

#[derive(Deserialize)]
struct ComposerLock {
    #[serde(default)]
    packages: Vec<ComposerPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<ComposerPackage>,
}

#[derive(Deserialize)]
struct ComposerPackage {
    name: Option<String>,
    version: Option<String>,
}

impl super::LockfileParser for ComposerLockParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let lock: ComposerLock = serde_json::from_str(content)?;

        let mut records = Vec::new();
        collect(&lock.packages, false, source, &mut records);
        if include_dev {
            collect(&lock.packages_dev, true, source, &mut records);
        }
        Ok(records)
    }
}

fn collect(
    packages: &[ComposerPackage],
    dev: bool,
    source: &str,
    records: &mut Vec<DependencyRecord>,
) {
    for package in packages {
        if let (Some(name), Some(version)) = (&package.name, &package.version) {
            if name.is_empty() || version.is_empty() {
                continue;
            }
            records.push(DependencyRecord {
                ecosystem: Ecosystem::Composer,
                name: name.clone(),
                version: version.clone(),
                dev: Some(dev),
                source: Some(source.to_string()),
            });
        }
    }
}

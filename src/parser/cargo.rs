use anyhow::Result;
use serde::Deserialize;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for `Cargo.lock`.
///
/// Every `[[package]]` entry is recorded, workspace members included, since
/// the lockfile does not distinguish them. Cargo has no dev marker at the
/// resolved level, so `dev` is left unset.
pub struct CargoLockParser;

#[derive(Deserialize)]
struct CargoLock {
    #[serde(default)]
    package: Vec<CargoLockPackage>,
}

#[derive(Deserialize)]
struct CargoLockPackage {
    name: String,
    version: String,
}

impl super::LockfileParser for CargoLockParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        _include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let lock: CargoLock = toml::from_str(content)?;
        let records = lock
            .package
            .into_iter()
            .filter(|package| !package.name.is_empty() && !package.version.is_empty())
            .map(|package| DependencyRecord {
                ecosystem: Ecosystem::Cargo,
                name: package.name,
                version: package.version,
                dev: None,
                source: Some(source.to_string()),
            })
            .collect();
        Ok(records)
    }
}

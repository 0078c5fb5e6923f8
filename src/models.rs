use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Package-manager identity domain of a dependency record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Pypi,
    Go,
    Rubygems,
    Cargo,
    Composer,
    Nuget,
    Maven,
}

impl Ecosystem {
    /// All supported ecosystems, in report order.
    pub const ALL: [Ecosystem; 8] = [
        Ecosystem::Npm,
        Ecosystem::Pypi,
        Ecosystem::Go,
        Ecosystem::Rubygems,
        Ecosystem::Cargo,
        Ecosystem::Composer,
        Ecosystem::Nuget,
        Ecosystem::Maven,
    ];
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Npm => write!(f, "npm"),
            Ecosystem::Pypi => write!(f, "pypi"),
            Ecosystem::Go => write!(f, "go"),
            Ecosystem::Rubygems => write!(f, "rubygems"),
            Ecosystem::Cargo => write!(f, "cargo"),
            Ecosystem::Composer => write!(f, "composer"),
            Ecosystem::Nuget => write!(f, "nuget"),
            Ecosystem::Maven => write!(f, "maven"),
        }
    }
}

/// Declared lockfile kind, as written in a `kind:path` entry.
///
/// `Go` covers both `go.sum` and `go.mod`; the dispatcher picks the parser
/// from the filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockfileKind {
    Npm,
    Requirements,
    Poetry,
    Go,
    Rubygems,
    Cargo,
    Composer,
    Nuget,
    Maven,
}

impl LockfileKind {
    /// Map a kind tag to a parser family. `pip` is accepted as an alias for
    /// `requirements`. Returns `None` for unrecognized tags so the caller
    /// can skip the entry instead of failing the run.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "npm" => Some(LockfileKind::Npm),
            "requirements" | "pip" => Some(LockfileKind::Requirements),
            "poetry" => Some(LockfileKind::Poetry),
            "go" => Some(LockfileKind::Go),
            "rubygems" => Some(LockfileKind::Rubygems),
            "cargo" => Some(LockfileKind::Cargo),
            "composer" => Some(LockfileKind::Composer),
            "nuget" => Some(LockfileKind::Nuget),
            "maven" => Some(LockfileKind::Maven),
            _ => None,
        }
    }
}

/// One `kind:path` work item for the dispatcher.
///
/// The kind stays a string until dispatch so that an unrecognized tag skips
/// one entry with a warning instead of failing configuration parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct LockfileEntry {
    pub kind: String,
    pub path: PathBuf,
}

/// The unit of inventory output: one dependency pinned by one lockfile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub ecosystem: Ecosystem,
    pub name: String,
    pub version: String,
    /// Development/test-only dependency. `None` when the ecosystem has no
    /// such concept; omitted from the serialized document rather than null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<bool>,
    /// Originating lockfile path, retained for traceability.
    #[serde(rename = "lockfile_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Terminal artifact: the normalized, deduplicated dependency document.
#[derive(Debug, Serialize, Deserialize)]
pub struct Inventory {
    pub project_id: String,
    pub generated_at: String,
    pub source: String,
    pub dependencies: Vec<DependencyRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecosystem_serializes_to_lowercase_tag() {
        assert_eq!(
            serde_json::to_string(&Ecosystem::Rubygems).unwrap(),
            "\"rubygems\""
        );
        assert_eq!(serde_json::to_string(&Ecosystem::Npm).unwrap(), "\"npm\"");
    }

    #[test]
    fn test_lockfile_kind_tags() {
        assert_eq!(LockfileKind::parse("npm"), Some(LockfileKind::Npm));
        assert_eq!(LockfileKind::parse("maven"), Some(LockfileKind::Maven));
        assert_eq!(
            LockfileKind::parse("pip"),
            Some(LockfileKind::Requirements)
        );
        assert_eq!(LockfileKind::parse("gradle"), None);
        assert_eq!(LockfileKind::parse(""), None);
    }

    #[test]
    fn test_record_serialization_omits_absent_fields() {
        let record = DependencyRecord {
            ecosystem: Ecosystem::Go,
            name: "golang.org/x/text".to_string(),
            version: "v0.3.7".to_string(),
            dev: None,
            source: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("dev").is_none());
        assert!(json.get("lockfile_source").is_none());
    }

    #[test]
    fn test_record_serialization_renames_source() {
        let record = DependencyRecord {
            ecosystem: Ecosystem::Npm,
            name: "lodash".to_string(),
            version: "4.17.21".to_string(),
            dev: Some(false),
            source: Some("package-lock.json".to_string()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["dev"], false);
        assert_eq!(json["lockfile_source"], "package-lock.json");
        assert!(json.get("source").is_none());
    }
}

use std::env;
use std::path::PathBuf;

use colored::Colorize;

use crate::cli::Cli;
use crate::models::LockfileEntry;

/// Resolved run configuration, threaded explicitly into the dispatcher and
/// parsers — no ambient globals, so every layer stays unit-testable.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Raw comma-separated `kind:path` list; `None` triggers discovery.
    pub lockfiles: Option<String>,
    pub project_id: String,
    pub include_dev: bool,
    /// Discovery root and output placement directory.
    pub workdir: PathBuf,
    pub worker_url: Option<String>,
    pub token: Option<String>,
    pub fail_on_error: bool,
}

impl ScanConfig {
    /// Build the configuration from CLI flags with environment fallbacks.
    ///
    /// Flags win; `CANARY_*` variables come next; the GitHub context
    /// variables (`GITHUB_REPOSITORY`, `GITHUB_WORKSPACE`) fill the project
    /// id and working directory last. Action runners export unset inputs as
    /// empty strings, so empty values count as absent.
    pub fn resolve(cli: &Cli) -> Self {
        let project_id = cli
            .project_id
            .clone()
            .or_else(|| env_nonempty("CANARY_PROJECT_ID"))
            .or_else(|| env_nonempty("GITHUB_REPOSITORY"))
            .unwrap_or_else(|| "unknown-project".to_string());

        let include_dev = cli
            .include_dev
            .clone()
            .or_else(|| env_nonempty("CANARY_INCLUDE_DEV"))
            .map(|v| flag_enabled(&v))
            .unwrap_or(true);

        let workdir = cli
            .workdir
            .clone()
            .or_else(|| env_nonempty("CANARY_WORKDIR").map(PathBuf::from))
            .or_else(|| env_nonempty("GITHUB_WORKSPACE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let fail_on_error = cli
            .fail_on_error
            .clone()
            .or_else(|| env_nonempty("CANARY_FAIL_ON_ERROR"))
            .map(|v| flag_enabled(&v))
            .unwrap_or(true);

        ScanConfig {
            lockfiles: cli.lockfiles.clone().or_else(|| env_nonempty("CANARY_LOCKFILES")),
            project_id,
            include_dev,
            workdir,
            worker_url: cli.worker_url.clone().or_else(|| env_nonempty("CANARY_WORKER_URL")),
            token: cli.token.clone().or_else(|| env_nonempty("CANARY_TOKEN")),
            fail_on_error,
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Action-style boolean input: anything except the literal `"false"`
/// enables.
pub fn flag_enabled(value: &str) -> bool {
    value != "false"
}

/// Split the configured lockfile list into `(kind, path)` entries.
///
/// Only the first colon separates kind from path, so paths containing
/// colons (Windows drives, say) survive intact. Blank entries are ignored;
/// colon-free entries are skipped with a warning, matching the non-fatal
/// posture of the unrecognized-kind rule.
pub fn parse_lockfile_list(list: &str) -> Vec<LockfileEntry> {
    let mut entries = Vec::new();

    for raw in list.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match raw.split_once(':') {
            Some((kind, path)) if !kind.trim().is_empty() && !path.trim().is_empty() => {
                entries.push(LockfileEntry {
                    kind: kind.trim().to_string(),
                    path: PathBuf::from(path.trim()),
                });
            }
            _ => {
                eprintln!(
                    "  {} skipping malformed lockfile entry {:?} (expected kind:path)",
                    "⚠".yellow(),
                    raw
                );
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lockfile_list_splits_on_first_colon_only() {
        let entries = parse_lockfile_list("npm:C:\\repo\\package-lock.json,cargo:Cargo.lock");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, "npm");
        assert_eq!(entries[0].path, PathBuf::from("C:\\repo\\package-lock.json"));
        assert_eq!(entries[1].kind, "cargo");
        assert_eq!(entries[1].path, PathBuf::from("Cargo.lock"));
    }

    #[test]
    fn test_parse_lockfile_list_skips_blank_and_malformed_entries() {
        let entries = parse_lockfile_list("npm:a/package-lock.json,, ,no-colon-here,go:go.sum");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, "npm");
        assert_eq!(entries[1].kind, "go");
    }

    #[test]
    fn test_parse_lockfile_list_trims_whitespace() {
        let entries = parse_lockfile_list(" maven : services/api/pom.xml ");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, "maven");
        assert_eq!(entries[0].path, PathBuf::from("services/api/pom.xml"));
    }

    #[test]
    fn test_flag_enabled_only_literal_false_disables() {
        assert!(!flag_enabled("false"));
        assert!(flag_enabled("true"));
        assert!(flag_enabled("0"));
        assert!(flag_enabled("no"));
        assert!(flag_enabled(""));
        assert!(flag_enabled("False"));
    }
}

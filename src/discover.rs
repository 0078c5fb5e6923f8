use std::path::Path;

use walkdir::WalkDir;

use crate::models::LockfileEntry;

/// Directories that only ever hold third-party or generated trees; walking
/// them would re-inventory vendored copies of everything.
const PRUNED_DIRS: &[&str] = &[".git", "node_modules", "vendor", "target", "venv", ".venv"];

/// Map a well-known lockfile name to its kind tag.
fn kind_for(file_name: &str) -> Option<&'static str> {
    match file_name {
        "package-lock.json" => Some("npm"),
        "poetry.lock" => Some("poetry"),
        "go.sum" | "go.mod" => Some("go"),
        "Gemfile.lock" => Some("rubygems"),
        "Cargo.lock" => Some("cargo"),
        "composer.lock" => Some("composer"),
        "packages.lock.json" => Some("nuget"),
        "pom.xml" => Some("maven"),
        _ if file_name.starts_with("requirements") && file_name.ends_with(".txt") => {
            Some("requirements")
        }
        _ => None,
    }
}

/// Walk `root` for recognizable lockfiles.
///
/// Entries come back in a stable filename-sorted walk order, so the
/// deduplicator's first-occurrence-wins rule is deterministic between runs
/// on the same tree.
pub fn discover_lockfiles(root: &Path) -> Vec<LockfileEntry> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || entry
                    .file_name()
                    .to_str()
                    .map_or(true, |name| !PRUNED_DIRS.contains(&name))
        });

    let mut entries = Vec::new();
    for entry in walker.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let kind = entry.file_name().to_str().and_then(kind_for);
        if let Some(kind) = kind {
            entries.push(LockfileEntry {
                kind: kind.to_string(),
                path: entry.into_path(),
            });
        }
    }

    entries
}

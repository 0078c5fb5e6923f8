use anyhow::Result;
use regex::Regex;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for `Gemfile.lock`.
///
/// Resolved gems sit under `specs:` sections indented by exactly four
/// spaces as `name (version)`; deeper indentation is the gem's own
/// dependency list and carries no resolved version, so it is skipped. A
/// lockfile can hold several `specs:` sections (GEM, GIT, PATH) and all of
/// them are read.
pub struct GemfileLockParser;

impl super::LockfileParser for GemfileLockParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        _include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let gem_re = Regex::new(r"^ {4}(\S+) \(([^),\s]+)")?;

        let mut records = Vec::new();
        let mut in_specs = false;

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed == "specs:" {
                in_specs = true;
                continue;
            }
            // A non-indented, non-empty line starts the next top-level
            // section (PLATFORMS, DEPENDENCIES, ...).
            if !line.starts_with(' ') && !trimmed.is_empty() {
                in_specs = false;
                continue;
            }
            if !in_specs {
                continue;
            }

            if let Some(caps) = gem_re.captures(line) {
                records.push(DependencyRecord {
                    ecosystem: Ecosystem::Rubygems,
                    name: caps[1].to_string(),
                    version: caps[2].to_string(),
                    dev: None,
                    source: Some(source.to_string()),
                });
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LockfileParser;

    const LOCK: &str = "\
GEM
  remote: https://rubygems.org/
  specs:
    actionpack (7.0.4)
      actionview (= 7.0.4)
      rack (~> 2.0)
    rack (2.2.6)
    rake (13.0.6)

PLATFORMS
  ruby

DEPENDENCIES
  actionpack
  rake

BUNDLED WITH
   2.4.6
";

    #[test]
    fn test_only_resolved_specs_are_recorded() {
        let records = GemfileLockParser.parse(LOCK, "Gemfile.lock", true).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["actionpack", "rack", "rake"]);
        assert_eq!(records[0].version, "7.0.4");
        assert_eq!(records[0].dev, None);
        assert_eq!(records[0].source.as_deref(), Some("Gemfile.lock"));
    }

    #[test]
    fn test_sub_dependency_lines_are_not_records() {
        let records = GemfileLockParser.parse(LOCK, "Gemfile.lock", true).unwrap();
        assert!(records.iter().all(|r| r.name != "actionview"));
    }

    #[test]
    fn test_multiple_specs_sections() {
        let lock = "\
GIT
  remote: https://github.com/example/gem.git
  specs:
    custom-gem (0.1.0)

GEM
  remote: https://rubygems.org/
  specs:
    rake (13.0.6)
";
        let records = GemfileLockParser.parse(lock, "Gemfile.lock", true).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "custom-gem");
        assert_eq!(records[1].name, "rake");
    }

    #[test]
    fn test_version_with_platform_suffix() {
        let lock = "\
GEM
  specs:
    nokogiri (1.14.2-x86_64-linux)
";
        let records = GemfileLockParser.parse(lock, "Gemfile.lock", true).unwrap();
        assert_eq!(records[0].version, "1.14.2-x86_64-linux");
    }
}

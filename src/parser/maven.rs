use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::models::{DependencyRecord, Ecosystem};

/// Parser for `pom.xml`.
///
/// Walks the XML event stream and records every `<dependency>` outside
/// `<dependencyManagement>`. Coordinate fields are only read one level
/// below the dependency element, so `<exclusions>` blocks cannot clobber
/// them. Versions naming an unresolved `${property}` are skipped; a pom is
/// a manifest, not a lockfile, and there is nothing to resolve them
/// against. `scope=test` marks a dependency as dev.
pub struct PomParser;

impl super::LockfileParser for PomParser {
    fn parse(
        &self,
        content: &str,
        source: &str,
        include_dev: bool,
    ) -> Result<Vec<DependencyRecord>> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut buf = Vec::new();

        let mut depth: u32 = 0;
        let mut mgmt_depth: Option<u32> = None;
        let mut dep_depth: Option<u32> = None;

        let mut current_tag = String::new();
        let mut group_id = String::new();
        let mut artifact_id = String::new();
        let mut version = String::new();
        let mut scope = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    let name =
                        String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();
                    current_tag = name.clone();

                    match name.as_str() {
                        "dependencyManagement" if mgmt_depth.is_none() => {
                            mgmt_depth = Some(depth);
                        }
                        "dependency" if mgmt_depth.is_none() && dep_depth.is_none() => {
                            dep_depth = Some(depth);
                            group_id.clear();
                            artifact_id.clear();
                            version.clear();
                            scope.clear();
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name =
                        String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned();

                    if name == "dependency" && dep_depth == Some(depth) {
                        push_dependency(
                            &group_id,
                            &artifact_id,
                            &version,
                            &scope,
                            source,
                            include_dev,
                            &mut records,
                        );
                        dep_depth = None;
                    } else if name == "dependencyManagement" && mgmt_depth == Some(depth) {
                        mgmt_depth = None;
                    }

                    depth = depth.saturating_sub(1);
                    current_tag.clear();
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(d) = dep_depth {
                        if depth == d + 1 {
                            let text = e.unescape().unwrap_or_default();
                            match current_tag.as_str() {
                                "groupId" => group_id = text.to_string(),
                                "artifactId" => artifact_id = text.to_string(),
                                "version" => version = text.to_string(),
                                "scope" => scope = text.to_string(),
                                _ => {}
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(_) => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(records)
    }
}

fn push_dependency(
    group_id: &str,
    artifact_id: &str,
    version: &str,
    scope: &str,
    source: &str,
    include_dev: bool,
    records: &mut Vec<DependencyRecord>,
) {
    if artifact_id.is_empty() || version.is_empty() || version.contains("${") {
        return;
    }
    let dev = scope == "test";
    if dev && !include_dev {
        return;
    }

    // Keep Maven coordinates as "group:artifact".
    let name = if group_id.is_empty() {
        artifact_id.to_string()
    } else {
        format!("{}:{}", group_id, artifact_id)
    };

    records.push(DependencyRecord {
        ecosystem: Ecosystem::Maven,
        name,
        version: version.to_string(),
        dev: Some(dev),
        source: Some(source.to_string()),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LockfileParser;

    #[test]
    fn test_basic_extraction() {
        let xml = r#"<?xml version="1.0"?>
<project>
  <dependencies>
    <dependency>
      <groupId>org.apache.commons</groupId>
      <artifactId>commons-lang3</artifactId>
      <version>3.12.0</version>
    </dependency>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>"#;
        let records = PomParser.parse(xml, "pom.xml", true).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "org.apache.commons:commons-lang3");
        assert_eq!(records[0].version, "3.12.0");
        assert_eq!(records[0].dev, Some(false));
        assert_eq!(records[1].name, "junit:junit");
        assert_eq!(records[1].dev, Some(true));
    }

    #[test]
    fn test_test_scope_excluded_without_dev() {
        let xml = r#"<project>
  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
      <scope>test</scope>
    </dependency>
    <dependency>
      <groupId>com.google.guava</groupId>
      <artifactId>guava</artifactId>
      <version>32.1.2-jre</version>
      <scope>compile</scope>
    </dependency>
  </dependencies>
</project>"#;
        let records = PomParser.parse(xml, "pom.xml", false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "com.google.guava:guava");
    }

    #[test]
    fn test_dependency_management_is_not_recorded() {
        let xml = r#"<project>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.springframework</groupId>
        <artifactId>spring-core</artifactId>
        <version>5.3.23</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>org.springframework</groupId>
      <artifactId>spring-web</artifactId>
      <version>5.3.23</version>
    </dependency>
  </dependencies>
</project>"#;
        let records = PomParser.parse(xml, "pom.xml", true).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "org.springframework:spring-web");
    }

    #[test]
    fn test_property_versions_are_skipped() {
        let xml = r#"<project>
  <dependencies>
    <dependency>
      <groupId>org.slf4j</groupId>
      <artifactId>slf4j-api</artifactId>
      <version>${slf4j.version}</version>
    </dependency>
    <dependency>
      <groupId>ch.qos.logback</groupId>
      <artifactId>logback-classic</artifactId>
      <version>1.4.11</version>
    </dependency>
  </dependencies>
</project>"#;
        let records = PomParser.parse(xml, "pom.xml", true).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "ch.qos.logback:logback-classic");
    }

    #[test]
    fn test_missing_version_is_skipped() {
        let xml = r#"<project>
  <dependencies>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>managed-elsewhere</artifactId>
    </dependency>
  </dependencies>
</project>"#;
        let records = PomParser.parse(xml, "pom.xml", true).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_exclusions_do_not_clobber_coordinates() {
        let xml = r#"<project>
  <dependencies>
    <dependency>
      <groupId>org.apache.hadoop</groupId>
      <artifactId>hadoop-client</artifactId>
      <version>3.3.6</version>
      <exclusions>
        <exclusion>
          <groupId>org.slf4j</groupId>
          <artifactId>slf4j-log4j12</artifactId>
        </exclusion>
      </exclusions>
    </dependency>
  </dependencies>
</project>"#;
        let records = PomParser.parse(xml, "pom.xml", true).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "org.apache.hadoop:hadoop-client");
        assert_eq!(records[0].version, "3.3.6");
    }
}

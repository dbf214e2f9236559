use serde_json::Value;

use super::{Analyzer, ParsedManifest};
use crate::error::Result;
use crate::models::{Classification, DeclaredPackage};

/// Reads the direct dependency maps of a `package.json`. No nesting is available,
/// so the forest is always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageJsonAnalyzer;

impl Analyzer for PackageJsonAnalyzer {
    fn analyze(&self, _file_identifier: &str, document: &Value) -> Result<ParsedManifest> {
        let mut packages = Vec::new();

        for (section, classification) in [
            ("dependencies", Classification::Production),
            ("devDependencies", Classification::Development),
        ] {
            if let Some(entries) = document.get(section).and_then(|v| v.as_object()) {
                for (name, constraint) in entries {
                    let constraint = constraint.as_str().unwrap_or("*");
                    packages.push(DeclaredPackage::new(name.clone(), constraint, classification));
                }
            }
        }

        Ok(ParsedManifest {
            packages,
            forest: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(json: &str) -> ParsedManifest {
        let value: Value = serde_json::from_str(json).unwrap();
        PackageJsonAnalyzer.analyze("package.json", &value).unwrap()
    }

    #[test]
    fn test_parse_package_json() {
        let parsed = analyze(
            r#"{
  "name": "my-app",
  "dependencies": {
    "express": "^4.18.2",
    "lodash": "^4.17.21"
  },
  "devDependencies": {
    "jest": "^29.0.0"
  }
}"#,
        );
        assert_eq!(parsed.packages.len(), 3);
        assert!(parsed.forest.is_empty());
        assert_eq!(
            parsed.packages[0],
            DeclaredPackage::new("express", "^4.18.2", Classification::Production)
        );
        assert_eq!(parsed.packages[2].classification, Classification::Development);
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let parsed = analyze(r#"{ "dependencies": { "zod": "3", "axios": "1", "m": "2" } }"#);
        let names: Vec<_> = parsed.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zod", "axios", "m"]);
    }

    #[test]
    fn test_same_name_in_both_sections() {
        let parsed = analyze(
            r#"{ "dependencies": { "react": "^18.0.0" }, "devDependencies": { "react": "^18.2.0" } }"#,
        );
        assert_eq!(parsed.packages.len(), 2);
        assert_eq!(parsed.packages[0].classification, Classification::Production);
        assert_eq!(parsed.packages[1].classification, Classification::Development);
    }

    #[test]
    fn test_missing_sections_and_non_objects() {
        assert!(analyze(r#"{ "name": "empty" }"#).packages.is_empty());
        assert!(analyze("[]").packages.is_empty());
        assert!(analyze(r#"{ "dependencies": "nope" }"#).packages.is_empty());
    }

    #[test]
    fn test_non_string_constraint_falls_back_to_wildcard() {
        let parsed = analyze(r#"{ "dependencies": { "weird": 3 } }"#);
        assert_eq!(parsed.packages[0].version_constraint, "*");
    }
}

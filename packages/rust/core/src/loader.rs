//! Sidebar file loading.
//!
//! Reads a `.json` or `.toml` sidebar file into the untyped value consumed by
//! [`crate::model::parse`], and offers the full load → parse → validate run.

use std::path::Path;

use serde_json::Value;
use tracing::{info, instrument};

use sidenav_shared::{Result, SidenavError};

use crate::model::parse;
use crate::registry::DocRegistry;
use crate::validate::{ValidatedTree, Validator};

/// On-disk sidebar formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarFormat {
    Json,
    Toml,
}

impl SidebarFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(SidenavError::config(format!(
                "unsupported sidebar file {} (expected .json or .toml)",
                path.display()
            ))),
        }
    }
}

/// Decode sidebar source text into a raw value.
pub fn parse_source(content: &str, format: SidebarFormat) -> Result<Value> {
    match format {
        SidebarFormat::Json => {
            serde_json::from_str(content).map_err(|e| SidenavError::parse(format!("JSON: {e}")))
        }
        SidebarFormat::Toml => {
            toml::from_str(content).map_err(|e| SidenavError::parse(format!("TOML: {e}")))
        }
    }
}

/// Read a sidebar file into a raw value.
pub fn load_raw(path: &Path) -> Result<Value> {
    let format = SidebarFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| SidenavError::io(path, e))?;
    parse_source(&content, format)
}

/// Load, parse and validate a sidebar file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_sidebar(path: &Path, registry: Option<&dyn DocRegistry>) -> Result<ValidatedTree> {
    let raw = load_raw(path)?;
    let tree = parse(&raw)?;

    let mut validator = Validator::new();
    if let Some(registry) = registry {
        validator = validator.with_registry(registry);
    }
    let validated = validator.validate(tree)?;

    info!(
        groups = validated.groups.len(),
        docs = validated.doc_count(),
        "sidebar loaded"
    );
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use crate::traverse::flatten;

    const JSON_FIXTURE: &str = "../../../fixtures/json/sidebars.fixture.json";
    const TOML_FIXTURE: &str = "../../../fixtures/toml/sidebars.fixture.toml";

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SidebarFormat::from_path(Path::new("sidebars.json")).expect("json"),
            SidebarFormat::Json
        );
        assert_eq!(
            SidebarFormat::from_path(Path::new("nav/Sidebars.TOML")).expect("toml"),
            SidebarFormat::Toml
        );
        assert!(SidebarFormat::from_path(Path::new("sidebars.js")).is_err());
    }

    #[test]
    fn loads_json_fixture() {
        let tree = load_sidebar(Path::new(JSON_FIXTURE), None).expect("load");
        assert_eq!(tree.groups.len(), 1);
        assert_eq!(tree.doc_count(), 18);
    }

    #[test]
    fn toml_and_json_load_to_same_shape() {
        let from_toml = load_sidebar(Path::new(TOML_FIXTURE), None).expect("toml");

        let json = parse_source(
            r#"{ "docs": [
                { "type": "doc", "id": "welcome", "label": "Welcome" },
                { "type": "category", "label": "Key Concepts", "items": [
                    { "type": "category", "label": "Channels Protocol", "items": [
                        { "type": "doc", "id": "channels-protocol/overview", "label": "Overview" },
                        { "type": "doc", "id": "channels-protocol/authors", "label": "Authors" }
                    ] },
                    { "type": "doc", "id": "key-concepts/transport", "label": "Transport" }
                ] },
                { "type": "doc", "id": "troubleshooting" }
            ] }"#,
            SidebarFormat::Json,
        )
        .expect("json");
        let from_json = parse(&json).expect("parse");

        assert_eq!(from_toml.tree(), &from_json);
        let ids: Vec<_> = flatten(&from_toml).iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "welcome",
                "channels-protocol/overview",
                "channels-protocol/authors",
                "key-concepts/transport",
                "troubleshooting"
            ]
        );
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        let err = parse_source("{ \"docs\": [", SidebarFormat::Json).unwrap_err();
        assert!(matches!(err, SidenavError::Parse { .. }));

        let err = parse_source("[[docs]\n", SidebarFormat::Toml).unwrap_err();
        assert!(err.to_string().starts_with("parse error: TOML"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_raw(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, SidenavError::Io { .. }));
    }

    #[test]
    fn registry_is_consulted_when_given() {
        let registry: HashSet<String> = ["welcome".to_string()].into_iter().collect();
        let registry: &dyn DocRegistry = &registry;
        let err = load_sidebar(Path::new(TOML_FIXTURE), Some(registry)).unwrap_err();
        // Everything except `welcome` is unknown.
        assert_eq!(err.violations().len(), 4);
    }
}

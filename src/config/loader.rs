//! Route source loading.
//!
//! Turns raw source bytes into a candidate `RouteTable`. A table is only
//! returned when every record parsed and validated; on any error the caller's
//! existing table is left alone.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::config::schema::{RouteDocument, RouteSource, SourceFormat};
use crate::config::validation::{validate_record, ValidationError};
use crate::routing::RouteTable;

/// Syntax-level failure reading a route source.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("source is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Error type for route loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source could not be opened or read.
    #[error("cannot read route source {}: {}", .path.display(), .source)]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed content, an unknown field, or a repeated service name.
    #[error("malformed route source: {0}")]
    Parse(#[from] ParseError),

    /// A record failed semantic validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::SourceUnavailable { .. } => "source_unavailable",
            ConfigError::Parse(_) => "parse",
            ConfigError::Validation(_) => "validation",
        }
    }
}

/// Read, parse, and validate the file behind `source`.
pub fn load_file(source: &RouteSource) -> Result<RouteTable, ConfigError> {
    let bytes = fs::read(source.path()).map_err(|e| ConfigError::SourceUnavailable {
        path: source.path().to_path_buf(),
        source: e,
    })?;

    let table = load(&bytes, source.format())?;
    tracing::debug!(
        path = %source.path().display(),
        routes = table.len(),
        "Route source loaded"
    );
    Ok(table)
}

/// Parse and validate `bytes` into a fresh table keyed by each record's path.
///
/// Records are visited in logical-name order. When two services declare the
/// same path, the later name wins.
pub fn load(bytes: &[u8], format: SourceFormat) -> Result<RouteTable, ConfigError> {
    let document = parse(bytes, format)?;

    let table = RouteTable::new();
    let mut owners: HashMap<String, &str> = HashMap::with_capacity(document.len());

    for (service, record) in document.iter() {
        let entry = validate_record(service, record.as_ref())?;

        if let Some(previous) = owners.insert(entry.path().to_string(), service.as_str()) {
            tracing::warn!(
                path = %entry.path(),
                replaced = %previous,
                winner = %service,
                "Duplicate route path; later service name wins"
            );
        }
        table.put(Arc::new(entry));
    }

    Ok(table)
}

fn parse(bytes: &[u8], format: SourceFormat) -> Result<RouteDocument, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    if text.trim().is_empty() {
        return Ok(RouteDocument::default());
    }

    let document = match format {
        SourceFormat::Yaml => serde_yaml::from_str::<Option<RouteDocument>>(text)?.unwrap_or_default(),
        SourceFormat::Toml => toml::from_str::<RouteDocument>(text)?,
    };
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::InvalidReason;

    const ROUTES_YAML: &str = "\
users:
  id: user-service
  path: /users
orders:
  id: order-service
  path: /orders
";

    #[test]
    fn test_load_yaml() {
        let table = load(ROUTES_YAML.as_bytes(), SourceFormat::Yaml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/users").unwrap().id(), "user-service");
        assert_eq!(table.get("/orders").unwrap().id(), "order-service");
        assert!(table.get("users").is_none());
    }

    #[test]
    fn test_load_toml_matches_yaml() {
        let toml_src = r#"
[users]
id = "user-service"
path = "/users"

[orders]
id = "order-service"
path = "/orders"
"#;
        let from_toml = load(toml_src.as_bytes(), SourceFormat::Toml).unwrap();
        let from_yaml = load(ROUTES_YAML.as_bytes(), SourceFormat::Yaml).unwrap();
        assert_eq!(from_toml.snapshot(), from_yaml.snapshot());
    }

    #[test]
    fn test_empty_source_is_empty_table() {
        assert!(load(b"", SourceFormat::Yaml).unwrap().is_empty());
        assert!(load(b"  \n", SourceFormat::Toml).unwrap().is_empty());
    }

    #[test]
    fn test_missing_id_is_validation_error() {
        let src = "users:\n  path: /users\n";
        match load(src.as_bytes(), SourceFormat::Yaml) {
            Err(ConfigError::Validation(err)) => {
                assert_eq!(err.service, "users");
                assert_eq!(err.reason, InvalidReason::EmptyId);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_null_fields_are_validation_errors() {
        let cases = [
            ("users:\n  id: ~\n  path: /users\n", InvalidReason::EmptyId),
            ("users:\n  id: null\n  path: /users\n", InvalidReason::EmptyId),
            ("users:\n  id: user-service\n  path: ~\n", InvalidReason::EmptyPath),
        ];
        for (src, reason) in cases {
            match load(src.as_bytes(), SourceFormat::Yaml) {
                Err(ConfigError::Validation(err)) => {
                    assert_eq!(err.service, "users");
                    assert_eq!(err.reason, reason, "source: {:?}", src);
                }
                other => panic!("expected validation error for {:?}, got {:?}", src, other),
            }
        }
    }

    #[test]
    fn test_repeated_service_name_is_parse_error() {
        let src = "a:\n  id: x\n  path: /a\na:\n  id: y\n  path: /b\n";
        let err = load(src.as_bytes(), SourceFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ParseError::Yaml(_))));
        assert!(err.to_string().contains("duplicate service `a`"));
    }

    #[test]
    fn test_null_record_is_validation_error() {
        let src = "users: ~\n";
        match load(src.as_bytes(), SourceFormat::Yaml) {
            Err(ConfigError::Validation(err)) => {
                assert_eq!(err.reason, InvalidReason::MissingRecord);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let src = "users:\n  id: user-service\n  path: /users\n  timeout: 5\n";
        let err = load(src.as_bytes(), SourceFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ParseError::Yaml(_))));
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = load(b"[users\nid = ", SourceFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ParseError::Toml(_))));
    }

    #[test]
    fn test_non_mapping_is_parse_error() {
        let err = load(b"- /a\n- /b\n", SourceFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = load(&[0xff, 0xfe, 0x00], SourceFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ParseError::Encoding(_))));
    }

    #[test]
    fn test_duplicate_path_later_name_wins() {
        let src = "\
zeta:
  id: zeta-service
  path: /shared
alpha:
  id: alpha-service
  path: /shared
";
        let table = load(src.as_bytes(), SourceFormat::Yaml).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("/shared").unwrap().id(), "zeta-service");
    }

    #[test]
    fn test_load_file_missing_source() {
        let source = RouteSource::new("/nonexistent/routegate/routes.yaml");
        let err = load_file(&source).unwrap_err();
        assert!(matches!(err, ConfigError::SourceUnavailable { .. }));
        assert!(err.to_string().contains("routes.yaml"));
    }
}

//! Route source schema definitions.
//!
//! A route source is a mapping from a logical service name (a label chosen by
//! the config author) to a service record:
//!
//! ```yaml
//! users:
//!   id: user-service
//!   path: /users
//! ```
//!
//! The same document may be written as TOML, one table per service.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// One service record as written in the source.
///
/// Unknown fields reject the whole document. Missing and null fields parse
/// as `None` so validation can report them against the service name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceRecord {
    /// Backend service identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Request path routed to the service.
    #[serde(default)]
    pub path: Option<String>,
}

/// A parsed route source, ordered by logical service name.
///
/// A `None` record is a service name with a null value (`users: ~`).
/// A service name declared twice rejects the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDocument(BTreeMap<String, Option<ServiceRecord>>);

impl RouteDocument {
    /// Services in logical-name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Option<ServiceRecord>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for RouteDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = RouteDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of service names to route records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut services = BTreeMap::new();
        while let Some(service) = access.next_key::<String>()? {
            if services.contains_key(&service) {
                return Err(de::Error::custom(format_args!(
                    "duplicate service `{}`",
                    service
                )));
            }
            let record = access.next_value::<Option<ServiceRecord>>()?;
            services.insert(service, record);
        }
        Ok(RouteDocument(services))
    }
}

/// Syntax of a route source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFormat {
    #[default]
    Yaml,
    Toml,
}

impl SourceFormat {
    /// Infer the format from a file extension. Anything but `.toml` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SourceFormat::Toml,
            _ => SourceFormat::Yaml,
        }
    }
}

/// Where a router reads its routes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSource {
    path: PathBuf,
    format: SourceFormat,
}

impl RouteSource {
    /// A source at `path`, format inferred from the extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SourceFormat::from_path(&path);
        Self { path, format }
    }

    /// Override the inferred format.
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("routes.toml")), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_path(Path::new("routes.TOML")), SourceFormat::Toml);
        assert_eq!(SourceFormat::from_path(Path::new("routes.yml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("routes")), SourceFormat::Yaml);
    }

    #[test]
    fn test_source_format_override() {
        let source = RouteSource::new("routes.conf").with_format(SourceFormat::Toml);
        assert_eq!(source.format(), SourceFormat::Toml);
        assert_eq!(source.path(), Path::new("routes.conf"));
    }

    #[test]
    fn test_record_missing_fields_are_none() {
        let record: ServiceRecord = serde_yaml::from_str("path: /a\n").unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.path.as_deref(), Some("/a"));
    }

    #[test]
    fn test_record_null_fields_are_none() {
        let record: ServiceRecord = serde_yaml::from_str("id: ~\npath: null\n").unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.path, None);
    }

    #[test]
    fn test_document_rejects_repeated_service() {
        let src = "a:\n  id: x\n  path: /a\na:\n  id: y\n  path: /b\n";
        let err = serde_yaml::from_str::<RouteDocument>(src).unwrap_err();
        assert!(err.to_string().contains("duplicate service `a`"));
    }

    #[test]
    fn test_document_keeps_name_order() {
        let src = "b:\n  id: y\n  path: /b\na:\n  id: x\n  path: /a\n";
        let document: RouteDocument = serde_yaml::from_str(src).unwrap();
        let names: Vec<_> = document.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn test_record_rejects_unknown_fields() {
        let result: Result<ServiceRecord, _> =
            serde_yaml::from_str("id: svc\npath: /a\nweight: 3\n");
        assert!(result.is_err());
    }
}

//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A route file in its own temp directory, rewritable between reloads.
pub struct RouteFile {
    _dir: TempDir,
    pub path: PathBuf,
}

impl RouteFile {
    pub fn yaml(content: &str) -> Self {
        Self::with_name("routes.yaml", content)
    }

    #[allow(dead_code)]
    pub fn toml(content: &str) -> Self {
        Self::with_name("routes.toml", content)
    }

    fn with_name(name: &str, content: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        Self { _dir: dir, path }
    }

    pub fn rewrite(&self, content: &str) {
        fs::write(&self.path, content).unwrap();
    }
}

/// Render `(service, id, path)` triples as a YAML route source.
pub fn routes_yaml(routes: &[(&str, &str, &str)]) -> String {
    routes
        .iter()
        .map(|(service, id, path)| format!("{}:\n  id: {}\n  path: {}\n", service, id, path))
        .collect()
}

use crate::classpath::ClassPath;
use resloc_api::{ResourceError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolver settings, loadable from JSON.
///
/// ```json
/// {
///   "base_dir": "/srv/app",
///   "class_path": ["conf", "lib/app.jar"],
///   "class_path_env": "CLASSPATH",
///   "follow_links": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Directory relative paths are resolved against. Defaults to the
    /// process working directory.
    pub base_dir: Option<PathBuf>,
    /// Classpath roots in search order; relative entries are taken against
    /// `base_dir`.
    pub class_path: Vec<PathBuf>,
    /// Environment variable whose search path is appended after `class_path`.
    pub class_path_env: Option<String>,
    /// Whether directory traversal follows symbolic links.
    pub follow_links: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            class_path: Vec::new(),
            class_path_env: None,
            follow_links: true,
        }
    }
}

impl ResolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ResourceError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ResourceError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// `base_dir`, or the working directory when unset.
    pub fn resolved_base_dir(&self) -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_default();
        match &self.base_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd,
        }
    }

    /// Enumerate the configured roots.
    pub fn class_path(&self) -> ClassPath {
        let base = self.resolved_base_dir();
        let mut class_path = ClassPath::new(self.class_path.iter().map(|p| base.join(p)));
        if let Some(var) = &self.class_path_env {
            class_path.extend(ClassPath::from_env(var));
        }
        class_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config = ResolverConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert!(config.follow_links);
    }

    #[test]
    fn test_invalid_json() {
        let err = ResolverConfig::from_json_str("{ \"follow_links\": \"yes\" }").unwrap_err();
        assert!(matches!(err, ResourceError::Config(_)));
    }

    #[test]
    fn test_relative_roots_use_base_dir() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("conf")).unwrap();
        fs::write(temp.path().join("app.jar"), b"").unwrap();

        let json = format!(
            r#"{{ "base_dir": {:?}, "class_path": ["conf", "app.jar", "missing"] }}"#,
            temp.path().to_string_lossy()
        );
        let config = ResolverConfig::from_json_str(&json).unwrap();
        let class_path = config.class_path();
        assert_eq!(class_path.len(), 2);
        assert_eq!(class_path.list_roots()[0].path(), temp.path().join("conf"));
    }

    #[test]
    fn test_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("resloc.json");
        fs::write(&path, r#"{ "follow_links": false }"#).unwrap();
        assert!(!ResolverConfig::from_file(&path).unwrap().follow_links);

        let err = ResolverConfig::from_file(&temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ResourceError::Config(_)));
    }
}

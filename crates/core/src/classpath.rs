//! Root enumeration for classpath-style lookups.
//!
//! A [`ClassPath`] is the ordered list of traversal origins (directories and
//! archive files) of one loading context. It is built once and read-only
//! afterwards; earlier roots shadow later ones for single lookups.

use crate::util::{canonical_path, file_location};
use resloc_api::JAR_URL_SEPARATOR;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    Directory,
    Archive,
}

/// One traversal origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    path: PathBuf,
    canonical: PathBuf,
    kind: RootKind,
}

impl Root {
    /// Classify an existing path: directories are directory roots, any other
    /// file is an archive. Returns `None` for a missing path.
    pub fn probe(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path).ok()?;
        let kind = if metadata.is_dir() {
            RootKind::Directory
        } else {
            RootKind::Archive
        };
        Some(Self::with_kind(path, kind))
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(path.into(), RootKind::Directory)
    }

    pub fn archive(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(path.into(), RootKind::Archive)
    }

    fn with_kind(path: PathBuf, kind: RootKind) -> Self {
        let base = std::env::current_dir().unwrap_or_default();
        let canonical = canonical_path(&path, &base);
        Self {
            path,
            canonical,
            kind,
        }
    }

    /// The path as configured.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute, symlink-free form used for deduplication.
    pub fn canonical(&self) -> &Path {
        &self.canonical
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    /// Canonical location of the root itself.
    pub fn location(&self) -> String {
        match self.kind {
            RootKind::Directory => {
                let mut location = file_location(&self.canonical);
                if !location.ends_with('/') {
                    location.push('/');
                }
                location
            }
            RootKind::Archive => {
                format!("jar:{}{}", file_location(&self.canonical), JAR_URL_SEPARATOR)
            }
        }
    }
}

/// Ordered, deduplicated set of roots.
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    roots: Vec<Root>,
}

impl ClassPath {
    /// Build from paths in search order. Missing paths are skipped and
    /// duplicates (by canonical form) keep their first position.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut class_path = Self::default();
        for path in paths {
            let path = path.into();
            match Root::probe(&path) {
                Some(root) => {
                    class_path.push(root);
                }
                None => debug!("Skipping missing classpath entry {:?}", path),
            }
        }
        class_path
    }

    /// Build from a platform search path (`:`-separated on Unix, `;` on Windows).
    pub fn from_search_path(search_path: &OsStr) -> Self {
        Self::new(std::env::split_paths(search_path).filter(|p| !p.as_os_str().is_empty()))
    }

    /// Build from an environment variable holding a search path. An unset
    /// variable yields an empty classpath.
    pub fn from_env(var: &str) -> Self {
        match std::env::var_os(var) {
            Some(value) => Self::from_search_path(&value),
            None => Self::default(),
        }
    }

    /// Append a root unless one with the same canonical form is present.
    pub fn push(&mut self, root: Root) -> bool {
        if self.roots.iter().any(|r| r.canonical == root.canonical) {
            debug!("Skipping duplicate classpath entry {:?}", root.path);
            return false;
        }
        self.roots.push(root);
        true
    }

    /// Append every root of `other`, keeping this classpath's roots first.
    pub fn extend(&mut self, other: ClassPath) {
        let mut seen: HashSet<PathBuf> = self.roots.iter().map(|r| r.canonical.clone()).collect();
        for root in other.roots {
            if seen.insert(root.canonical.clone()) {
                self.roots.push(root);
            }
        }
    }

    /// The roots, in search order.
    pub fn list_roots(&self) -> &[Root] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

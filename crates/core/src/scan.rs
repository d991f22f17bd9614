//! Per-root candidate enumeration for wildcard patterns.
//!
//! Both root kinds are scanned against the same compiled pattern: traversal
//! starts at the pattern's deterministic prefix, every candidate is matched by
//! its `/`-separated path relative to the root, and each hit becomes a handle
//! keyed by its canonical location.

use crate::archive::ArchiveHandle;
use crate::classpath::{Root, RootKind};
use crate::pattern::CompiledPattern;
use crate::resource::{ArchiveEntryResource, FileResource, ResourceHandle};
use crate::util::{escapes_root, relative_slash_path};
use resloc_api::{ResourceError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub follow_links: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { follow_links: true }
    }
}

/// All resources under `root` matching `pattern`.
pub fn scan_root(
    root: &Root,
    pattern: &CompiledPattern,
    options: ScanOptions,
) -> Result<Vec<ResourceHandle>> {
    let start = std::time::Instant::now();
    let found = match root.kind() {
        RootKind::Directory => scan_directory(root.canonical(), pattern, options)?,
        RootKind::Archive => scan_archive(root.canonical(), pattern)?,
    };
    debug!(
        "Matched {} resources for `{}` in {:?} in {:?}",
        found.len(),
        pattern,
        root.path(),
        start.elapsed()
    );
    Ok(found)
}

/// Handle for `path` inside `root` if it exists there; no traversal.
pub fn lookup(root: &Root, path: &str) -> Result<Option<ResourceHandle>> {
    if escapes_root(path) {
        debug!("Refusing lookup of `{}` outside root {:?}", path, root.path());
        return Ok(None);
    }
    match root.kind() {
        RootKind::Directory => {
            let file = root.canonical().join(path);
            if !file.exists() {
                return Ok(None);
            }
            Ok(Some(FileResource::from_absolute(&file).into()))
        }
        RootKind::Archive => {
            let handle = ArchiveHandle::open(root.canonical())?;
            if !handle.contains(path) {
                return Ok(None);
            }
            Ok(Some(ArchiveEntryResource::new(root.canonical(), path).into()))
        }
    }
}

fn scan_directory(
    root: &Path,
    pattern: &CompiledPattern,
    options: ScanOptions,
) -> Result<Vec<ResourceHandle>> {
    let prefix = pattern.prefix();
    if escapes_root(&prefix) {
        debug!("Refusing scan of `{}` outside root {:?}", pattern, root);
        return Ok(Vec::new());
    }
    let start_dir = root.join(&prefix);
    if !start_dir.is_dir() {
        return Ok(Vec::new());
    }

    // Canonical directories already entered during this walk. A directory
    // reached again through a link is not entered twice.
    let mut visited: HashSet<PathBuf> = HashSet::new();
    if let Ok(canonical) = std::fs::canonicalize(&start_dir) {
        visited.insert(canonical);
    }

    let walker = WalkDir::new(&start_dir)
        .follow_links(options.follow_links)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let Some(relative) = relative_slash_path(entry.path(), root) else {
                return false;
            };
            if !pattern.matches_start(&relative) {
                return false;
            }
            match std::fs::canonicalize(entry.path()) {
                Ok(canonical) => visited.insert(canonical),
                Err(_) => false,
            }
        });

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                debug!("Skipping link cycle at {:?}", e.path());
                continue;
            }
            Err(e)
                if e.io_error()
                    .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) =>
            {
                // Dangling link, or removed while walking.
                debug!("Skipping vanished path {:?}", e.path());
                continue;
            }
            Err(e) => return Err(ResourceError::Io(e.into())),
        };

        if entry.file_type().is_dir() {
            continue;
        }
        // Unfollowed links only count when they point at a file.
        if entry.path_is_symlink() && !entry.path().is_file() {
            continue;
        }
        let Some(relative) = relative_slash_path(entry.path(), root) else {
            continue;
        };
        if pattern.matches(&relative) {
            found.push(FileResource::from_absolute(entry.path()).into());
        }
    }
    Ok(found)
}

fn scan_archive(archive: &Path, pattern: &CompiledPattern) -> Result<Vec<ResourceHandle>> {
    let prefix = pattern.prefix();
    let mut handle = ArchiveHandle::open(archive)?;

    let mut found = Vec::new();
    for entry in handle.entries() {
        let entry = entry?;
        if entry.is_dir || !entry.name.starts_with(&prefix) {
            continue;
        }
        if pattern.matches(&entry.name) {
            found.push(ArchiveEntryResource::new(archive, &entry.name).into());
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn compile(p: &str) -> CompiledPattern {
        CompiledPattern::compile(p).unwrap()
    }

    fn relative_names(found: &[ResourceHandle], root: &Path) -> Vec<String> {
        let mut names: Vec<String> = found
            .iter()
            .map(|h| match h {
                ResourceHandle::File(f) => relative_slash_path(f.path(), root).unwrap(),
                ResourceHandle::ArchiveEntry(e) => e.entry().to_string(),
                other => panic!("unexpected handle {other:?}"),
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_directory_scan_bounded_by_prefix() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path();
        fs::create_dir_all(base.join("cfg/sub")).unwrap();
        fs::create_dir_all(base.join("other")).unwrap();
        fs::write(base.join("cfg/a.xml"), "a").unwrap();
        fs::write(base.join("cfg/sub/b.xml"), "b").unwrap();
        fs::write(base.join("cfg/c.txt"), "c").unwrap();
        fs::write(base.join("other/d.xml"), "d").unwrap();

        let root = Root::probe(base).unwrap();
        let canonical = root.canonical().to_path_buf();

        let flat = scan_root(&root, &compile("cfg/*.xml"), ScanOptions::default()).unwrap();
        assert_eq!(relative_names(&flat, &canonical), vec!["cfg/a.xml"]);

        let deep = scan_root(&root, &compile("cfg/**/*.xml"), ScanOptions::default()).unwrap();
        assert_eq!(relative_names(&deep, &canonical), vec!["cfg/a.xml", "cfg/sub/b.xml"]);

        let everywhere = scan_root(&root, &compile("**/*.xml"), ScanOptions::default()).unwrap();
        assert_eq!(everywhere.len(), 3);

        let missing = scan_root(&root, &compile("nope/*.xml"), ScanOptions::default()).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_directory_root_is_never_left() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path();
        fs::create_dir_all(base.join("classes")).unwrap();
        fs::write(base.join("secret.xml"), "s").unwrap();

        let root = Root::probe(base.join("classes")).unwrap();
        let found = scan_root(&root, &compile("../*.xml"), ScanOptions::default()).unwrap();
        assert!(found.is_empty());
        assert!(lookup(&root, "../secret.xml").unwrap().is_none());
        assert!(lookup(&root, "/secret.xml").unwrap().is_none());
    }

    #[test]
    fn test_archive_scan_skips_directories() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("lib.jar");
        let mut writer = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        writer.add_directory("a/", SimpleFileOptions::default()).unwrap();
        for name in ["a/one.txt", "a/two.txt", "b/three.txt", "a/nested/four.txt"] {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(name.as_bytes()).unwrap();
        }
        writer.finish().unwrap();

        let root = Root::probe(&path).unwrap();
        let found = scan_root(&root, &compile("a/*.txt"), ScanOptions::default()).unwrap();
        assert_eq!(
            relative_names(&found, root.canonical()),
            vec!["a/one.txt", "a/two.txt"]
        );
    }

    #[test]
    fn test_lookup() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("cfg")).unwrap();
        fs::write(temp.path().join("cfg/app.xml"), "x").unwrap();
        let root = Root::probe(temp.path()).unwrap();

        assert!(lookup(&root, "cfg/app.xml").unwrap().is_some());
        assert!(lookup(&root, "cfg/missing.xml").unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path();
        fs::create_dir_all(base.join("cfg/sub")).unwrap();
        fs::write(base.join("cfg/sub/a.xml"), "a").unwrap();
        std::os::unix::fs::symlink(base.join("cfg"), base.join("cfg/sub/loop")).unwrap();

        let root = Root::probe(base).unwrap();
        let found = scan_root(&root, &compile("**/*.xml"), ScanOptions::default()).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_links_not_followed_when_disabled() {
        let temp = tempfile::tempdir().unwrap();
        let base = temp.path();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("x.xml"), "x").unwrap();
        fs::create_dir_all(base.join("cfg")).unwrap();
        std::os::unix::fs::symlink(outside.path(), base.join("cfg/linked")).unwrap();

        let root = Root::probe(base).unwrap();
        let pattern = compile("cfg/**/*.xml");
        let followed = scan_root(&root, &pattern, ScanOptions { follow_links: true }).unwrap();
        assert_eq!(followed.len(), 1);
        let not_followed = scan_root(&root, &pattern, ScanOptions { follow_links: false }).unwrap();
        assert!(not_followed.is_empty());
    }
}

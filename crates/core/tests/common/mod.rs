use resloc_api::Resource;
use resloc_core::{ClassPath, PathMatchingResolver, Resources};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Scratch filesystem layout for a test.
pub struct Fixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a zip archive whose entries hold their own names as content.
    pub fn archive(&self, relative: &str, entries: &[&str]) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut writer = zip::ZipWriter::new(fs::File::create(&path).unwrap());
        for name in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, SimpleFileOptions::default()).unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(name.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap();
        path
    }

    pub fn resolver(&self, roots: &[&str]) -> PathMatchingResolver {
        let class_path = ClassPath::new(roots.iter().map(|r| self.path(r)));
        PathMatchingResolver::new(class_path).with_base_dir(self.root())
    }
}

/// Sorted file names (last location segment) of a result.
#[allow(dead_code)]
pub fn file_names(resources: &Resources) -> Vec<String> {
    let mut names: Vec<String> = resources
        .iter()
        .filter_map(|r| r.filename().map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Sorted location parts following the last occurrence of `marker`, e.g.
/// `"!/"` for archive entries or `"classes/"` for a directory root.
#[allow(dead_code)]
pub fn suffixes(resources: &Resources, marker: &str) -> Vec<String> {
    let mut suffixes: Vec<String> = resources
        .locations()
        .map(|l| l.rsplit_once(marker).map_or(l, |(_, rest)| rest).to_string())
        .collect();
    suffixes.sort();
    suffixes
}

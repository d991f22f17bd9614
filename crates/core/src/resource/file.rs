use crate::util::{canonical_path, clean_path, file_location};
use resloc_api::{Resource, ResourceError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
    location: String,
}

impl FileResource {
    /// Handle for `path`, resolved against `base` when relative.
    pub fn new(path: &Path, base: &Path) -> Self {
        let path = canonical_path(path, base);
        let location = file_location(&path);
        Self { path, location }
    }

    /// Handle for an absolute path.
    pub fn from_absolute(path: &Path) -> Self {
        Self::new(path, Path::new("/"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handle for `relative`, resolved against this file's directory.
    pub fn create_relative(&self, relative: &str) -> Self {
        let dir = self.path.parent().unwrap_or(&self.path);
        let cleaned = clean_path(relative);
        Self::new(Path::new(&cleaned), dir)
    }

    fn metadata(&self) -> Result<std::fs::Metadata> {
        std::fs::metadata(&self.path).map_err(|e| ResourceError::access(&self.location, e))
    }
}

impl Resource for FileResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        if self.path.is_dir() {
            return Err(ResourceError::access(&self.location, "is a directory"));
        }
        let file = File::open(&self.path).map_err(|e| ResourceError::access(&self.location, e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn content_length(&self) -> Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn last_modified(&self) -> Result<SystemTime> {
        Ok(self.metadata()?.modified()?)
    }

    fn description(&self) -> String {
        format!("file [{}]", self.path.display())
    }
}

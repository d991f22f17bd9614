use crate::archive::ArchiveHandle;
use crate::util::{clean_path, file_location};
use resloc_api::{JAR_URL_SEPARATOR, Resource, ResourceError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// One entry inside an archive file, addressed as `jar:file:…!/entry`.
///
/// Every accessor opens the archive for the duration of the call only.
#[derive(Debug, Clone)]
pub struct ArchiveEntryResource {
    archive: PathBuf,
    entry: String,
    location: String,
}

impl ArchiveEntryResource {
    /// `archive` must already be in canonical form.
    pub fn new(archive: &Path, entry: &str) -> Self {
        let location = format!("jar:{}{}{}", file_location(archive), JAR_URL_SEPARATOR, entry);
        Self {
            archive: archive.to_path_buf(),
            entry: entry.to_string(),
            location,
        }
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Handle for `relative`, resolved against this entry's directory.
    pub fn create_relative(&self, relative: &str) -> Self {
        let dir = match self.entry.rfind('/') {
            Some(idx) => &self.entry[..idx],
            None => "",
        };
        Self::new(&self.archive, &clean_path(&format!("{dir}/{relative}")))
    }

    fn open_archive(&self) -> Result<ArchiveHandle> {
        ArchiveHandle::open(&self.archive).map_err(|e| match e {
            ResourceError::Io(io) => ResourceError::access(&self.location, io),
            other => other,
        })
    }

    fn not_found(&self, err: ResourceError) -> ResourceError {
        match err {
            ResourceError::EntryNotFound { .. } => {
                ResourceError::access(&self.location, "no such archive entry")
            }
            other => other,
        }
    }
}

impl Resource for ArchiveEntryResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn exists(&self) -> bool {
        match ArchiveHandle::open(&self.archive) {
            Ok(handle) => handle.contains(&self.entry),
            Err(e) => {
                debug!("Cannot check {}: {}", self.location, e);
                false
            }
        }
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        let mut handle = self.open_archive()?;
        let reader = handle.open_entry(&self.entry).map_err(|e| self.not_found(e))?;
        Ok(Box::new(reader))
    }

    fn content_length(&self) -> Result<u64> {
        let mut handle = self.open_archive()?;
        handle.entry_size(&self.entry).map_err(|e| self.not_found(e))
    }

    /// The archive's own modification time; entries carry no reliable one.
    fn last_modified(&self) -> Result<SystemTime> {
        let metadata =
            std::fs::metadata(&self.archive).map_err(|e| ResourceError::access(&self.location, e))?;
        Ok(metadata.modified()?)
    }

    fn description(&self) -> String {
        format!("archive entry [{}] in [{}]", self.entry, self.archive.display())
    }
}

//! Archive scanning.
//!
//! Opening an [`ArchiveHandle`] reads only the central directory; listing
//! entries never decompresses content, and [`ArchiveHandle::open_entry`] reads
//! exactly one entry. The file descriptor lives as long as the handle and is
//! released when it drops, on every exit path.

use resloc_api::{ResourceError, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipError;

/// One entry of an archive's central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
}

/// Scoped, open archive.
pub struct ArchiveHandle {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
}

impl ArchiveHandle {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| map_zip_error(path, None, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Lazily list entries in central-directory order.
    ///
    /// Each call starts from the beginning; dropping the iterator early is
    /// fine, the handle itself owns the descriptor.
    pub fn entries(&mut self) -> Entries<'_> {
        Entries {
            handle: self,
            index: 0,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_index(name).is_some()
    }

    /// Uncompressed size of the named entry.
    pub fn entry_size(&mut self, name: &str) -> Result<u64> {
        let index = self.index_of(name)?;
        let entry = self
            .archive
            .by_index_raw(index)
            .map_err(|e| map_zip_error(&self.path, Some(name), e))?;
        Ok(entry.size())
    }

    /// Read the named entry, and only that entry.
    pub fn open_entry(&mut self, name: &str) -> Result<Cursor<Vec<u8>>> {
        let index = self.index_of(name)?;
        let mut entry = self
            .archive
            .by_index(index)
            .map_err(|e| map_zip_error(&self.path, Some(name), e))?;
        let mut buf = Vec::with_capacity(read_capacity(entry.size()));
        entry.read_to_end(&mut buf)?;
        Ok(Cursor::new(buf))
    }

    /// Entry names are matched without a leading `/`, whichever way the
    /// archive stores them.
    fn find_index(&self, name: &str) -> Option<usize> {
        let name = name.trim_start_matches('/');
        self.archive
            .index_for_name(name)
            .or_else(|| self.archive.index_for_name(&format!("/{name}")))
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.find_index(name)
            .ok_or_else(|| ResourceError::EntryNotFound {
                archive: self.path.clone(),
                entry: name.to_string(),
            })
    }
}

impl std::fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("path", &self.path)
            .field("entries", &self.archive.len())
            .finish()
    }
}

/// Upper bound on the buffer reserved up front for an entry. The declared
/// size comes from the archive and is not trusted beyond this.
const MAX_PREALLOC: u64 = 1 << 20;

fn read_capacity(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOC)).unwrap_or(0)
}

/// Lazy entry listing borrowed from an [`ArchiveHandle`].
pub struct Entries<'a> {
    handle: &'a mut ArchiveHandle,
    index: usize,
}

impl Iterator for Entries<'_> {
    type Item = Result<ArchiveEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.handle.archive.len() {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let path = &self.handle.path;
        let entry = match self.handle.archive.by_index_raw(index) {
            Ok(entry) => ArchiveEntry {
                name: entry.name().trim_start_matches('/').to_string(),
                is_dir: entry.is_dir(),
                size: entry.size(),
            },
            Err(e) => return Some(Err(map_zip_error(path, None, e))),
        };
        Some(Ok(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.handle.archive.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

fn map_zip_error(archive: &Path, entry: Option<&str>, err: ZipError) -> ResourceError {
    match err {
        // A truncated or garbled file surfaces as an I/O error from the reader.
        ZipError::Io(e)
            if matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::InvalidData
            ) =>
        {
            ResourceError::ArchiveCorrupt {
                path: archive.to_path_buf(),
                reason: e.to_string(),
            }
        }
        ZipError::Io(e) => ResourceError::Io(e),
        ZipError::FileNotFound => ResourceError::EntryNotFound {
            archive: archive.to_path_buf(),
            entry: entry.unwrap_or_default().to_string(),
        },
        other => ResourceError::ArchiveCorrupt {
            path: archive.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

//! Resource handles produced by resolution.

mod archive;
mod file;
mod memory;
mod remote;

pub use archive::ArchiveEntryResource;
pub use file::FileResource;
pub use memory::ByteResource;
pub use remote::UrlResource;

use resloc_api::{Resource, ResourceError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::sync::Arc;
use std::time::SystemTime;

/// A location that resolved to nothing, e.g. a `classpath:` path present in
/// no root.
#[derive(Debug, Clone)]
pub struct UnresolvedResource {
    location: String,
}

impl UnresolvedResource {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl Resource for UnresolvedResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn exists(&self) -> bool {
        false
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        Err(ResourceError::access(&self.location, "resource does not exist"))
    }

    fn content_length(&self) -> Result<u64> {
        Err(ResourceError::access(&self.location, "resource does not exist"))
    }

    fn last_modified(&self) -> Result<SystemTime> {
        Err(ResourceError::access(&self.location, "resource does not exist"))
    }
}

/// Every kind of handle the resolver hands out.
///
/// Equality and hashing only consider [`Resource::location`].
#[derive(Debug, Clone)]
pub enum ResourceHandle {
    File(FileResource),
    ArchiveEntry(ArchiveEntryResource),
    Bytes(ByteResource),
    Url(UrlResource),
    Unresolved(UnresolvedResource),
    /// Produced by a registered [`resloc_api::ProtocolResolver`].
    Custom(Arc<dyn Resource>),
}

impl ResourceHandle {
    fn inner(&self) -> &dyn Resource {
        match self {
            ResourceHandle::File(r) => r,
            ResourceHandle::ArchiveEntry(r) => r,
            ResourceHandle::Bytes(r) => r,
            ResourceHandle::Url(r) => r,
            ResourceHandle::Unresolved(r) => r,
            ResourceHandle::Custom(r) => r.as_ref(),
        }
    }

    /// Handle for a path relative to this one, for kinds that have a
    /// hierarchy (files and archive entries).
    pub fn create_relative(&self, relative: &str) -> Option<ResourceHandle> {
        match self {
            ResourceHandle::File(r) => Some(ResourceHandle::File(r.create_relative(relative))),
            ResourceHandle::ArchiveEntry(r) => {
                Some(ResourceHandle::ArchiveEntry(r.create_relative(relative)))
            }
            _ => None,
        }
    }
}

impl Resource for ResourceHandle {
    fn location(&self) -> &str {
        self.inner().location()
    }

    fn exists(&self) -> bool {
        self.inner().exists()
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        self.inner().open()
    }

    fn content_length(&self) -> Result<u64> {
        self.inner().content_length()
    }

    fn last_modified(&self) -> Result<SystemTime> {
        self.inner().last_modified()
    }

    fn description(&self) -> String {
        self.inner().description()
    }

    fn filename(&self) -> Option<&str> {
        self.inner().filename()
    }
}

impl PartialEq for ResourceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.location() == other.location()
    }
}

impl Eq for ResourceHandle {}

impl Hash for ResourceHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location().hash(state);
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl From<FileResource> for ResourceHandle {
    fn from(r: FileResource) -> Self {
        ResourceHandle::File(r)
    }
}

impl From<ArchiveEntryResource> for ResourceHandle {
    fn from(r: ArchiveEntryResource) -> Self {
        ResourceHandle::ArchiveEntry(r)
    }
}

impl From<ByteResource> for ResourceHandle {
    fn from(r: ByteResource) -> Self {
        ResourceHandle::Bytes(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    #[test]
    fn test_missing_file_handle() {
        let temp = tempfile::tempdir().unwrap();
        let handle: ResourceHandle = FileResource::new(Path::new("missing.xml"), temp.path()).into();

        assert!(!handle.exists());
        assert!(matches!(handle.open(), Err(ResourceError::ResourceAccess { .. })));
        assert!(matches!(handle.content_length(), Err(ResourceError::ResourceAccess { .. })));
        assert_eq!(handle.filename(), Some("missing.xml"));
    }

    #[test]
    fn test_file_handle_reads_lazily() {
        let temp = tempfile::tempdir().unwrap();
        let handle: ResourceHandle = FileResource::new(Path::new("app.xml"), temp.path()).into();
        assert!(!handle.exists());

        fs::write(temp.path().join("app.xml"), "<beans/>").unwrap();
        assert!(handle.exists());
        assert_eq!(handle.read_to_vec().unwrap(), b"<beans/>");
        assert_eq!(handle.content_length().unwrap(), 8);
        assert!(handle.last_modified().is_ok());
    }

    #[test]
    fn test_directory_cannot_be_opened() {
        let temp = tempfile::tempdir().unwrap();
        let handle: ResourceHandle = FileResource::new(temp.path(), temp.path()).into();
        assert!(handle.exists());
        assert!(matches!(handle.open(), Err(ResourceError::ResourceAccess { .. })));
    }

    #[test]
    fn test_equality_is_by_location() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("cfg")).unwrap();
        fs::write(temp.path().join("cfg/app.xml"), "x").unwrap();

        let direct = ResourceHandle::from(FileResource::new(Path::new("cfg/app.xml"), temp.path()));
        let dotted = ResourceHandle::from(FileResource::new(
            Path::new("cfg/../cfg/./app.xml"),
            temp.path(),
        ));
        assert_eq!(direct, dotted);

        let set: HashSet<_> = [direct, dotted].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_create_relative() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("cfg")).unwrap();
        fs::write(temp.path().join("cfg/app.xml"), "x").unwrap();
        fs::write(temp.path().join("cfg/db.xml"), "y").unwrap();

        let app = ResourceHandle::from(FileResource::new(Path::new("cfg/app.xml"), temp.path()));
        let db = app.create_relative("db.xml").unwrap();
        assert!(db.exists());
        assert_eq!(db.read_to_vec().unwrap(), b"y");

        let entry = ResourceHandle::from(ArchiveEntryResource::new(Path::new("/lib.jar"), "a/b/c.txt"));
        let sibling = entry.create_relative("../d.txt").unwrap();
        assert!(sibling.location().ends_with("lib.jar!/a/d.txt"));
    }

    #[test]
    fn test_bytes_have_no_modification_time() {
        let handle = ResourceHandle::from(ByteResource::new("mem:greeting", b"hello".to_vec()));
        assert!(handle.exists());
        assert_eq!(handle.read_to_vec().unwrap(), b"hello");
        assert!(matches!(
            handle.last_modified(),
            Err(ResourceError::MetadataUnavailable { .. })
        ));
    }

    #[test]
    fn test_unreadable_url() {
        let url = url::Url::parse("https://example.com/app.xml").unwrap();
        let handle = ResourceHandle::Url(UrlResource::new(url));
        assert!(!handle.exists());
        assert!(matches!(handle.open(), Err(ResourceError::ResourceAccess { .. })));
        assert!(matches!(
            handle.content_length(),
            Err(ResourceError::MetadataUnavailable { .. })
        ));
    }

    #[test]
    fn test_unresolved() {
        let handle = ResourceHandle::Unresolved(UnresolvedResource::new("classpath:missing.xml"));
        assert!(!handle.exists());
        assert!(matches!(handle.open(), Err(ResourceError::ResourceAccess { .. })));
        assert_eq!(handle.location(), "classpath:missing.xml");
    }
}

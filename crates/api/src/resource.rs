//! The byte-source abstraction every resolved location is exposed through.

use crate::error::Result;
use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::SystemTime;

/// A reusable, lazy descriptor of a byte-content source.
///
/// Constructing a resource never touches the underlying storage. Existence is
/// checked on demand and content is only read through [`Resource::open`], so a
/// handle may describe something that does not exist (yet).
pub trait Resource: fmt::Debug + Send + Sync {
    /// Canonical location string; the identity of the resource.
    fn location(&self) -> &str;

    /// Whether the backing source currently exists. Never an error.
    fn exists(&self) -> bool;

    /// Open the content for reading.
    ///
    /// Fails with `ResourceAccess` when the source does not exist or has
    /// vanished since existence was checked.
    fn open(&self) -> Result<Box<dyn Read + Send>>;

    /// Content length in bytes.
    fn content_length(&self) -> Result<u64>;

    /// Last modification time of the backing source.
    fn last_modified(&self) -> Result<SystemTime>;

    /// Human readable description, used in logs and error messages.
    fn description(&self) -> String {
        self.location().to_string()
    }

    /// Last path segment of the location, if there is one.
    fn filename(&self) -> Option<&str> {
        let location = self.location().trim_end_matches('/');
        let name = location
            .rsplit(['/', ':'])
            .next()
            .filter(|name| !name.is_empty())?;
        Some(name)
    }

    /// Read the whole content into memory.
    fn read_to_vec(&self) -> Result<Vec<u8>> {
        let mut reader = self.open()?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Hook for resolving custom location schemes before the built-in rules apply.
pub trait ProtocolResolver: Send + Sync {
    /// Return a resource for `location` if this resolver owns it.
    fn resolve(&self, location: &str) -> Option<Arc<dyn Resource>>;
}

impl<F> ProtocolResolver for F
where
    F: Fn(&str) -> Option<Arc<dyn Resource>> + Send + Sync,
{
    fn resolve(&self, location: &str) -> Option<Arc<dyn Resource>> {
        self(location)
    }
}

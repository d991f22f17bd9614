use resloc_api::{Resource, ResourceError, Result};
use std::io::Read;
use std::time::SystemTime;
use url::Url;

/// A URL with a scheme this engine does not read (e.g. `https:`).
///
/// Kept as an addressable handle so callers and protocol resolvers can
/// recognize it, but it never reports content: `exists()` is false and
/// reading fails.
#[derive(Debug, Clone)]
pub struct UrlResource {
    url: Url,
    location: String,
}

impl UrlResource {
    pub fn new(url: Url) -> Self {
        let location = url.to_string();
        Self { url, location }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Resource for UrlResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn exists(&self) -> bool {
        false
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        Err(ResourceError::access(
            &self.location,
            format!("no reader for scheme `{}`", self.url.scheme()),
        ))
    }

    fn content_length(&self) -> Result<u64> {
        Err(ResourceError::metadata_unavailable(&self.location, "content length"))
    }

    fn last_modified(&self) -> Result<SystemTime> {
        Err(ResourceError::metadata_unavailable(&self.location, "last-modified time"))
    }

    fn description(&self) -> String {
        format!("URL [{}]", self.url)
    }
}

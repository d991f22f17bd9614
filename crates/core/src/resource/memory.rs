use resloc_api::{Resource, ResourceError, Result};
use std::io::{Cursor, Read};
use std::sync::Arc;
use std::time::SystemTime;

/// In-memory content. Always exists; has no modification time.
#[derive(Debug, Clone)]
pub struct ByteResource {
    location: String,
    data: Arc<[u8]>,
}

impl ByteResource {
    pub fn new(location: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            location: location.into(),
            data: data.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Resource for ByteResource {
    fn location(&self) -> &str {
        &self.location
    }

    fn exists(&self) -> bool {
        true
    }

    fn open(&self) -> Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.data))))
    }

    fn content_length(&self) -> Result<u64> {
        Ok(self.data.len() as u64)
    }

    fn last_modified(&self) -> Result<SystemTime> {
        Err(ResourceError::metadata_unavailable(&self.location, "last-modified time"))
    }

    fn description(&self) -> String {
        format!("byte array [{}] ({} bytes)", self.location, self.data.len())
    }
}

pub mod error;
pub mod loader;
pub mod resource;
pub mod result;

// Re-export commonly used types
pub use error::{ResourceError, Result};
pub use loader::{
    CLASSPATH_ALL_URL_PREFIX, CLASSPATH_URL_PREFIX, JAR_URL_SEPARATOR, ResourceLoader,
    ResourcePatternResolver,
};
pub use resource::{ProtocolResolver, Resource};
pub use result::ResolutionResult;

use crate::error::Result;
use crate::resource::Resource;
use crate::result::ResolutionResult;

/// Pseudo-URL prefix for a single classpath lookup: `classpath:`.
pub const CLASSPATH_URL_PREFIX: &str = "classpath:";

/// Pseudo-URL prefix for retrieving all matching classpath resources: `classpath*:`.
///
/// Unlike [`CLASSPATH_URL_PREFIX`], every root contributes its matches, e.g.
/// `classpath*:/beans.xml` finds `beans.xml` at the top of every archive.
pub const CLASSPATH_ALL_URL_PREFIX: &str = "classpath*:";

/// Separator between the archive URL and the entry path in a `jar:` URL.
pub const JAR_URL_SEPARATOR: &str = "!/";

/// Turns a single location string into a resource handle.
pub trait ResourceLoader: Send + Sync {
    type Handle: Resource + Clone;

    /// Return a handle for `location`.
    ///
    /// Never fails: a well-formed location that names nothing yields a handle
    /// whose `exists()` is false. Fully qualified URLs (`file:/data/app.xml`),
    /// classpath pseudo-URLs (`classpath:app.xml`) and relative paths
    /// (`conf/app.xml`) are all accepted.
    fn get_resource(&self, location: &str) -> Self::Handle;
}

/// Resolves location patterns into sets of resources.
pub trait ResourcePatternResolver: ResourceLoader {
    /// Resolve `location_pattern` into every matching resource.
    ///
    /// Resources that point at the same physical source collapse into one
    /// entry. Zero matches is an empty set, not an error; only I/O failures
    /// and malformed patterns fail.
    fn get_resources(&self, location_pattern: &str) -> Result<ResolutionResult<Self::Handle>>;
}

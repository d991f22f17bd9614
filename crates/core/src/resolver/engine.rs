use crate::classpath::{ClassPath, Root};
use crate::config::ResolverConfig;
use crate::location::{Location, LocationKind};
use crate::pattern::{self, CompiledPattern};
use crate::resource::{
    ArchiveEntryResource, FileResource, ResourceHandle, UnresolvedResource, UrlResource,
};
use crate::scan::{self, ScanOptions};
use crate::util::{canonical_path, clean_path};
use rayon::prelude::*;
use resloc_api::{
    CLASSPATH_URL_PREFIX, JAR_URL_SEPARATOR, ProtocolResolver, ResolutionResult, ResourceLoader,
    ResourcePatternResolver, Result,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

pub type Resources = ResolutionResult<ResourceHandle>;

/// Resolves locations and Ant-style patterns against a classpath and the
/// local filesystem.
///
/// Immutable once built; share it freely across threads.
pub struct PathMatchingResolver {
    class_path: ClassPath,
    base_dir: PathBuf,
    options: ScanOptions,
    protocol_resolvers: Vec<Arc<dyn ProtocolResolver>>,
}

impl PathMatchingResolver {
    pub fn new(class_path: ClassPath) -> Self {
        Self {
            class_path,
            base_dir: std::env::current_dir().unwrap_or_default(),
            options: ScanOptions::default(),
            protocol_resolvers: Vec::new(),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.class_path())
            .with_base_dir(config.resolved_base_dir())
            .with_follow_links(config.follow_links)
    }

    /// Directory relative paths are resolved against.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.options.follow_links = follow_links;
        self
    }

    /// Register a resolver consulted before the built-in rules, in
    /// registration order.
    pub fn with_protocol_resolver(mut self, resolver: Arc<dyn ProtocolResolver>) -> Self {
        self.protocol_resolvers.push(resolver);
        self
    }

    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a parsed location into its set of resources.
    pub fn resolve(&self, location: &Location) -> Result<Resources> {
        debug!("Resolving {}", location);
        let resources = match location.kind() {
            LocationKind::ClassPathAll(body) => {
                let pattern = CompiledPattern::compile(body)?;
                if location.escapes_root() {
                    debug!("{} points above every root", location);
                    Resources::new()
                } else {
                    match pattern.literal_path() {
                        Some(path) => self.find_all(&path)?,
                        None => self.scan_all(&pattern)?,
                    }
                }
            }
            LocationKind::ClassPath(body) if pattern::is_pattern(body) => {
                let pattern = CompiledPattern::compile(body)?;
                if location.escapes_root() {
                    debug!("{} points above every root", location);
                    Resources::new()
                } else {
                    self.scan_first(&pattern)?
                }
            }
            LocationKind::Url(url) if location.is_pattern() => {
                self.resolve_url_pattern(url, location.body())?
            }
            LocationKind::Path(path) if location.is_pattern() => self.resolve_file_pattern(path)?,
            _ => std::iter::once(self.resolve_single(location)).collect(),
        };
        debug!("Resolved {} resources for {}", resources.len(), location);
        Ok(resources)
    }

    fn resolve_single(&self, location: &Location) -> ResourceHandle {
        if let Some(resource) = self
            .protocol_resolvers
            .iter()
            .find_map(|r| r.resolve(location.raw()))
        {
            return ResourceHandle::Custom(resource);
        }

        match location.kind() {
            LocationKind::ClassPath(_) | LocationKind::ClassPathAll(_)
                if location.escapes_root() =>
            {
                ResourceHandle::Unresolved(UnresolvedResource::new(location.raw()))
            }
            LocationKind::ClassPath(body) => self.find_first(body),
            LocationKind::ClassPathAll(body) if !pattern::is_pattern(body) => self.find_first(body),
            LocationKind::ClassPathAll(_) => {
                ResourceHandle::Unresolved(UnresolvedResource::new(location.raw()))
            }
            LocationKind::Url(url) => self.url_handle(url, location.body()),
            LocationKind::Path(path) => FileResource::new(Path::new(path), &self.base_dir).into(),
        }
    }

    /// First root containing `path`; an unresolved handle when none does.
    fn find_first(&self, path: &str) -> ResourceHandle {
        for root in self.class_path.list_roots() {
            match scan::lookup(root, path) {
                Ok(Some(found)) => return found,
                Ok(None) => {}
                Err(e) => warn!("Skipping root {:?} for `{}`: {}", root.path(), path, e),
            }
        }
        ResourceHandle::Unresolved(UnresolvedResource::new(format!(
            "{CLASSPATH_URL_PREFIX}{path}"
        )))
    }

    /// `path` in every root that contains it.
    fn find_all(&self, path: &str) -> Result<Resources> {
        let mut resources = Resources::new();
        for root in self.class_path.list_roots() {
            if let Some(found) = scan::lookup(root, path)? {
                resources.insert(found);
            }
        }
        Ok(resources)
    }

    /// Matches from every root, scanned in parallel and merged by location.
    fn scan_all(&self, pattern: &CompiledPattern) -> Result<Resources> {
        let per_root = self
            .class_path
            .list_roots()
            .par_iter()
            .map(|root| scan::scan_root(root, pattern, self.options))
            .collect::<Result<Vec<_>>>()?;

        let mut resources = Resources::new();
        for found in per_root {
            for resource in found {
                resources.insert(resource);
            }
        }
        Ok(resources)
    }

    /// Matches from the first root that has any.
    fn scan_first(&self, pattern: &CompiledPattern) -> Result<Resources> {
        for root in self.class_path.list_roots() {
            let found = scan::scan_root(root, pattern, self.options)?;
            if !found.is_empty() {
                return Ok(found.into_iter().collect());
            }
        }
        Ok(Resources::new())
    }

    /// A filesystem path containing wildcards: everything up to the last `/`
    /// before the first wildcard is the directory to walk.
    fn resolve_file_pattern(&self, path: &str) -> Result<Resources> {
        let wildcard_at = path.find(['*', '?']).unwrap_or(path.len());
        let split = path[..wildcard_at].rfind('/').map_or(0, |i| i + 1);
        let (dir, sub_pattern) = path.split_at(split);

        let pattern = CompiledPattern::compile(sub_pattern)?;
        let dir = if dir.is_empty() {
            self.base_dir.clone()
        } else {
            self.base_dir.join(dir)
        };
        if !dir.is_dir() {
            debug!("Pattern directory {:?} does not exist", dir);
            return Ok(Resources::new());
        }

        let found = scan::scan_root(&Root::directory(dir), &pattern, self.options)?;
        Ok(found.into_iter().collect())
    }

    fn resolve_url_pattern(&self, url: &Url, body: &str) -> Result<Resources> {
        match url.scheme() {
            "file" => self.resolve_file_pattern(strip_authority(body)),
            "jar" => {
                let Some((archive, entry_pattern)) = self.split_jar_url(body) else {
                    warn!("Cannot resolve pattern in non-local archive URL {}", url);
                    return Ok(Resources::new());
                };
                let pattern = CompiledPattern::compile(entry_pattern)?;
                if !archive.is_file() {
                    return Ok(Resources::new());
                }
                let found = scan::scan_root(&Root::archive(archive), &pattern, self.options)?;
                Ok(found.into_iter().collect())
            }
            _ => Ok(std::iter::once(self.url_handle(url, body)).collect()),
        }
    }

    fn url_handle(&self, url: &Url, body: &str) -> ResourceHandle {
        match url.scheme() {
            "file" => match url.to_file_path() {
                Ok(path) => FileResource::from_absolute(&path).into(),
                Err(()) => ResourceHandle::Url(UrlResource::new(url.clone())),
            },
            "jar" => match self.split_jar_url(body) {
                Some((archive, entry)) => ArchiveEntryResource::new(&archive, &clean_path(entry)).into(),
                None => ResourceHandle::Url(UrlResource::new(url.clone())),
            },
            _ => ResourceHandle::Url(UrlResource::new(url.clone())),
        }
    }

    /// Split `file:/x.jar!/entry` into the canonical archive path and the
    /// entry part. `None` unless the archive is a local file.
    fn split_jar_url<'a>(&self, body: &'a str) -> Option<(PathBuf, &'a str)> {
        let (archive_url, entry) = body.split_once(JAR_URL_SEPARATOR)?;
        let archive = Url::parse(archive_url).ok()?;
        if archive.scheme() != "file" {
            return None;
        }
        let path = archive.to_file_path().ok()?;
        Some((canonical_path(&path, &self.base_dir), entry))
    }
}

impl Default for PathMatchingResolver {
    fn default() -> Self {
        Self::new(ClassPath::default())
    }
}

impl std::fmt::Debug for PathMatchingResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathMatchingResolver")
            .field("class_path", &self.class_path)
            .field("base_dir", &self.base_dir)
            .field("options", &self.options)
            .field("protocol_resolvers", &self.protocol_resolvers.len())
            .finish()
    }
}

impl ResourceLoader for PathMatchingResolver {
    type Handle = ResourceHandle;

    fn get_resource(&self, location: &str) -> ResourceHandle {
        self.resolve_single(&Location::parse(location))
    }
}

impl ResourcePatternResolver for PathMatchingResolver {
    fn get_resources(&self, location_pattern: &str) -> Result<Resources> {
        self.resolve(&Location::parse(location_pattern))
    }
}

/// `//host/path` → `/path`; anything else unchanged.
fn strip_authority(body: &str) -> &str {
    match body.strip_prefix("//") {
        Some(rest) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => body,
    }
}

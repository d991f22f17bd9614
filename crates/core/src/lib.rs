//! Resource location and pattern resolution.
//!
//! A [`PathMatchingResolver`] turns location strings into resource handles:
//!
//! - `classpath*:cfg/**/*.xml`: every match in every classpath root
//! - `classpath:cfg/app.xml`: the first root that has it
//! - `file:///etc/app/*.xml`, `jar:file:///lib/app.jar!/META-INF/*.xml`
//! - `conf/app.xml`: a path relative to the base directory
//!
//! Roots are directories or archive files; archives are read through their
//! central directory without extracting anything.

pub mod archive;
pub mod classpath;
pub mod config;
pub mod location;
pub mod logging;
pub mod pattern;
pub mod resolver;
pub mod resource;
pub mod scan;
pub mod util;

pub use classpath::{ClassPath, Root, RootKind};
pub use config::ResolverConfig;
pub use location::{Location, LocationKind};
pub use pattern::CompiledPattern;
pub use resloc_api::{ResourceError, Result};
pub use resolver::{PathMatchingResolver, Resources};
pub use resource::ResourceHandle;

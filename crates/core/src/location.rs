//! Classification of raw location strings.
//!
//! Rules are checked in order: `classpath*:`, `classpath:`, a URL scheme, and
//! finally a plain filesystem path. Parsing never fails. A string whose scheme
//! does not fit the URL grammar, or that the URL parser rejects, is taken as a
//! path.

use crate::pattern;
use crate::util::{clean_path, escapes_root};
use resloc_api::{CLASSPATH_ALL_URL_PREFIX, CLASSPATH_URL_PREFIX};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationKind {
    /// Absolute or relative filesystem path.
    Path(String),
    /// A fully qualified URL (`file:`, `jar:`, `https:`, ...).
    Url(Url),
    /// `classpath:` lookup; the first root containing the path wins.
    ClassPath(String),
    /// `classpath*:` lookup; every root contributes its matches.
    ClassPathAll(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    raw: String,
    kind: LocationKind,
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        let kind = if let Some(body) = raw.strip_prefix(CLASSPATH_ALL_URL_PREFIX) {
            LocationKind::ClassPathAll(clean_path(body))
        } else if let Some(body) = raw.strip_prefix(CLASSPATH_URL_PREFIX) {
            LocationKind::ClassPath(clean_path(body))
        } else if let Some(url) = parse_url(raw) {
            LocationKind::Url(url)
        } else {
            LocationKind::Path(raw.to_string())
        };

        Self {
            raw: raw.to_string(),
            kind,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &LocationKind {
        &self.kind
    }

    /// The part of the location patterns and lookups operate on.
    ///
    /// For URLs this is the raw scheme-specific part, so that `?` in a `file:`
    /// pattern is not mistaken for a query separator.
    pub fn body(&self) -> &str {
        match &self.kind {
            LocationKind::Path(path) => path,
            LocationKind::ClassPath(body) | LocationKind::ClassPathAll(body) => body,
            LocationKind::Url(url) => &self.raw[url.scheme().len() + 1..],
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        match &self.kind {
            LocationKind::Url(url) => Some(url.scheme()),
            _ => None,
        }
    }

    /// A classpath body that climbs above its root (`classpath:../x.xml`).
    /// Such locations name nothing inside any root.
    pub fn escapes_root(&self) -> bool {
        match &self.kind {
            LocationKind::ClassPath(body) | LocationKind::ClassPathAll(body) => escapes_root(body),
            _ => false,
        }
    }

    /// Whether the location contains wildcards that need pattern resolution.
    ///
    /// Only local schemes (`file:`, `jar:`) are ever treated as patterns.
    pub fn is_pattern(&self) -> bool {
        match &self.kind {
            LocationKind::Url(url) if !matches!(url.scheme(), "file" | "jar") => false,
            _ => pattern::is_pattern(self.body()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_url(raw: &str) -> Option<Url> {
    let (scheme, _) = raw.split_once(':')?;
    // Single letters are drive letters (`C:\data`), not schemes.
    if scheme.len() < 2 || !is_scheme(scheme) {
        return None;
    }
    Url::parse(raw).ok()
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

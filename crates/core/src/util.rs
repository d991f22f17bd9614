use std::path::{Component, Path, PathBuf};
use url::Url;

/// Normalize a `/`-separated path: drop empty and `.` segments, let `..` pop
/// the preceding segment. A leading `..` that has nothing to pop is kept.
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Lexically normalize a filesystem path without touching the disk.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Absolute, physical form of `path`: symlinks resolved when the path exists,
/// lexically normalized against `base` otherwise.
pub fn canonical_path(path: &Path, base: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    std::fs::canonicalize(&absolute).unwrap_or_else(|_| normalize_path(&absolute))
}

/// `file:` URL string for an absolute path.
pub fn file_location(path: &Path) -> String {
    Url::from_file_path(path)
        .map(String::from)
        .unwrap_or_else(|_| format!("file:{}", path.display()))
}

/// Relative path rendered with `/` separators, as patterns see it.
pub fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Whether a root-relative `/`-separated path could leave its root: it is
/// absolute or has a `..` segment.
pub fn escapes_root(relative: &str) -> bool {
    relative.starts_with('/') || relative.split('/').any(|s| s == "..")
}

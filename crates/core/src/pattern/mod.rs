//! Ant-style path patterns.
//!
//! Patterns are `/`-separated and case-sensitive:
//! - `?` matches one character within a segment
//! - `*` matches zero or more characters within a segment
//! - `**` as a whole segment matches zero or more segments
//!
//! There is no escaping, so a literal `*` or `?` cannot be matched.

mod glob;

use resloc_api::{ResourceError, Result};
use std::fmt;

pub use glob::matches_segment;

/// Whether `path` contains wildcard characters.
pub fn is_pattern(path: &str) -> bool {
    path.contains(['*', '?'])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// Single-segment wildcard (`*`, `?`).
    Glob(String),
    /// `**`
    AnyDepth,
}

impl Segment {
    fn parse(pattern: &str, raw: &str) -> Result<Self> {
        if raw == "**" {
            return Ok(Segment::AnyDepth);
        }
        if raw.contains("**") {
            return Err(ResourceError::PatternSyntax {
                pattern: pattern.to_string(),
                reason: format!("`**` must be a whole segment, found `{raw}`"),
            });
        }
        if is_pattern(raw) {
            Ok(Segment::Glob(raw.to_string()))
        } else {
            Ok(Segment::Literal(raw.to_string()))
        }
    }

    fn matches(&self, part: &str) -> bool {
        match self {
            Segment::Literal(literal) => literal == part,
            Segment::Glob(glob) => matches_segment(glob, part),
            Segment::AnyDepth => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    source: String,
    segments: Vec<Segment>,
    /// Number of leading literal segments.
    prefix_len: usize,
}

impl CompiledPattern {
    pub fn compile(pattern: &str) -> Result<Self> {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| Segment::parse(pattern, s))
            .collect::<Result<Vec<_>>>()?;

        let prefix_len = segments
            .iter()
            .take_while(|s| matches!(s, Segment::Literal(_)))
            .count();

        Ok(Self {
            source: pattern.to_string(),
            segments,
            prefix_len,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// False when every segment is literal; matching then reduces to an
    /// existence check of [`CompiledPattern::literal_path`].
    pub fn has_wildcards(&self) -> bool {
        self.prefix_len < self.segments.len()
    }

    /// The deterministic prefix: leading literal segments joined by `/`.
    pub fn prefix(&self) -> String {
        self.segments[..self.prefix_len]
            .iter()
            .filter_map(|s| match s {
                Segment::Literal(literal) => Some(literal.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The normalized path of a wildcard-free pattern.
    pub fn literal_path(&self) -> Option<String> {
        (!self.has_wildcards()).then(|| self.prefix())
    }

    pub fn matches(&self, path: &str) -> bool {
        self.advance(path).contains(&self.segments.len())
    }

    /// Whether some path below `dir` could still match. Used to prune
    /// directory descent.
    pub fn matches_start(&self, dir: &str) -> bool {
        self.advance(dir).iter().any(|&i| i < self.segments.len())
    }

    /// Pattern positions reachable after consuming every segment of `path`.
    fn advance(&self, path: &str) -> Vec<usize> {
        let mut states = self.closure(vec![0]);
        for part in path.split('/').filter(|p| !p.is_empty()) {
            let mut next = Vec::new();
            for &i in &states {
                let Some(segment) = self.segments.get(i) else {
                    continue;
                };
                if !segment.matches(part) {
                    continue;
                }
                let target = match segment {
                    Segment::AnyDepth => i,
                    _ => i + 1,
                };
                if !next.contains(&target) {
                    next.push(target);
                }
            }
            if next.is_empty() {
                return next;
            }
            states = self.closure(next);
        }
        states
    }

    /// `**` may match zero segments, so reaching it also reaches what follows.
    fn closure(&self, mut states: Vec<usize>) -> Vec<usize> {
        let mut i = 0;
        while i < states.len() {
            let state = states[i];
            if matches!(self.segments.get(state), Some(Segment::AnyDepth))
                && !states.contains(&(state + 1))
            {
                states.push(state + 1);
            }
            i += 1;
        }
        states
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

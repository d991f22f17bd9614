//! Location and pattern resolution.

mod engine;

pub use engine::{PathMatchingResolver, Resources};

use crate::resource::Resource;
use std::collections::HashMap;
use std::collections::hash_map;

/// The set of resources a location resolved to.
///
/// Keyed by canonical location: inserting a resource whose location is
/// already present keeps the first one. Iteration order is unspecified.
#[derive(Debug, Clone)]
pub struct ResolutionResult<H> {
    entries: HashMap<String, H>,
}

impl<H: Resource> ResolutionResult<H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a resource. Returns `false` if its location was already present.
    pub fn insert(&mut self, resource: H) -> bool {
        match self.entries.entry(resource.location().to_string()) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(slot) => {
                slot.insert(resource);
                true
            }
        }
    }

    /// Merge another result into this one.
    pub fn extend_from(&mut self, other: ResolutionResult<H>) {
        for resource in other.entries.into_values() {
            self.insert(resource);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, location: &str) -> bool {
        self.entries.contains_key(location)
    }

    pub fn get(&self, location: &str) -> Option<&H> {
        self.entries.get(location)
    }

    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.entries.values()
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Locations in lexical order, for callers that need a stable listing.
    pub fn sorted_locations(&self) -> Vec<&str> {
        let mut locations: Vec<&str> = self.locations().collect();
        locations.sort_unstable();
        locations
    }

    pub fn into_vec(self) -> Vec<H> {
        self.entries.into_values().collect()
    }
}

impl<H: Resource> Default for ResolutionResult<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Resource> PartialEq for ResolutionResult<H> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.locations().all(|l| other.contains(l))
    }
}

impl<H: Resource> Eq for ResolutionResult<H> {}

impl<H: Resource> FromIterator<H> for ResolutionResult<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        let mut result = Self::new();
        for resource in iter {
            result.insert(resource);
        }
        result
    }
}

impl<H: Resource> IntoIterator for ResolutionResult<H> {
    type Item = H;
    type IntoIter = hash_map::IntoValues<String, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

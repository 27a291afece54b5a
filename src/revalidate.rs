use dashmap::DashMap;

/// Generation counters for cached view paths. A mutation bumps the
/// counter for every path it invalidates; a renderer holding a page
/// compares generations to decide whether its copy is still fresh.
#[derive(Debug, Default)]
pub struct Revalidations {
    generations: DashMap<String, u64>,
}

impl Revalidations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` stale.
    pub fn revalidate(&self, path: &str) {
        let mut entry = self.generations.entry(path.to_string()).or_insert(0);
        *entry += 1;
        tracing::debug!(path, generation = *entry, "view path revalidated");
    }

    /// Current generation for `path`; 0 means never invalidated.
    pub fn generation(&self, path: &str) -> u64 {
        self.generations.get(path).map(|entry| *entry).unwrap_or(0)
    }
}

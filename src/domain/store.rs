use std::collections::HashSet;

/// Ordered set of user-curated completion candidates.
///
/// Values are kept exactly as given: no trimming, no normalization and no
/// case folding. Insertion order is preserved so enumeration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateStore {
    items: Vec<String>,
    index: HashSet<String>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `candidate` unless it is already present or empty.
    /// Returns `true` when the store changed.
    pub fn add(&mut self, candidate: impl Into<String>) -> bool {
        let candidate = candidate.into();
        if candidate.is_empty() || self.index.contains(&candidate) {
            return false;
        }
        self.index.insert(candidate.clone());
        self.items.push(candidate);
        true
    }

    /// Removes `candidate` if present. Returns `true` when the store changed.
    pub fn remove(&mut self, candidate: &str) -> bool {
        if !self.index.remove(candidate) {
            return false;
        }
        self.items.retain(|item| item != candidate);
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// Members starting with `prefix`, in store order. Case-sensitive; the
    /// empty prefix matches everything.
    pub fn query<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.items
            .iter()
            .map(String::as_str)
            .filter(move |item| item.starts_with(prefix))
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.items.clone()
    }

    /// Replaces the contents with `values`, keeping the first occurrence of
    /// each value.
    pub fn restore<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.clear();
        for value in values {
            self.add(value);
        }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.index.contains(candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<String> for CandidateStore {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut store = Self::new();
        store.restore(iter);
        store
    }
}

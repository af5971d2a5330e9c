//! Separating sets recorded by the adjacency search.

use rustc_hash::FxHashMap;

/// Unordered pair → the conditioning set that separated it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SepsetMap {
    sets: FxHashMap<(String, String), Vec<String>>,
}

impl SepsetMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, a: &str, b: &str, sepset: Vec<String>) {
        self.sets.insert(key(a, b), sepset);
    }

    pub fn get(&self, a: &str, b: &str) -> Option<&[String]> {
        self.sets.get(&key(a, b)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sets.keys().map(|(a, b)| (a.as_str(), b.as_str()))
    }
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_lookup() {
        let mut m = SepsetMap::new();
        m.set("X3", "X1", vec!["X2".into()]);
        assert_eq!(m.get("X1", "X3"), Some(&["X2".to_string()][..]));
        assert_eq!(m.get("X1", "X2"), None);
        assert_eq!(m.len(), 1);
    }
}

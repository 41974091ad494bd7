//! Activity id interning.
//!
//! Maps activity id strings to dense integer indices in input order, so the
//! passes can work on plain vectors and ties can be broken by index.

use rustc_hash::FxHashMap;

/// Dense activity index (position in the supplied activity list).
pub type ActivityIdx = u32;

/// Bidirectional mapping between activity ids and their input positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityIndex {
    by_id: FxHashMap<String, ActivityIdx>,
    ids: Vec<String>,
}

impl ActivityIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Register an id at the next input position.
    ///
    /// Returns `Err` with the index of the earlier registration when the id
    /// was already seen; the index is left unchanged in that case.
    pub fn insert(&mut self, id: &str) -> Result<ActivityIdx, ActivityIdx> {
        if let Some(&existing) = self.by_id.get(id) {
            return Err(existing);
        }
        let idx = self.ids.len() as ActivityIdx;
        self.ids.push(id.to_string());
        self.by_id.insert(id.to_string(), idx);
        Ok(idx)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<ActivityIdx> {
        self.by_id.get(id).copied()
    }

    #[inline]
    pub fn resolve(&self, idx: ActivityIdx) -> Option<&str> {
        self.ids.get(idx as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for ActivityIndex {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_input_positions() {
        let mut index = ActivityIndex::with_capacity(3);

        assert_eq!(index.insert("A"), Ok(0));
        assert_eq!(index.insert("B"), Ok(1));
        assert_eq!(index.insert("C"), Ok(2));

        assert_eq!(index.get("B"), Some(1));
        assert_eq!(index.resolve(2), Some("C"));
        assert_eq!(index.get("Z"), None);
        assert_eq!(index.resolve(7), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_duplicate_reports_first_position() {
        let mut index = ActivityIndex::default();
        index.insert("A").unwrap();
        index.insert("B").unwrap();

        assert_eq!(index.insert("A"), Err(0));
        assert_eq!(index.len(), 2); // duplicate not registered
    }
}

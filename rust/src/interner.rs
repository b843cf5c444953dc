//! Task name interning.
//!
//! Maps task names to dense integer handles so the graph, the sorter and the
//! passes work on `Vec`s indexed by handle instead of string-keyed maps.

use rustc_hash::FxHashMap;

/// Dense task handle (u32 for compact adjacency lists).
pub type TaskId = u32;

/// Two-way table between task names and [`TaskId`]s.
///
/// Handles are assigned in first-mention order and never reused.
#[derive(Debug, Clone)]
pub struct TaskNames {
    to_id: FxHashMap<String, TaskId>,
    from_id: Vec<String>,
}

impl TaskNames {
    /// Create a table with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_id: Vec::with_capacity(capacity),
        }
    }

    /// Intern a name, returning its handle and whether it was newly created.
    pub fn intern(&mut self, name: &str) -> (TaskId, bool) {
        if let Some(&id) = self.to_id.get(name) {
            return (id, false);
        }
        let id = self.from_id.len() as TaskId;
        self.from_id.push(name.to_string());
        self.to_id.insert(name.to_string(), id);
        (id, true)
    }

    /// Get the handle for a name, if it was ever mentioned.
    #[inline]
    pub fn get(&self, name: &str) -> Option<TaskId> {
        self.to_id.get(name).copied()
    }

    /// Get the name for a handle.
    #[inline]
    pub fn resolve(&self, id: TaskId) -> Option<&str> {
        self.from_id.get(id as usize).map(|s| s.as_str())
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.from_id.len()
    }
}

impl Default for TaskNames {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let mut names = TaskNames::with_capacity(4);

        let (a, new_a) = names.intern("design");
        let (b, new_b) = names.intern("build");
        let (a_again, new_again) = names.intern("design");

        assert!(new_a);
        assert!(new_b);
        assert!(!new_again);
        assert_eq!(a, a_again);
        assert_ne!(a, b);

        assert_eq!(names.resolve(a), Some("design"));
        assert_eq!(names.resolve(b), Some("build"));
        assert_eq!(names.get("build"), Some(b));
        assert_eq!(names.get("ship"), None);
        assert_eq!(names.resolve(7), None);
    }

    #[test]
    fn test_handles_are_dense() {
        let mut names = TaskNames::default();
        assert_eq!(names.len(), 0);

        for (expected, name) in ["a", "b", "c"].iter().enumerate() {
            let (id, _) = names.intern(name);
            assert_eq!(id as usize, expected);
        }
        assert_eq!(names.len(), 3);
    }
}

//! Task registry and dependency graph.
//!
//! Every task name gets a dense [`TaskId`]; durations and both adjacency
//! directions are stored in vectors indexed by that handle. A predecessor
//! that has not been registered yet is interned as a placeholder (no
//! duration) and filled in if the name is registered later.

use thiserror::Error;

use crate::interner::{TaskId, TaskNames};

/// Errors rejected at registration time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Task name must not be empty")]
    EmptyName,
    #[error("Task {task:?} has negative duration {duration}")]
    NegativeDuration { task: String, duration: i64 },
    #[error("Task {0:?} is already registered")]
    DuplicateTask(String),
    #[error("Task {task:?} lists predecessor {predecessor:?} more than once")]
    DuplicatePredecessor { task: String, predecessor: String },
}

/// Registered tasks plus successor/predecessor adjacency.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    names: TaskNames,
    /// Duration per handle; `None` marks a placeholder.
    durations: Vec<Option<i64>>,
    predecessors: Vec<Vec<TaskId>>,
    successors: Vec<Vec<TaskId>>,
    registration_order: Vec<TaskId>,
    edge_count: usize,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task and an edge from each predecessor to it.
    ///
    /// Predecessors may be registered later. On error the graph is unchanged.
    ///
    /// Besides an empty name or a negative duration, this rejects a name that
    /// is already registered ([`DuplicateTask`](ConfigurationError::DuplicateTask))
    /// and a predecessor listed twice in one call
    /// ([`DuplicatePredecessor`](ConfigurationError::DuplicatePredecessor)).
    /// Neither is silently merged.
    pub fn add_task<I, S>(
        &mut self,
        name: &str,
        duration: i64,
        predecessors: I,
    ) -> Result<TaskId, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        if duration < 0 {
            return Err(ConfigurationError::NegativeDuration {
                task: name.to_string(),
                duration,
            });
        }
        if self.id(name).is_some() {
            return Err(ConfigurationError::DuplicateTask(name.to_string()));
        }

        let preds: Vec<S> = predecessors.into_iter().collect();
        for (i, pred) in preds.iter().enumerate() {
            let pred = pred.as_ref();
            if pred.is_empty() {
                return Err(ConfigurationError::EmptyName);
            }
            if preds[..i].iter().any(|p| p.as_ref() == pred) {
                return Err(ConfigurationError::DuplicatePredecessor {
                    task: name.to_string(),
                    predecessor: pred.to_string(),
                });
            }
        }

        let id = self.slot(name);
        self.durations[id as usize] = Some(duration);
        for pred in &preds {
            let pred_id = self.slot(pred.as_ref());
            self.predecessors[id as usize].push(pred_id);
            self.successors[pred_id as usize].push(id);
            self.edge_count += 1;
        }
        self.registration_order.push(id);
        Ok(id)
    }

    /// Intern a name, growing the per-handle vectors for new handles.
    fn slot(&mut self, name: &str) -> TaskId {
        let (id, created) = self.names.intern(name);
        if created {
            self.durations.push(None);
            self.predecessors.push(Vec::new());
            self.successors.push(Vec::new());
        }
        id
    }

    /// Number of registered tasks (placeholders excluded).
    pub fn len(&self) -> usize {
        self.registration_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registration_order.is_empty()
    }

    /// Number of handles, placeholders included. Per-task vectors use this size.
    pub fn handle_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Handle of a registered task.
    pub fn id(&self, name: &str) -> Option<TaskId> {
        self.names.get(name).filter(|&id| self.is_registered(id))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.id(name).is_some()
    }

    #[inline]
    pub fn is_registered(&self, id: TaskId) -> bool {
        matches!(self.durations.get(id as usize), Some(Some(_)))
    }

    /// Name for a handle; empty for an unknown handle.
    #[inline]
    pub fn name(&self, id: TaskId) -> &str {
        self.names.resolve(id).unwrap_or_default()
    }

    /// Duration of a registered task.
    #[inline]
    pub fn duration(&self, id: TaskId) -> Option<i64> {
        self.durations.get(id as usize).copied().flatten()
    }

    #[inline]
    pub fn predecessors(&self, id: TaskId) -> &[TaskId] {
        self.predecessors
            .get(id as usize)
            .map_or(&[][..], Vec::as_slice)
    }

    #[inline]
    pub fn successors(&self, id: TaskId) -> &[TaskId] {
        self.successors.get(id as usize).map_or(&[][..], Vec::as_slice)
    }

    /// Registered tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.registration_order.iter().copied()
    }

    /// A registered task none of whose predecessors are registered.
    pub fn is_source(&self, id: TaskId) -> bool {
        self.is_registered(id)
            && self
                .predecessors(id)
                .iter()
                .all(|&pred| !self.is_registered(pred))
    }

    /// A registered task with no successors.
    pub fn is_sink(&self, id: TaskId) -> bool {
        self.is_registered(id) && self.successors(id).is_empty()
    }

    /// First `(task, predecessor)` edge, in registration order, whose
    /// predecessor was never registered.
    pub fn unknown_predecessor(&self) -> Option<(TaskId, TaskId)> {
        self.tasks().find_map(|id| {
            self.predecessors(id)
                .iter()
                .find(|&&pred| !self.is_registered(pred))
                .map(|&pred| (id, pred))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> TaskGraph {
        let mut graph = TaskGraph::new();
        graph.add_task("a", 1, Vec::<&str>::new()).unwrap();
        graph.add_task("b", 2, ["a"]).unwrap();
        graph.add_task("c", 3, ["a"]).unwrap();
        graph.add_task("d", 1, ["b", "c"]).unwrap();
        graph
    }

    #[test]
    fn test_adjacency_agrees() {
        let graph = diamond();
        let id = |n: &str| graph.id(n).unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.successors(id("a")), &[id("b"), id("c")]);
        assert_eq!(graph.predecessors(id("d")), &[id("b"), id("c")]);

        for task in graph.tasks() {
            for &succ in graph.successors(task) {
                assert!(graph.predecessors(succ).contains(&task));
            }
            for &pred in graph.predecessors(task) {
                assert!(graph.successors(pred).contains(&task));
            }
        }
    }

    #[test]
    fn test_sources_and_sinks() {
        let graph = diamond();
        let id = |n: &str| graph.id(n).unwrap();

        assert!(graph.is_source(id("a")));
        assert!(!graph.is_source(id("b")));
        assert!(graph.is_sink(id("d")));
        assert!(!graph.is_sink(id("c")));
    }

    #[test]
    fn test_forward_reference_fills_placeholder() {
        let mut graph = TaskGraph::new();
        graph.add_task("b", 2, ["a"]).unwrap();

        assert!(!graph.contains("a"));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.handle_count(), 2);
        let b = graph.id("b").unwrap();
        assert!(graph.is_source(b));
        assert_eq!(graph.unknown_predecessor().map(|(t, _)| t), Some(b));

        let a = graph.add_task("a", 1, Vec::<&str>::new()).unwrap();
        assert_eq!(graph.duration(a), Some(1));
        assert_eq!(graph.successors(a), &[b]);
        assert!(!graph.is_source(b));
        assert_eq!(graph.unknown_predecessor(), None);
    }

    #[test]
    fn test_registration_errors() {
        let mut graph = TaskGraph::new();
        assert_eq!(
            graph.add_task("", 1, Vec::<&str>::new()),
            Err(ConfigurationError::EmptyName)
        );
        assert_eq!(
            graph.add_task("a", -3, Vec::<&str>::new()),
            Err(ConfigurationError::NegativeDuration {
                task: "a".to_string(),
                duration: -3
            })
        );
        assert_eq!(
            graph.add_task("a", 1, [""]),
            Err(ConfigurationError::EmptyName)
        );

        graph.add_task("a", 1, Vec::<&str>::new()).unwrap();
        assert_eq!(
            graph.add_task("a", 5, Vec::<&str>::new()),
            Err(ConfigurationError::DuplicateTask("a".to_string()))
        );
        assert_eq!(
            graph.add_task("b", 1, ["a", "a"]),
            Err(ConfigurationError::DuplicatePredecessor {
                task: "b".to_string(),
                predecessor: "a".to_string()
            })
        );
    }

    #[test]
    fn test_failed_registration_leaves_graph_untouched() {
        let mut graph = TaskGraph::new();
        graph.add_task("a", 1, Vec::<&str>::new()).unwrap();
        let _ = graph.add_task("b", 1, ["x", "x"]);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.handle_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.names.get("x").is_none());
    }

    #[test]
    fn test_zero_duration_allowed() {
        let mut graph = TaskGraph::new();
        let milestone = graph.add_task("milestone", 0, Vec::<&str>::new()).unwrap();
        assert_eq!(graph.duration(milestone), Some(0));
    }
}

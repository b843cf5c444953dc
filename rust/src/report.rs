//! Computed schedule and critical path extraction.

use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::models::{ScheduledTask, TaskTiming};
use crate::paths::Paths;

/// Result of a successful [`crate::CriticalPathScheduler::compute`].
///
/// Borrows the scheduler's graph, so the graph cannot change while a report
/// is alive.
#[derive(Clone, Debug)]
pub struct ScheduleReport<'g> {
    graph: &'g TaskGraph,
    order: Vec<TaskId>,
    timings: Vec<TaskTiming>,
    project_duration: i64,
    path_limit: Option<usize>,
}

impl<'g> ScheduleReport<'g> {
    pub(crate) fn new(
        graph: &'g TaskGraph,
        order: Vec<TaskId>,
        timings: Vec<TaskTiming>,
        project_duration: i64,
        path_limit: Option<usize>,
    ) -> Self {
        Self {
            graph,
            order,
            timings,
            project_duration,
            path_limit,
        }
    }

    /// Minimum time to finish every task.
    pub fn project_duration(&self) -> i64 {
        self.project_duration
    }

    /// Task names in the topological order the passes used.
    pub fn order(&self) -> impl Iterator<Item = &'g str> + '_ {
        let graph = self.graph;
        self.order.iter().map(move |&id| graph.name(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn timing(&self, name: &str) -> Option<TaskTiming> {
        self.graph
            .id(name)
            .map(|id| self.timings[id as usize])
    }

    pub fn task(&self, name: &str) -> Option<ScheduledTask<'g>> {
        self.graph.id(name).map(|id| self.scheduled(id))
    }

    /// Every task with its timing, in topological order.
    pub fn tasks(&self) -> impl Iterator<Item = ScheduledTask<'g>> + '_ {
        self.order.iter().map(|&id| self.scheduled(id))
    }

    fn scheduled(&self, id: TaskId) -> ScheduledTask<'g> {
        ScheduledTask {
            name: self.graph.name(id),
            duration: self.graph.duration(id).unwrap_or(0),
            timing: self.timings[id as usize],
        }
    }

    pub fn slack(&self, name: &str) -> Option<i64> {
        self.timing(name).map(|t| t.slack())
    }

    pub fn is_critical(&self, name: &str) -> Option<bool> {
        self.timing(name).map(|t| t.is_critical())
    }

    /// Names of all zero-slack tasks, in topological order.
    ///
    /// This is a set of tasks, not a sequence: when several critical chains
    /// exist they are interleaved. Use [`Self::critical_paths`] for chains.
    pub fn critical_tasks(&self) -> Vec<&'g str> {
        self.order
            .iter()
            .filter(|&&id| self.timings[id as usize].is_critical())
            .map(|&id| self.graph.name(id))
            .collect()
    }

    /// Source-to-sink paths made only of critical tasks where each task
    /// starts exactly when its predecessor on the path finishes.
    ///
    /// Every yielded path lasts `project_duration`. The scheduler's path
    /// limit applies.
    pub fn critical_paths(&self) -> Paths<'_> {
        Paths::critical(self.graph, &self.timings).with_limit(self.path_limit)
    }
}

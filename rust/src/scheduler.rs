//! Critical path scheduler: registration, validation and computation.

use thiserror::Error;

use crate::config::ScheduleConfig;
use crate::graph::{ConfigurationError, TaskGraph};
use crate::interner::TaskId;
use crate::paths::Paths;
use crate::propagation::{propagate, DurationOverflow};
use crate::report::ScheduleReport;
use crate::topo::{topological_sort, CycleError};
use crate::{log_changes, log_checks, log_debug};

/// Errors that prevent a schedule from being computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Circular dependency among tasks: {}", .tasks.join(", "))]
    Cycle { tasks: Vec<String> },
    #[error("Task {task:?} depends on unknown task {predecessor:?}")]
    UnknownPredecessor { task: String, predecessor: String },
    #[error("Earliest finish of task {task:?} overflows")]
    DurationOverflow { task: String },
}

impl From<CycleError> for SchedulingError {
    fn from(err: CycleError) -> Self {
        SchedulingError::Cycle { tasks: err.tasks }
    }
}

impl From<DurationOverflow> for SchedulingError {
    fn from(err: DurationOverflow) -> Self {
        SchedulingError::DurationOverflow { task: err.task }
    }
}

/// CPM engine for one project.
///
/// Register tasks with [`add_task`](Self::add_task), then call
/// [`compute`](Self::compute) for timings and critical paths, or
/// [`enumerate_paths`](Self::enumerate_paths) to walk every path.
#[derive(Clone, Debug, Default)]
pub struct CriticalPathScheduler {
    graph: TaskGraph,
    config: ScheduleConfig,
}

impl CriticalPathScheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            graph: TaskGraph::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Register a task that starts after every listed predecessor finishes.
    ///
    /// Predecessors may be registered later, but must all exist by the time
    /// [`compute`](Self::compute) runs. Duplicate task names and predecessors
    /// repeated within one call are rejected; see [`TaskGraph::add_task`].
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
        let verbosity = self.config.verbosity;
        match self.graph.add_task(name, duration, predecessors) {
            Ok(id) => {
                log_checks!(
                    verbosity,
                    "Registered task {} (duration {}, {} predecessors)",
                    name,
                    duration,
                    self.graph.predecessors(id).len()
                );
                Ok(id)
            }
            Err(err) => {
                log_changes!(verbosity, "Rejected task {:?}: {}", name, err);
                Err(err)
            }
        }
    }

    /// Check predecessors, order the tasks and run both passes.
    pub fn compute(&self) -> Result<ScheduleReport<'_>, SchedulingError> {
        let verbosity = self.config.verbosity;
        let graph = &self.graph;

        if let Some((task, pred)) = graph.unknown_predecessor() {
            let err = SchedulingError::UnknownPredecessor {
                task: graph.name(task).to_string(),
                predecessor: graph.name(pred).to_string(),
            };
            log_changes!(verbosity, "Cannot schedule: {}", err);
            return Err(err);
        }

        let order = topological_sort(graph, self.config.tie_break).map_err(|err| {
            log_changes!(verbosity, "Cannot schedule: {}", err);
            SchedulingError::from(err)
        })?;
        log_debug!(
            verbosity,
            "Topological order ({} tie-break): {:?}",
            self.config.tie_break,
            order.iter().map(|&id| graph.name(id)).collect::<Vec<_>>()
        );

        let propagation = propagate(graph, &order).map_err(|err| {
            log_changes!(verbosity, "Cannot schedule: {}", err);
            SchedulingError::from(err)
        })?;
        let report = ScheduleReport::new(
            graph,
            order,
            propagation.timings,
            propagation.project_duration,
            self.config.path_limit,
        );

        for task in report.tasks() {
            log_checks!(
                verbosity,
                "  {}: ES={} EF={} LS={} LF={} slack={}",
                task.name,
                task.timing.earliest_start,
                task.timing.earliest_finish,
                task.timing.latest_start,
                task.timing.latest_finish,
                task.timing.slack()
            );
        }
        log_changes!(
            verbosity,
            "Scheduled {} tasks: project duration {}, critical tasks {:?}",
            report.len(),
            report.project_duration(),
            report.critical_tasks()
        );

        Ok(report)
    }

    /// Lazily walk every source-to-sink path with its total duration.
    ///
    /// Needs only the registered structure, not [`compute`](Self::compute).
    /// Each call starts a fresh walk; the configured path limit applies.
    pub fn enumerate_paths(&self) -> Paths<'_> {
        log_debug!(
            self.config.verbosity,
            "Enumerating paths over {} tasks (limit {:?})",
            self.graph.len(),
            self.config.path_limit
        );
        Paths::new(&self.graph).with_limit(self.config.path_limit)
    }
}

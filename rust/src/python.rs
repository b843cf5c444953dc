//! Python bindings for the CPM engine.

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{ScheduleConfig, TieBreak, UnknownTieBreak};
use crate::models::ScheduledTask;
use crate::scheduler::CriticalPathScheduler;

/// A task to register: name, duration and predecessor names.
#[pyclass(name = "TaskSpec")]
#[derive(Clone, Debug)]
pub struct PyTaskSpec {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: i64,
    #[pyo3(get, set)]
    pub predecessors: Vec<String>,
}

#[pymethods]
impl PyTaskSpec {
    #[new]
    #[pyo3(signature = (name, duration, predecessors=None))]
    fn new(name: String, duration: i64, predecessors: Option<Vec<String>>) -> Self {
        Self {
            name,
            duration,
            predecessors: predecessors.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskSpec(name={:?}, duration={}, predecessors={:?})",
            self.name, self.duration, self.predecessors
        )
    }
}

/// Scheduler configuration; `tie_break` is "registration" or "name".
#[pyclass(name = "ScheduleConfig")]
#[derive(Clone, Debug)]
pub struct PyScheduleConfig {
    #[pyo3(get, set)]
    pub tie_break: String,
    #[pyo3(get, set)]
    pub path_limit: Option<usize>,
    #[pyo3(get, set)]
    pub verbosity: u8,
}

#[pymethods]
impl PyScheduleConfig {
    #[new]
    #[pyo3(signature = (tie_break=None, path_limit=None, verbosity=None))]
    fn new(tie_break: Option<String>, path_limit: Option<usize>, verbosity: Option<u8>) -> Self {
        let defaults = ScheduleConfig::default();
        Self {
            tie_break: tie_break.unwrap_or_else(|| defaults.tie_break.to_string()),
            path_limit,
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(tie_break={:?}, path_limit={:?}, verbosity={})",
            self.tie_break, self.path_limit, self.verbosity
        )
    }
}

impl PyScheduleConfig {
    fn to_config(&self) -> PyResult<ScheduleConfig> {
        let tie_break: TieBreak = self
            .tie_break
            .parse()
            .map_err(|e: UnknownTieBreak| PyValueError::new_err(e.to_string()))?;
        Ok(ScheduleConfig {
            tie_break,
            path_limit: self.path_limit,
            verbosity: self.verbosity,
        })
    }
}

/// Computed timing of one task.
#[pyclass(name = "TaskTiming")]
#[derive(Clone, Debug)]
pub struct PyTaskTiming {
    #[pyo3(get)]
    pub duration: i64,
    #[pyo3(get)]
    pub earliest_start: i64,
    #[pyo3(get)]
    pub earliest_finish: i64,
    #[pyo3(get)]
    pub latest_start: i64,
    #[pyo3(get)]
    pub latest_finish: i64,
    #[pyo3(get)]
    pub slack: i64,
}

#[pymethods]
impl PyTaskTiming {
    fn __repr__(&self) -> String {
        format!(
            "TaskTiming(es={}, ef={}, ls={}, lf={}, slack={})",
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}

impl From<ScheduledTask<'_>> for PyTaskTiming {
    fn from(task: ScheduledTask<'_>) -> Self {
        Self {
            duration: task.duration,
            earliest_start: task.timing.earliest_start,
            earliest_finish: task.timing.earliest_finish,
            latest_start: task.timing.latest_start,
            latest_finish: task.timing.latest_finish,
            slack: task.timing.slack(),
        }
    }
}

/// Owned copy of a computed schedule.
#[pyclass(name = "ScheduleResult")]
#[derive(Clone, Debug, Default)]
pub struct PyScheduleResult {
    #[pyo3(get)]
    pub project_duration: i64,
    #[pyo3(get)]
    pub order: Vec<String>,
    #[pyo3(get)]
    pub timings: HashMap<String, PyTaskTiming>,
    #[pyo3(get)]
    pub critical_tasks: Vec<String>,
    #[pyo3(get)]
    pub critical_paths: Vec<Vec<String>>,
}

#[pymethods]
impl PyScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(project_duration={}, tasks={}, critical_tasks={:?})",
            self.project_duration,
            self.order.len(),
            self.critical_tasks
        )
    }
}

fn build_scheduler(
    tasks: &[PyTaskSpec],
    config: ScheduleConfig,
) -> PyResult<CriticalPathScheduler> {
    let mut scheduler = CriticalPathScheduler::new(config);
    for task in tasks {
        scheduler
            .add_task(&task.name, task.duration, &task.predecessors)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
    }
    Ok(scheduler)
}

/// Compute CPM timings, critical tasks and critical paths.
///
/// # Raises
/// * ValueError on invalid tasks, unknown predecessors, circular dependencies
///   or an earliest finish that overflows
#[pyfunction]
#[pyo3(signature = (tasks, config=None))]
fn compute_schedule(
    tasks: Vec<PyTaskSpec>,
    config: Option<PyScheduleConfig>,
) -> PyResult<PyScheduleResult> {
    let config = match config {
        Some(config) => config.to_config()?,
        None => ScheduleConfig::default(),
    };
    let scheduler = build_scheduler(&tasks, config)?;
    let report = scheduler
        .compute()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(PyScheduleResult {
        project_duration: report.project_duration(),
        order: report.order().map(str::to_string).collect(),
        timings: report
            .tasks()
            .map(|task| (task.name.to_string(), PyTaskTiming::from(task)))
            .collect(),
        critical_tasks: report
            .critical_tasks()
            .into_iter()
            .map(str::to_string)
            .collect(),
        critical_paths: report
            .critical_paths()
            .map(|path| path.tasks.into_iter().map(str::to_string).collect())
            .collect(),
    })
}

/// List every source-to-sink path as (task names, total duration).
///
/// # Raises
/// * ValueError on invalid tasks
#[pyfunction]
#[pyo3(signature = (tasks, limit=None))]
fn enumerate_paths(
    tasks: Vec<PyTaskSpec>,
    limit: Option<usize>,
) -> PyResult<Vec<(Vec<String>, i64)>> {
    let config = ScheduleConfig {
        path_limit: limit,
        ..ScheduleConfig::default()
    };
    let scheduler = build_scheduler(&tasks, config)?;
    Ok(scheduler
        .enumerate_paths()
        .map(|path| {
            (
                path.tasks.into_iter().map(str::to_string).collect(),
                path.duration,
            )
        })
        .collect())
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTaskSpec>()?;
    m.add_class::<PyScheduleConfig>()?;
    m.add_class::<PyTaskTiming>()?;
    m.add_class::<PyScheduleResult>()?;

    m.add_function(wrap_pyfunction!(compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(enumerate_paths, m)?)?;

    Ok(())
}

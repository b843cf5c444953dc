//! Critical Path Method (CPM) scheduling engine.
//!
//! Tasks with integer durations and precedence constraints form a DAG. The
//! engine orders them topologically, runs a forward pass (earliest start and
//! finish) and a backward pass (latest start and finish), reports zero-slack
//! tasks and critical paths, and lazily enumerates every source-to-sink path.
//!
//! ```
//! use cpm_rust::CriticalPathScheduler;
//!
//! let mut scheduler = CriticalPathScheduler::default();
//! scheduler.add_task("a", 1, Vec::<&str>::new()).unwrap();
//! scheduler.add_task("b", 2, ["a"]).unwrap();
//! scheduler.add_task("c", 3, ["a"]).unwrap();
//! scheduler.add_task("d", 1, ["b", "c"]).unwrap();
//!
//! let report = scheduler.compute().unwrap();
//! assert_eq!(report.project_duration(), 5);
//! assert_eq!(report.critical_tasks(), vec!["a", "c", "d"]);
//! assert_eq!(scheduler.enumerate_paths().count(), 2);
//! ```
//!
//! With the `python` feature the engine is also exposed as a Python module.

pub mod config;
pub mod graph;
mod interner;
pub mod logging;
mod models;
pub mod paths;
pub mod propagation;
mod report;
mod scheduler;
pub mod topo;

#[cfg(feature = "python")]
mod python;

pub use config::{ScheduleConfig, TieBreak, UnknownTieBreak};
pub use graph::{ConfigurationError, TaskGraph};
pub use interner::TaskId;
pub use models::{ScheduledTask, TaskPath, TaskTiming};
pub use paths::Paths;
pub use propagation::DurationOverflow;
pub use report::ScheduleReport;
pub use scheduler::{CriticalPathScheduler, SchedulingError};
pub use topo::CycleError;

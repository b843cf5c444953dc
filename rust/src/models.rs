//! Core data types for computed schedules.

/// Per-task timing produced by the forward and backward passes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: i64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: i64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: i64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: i64,
}

impl TaskTiming {
    /// Slack = latest_start - earliest_start.
    pub fn slack(&self) -> i64 {
        self.latest_start - self.earliest_start
    }

    pub fn is_critical(&self) -> bool {
        self.earliest_start == self.latest_start
    }
}

/// A registered task together with its computed timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTask<'g> {
    pub name: &'g str,
    pub duration: i64,
    pub timing: TaskTiming,
}

/// One source-to-sink path and the sum of its task durations (saturating at
/// `i64::MAX`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskPath<'g> {
    pub tasks: Vec<&'g str>,
    pub duration: i64,
}

impl TaskPath<'_> {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

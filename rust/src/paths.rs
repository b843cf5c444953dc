//! Lazy depth-first enumeration of source-to-sink paths.
//!
//! The number of paths in a DAG can grow exponentially with its depth, so
//! paths are produced one at a time from an explicit stack instead of being
//! collected up front. Dropping the iterator (or setting a limit) bounds the
//! work.

use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::models::{TaskPath, TaskTiming};

/// A task on the current path and the index of its next successor to try.
#[derive(Clone, Copy, Debug)]
struct Frame {
    task: TaskId,
    next_successor: usize,
    /// Duration of the path up to and including `task`, saturating at `i64::MAX`.
    total: i64,
}

/// Iterator over simple source-to-sink paths.
///
/// Sources are visited in registration order and successors in the order
/// they were declared. Successors already on the current path are skipped,
/// so a cyclic graph cannot trap the walk; cyclic branches simply never
/// reach a sink. Path durations saturate at `i64::MAX`.
pub struct Paths<'g> {
    graph: &'g TaskGraph,
    sources: Vec<TaskId>,
    next_source: usize,
    stack: Vec<Frame>,
    on_path: Vec<bool>,
    /// When set, only critical tasks joined by tight edges are followed.
    critical: Option<&'g [TaskTiming]>,
    limit: Option<usize>,
    emitted: usize,
}

impl<'g> Paths<'g> {
    /// Enumerate every source-to-sink path of `graph`.
    pub fn new(graph: &'g TaskGraph) -> Self {
        let sources = graph.tasks().filter(|&id| graph.is_source(id)).collect();
        Self {
            graph,
            sources,
            next_source: 0,
            stack: Vec::new(),
            on_path: vec![false; graph.handle_count()],
            critical: None,
            limit: None,
            emitted: 0,
        }
    }

    /// Enumerate only critical paths: zero-slack tasks where each step
    /// starts exactly when the previous task finishes.
    pub fn critical(graph: &'g TaskGraph, timings: &'g [TaskTiming]) -> Self {
        let mut paths = Self::new(graph);
        paths
            .sources
            .retain(|&id| timings[id as usize].is_critical());
        paths.critical = Some(timings);
        paths
    }

    /// Stop after `limit` paths.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    fn follows(&self, from: TaskId, to: TaskId) -> bool {
        if self.on_path[to as usize] || !self.graph.is_registered(to) {
            return false;
        }
        match self.critical {
            Some(timings) => {
                let to_timing = timings[to as usize];
                to_timing.is_critical()
                    && timings[from as usize].earliest_finish == to_timing.earliest_start
            }
            None => true,
        }
    }

    fn enter(&mut self, task: TaskId) {
        let before = self.stack.last().map_or(0, |frame| frame.total);
        self.stack.push(Frame {
            task,
            next_successor: 0,
            total: before.saturating_add(self.graph.duration(task).unwrap_or(0)),
        });
        self.on_path[task as usize] = true;
    }

    fn leave(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.on_path[frame.task as usize] = false;
        }
    }

    fn current_path(&self) -> TaskPath<'g> {
        let graph = self.graph;
        TaskPath {
            tasks: self.stack.iter().map(|frame| graph.name(frame.task)).collect(),
            duration: self.stack.last().map_or(0, |frame| frame.total),
        }
    }
}

impl<'g> Iterator for Paths<'g> {
    type Item = TaskPath<'g>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.limit.is_some_and(|limit| self.emitted >= limit) {
            return None;
        }

        let graph = self.graph;
        loop {
            let Some(Frame {
                task,
                next_successor,
                ..
            }) = self.stack.last().copied()
            else {
                let source = *self.sources.get(self.next_source)?;
                self.next_source += 1;
                self.enter(source);
                continue;
            };

            let successors = graph.successors(task);
            if successors.is_empty() {
                let path = self.current_path();
                self.leave();
                self.emitted += 1;
                return Some(path);
            }

            let next = successors[next_successor..]
                .iter()
                .position(|&succ| self.follows(task, succ))
                .map(|offset| next_successor + offset);

            match next {
                Some(index) => {
                    if let Some(frame) = self.stack.last_mut() {
                        frame.next_successor = index + 1;
                    }
                    self.enter(successors[index]);
                }
                None => self.leave(),
            }
        }
    }
}

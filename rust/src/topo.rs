//! Topological ordering with Kahn's algorithm.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use thiserror::Error;

use crate::config::TieBreak;
use crate::graph::TaskGraph;
use crate::interner::TaskId;

/// The graph has at least one cycle; `tasks` could not be ordered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Circular dependency among tasks: {}", .tasks.join(", "))]
pub struct CycleError {
    /// Names of the unordered tasks, sorted.
    pub tasks: Vec<String>,
}

/// Ready tasks waiting to be emitted.
enum ReadyQueue<'g> {
    Fifo(VecDeque<TaskId>),
    ByName(BinaryHeap<Reverse<(&'g str, TaskId)>>),
}

impl<'g> ReadyQueue<'g> {
    fn new(tie_break: TieBreak) -> Self {
        match tie_break {
            TieBreak::Registration => Self::Fifo(VecDeque::new()),
            TieBreak::Name => Self::ByName(BinaryHeap::new()),
        }
    }

    fn push(&mut self, graph: &'g TaskGraph, id: TaskId) {
        match self {
            Self::Fifo(queue) => queue.push_back(id),
            Self::ByName(heap) => heap.push(Reverse((graph.name(id), id))),
        }
    }

    fn pop(&mut self) -> Option<TaskId> {
        match self {
            Self::Fifo(queue) => queue.pop_front(),
            Self::ByName(heap) => heap.pop().map(|Reverse((_, id))| id),
        }
    }
}

/// Order every registered task so each edge points forward.
///
/// Edges from placeholders are not counted; callers reject unknown
/// predecessors before sorting.
pub fn topological_sort(
    graph: &TaskGraph,
    tie_break: TieBreak,
) -> Result<Vec<TaskId>, CycleError> {
    let mut in_degree = vec![0usize; graph.handle_count()];
    for id in graph.tasks() {
        in_degree[id as usize] = graph
            .predecessors(id)
            .iter()
            .filter(|&&pred| graph.is_registered(pred))
            .count();
    }

    let mut ready = ReadyQueue::new(tie_break);
    for id in graph.tasks() {
        if in_degree[id as usize] == 0 {
            ready.push(graph, id);
        }
    }

    let mut order: Vec<TaskId> = Vec::with_capacity(graph.len());
    while let Some(id) = ready.pop() {
        order.push(id);
        for &succ in graph.successors(id) {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                ready.push(graph, succ);
            }
        }
    }

    if order.len() != graph.len() {
        let mut placed = vec![false; graph.handle_count()];
        for &id in &order {
            placed[id as usize] = true;
        }
        let mut tasks: Vec<String> = graph
            .tasks()
            .filter(|&id| !placed[id as usize])
            .map(|id| graph.name(id).to_string())
            .collect();
        tasks.sort();
        return Err(CycleError { tasks });
    }

    Ok(order)
}

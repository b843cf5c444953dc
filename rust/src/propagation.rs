//! Forward and backward passes over a topological order.

use thiserror::Error;

use crate::graph::TaskGraph;
use crate::interner::TaskId;
use crate::models::TaskTiming;

/// A task's earliest finish does not fit in an `i64`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Earliest finish of task {task:?} overflows")]
pub struct DurationOverflow {
    pub task: String,
}

/// Output of both passes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Propagation {
    /// Timing per handle (placeholders keep the zero default).
    pub timings: Vec<TaskTiming>,
    /// Maximum earliest finish over all sink tasks.
    pub project_duration: i64,
}

/// Compute earliest start/finish for every task in `order`.
///
/// A task starts when its last predecessor finishes; sources start at 0.
pub fn forward_pass(
    graph: &TaskGraph,
    order: &[TaskId],
    timings: &mut [TaskTiming],
) -> Result<(), DurationOverflow> {
    for &id in order {
        let earliest_start = graph
            .predecessors(id)
            .iter()
            .map(|&pred| timings[pred as usize].earliest_finish)
            .max()
            .unwrap_or(0);
        let timing = &mut timings[id as usize];
        timing.earliest_start = earliest_start;
        timing.earliest_finish = earliest_start
            .checked_add(graph.duration(id).unwrap_or(0))
            .ok_or_else(|| DurationOverflow {
                task: graph.name(id).to_string(),
            })?;
    }
    Ok(())
}

/// Project duration: the latest earliest finish among tasks with no successors.
pub fn project_duration(graph: &TaskGraph, order: &[TaskId], timings: &[TaskTiming]) -> i64 {
    order
        .iter()
        .filter(|&&id| graph.successors(id).is_empty())
        .map(|&id| timings[id as usize].earliest_finish)
        .max()
        .unwrap_or(0)
}

/// Compute latest start/finish for every task in `order`, walking it backward.
///
/// Sinks must finish by `project_duration`; every other task must finish
/// before its earliest-needed successor's latest start. After a successful
/// forward pass `LF >= EF >= duration`, so the subtraction cannot overflow.
pub fn backward_pass(
    graph: &TaskGraph,
    order: &[TaskId],
    project_duration: i64,
    timings: &mut [TaskTiming],
) {
    for &id in order.iter().rev() {
        let latest_finish = graph
            .successors(id)
            .iter()
            .map(|&succ| timings[succ as usize].latest_start)
            .min()
            .unwrap_or(project_duration);
        let timing = &mut timings[id as usize];
        timing.latest_finish = latest_finish;
        timing.latest_start = latest_finish - graph.duration(id).unwrap_or(0);
    }
}

/// Run both passes over an already validated topological order.
pub fn propagate(
    graph: &TaskGraph,
    order: &[TaskId],
) -> Result<Propagation, DurationOverflow> {
    let mut timings = vec![TaskTiming::default(); graph.handle_count()];
    forward_pass(graph, order, &mut timings)?;
    let project_duration = project_duration(graph, order, &timings);
    backward_pass(graph, order, project_duration, &mut timings);
    Ok(Propagation {
        timings,
        project_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TieBreak;
    use crate::topo::topological_sort;

    fn build(specs: &[(&str, i64, &[&str])]) -> TaskGraph {
        let mut graph = TaskGraph::new();
        for &(name, duration, preds) in specs {
            graph.add_task(name, duration, preds.iter()).unwrap();
        }
        graph
    }

    fn run(graph: &TaskGraph) -> Propagation {
        let order = topological_sort(graph, TieBreak::Registration).unwrap();
        propagate(graph, &order).unwrap()
    }

    fn timing(graph: &TaskGraph, result: &Propagation, name: &str) -> TaskTiming {
        result.timings[graph.id(name).unwrap() as usize]
    }

    #[test]
    fn test_diamond_timings() {
        let graph = build(&[
            ("a", 1, &[]),
            ("b", 2, &["a"]),
            ("c", 3, &["a"]),
            ("d", 1, &["b", "c"]),
        ]);
        let result = run(&graph);

        assert_eq!(result.project_duration, 5);
        let expect = [
            ("a", 0, 1, 0, 1),
            ("b", 1, 3, 2, 4),
            ("c", 1, 4, 1, 4),
            ("d", 4, 5, 4, 5),
        ];
        for (name, es, ef, ls, lf) in expect {
            assert_eq!(
                timing(&graph, &result, name),
                TaskTiming {
                    earliest_start: es,
                    earliest_finish: ef,
                    latest_start: ls,
                    latest_finish: lf,
                },
                "timing of {}",
                name
            );
        }
    }

    #[test]
    fn test_multiple_sinks_use_longest_finish() {
        // "long" is registered first, so it is not last in the order
        let graph = build(&[("long", 3, &[]), ("short", 1, &[])]);
        let order = topological_sort(&graph, TieBreak::Registration).unwrap();
        assert_eq!(graph.name(*order.last().unwrap()), "short");

        let result = propagate(&graph, &order).unwrap();
        assert_eq!(result.project_duration, 3);

        let long = timing(&graph, &result, "long");
        assert_eq!(long.latest_start, 0);
        assert_eq!(long.latest_finish, 3);

        let short = timing(&graph, &result, "short");
        assert_eq!(short.latest_start, 2);
        assert_eq!(short.latest_finish, 3);
        assert_eq!(short.slack(), 2);
    }

    #[test]
    fn test_latest_finish_takes_min_successor_start() {
        // a feeds both a long branch and a short branch that ends early
        let graph = build(&[
            ("a", 2, &[]),
            ("slow", 5, &["a"]),
            ("fast", 1, &["a"]),
            ("join", 1, &["slow"]),
        ]);
        let result = run(&graph);

        assert_eq!(result.project_duration, 8);
        let a = timing(&graph, &result, "a");
        assert_eq!(a.latest_finish, 2);
        assert!(a.is_critical());

        let fast = timing(&graph, &result, "fast");
        assert_eq!(fast.latest_finish, 8);
        assert_eq!(fast.slack(), 5);
    }

    #[test]
    fn test_zero_duration_milestone() {
        let graph = build(&[
            ("kickoff", 0, &[]),
            ("work", 4, &["kickoff"]),
            ("done", 0, &["work"]),
        ]);
        let result = run(&graph);

        assert_eq!(result.project_duration, 4);
        let done = timing(&graph, &result, "done");
        assert_eq!(done.earliest_start, 4);
        assert_eq!(done.earliest_finish, 4);
        assert!(done.is_critical());
    }

    #[test]
    fn test_empty_order() {
        let graph = TaskGraph::new();
        let result = propagate(&graph, &[]).unwrap();
        assert_eq!(result.project_duration, 0);
        assert!(result.timings.is_empty());
    }

    #[test]
    fn test_earliest_finish_overflow_is_reported() {
        let graph = build(&[("a", i64::MAX, &[]), ("b", 1, &["a"])]);
        let order = topological_sort(&graph, TieBreak::Registration).unwrap();
        assert_eq!(
            propagate(&graph, &order),
            Err(DurationOverflow {
                task: "b".to_string()
            })
        );
    }

    #[test]
    fn test_max_duration_without_successors_fits() {
        let graph = build(&[("a", i64::MAX, &[]), ("b", 1, &[])]);
        let result = run(&graph);
        assert_eq!(result.project_duration, i64::MAX);
        assert_eq!(timing(&graph, &result, "b").slack(), i64::MAX - 1);
    }
}

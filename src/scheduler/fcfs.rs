//! First-come-first-served policy.
//!
//! # Algorithm
//!
//! 1. Order processes by arrival time, ties by input position.
//! 2. Dispatch each in that order at `max(previous completion, arrival)`.
//! 3. Run it to completion; record an idle gap if the CPU waited.
//!
//! # Complexity
//! O(n log n) for the ordering, O(n) for the dispatch pass.

use log::trace;

use super::Policy;
use crate::dispatching::{rules, Candidate, RuleEngine};
use crate::error::SimulationError;
use crate::models::{SimulationState, Timeline};

/// Non-preemptive first-come-first-served.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn run(
        &self,
        state: &mut SimulationState<'_>,
        timeline: &mut Timeline,
    ) -> Result<(), SimulationError> {
        let processes = state.processes();
        let all: Vec<usize> = (0..processes.len()).collect();
        let candidates = Candidate::collect(state, &all);
        let engine = RuleEngine::new().with_rule(rules::ArrivalOrder);
        let order: Vec<usize> = engine
            .sort_indices(&candidates)
            .into_iter()
            .map(|pos| candidates[pos].index)
            .collect();

        let mut clock = 0;
        for idx in order {
            let process = &processes[idx];
            let start = clock.max(process.arrival_time);
            timeline.record_idle(clock, start);

            let end = start + process.burst_time;
            trace!("{} runs [{start}, {end})", process.name);
            state.dispatch(idx, start, end);
            timeline.record_process(&process.name, start, end);
            clock = end;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, Subject, TimelineEntry};

    fn run(processes: &[Process]) -> (Vec<crate::models::ProcessState>, Timeline) {
        let mut state = SimulationState::new(processes);
        let mut timeline = Timeline::new();
        Fcfs.run(&mut state, &mut timeline).unwrap();
        (state.into_states(), timeline)
    }

    #[test]
    fn test_fcfs_reference_input() {
        let processes = vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 2, 4),
            Process::new("P3", 4, 1),
            Process::new("P4", 5, 4),
        ];
        let (states, timeline) = run(&processes);
        let completions: Vec<_> = states.iter().map(|s| s.completion_time).collect();
        assert_eq!(completions, vec![Some(7), Some(11), Some(12), Some(16)]);
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline.idle_time(), 0);
    }

    #[test]
    fn test_fcfs_arrival_ties_keep_input_order() {
        let processes = vec![
            Process::new("B", 0, 2),
            Process::new("A", 0, 1),
            Process::new("C", 0, 3),
        ];
        let (_, timeline) = run(&processes);
        let names: Vec<_> = timeline
            .entries
            .iter()
            .map(|e| e.subject.to_string())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_fcfs_unsorted_input_and_idle_gap() {
        let processes = vec![Process::new("late", 10, 2), Process::new("early", 1, 3)];
        let (states, timeline) = run(&processes);
        assert_eq!(states[1].start_time, Some(1));
        assert_eq!(states[1].completion_time, Some(4));
        assert_eq!(states[0].start_time, Some(10));
        assert_eq!(
            timeline.sorted(),
            vec![
                TimelineEntry::new(Subject::Idle, 0, 1),
                TimelineEntry::new(Subject::process("early"), 1, 4),
                TimelineEntry::new(Subject::Idle, 4, 10),
                TimelineEntry::new(Subject::process("late"), 10, 12),
            ]
        );
    }

    #[test]
    fn test_fcfs_empty() {
        let (states, timeline) = run(&[]);
        assert!(states.is_empty());
        assert!(timeline.is_empty());
    }
}

//! Non-preemptive shortest-job-first policy.
//!
//! # Algorithm
//!
//! 1. Collect processes that have arrived and are not completed.
//! 2. If none, jump to the next arrival and record the idle gap.
//! 3. Otherwise pick the smallest burst time; ties go to the earliest
//!    input position among the available set.
//! 4. Run it to completion and repeat.
//!
//! # Complexity
//! O(n²): each of the n decisions scans the process set.

use log::trace;

use super::{idle_until_next_arrival, Policy};
use crate::dispatching::{rules, Candidate, RuleEngine};
use crate::error::SimulationError;
use crate::models::{SimulationState, Timeline};

/// Non-preemptive shortest-job-first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Policy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn run(
        &self,
        state: &mut SimulationState<'_>,
        timeline: &mut Timeline,
    ) -> Result<(), SimulationError> {
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        let mut clock = 0;

        while !state.all_completed() {
            let available = state.available(clock);
            let candidates = Candidate::collect(state, &available);
            let Some(selected) = engine.select(&candidates) else {
                match idle_until_next_arrival(state, timeline, clock) {
                    Some(next) => {
                        clock = next;
                        continue;
                    }
                    None => break,
                }
            };

            let end = clock + selected.remaining;
            trace!("{} runs [{clock}, {end})", selected.process.name);
            state.dispatch(selected.index, clock, end);
            timeline.record_process(&selected.process.name, clock, end);
            clock = end;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn run(processes: &[Process]) -> (Vec<crate::models::ProcessState>, Timeline) {
        let mut state = SimulationState::new(processes);
        let mut timeline = Timeline::new();
        Sjf.run(&mut state, &mut timeline).unwrap();
        (state.into_states(), timeline)
    }

    fn order(timeline: &Timeline) -> Vec<String> {
        timeline
            .without_idle()
            .iter()
            .map(|e| e.subject.to_string())
            .collect()
    }

    #[test]
    fn test_sjf_reference_input() {
        let processes = vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 2, 4),
            Process::new("P3", 4, 1),
            Process::new("P4", 5, 4),
        ];
        let (states, timeline) = run(&processes);

        // t=0 only P1; t=7 P3 (burst 1); P2 and P4 tie on 4 → P2 by input order
        assert_eq!(order(&timeline), vec!["P1", "P3", "P2", "P4"]);
        let completions: Vec<_> = states.iter().map(|s| s.completion_time).collect();
        assert_eq!(completions, vec![Some(7), Some(12), Some(8), Some(16)]);
    }

    #[test]
    fn test_sjf_tie_uses_input_order_not_arrival() {
        // X arrives later but appears first in the input
        let processes = vec![
            Process::new("blocker", 0, 5),
            Process::new("X", 3, 2),
            Process::new("Y", 1, 2),
        ];
        let (_, timeline) = run(&processes);
        assert_eq!(order(&timeline), vec!["blocker", "X", "Y"]);
    }

    #[test]
    fn test_sjf_non_preemptive() {
        // Short job arrives while the long one runs; it must wait
        let processes = vec![Process::new("long", 0, 10), Process::new("short", 1, 1)];
        let (states, _) = run(&processes);
        assert_eq!(states[0].completion_time, Some(10));
        assert_eq!(states[1].start_time, Some(10));
    }

    #[test]
    fn test_sjf_idle_jump() {
        let processes = vec![Process::new("A", 4, 2), Process::new("B", 9, 1)];
        let (states, timeline) = run(&processes);
        assert_eq!(states[0].start_time, Some(4));
        assert_eq!(states[1].start_time, Some(9));
        assert_eq!(timeline.idle_time(), 4 + 3);
        assert_eq!(timeline.check_tiling(), Ok(()));
    }
}

//! Round-robin policy with a fixed time quantum.
//!
//! # Algorithm
//!
//! 1. Admit every process with `arrival_time <= clock` to the back of the
//!    FIFO ready queue, in arrival order (ties by input position).
//! 2. Pop the front process and run it for `min(quantum, remaining)`.
//! 3. Admit arrivals that happened during the slice *before* re-queuing
//!    the process that just ran.
//! 4. Re-queue it if unfinished.
//! 5. With an empty queue and pending arrivals, jump to the next arrival.
//!
//! The ready queue is owned by the run, so runs are independent and
//! replayable.

use std::collections::VecDeque;

use log::trace;

use super::Policy;
use crate::dispatching::{rules, Candidate, RuleEngine};
use crate::error::SimulationError;
use crate::models::{Process, SimulationState, Ticks, Timeline};
use crate::validation::{validate_quantum, ValidationResult};

/// Default time quantum.
pub const DEFAULT_QUANTUM: Ticks = 2;

/// Preemptive round-robin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    /// Creates a round-robin policy. The quantum is checked by
    /// [`Policy::validate`] before the run starts.
    pub fn new(quantum: Ticks) -> Self {
        Self { quantum }
    }

    /// The configured quantum.
    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTUM)
    }
}

/// Arrival-ordered admission cursor.
struct Admission {
    order: Vec<usize>,
    next: usize,
}

impl Admission {
    fn new(state: &SimulationState<'_>) -> Self {
        let all: Vec<usize> = (0..state.len()).collect();
        let candidates = Candidate::collect(state, &all);
        let engine = RuleEngine::new().with_rule(rules::ArrivalOrder);
        let order = engine
            .sort_indices(&candidates)
            .into_iter()
            .map(|pos| candidates[pos].index)
            .collect();
        Self { order, next: 0 }
    }

    /// Moves every process arrived by `clock` to the back of `ready`.
    fn admit(&mut self, processes: &[Process], clock: Ticks, ready: &mut VecDeque<usize>) {
        while let Some(&idx) = self.order.get(self.next) {
            if processes[idx].arrival_time > clock {
                break;
            }
            ready.push_back(idx);
            self.next += 1;
        }
    }

    fn next_arrival(&self, processes: &[Process]) -> Option<Ticks> {
        self.order
            .get(self.next)
            .map(|&idx| processes[idx].arrival_time)
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn validate(&self) -> ValidationResult {
        validate_quantum(self.quantum)
    }

    fn run(
        &self,
        state: &mut SimulationState<'_>,
        timeline: &mut Timeline,
    ) -> Result<(), SimulationError> {
        self.validate()?;

        let processes = state.processes();
        let mut admission = Admission::new(state);
        let mut ready: VecDeque<usize> = VecDeque::new();
        let mut clock = 0;

        loop {
            admission.admit(processes, clock, &mut ready);

            let Some(idx) = ready.pop_front() else {
                match admission.next_arrival(processes) {
                    Some(next) => {
                        trace!("idle [{clock}, {next})");
                        timeline.record_idle(clock, next);
                        clock = next;
                        continue;
                    }
                    None => break,
                }
            };

            let slice = self.quantum.min(state.state(idx).remaining);
            let start = clock;
            clock += slice;
            trace!("{} runs [{start}, {clock})", processes[idx].name);
            let completed = state.dispatch(idx, start, clock);
            timeline.record_process(&processes[idx].name, start, clock);

            admission.admit(processes, clock, &mut ready);
            if !completed {
                ready.push_back(idx);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Subject, TimelineEntry};

    fn reference() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 2, 4),
            Process::new("P3", 4, 1),
            Process::new("P4", 5, 4),
        ]
    }

    fn run(rr: RoundRobin, processes: &[Process]) -> (Vec<crate::models::ProcessState>, Timeline) {
        let mut state = SimulationState::new(processes);
        let mut timeline = Timeline::new();
        rr.run(&mut state, &mut timeline).unwrap();
        (state.into_states(), timeline)
    }

    fn entry(name: &str, start: Ticks, end: Ticks) -> TimelineEntry {
        TimelineEntry::new(Subject::process(name), start, end)
    }

    #[test]
    fn test_rr_reference_timeline() {
        let (states, timeline) = run(RoundRobin::default(), &reference());
        assert_eq!(
            timeline.entries,
            vec![
                entry("P1", 0, 2),
                entry("P2", 2, 4),
                entry("P1", 4, 6),
                // P3 arrived at 4, before P1 was re-queued at 6
                entry("P3", 6, 7),
                entry("P2", 7, 9),
                entry("P4", 9, 11),
                entry("P1", 11, 13),
                entry("P4", 13, 15),
                entry("P1", 15, 16),
            ]
        );
        let completions: Vec<_> = states.iter().map(|s| s.completion_time).collect();
        assert_eq!(completions, vec![Some(16), Some(9), Some(7), Some(15)]);
        assert_eq!(states[3].start_time, Some(9));
    }

    #[test]
    fn test_rr_arrival_during_slice_precedes_requeue() {
        // B arrives exactly when A's slice ends; B must run next
        let processes = vec![Process::new("A", 0, 4), Process::new("B", 2, 1)];
        let (_, timeline) = run(RoundRobin::new(2), &processes);
        assert_eq!(
            timeline.entries,
            vec![entry("A", 0, 2), entry("B", 2, 3), entry("A", 3, 5)]
        );
    }

    #[test]
    fn test_rr_large_quantum_is_fcfs() {
        let (states, _) = run(RoundRobin::new(100), &reference());
        let completions: Vec<_> = states.iter().map(|s| s.completion_time).collect();
        assert_eq!(completions, vec![Some(7), Some(11), Some(12), Some(16)]);
    }

    #[test]
    fn test_rr_idle_jump() {
        let processes = vec![Process::new("A", 0, 1), Process::new("B", 5, 3)];
        let (states, timeline) = run(RoundRobin::new(2), &processes);
        assert_eq!(states[1].start_time, Some(5));
        assert_eq!(states[1].completion_time, Some(8));
        assert_eq!(
            timeline.merged(),
            vec![
                entry("A", 0, 1),
                TimelineEntry::new(Subject::Idle, 1, 5),
                entry("B", 5, 8),
            ]
        );
    }

    #[test]
    fn test_rr_admission_ties_by_input_order() {
        let processes = vec![
            Process::new("late", 3, 1),
            Process::new("Y", 0, 1),
            Process::new("X", 0, 1),
        ];
        let (_, timeline) = run(RoundRobin::new(2), &processes);
        let names: Vec<_> = timeline
            .without_idle()
            .iter()
            .map(|e| e.subject.to_string())
            .collect();
        assert_eq!(names, vec!["Y", "X", "late"]);
    }

    #[test]
    fn test_rr_rejects_bad_quantum() {
        let processes = reference();
        let mut state = SimulationState::new(&processes);
        let mut timeline = Timeline::new();
        let err = RoundRobin::new(0).run(&mut state, &mut timeline).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidInput(_)));
        assert!(timeline.is_empty());
    }
}

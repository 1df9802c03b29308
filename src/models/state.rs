//! Per-run simulation bookkeeping.
//!
//! One [`ProcessState`] per input process, indexed by the process's
//! position in the input slice. Every run builds a fresh
//! [`SimulationState`] from the same immutable processes, so runs never
//! share mutable state.

use super::{Process, Ticks};

/// Mutable bookkeeping for a single process during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessState {
    /// CPU time still required. Never increases; reaches 0 at completion.
    pub remaining: Ticks,
    /// First dispatch time. Set once and never overwritten.
    pub start_time: Option<Ticks>,
    /// Time the last slice finished.
    pub completion_time: Option<Ticks>,
}

impl ProcessState {
    fn new(burst_time: Ticks) -> Self {
        Self {
            remaining: burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    /// Whether the process has finished all its work.
    #[inline]
    pub fn completed(&self) -> bool {
        self.completion_time.is_some()
    }
}

/// Bookkeeping for every process of a run.
///
/// Policies read arrivals through the borrowed process slice and mutate
/// state only through [`dispatch`](Self::dispatch).
#[derive(Debug, Clone)]
pub struct SimulationState<'a> {
    processes: &'a [Process],
    states: Vec<ProcessState>,
    completed_count: usize,
}

impl<'a> SimulationState<'a> {
    /// Creates fresh state (`remaining = burst`, nothing dispatched).
    pub fn new(processes: &'a [Process]) -> Self {
        Self {
            processes,
            states: processes
                .iter()
                .map(|p| ProcessState::new(p.burst_time))
                .collect(),
            completed_count: 0,
        }
    }

    /// The input processes this state tracks.
    pub fn processes(&self) -> &'a [Process] {
        self.processes
    }

    /// State of the process at `index`.
    pub fn state(&self, index: usize) -> &ProcessState {
        &self.states[index]
    }

    /// All states, in input order.
    pub fn states(&self) -> &[ProcessState] {
        &self.states
    }

    /// Number of tracked processes.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether there are no processes.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether every process has completed.
    pub fn all_completed(&self) -> bool {
        self.completed_count == self.states.len()
    }

    /// Indices of processes that have arrived by `time` and are not
    /// completed, in input order.
    pub fn available(&self, time: Ticks) -> Vec<usize> {
        self.processes
            .iter()
            .zip(&self.states)
            .enumerate()
            .filter(|(_, (p, s))| p.arrival_time <= time && !s.completed())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Earliest arrival strictly after `time` among incomplete processes.
    pub fn next_arrival_after(&self, time: Ticks) -> Option<Ticks> {
        self.processes
            .iter()
            .zip(&self.states)
            .filter(|(p, s)| p.arrival_time > time && !s.completed())
            .map(|(p, _)| p.arrival_time)
            .min()
    }

    /// Runs process `index` over `[start, end)`.
    ///
    /// Records first dispatch, decrements `remaining` by the slice, and
    /// records completion when it reaches zero. Returns `true` if the
    /// process completed with this slice.
    pub fn dispatch(&mut self, index: usize, start: Ticks, end: Ticks) -> bool {
        let state = &mut self.states[index];
        let slice = end - start;
        debug_assert!(slice > 0, "empty slice for process {index}");
        debug_assert!(
            slice <= state.remaining,
            "slice {slice} exceeds remaining {} for process {index}",
            state.remaining
        );
        debug_assert!(!state.completed(), "process {index} already completed");

        if state.start_time.is_none() {
            state.start_time = Some(start);
        }
        state.remaining -= slice;

        if state.remaining == 0 {
            state.completion_time = Some(end);
            self.completed_count += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the state, returning per-process bookkeeping in input order.
    pub fn into_states(self) -> Vec<ProcessState> {
        self.states
    }
}

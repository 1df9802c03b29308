//! Preemptive priority policy.
//!
//! # Algorithm
//!
//! At each decision point:
//! 1. Collect arrived, incomplete processes. If none, jump to the next
//!    arrival.
//! 2. Select the numerically smallest priority; ties go to the earliest
//!    input position.
//! 3. The next event is the earlier of the selected process finishing
//!    uninterrupted and the arrival of any not-yet-arrived process with a
//!    strictly higher priority.
//! 4. Run the selected process up to that event.
//!
//! # Termination
//! A consistent run finishes by `max(arrival) + sum(burst)`. Passing that
//! bound is reported as [`SimulationError::SafetyBoundExceeded`].

use log::{trace, warn};

use super::{idle_until_next_arrival, Policy};
use crate::dispatching::{rules, Candidate, RuleEngine};
use crate::error::SimulationError;
use crate::models::{Process, SimulationState, Ticks, Timeline};
use crate::validation::horizon;

/// Preemptive priority (lower value = higher priority).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreemptivePriority {
    safety_bound: Option<Ticks>,
}

impl PreemptivePriority {
    /// Creates the policy with the bound derived from the input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the termination bound.
    pub fn with_safety_bound(mut self, bound: Ticks) -> Self {
        self.safety_bound = Some(bound);
        self
    }

    /// Latest clock value a consistent run can reach.
    ///
    /// Saturates at `Ticks::MAX` for sets that fail validation.
    pub fn derived_bound(processes: &[Process]) -> Ticks {
        horizon(processes).unwrap_or(Ticks::MAX)
    }

    /// Earliest arrival after `clock` that would preempt `priority`.
    fn next_preemption(state: &SimulationState<'_>, clock: Ticks, priority: i32) -> Option<Ticks> {
        state
            .processes()
            .iter()
            .zip(state.states())
            .filter(|(p, s)| {
                p.arrival_time > clock && !s.completed() && p.effective_priority() < priority
            })
            .map(|(p, _)| p.arrival_time)
            .min()
    }
}

impl Policy for PreemptivePriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn run(
        &self,
        state: &mut SimulationState<'_>,
        timeline: &mut Timeline,
    ) -> Result<(), SimulationError> {
        let bound = self
            .safety_bound
            .unwrap_or_else(|| Self::derived_bound(state.processes()));
        let engine = RuleEngine::new().with_rule(rules::HighestPriority);
        let mut clock = 0;

        while !state.all_completed() {
            if clock > bound {
                warn!("{} passed safety bound {bound} at t={clock}", self.name());
                return Err(SimulationError::SafetyBoundExceeded {
                    policy: self.name(),
                    bound,
                    time: clock,
                });
            }

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

            let finish = clock + selected.remaining;
            let event = Self::next_preemption(state, clock, selected.process.effective_priority())
                .map_or(finish, |arrival| arrival.min(finish));

            trace!("{} runs [{clock}, {event})", selected.process.name);
            state.dispatch(selected.index, clock, event);
            timeline.record_process(&selected.process.name, clock, event);
            clock = event;
        }

        Ok(())
    }
}

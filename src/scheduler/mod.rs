//! Scheduling policies, the simulator driver, and run metrics.
//!
//! Each policy is a discrete-event loop over a single simulated CPU. The
//! clock only advances by dispatching a process for a bounded slice or by
//! jumping straight to the next arrival when nothing is eligible; it never
//! ticks through idle time.
//!
//! # Policies
//!
//! | Policy | Preemptive | Selection key | Tie-break |
//! |--------|-----------|---------------|-----------|
//! | `Fcfs` | no | arrival time | input order |
//! | `Sjf` | no | burst time | input order |
//! | `RoundRobin` | yes (quantum) | FIFO ready queue | arrival, then input order |
//! | `PreemptivePriority` | yes (higher-priority arrival) | priority | input order |
//!
//! # KPI
//!
//! `RunReport` derives waiting, turnaround and response times per process
//! plus run-level averages, utilization, throughput and context switches.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod comparison;
mod fcfs;
mod kpi;
mod priority;
mod round_robin;
mod simulator;
mod sjf;

pub use comparison::Comparison;
pub use fcfs::Fcfs;
pub use kpi::{Averages, ProcessMetrics, RunReport};
pub use priority::PreemptivePriority;
pub use round_robin::{RoundRobin, DEFAULT_QUANTUM};
pub use simulator::{PolicyKind, Simulator, SimulatorConfig};
pub use sjf::Sjf;

use std::fmt::Debug;

use crate::error::SimulationError;
use crate::models::{SimulationState, Ticks, Timeline};
use crate::validation::ValidationResult;

/// A CPU scheduling policy.
///
/// A policy drives one run: it receives fresh state for every input
/// process, mutates it through [`SimulationState::dispatch`], and appends
/// every dispatched slice and idle gap to the timeline. On `Ok(())` every
/// process must be completed.
pub trait Policy: Send + Sync + Debug {
    /// Policy name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Checks policy parameters before the run starts.
    fn validate(&self) -> ValidationResult {
        Ok(())
    }

    /// Runs the simulation to completion.
    fn run(
        &self,
        state: &mut SimulationState<'_>,
        timeline: &mut Timeline,
    ) -> Result<(), SimulationError>;
}

/// Advances the clock over an idle gap to the next arrival.
///
/// Returns the new clock, or `None` when no incomplete process arrives
/// after `clock`.
fn idle_until_next_arrival(
    state: &SimulationState<'_>,
    timeline: &mut Timeline,
    clock: Ticks,
) -> Option<Ticks> {
    let next = state.next_arrival_after(clock)?;
    log::trace!("idle [{clock}, {next})");
    timeline.record_idle(clock, next);
    Some(next)
}

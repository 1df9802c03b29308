//! Simulation driver.
//!
//! # Algorithm
//!
//! 1. Validate the process set and the policy parameters together.
//! 2. Build fresh state and an empty timeline for the run.
//! 3. Let the policy run to completion.
//! 4. Reduce the finished state into a [`RunReport`].

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    Comparison, Fcfs, Policy, PreemptivePriority, RoundRobin, RunReport, Sjf, DEFAULT_QUANTUM,
};
use crate::error::SimulationError;
use crate::models::{Process, SimulationState, Ticks, Timeline};
use crate::validation::validate_processes;

/// Built-in policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    /// First-come-first-served.
    Fcfs,
    /// Non-preemptive shortest-job-first.
    Sjf,
    /// Round-robin with the configured quantum.
    RoundRobin,
    /// Preemptive priority.
    Priority,
}

impl PolicyKind {
    /// Every built-in policy.
    pub const ALL: [PolicyKind; 4] = [Self::Fcfs, Self::Sjf, Self::RoundRobin, Self::Priority];
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "FCFS"),
            Self::Sjf => write!(f, "SJF"),
            Self::RoundRobin => write!(f, "RR"),
            Self::Priority => write!(f, "PRIORITY"),
        }
    }
}

/// Tunable simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Round-robin time quantum (> 0).
    #[serde(default = "default_quantum")]
    pub quantum: Ticks,
}

fn default_quantum() -> Ticks {
    DEFAULT_QUANTUM
}

impl SimulatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = quantum;
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

/// Runs policies over process sets.
///
/// # Example
///
/// ```
/// use u_cpu_schedule::models::Process;
/// use u_cpu_schedule::scheduler::{PolicyKind, Simulator};
///
/// let processes = vec![
///     Process::new("P1", 0, 7),
///     Process::new("P2", 2, 4),
///     Process::new("P3", 4, 1),
///     Process::new("P4", 5, 4),
/// ];
/// let report = Simulator::new().simulate(PolicyKind::Fcfs, &processes).unwrap();
/// assert_eq!(report.metrics_for("P4").unwrap().completion_time, 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a simulator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.config.quantum = quantum;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs a built-in policy.
    pub fn simulate(
        &self,
        kind: PolicyKind,
        processes: &[Process],
    ) -> Result<RunReport, SimulationError> {
        match kind {
            PolicyKind::Fcfs => self.run_policy(&Fcfs, processes),
            PolicyKind::Sjf => self.run_policy(&Sjf, processes),
            PolicyKind::RoundRobin => {
                self.run_policy(&RoundRobin::new(self.config.quantum), processes)
            }
            PolicyKind::Priority => self.run_policy(&PreemptivePriority::new(), processes),
        }
    }

    /// Runs any policy on `processes` with fresh state.
    ///
    /// # Errors
    /// [`SimulationError::InvalidInput`] carries every process and policy
    /// parameter issue found before the run; other variants come from the
    /// policy or the metrics reduction.
    pub fn run_policy(
        &self,
        policy: &dyn Policy,
        processes: &[Process],
    ) -> Result<RunReport, SimulationError> {
        let mut errors = validate_processes(processes).err().unwrap_or_default();
        if let Err(policy_errors) = policy.validate() {
            errors.extend(policy_errors);
        }
        if !errors.is_empty() {
            return Err(SimulationError::InvalidInput(errors));
        }

        debug!(
            "{}: simulating {} processes",
            policy.name(),
            processes.len()
        );
        let mut state = SimulationState::new(processes);
        let mut timeline = Timeline::new();
        policy.run(&mut state, &mut timeline)?;

        let report = RunReport::calculate(policy.name(), processes, state.states(), timeline)?;
        debug!(
            "{}: makespan {}, {} context switches",
            policy.name(),
            report.makespan,
            report.context_switches
        );
        Ok(report)
    }

    /// Runs each policy on the same input, in the given order.
    pub fn compare(
        &self,
        processes: &[Process],
        kinds: &[PolicyKind],
    ) -> Result<Comparison, SimulationError> {
        let reports = kinds
            .iter()
            .map(|&kind| self.simulate(kind, processes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Comparison::new(reports))
    }
}

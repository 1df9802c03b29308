//! Dispatching rules and rule engine for process selection.
//!
//! Provides the selection primitives shared by the policies: rules that
//! score a candidate process, and an engine that composes them with an
//! explicit final tie-breaker.
//!
//! # Usage
//!
//! ```
//! use u_cpu_schedule::dispatching::{Candidate, RuleEngine};
//! use u_cpu_schedule::dispatching::rules;
//! use u_cpu_schedule::models::Process;
//!
//! let processes = vec![Process::new("P2", 0, 4), Process::new("P4", 0, 4)];
//! let candidates: Vec<Candidate> = processes
//!     .iter()
//!     .enumerate()
//!     .map(|(i, p)| Candidate::new(i, p, p.burst_time))
//!     .collect();
//!
//! let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
//! // Equal bursts: earliest input position wins.
//! assert_eq!(engine.select(&candidates).map(|c| c.index), Some(0));
//! ```

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::{Process, SimulationState, Ticks};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (selected first).
pub type RuleScore = f64;

/// A process eligible for selection at a decision point.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position of the process in the original input.
    pub index: usize,
    /// The input record.
    pub process: &'a Process,
    /// CPU time still required.
    pub remaining: Ticks,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate.
    pub fn new(index: usize, process: &'a Process, remaining: Ticks) -> Self {
        Self {
            index,
            process,
            remaining,
        }
    }

    /// Builds candidates for the given input indices from run state.
    pub fn collect(state: &SimulationState<'a>, indices: &[usize]) -> Vec<Self> {
        let processes = state.processes();
        indices
            .iter()
            .map(|&idx| Self::new(idx, &processes[idx], state.state(idx).remaining))
            .collect()
    }
}

/// A dispatching rule that scores a candidate.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for processes that should run first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF").
    fn name(&self) -> &'static str;

    /// Scores a candidate. Lower = selected earlier.
    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore;

    /// Exact integer key behind the score, if the rule has one.
    ///
    /// When both candidates have a key the engine compares keys instead of
    /// scores, so tick values beyond f64 precision still order correctly.
    fn key(&self, _candidate: &Candidate<'_>) -> Option<Ticks> {
        None
    }

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FCFS
//! - **Time-based**: SJF
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{Candidate, DispatchingRule, RuleScore};
use crate::models::Ticks;

// ======================== Arrival-based rules ========================

/// First Come First Served.
///
/// Prioritizes processes by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl DispatchingRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.process.arrival_time as f64
    }

    fn key(&self, candidate: &Candidate<'_>) -> Option<Ticks> {
        Some(candidate.process.arrival_time)
    }

    fn description(&self) -> &'static str {
        "First Come First Served"
    }
}

// ======================== Time-based rules ========================

/// Shortest Job First.
///
/// Prioritizes processes with the smaller total burst time. Ignores how
/// much work has already been done.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl DispatchingRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.process.burst_time as f64
    }

    fn key(&self, candidate: &Candidate<'_>) -> Option<Ticks> {
        Some(candidate.process.burst_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

// ======================== Priority-based rule ========================

/// Priority rule.
///
/// Lower `priority` value runs first. Processes without a priority rank
/// after every process that has one.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl DispatchingRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.process.effective_priority() as f64
    }

    fn key(&self, candidate: &Candidate<'_>) -> Option<Ticks> {
        Some(Ticks::from(candidate.process.effective_priority()))
    }

    fn description(&self) -> &'static str {
        "Process Priority"
    }
}

//! Process record model.
//!
//! A process is the immutable input describing one schedulable unit:
//! when it becomes eligible, how much CPU time it needs, and (for the
//! priority policy) how important it is.

use serde::{Deserialize, Serialize};

use super::Ticks;

/// A process to be simulated.
///
/// Created before a run and never mutated by any policy. All mutable
/// bookkeeping lives in [`SimulationState`](super::SimulationState).
///
/// # Time Representation
/// All times are integer ticks relative to the simulation epoch (t=0).
/// Fields are signed so that invalid input can be represented and
/// rejected by [`validate_processes`](crate::validation::validate_processes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process name.
    pub name: String,
    /// Time the process becomes eligible (≥ 0).
    pub arrival_time: Ticks,
    /// Total CPU time required (> 0).
    pub burst_time: Ticks,
    /// Scheduling priority (lower = more important). Only the priority
    /// policy reads it.
    #[serde(default)]
    pub priority: Option<i32>,
}

impl Process {
    /// Creates a process without a priority.
    pub fn new(name: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Priority used for selection. A process without one ranks last.
    #[inline]
    pub fn effective_priority(&self) -> i32 {
        self.priority.unwrap_or(i32::MAX)
    }

    /// Earliest possible completion (arrival + burst), saturating.
    #[inline]
    pub fn earliest_completion(&self) -> Ticks {
        self.arrival_time.saturating_add(self.burst_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new("P1", 3, 7).with_priority(2);
        assert_eq!(p.name, "P1");
        assert_eq!(p.arrival_time, 3);
        assert_eq!(p.burst_time, 7);
        assert_eq!(p.priority, Some(2));
        assert_eq!(p.earliest_completion(), 10);
    }

    #[test]
    fn test_missing_priority_ranks_last() {
        let none = Process::new("P1", 0, 1);
        let low = Process::new("P2", 0, 1).with_priority(1000);
        assert!(low.effective_priority() < none.effective_priority());
    }

    #[test]
    fn test_priority_defaults_when_absent_in_json() {
        let p: Process =
            serde_json::from_str(r#"{"name":"P1","arrival_time":0,"burst_time":4}"#).unwrap();
        assert_eq!(p.priority, None);
        assert_eq!(p, Process::new("P1", 0, 4));
    }
}

//! Run quality metrics (KPIs).
//!
//! Reduces the finished simulation state of one run into per-process
//! timing metrics and run-level statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | Makespan | latest timeline end |
//! | CPU Utilization | busy time / makespan |
//! | Throughput | completed processes / makespan |
//!
//! Averages are undefined for an empty run and reported as `None`.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::{Process, ProcessState, Ticks, Timeline};

/// Timing metrics for one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process name.
    pub name: String,
    /// Arrival time.
    pub arrival_time: Ticks,
    /// Burst time.
    pub burst_time: Ticks,
    /// First dispatch time.
    pub start_time: Ticks,
    /// Completion time.
    pub completion_time: Ticks,
    /// Time spent eligible but not running.
    pub waiting_time: Ticks,
    /// Time from arrival to completion.
    pub turnaround_time: Ticks,
    /// Time from arrival to first dispatch.
    pub response_time: Ticks,
}

/// Run-level means over all processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Mean waiting time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Mean response time.
    pub average_response_time: f64,
}

/// Result of one policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Policy that produced this run.
    pub policy: String,
    /// Per-process metrics, in input order.
    pub processes: Vec<ProcessMetrics>,
    /// Means, or `None` when the process set was empty.
    pub averages: Option<Averages>,
    /// Execution timeline in emission order.
    pub timeline: Timeline,
    /// Latest timeline end.
    pub makespan: Ticks,
    /// Busy fraction of the makespan (0.0..1.0).
    pub cpu_utilization: f64,
    /// Processes completed per tick.
    pub throughput: f64,
    /// Hand-offs between different processes.
    pub context_switches: usize,
}

impl RunReport {
    /// Computes the report from finished state.
    ///
    /// # Errors
    /// - [`SimulationError::IncompleteProcess`] if a process never finished.
    /// - [`SimulationError::NegativeMetric`] if waiting or turnaround is
    ///   negative.
    pub fn calculate(
        policy: &str,
        processes: &[Process],
        states: &[ProcessState],
        timeline: Timeline,
    ) -> Result<Self, SimulationError> {
        let metrics = processes
            .iter()
            .zip(states)
            .map(|(p, s)| Self::process_metrics(p, s))
            .collect::<Result<Vec<_>, _>>()?;

        let averages = Self::averages(&metrics);
        let makespan = timeline.makespan();
        let (cpu_utilization, throughput) = if makespan > 0 {
            (
                timeline.busy_time() as f64 / makespan as f64,
                metrics.len() as f64 / makespan as f64,
            )
        } else {
            (0.0, 0.0)
        };
        let context_switches = timeline.context_switches();

        Ok(Self {
            policy: policy.to_string(),
            processes: metrics,
            averages,
            timeline,
            makespan,
            cpu_utilization,
            throughput,
            context_switches,
        })
    }

    fn process_metrics(
        process: &Process,
        state: &ProcessState,
    ) -> Result<ProcessMetrics, SimulationError> {
        let (Some(start_time), Some(completion_time)) = (state.start_time, state.completion_time)
        else {
            return Err(SimulationError::IncompleteProcess {
                name: process.name.clone(),
            });
        };

        let turnaround_time = completion_time - process.arrival_time;
        let waiting_time = turnaround_time - process.burst_time;
        if waiting_time < 0 || turnaround_time < 0 {
            return Err(SimulationError::NegativeMetric {
                name: process.name.clone(),
                waiting_time,
                turnaround_time,
            });
        }

        Ok(ProcessMetrics {
            name: process.name.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            start_time,
            completion_time,
            waiting_time,
            turnaround_time,
            response_time: start_time - process.arrival_time,
        })
    }

    fn averages(metrics: &[ProcessMetrics]) -> Option<Averages> {
        if metrics.is_empty() {
            return None;
        }
        let n = metrics.len() as f64;
        // Summed in i128: n values each below the horizon can exceed Ticks
        let mean = |f: fn(&ProcessMetrics) -> Ticks| {
            metrics.iter().map(|m| i128::from(f(m))).sum::<i128>() as f64 / n
        };

        Some(Averages {
            average_waiting_time: mean(|m| m.waiting_time),
            average_turnaround_time: mean(|m| m.turnaround_time),
            average_response_time: mean(|m| m.response_time),
        })
    }

    /// Whether the run had no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Metrics for a named process.
    pub fn metrics_for(&self, name: &str) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.name == name)
    }

    /// Mean waiting time, or `None` for an empty run.
    pub fn average_waiting_time(&self) -> Option<f64> {
        self.averages.as_ref().map(|a| a.average_waiting_time)
    }

    /// Mean turnaround time, or `None` for an empty run.
    pub fn average_turnaround_time(&self) -> Option<f64> {
        self.averages.as_ref().map(|a| a.average_turnaround_time)
    }

    /// Process names in completion order (ties by input order).
    pub fn completion_order(&self) -> Vec<&str> {
        let mut finished: Vec<&ProcessMetrics> = self.processes.iter().collect();
        finished.sort_by_key(|m| m.completion_time);
        finished.iter().map(|m| m.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(start: Ticks, completion: Ticks) -> ProcessState {
        ProcessState {
            remaining: 0,
            start_time: Some(start),
            completion_time: Some(completion),
        }
    }

    fn fcfs_input() -> (Vec<Process>, Vec<ProcessState>, Timeline) {
        let processes = vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 2, 4),
            Process::new("P3", 4, 1),
            Process::new("P4", 5, 4),
        ];
        let states = vec![
            finished(0, 7),
            finished(7, 11),
            finished(11, 12),
            finished(12, 16),
        ];
        let mut timeline = Timeline::new();
        timeline.record_process("P1", 0, 7);
        timeline.record_process("P2", 7, 11);
        timeline.record_process("P3", 11, 12);
        timeline.record_process("P4", 12, 16);
        (processes, states, timeline)
    }

    #[test]
    fn test_kpi_basic() {
        let (processes, states, timeline) = fcfs_input();
        let report = RunReport::calculate("FCFS", &processes, &states, timeline).unwrap();

        let waits: Vec<_> = report.processes.iter().map(|m| m.waiting_time).collect();
        assert_eq!(waits, vec![0, 5, 7, 7]);
        let turnarounds: Vec<_> = report.processes.iter().map(|m| m.turnaround_time).collect();
        assert_eq!(turnarounds, vec![7, 9, 8, 11]);

        // (0+5+7+7)/4 and (7+9+8+11)/4
        assert!((report.average_waiting_time().unwrap() - 4.75).abs() < 1e-10);
        assert!((report.average_turnaround_time().unwrap() - 8.75).abs() < 1e-10);
        assert_eq!(report.makespan, 16);
        assert!((report.cpu_utilization - 1.0).abs() < 1e-10);
        assert!((report.throughput - 0.25).abs() < 1e-10);
        assert_eq!(report.context_switches, 3);
    }

    #[test]
    fn test_kpi_response_time() {
        let processes = vec![Process::new("A", 1, 4)];
        let states = vec![finished(3, 9)];
        let report = RunReport::calculate("RR", &processes, &states, Timeline::new()).unwrap();
        let m = report.metrics_for("A").unwrap();
        assert_eq!(m.response_time, 2);
        assert_eq!(m.waiting_time, 4);
    }

    #[test]
    fn test_kpi_empty() {
        let report = RunReport::calculate("FCFS", &[], &[], Timeline::new()).unwrap();
        assert!(report.is_empty());
        assert!(report.averages.is_none());
        assert!(report.average_waiting_time().is_none());
        assert_eq!(report.makespan, 0);
        assert!((report.cpu_utilization - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_incomplete_process() {
        let processes = vec![Process::new("A", 0, 4)];
        let states = vec![ProcessState {
            remaining: 2,
            start_time: Some(0),
            completion_time: None,
        }];
        let err = RunReport::calculate("X", &processes, &states, Timeline::new()).unwrap_err();
        assert_eq!(err, SimulationError::IncompleteProcess { name: "A".into() });
    }

    #[test]
    fn test_kpi_negative_waiting() {
        // Completion earlier than arrival + burst signals an engine bug
        let processes = vec![Process::new("A", 2, 4)];
        let states = vec![finished(2, 5)];
        let err = RunReport::calculate("X", &processes, &states, Timeline::new()).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::NegativeMetric {
                waiting_time: -1,
                turnaround_time: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_kpi_means_near_tick_limit() {
        // Turnarounds h and 2h both fit; their sum does not
        let h = Ticks::MAX / 2 - 1;
        let processes = vec![Process::new("A", 0, h), Process::new("B", 0, h)];
        let states = vec![finished(0, h), finished(h, 2 * h)];
        let report = RunReport::calculate("FCFS", &processes, &states, Timeline::new()).unwrap();

        let expected = 1.5 * h as f64;
        let avg = report.average_turnaround_time().unwrap();
        assert!((avg - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_completion_order() {
        let (processes, mut states, timeline) = fcfs_input();
        states[3] = finished(12, 12 + 4);
        states[2] = finished(7, 8);
        let report = RunReport::calculate("SJF", &processes, &states, timeline).unwrap();
        assert_eq!(report.completion_order(), vec!["P1", "P3", "P2", "P4"]);
    }

    #[test]
    fn test_report_json() {
        let (processes, states, timeline) = fcfs_input();
        let report = RunReport::calculate("FCFS", &processes, &states, timeline).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["policy"], "FCFS");
        assert_eq!(json["processes"][1]["waiting_time"], 5);
        let back: RunReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}

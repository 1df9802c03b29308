//! Deterministic CPU scheduling simulation.
//!
//! Runs a fixed set of processes through classic single-CPU scheduling
//! policies and reports per-process timing metrics alongside a Gantt-style
//! execution timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `SimulationState`, `Timeline`
//! - **`validation`**: Input integrity checks (names, arrivals, bursts, quantum)
//! - **`dispatching`**: Selection rules and the rule engine used by the policies
//! - **`scheduler`**: FCFS, SJF, round-robin and preemptive priority, the
//!   `Simulator` driver and run metrics
//! - **`snapshot`**: Optional host process/memory listing shown next to results
//! - **`workload`**: Seeded random process sets
//!
//! # Determinism
//!
//! Simulations use integer ticks and a fixed tie-break (earliest input
//! position). The same input always yields the same timeline and metrics.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod snapshot;
pub mod validation;
pub mod workload;

pub use error::SimulationError;
pub use models::{Process, Ticks, Timeline};
pub use scheduler::{PolicyKind, RunReport, Simulator, SimulatorConfig};

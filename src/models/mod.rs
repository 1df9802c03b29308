//! Simulation domain models.
//!
//! Provides the data types shared by every scheduling policy: the
//! immutable input record, the per-run mutable bookkeeping, and the
//! execution timeline a run produces.
//!
//! # Lifecycle
//!
//! | Type | Created | Mutated | Dropped |
//! |------|---------|---------|---------|
//! | `Process` | by the caller, before a run | never | by the caller |
//! | `SimulationState` | at run start | by the running policy only | at run end |
//! | `Timeline` | at run start | appended by the running policy | kept in the report |

mod process;
mod state;
mod timeline;

pub use process::Process;
pub use state::{ProcessState, SimulationState};
pub use timeline::{Subject, Timeline, TimelineEntry, TimelineViolation, IDLE};

/// Simulation clock unit.
pub type Ticks = i64;

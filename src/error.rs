//! Simulation error taxonomy.

use std::fmt;

use crate::models::Ticks;
use crate::validation::ValidationError;

/// Why a run could not produce a report.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Input rejected before the simulation started.
    InvalidInput(Vec<ValidationError>),
    /// The priority loop ran past its termination bound.
    SafetyBoundExceeded {
        /// Policy that tripped the bound.
        policy: &'static str,
        /// Latest time a consistent run could reach.
        bound: Ticks,
        /// Clock value when the bound was detected.
        time: Ticks,
    },
    /// A policy returned with a process still unfinished.
    IncompleteProcess {
        /// Name of the unfinished process.
        name: String,
    },
    /// Waiting or turnaround came out negative.
    NegativeMetric {
        /// Affected process.
        name: String,
        /// Computed waiting time.
        waiting_time: Ticks,
        /// Computed turnaround time.
        turnaround_time: Ticks,
    },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(errors) => {
                write!(f, "invalid input: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", e.message)?;
                }
                Ok(())
            }
            Self::SafetyBoundExceeded {
                policy,
                bound,
                time,
            } => write!(
                f,
                "{policy} did not terminate: clock reached {time} past bound {bound}"
            ),
            Self::IncompleteProcess { name } => {
                write!(f, "process '{name}' was not completed by the policy")
            }
            Self::NegativeMetric {
                name,
                waiting_time,
                turnaround_time,
            } => write!(
                f,
                "process '{name}' has negative metrics (waiting {waiting_time}, turnaround {turnaround_time})"
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

//! Input validation for simulation runs.
//!
//! Checks structural integrity of the process set before any policy
//! runs. Detects:
//! - Duplicate or empty process names
//! - Negative arrival times
//! - Zero or negative burst times
//! - Non-positive round-robin quanta
//! - Sets whose latest possible finish does not fit in [`Ticks`]
//!
//! Every detected issue is reported, not just the first.

use crate::models::{Process, Ticks};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same name.
    DuplicateName,
    /// A process has an empty name.
    EmptyName,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires no CPU time (or negative time).
    NonPositiveBurst,
    /// Round-robin quantum is zero or negative.
    InvalidQuantum,
    /// `max(arrival) + sum(burst)` does not fit in [`Ticks`].
    HorizonOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. No empty names
/// 2. No duplicate names
/// 3. `arrival_time >= 0`
/// 4. `burst_time > 0`
/// 5. `max(arrival_time) + sum(burst_time)` fits in [`Ticks`], so no
///    policy clock can overflow
///
/// An empty set is valid; its report carries no averages.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for (idx, p) in processes.iter().enumerate() {
        if p.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Process at position {idx} has an empty name"),
            ));
        } else if !names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate process name: {}", p.name),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}' has negative arrival time {}",
                    p.name, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process '{}' has non-positive burst time {}",
                    p.name, p.burst_time
                ),
            ));
        }
    }

    if horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "Latest arrival plus total burst time overflows the tick range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Latest time any policy can reach, or `None` on overflow.
///
/// Negative fields are clamped to zero; they are reported separately.
pub fn horizon(processes: &[Process]) -> Option<Ticks> {
    let last_arrival = processes
        .iter()
        .map(|p| p.arrival_time.max(0))
        .max()
        .unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |acc, p| acc.checked_add(p.burst_time.max(0)))
}

/// Validates a round-robin time quantum.
pub fn validate_quantum(quantum: Ticks) -> ValidationResult {
    if quantum > 0 {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Quantum must be positive, got {quantum}"),
        )])
    }
}

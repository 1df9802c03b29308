//! Side-by-side policy comparison.

use serde::{Deserialize, Serialize};

use super::RunReport;
use crate::snapshot::{SnapshotOutcome, SnapshotProvider};

/// Reports from several policies over one input.
///
/// May carry one OS snapshot as comparison context. A failed snapshot
/// is kept as informational text and never affects the reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// One report per requested policy, in request order.
    pub reports: Vec<RunReport>,
    /// Captured OS listing, if one was requested.
    pub snapshot: Option<SnapshotOutcome>,
}

impl Comparison {
    /// Wraps finished reports.
    pub fn new(reports: Vec<RunReport>) -> Self {
        Self {
            reports,
            snapshot: None,
        }
    }

    /// Attaches an OS snapshot, replacing any earlier one.
    pub fn with_snapshot(mut self, provider: &dyn SnapshotProvider) -> Self {
        self.snapshot = Some(SnapshotOutcome::capture(provider));
        self
    }

    /// Report for a policy name (e.g., "RR").
    pub fn report(&self, policy: &str) -> Option<&RunReport> {
        self.reports.iter().find(|r| r.policy == policy)
    }

    /// Report with the lowest average waiting time.
    ///
    /// Earlier reports win ties. Empty runs are never selected.
    pub fn best_by_waiting(&self) -> Option<&RunReport> {
        let mut best: Option<(&RunReport, f64)> = None;
        for report in &self.reports {
            let Some(wait) = report.average_waiting_time() else {
                continue;
            };
            match best {
                Some((_, best_wait)) if best_wait <= wait => {}
                _ => best = Some((report, wait)),
            }
        }
        best.map(|(report, _)| report)
    }
}

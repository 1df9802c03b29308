//! Rule engine for multi-criteria selection.
//!
//! Applies rules in sequence, consulting the next rule only on ties, and
//! falls back to the original input position so selection never depends
//! on container iteration order.
//!
//! Rules that expose an exact integer [`key`](DispatchingRule::key) are
//! compared on that key. Float scores are only compared with `epsilon`
//! when a rule has no key.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Candidate, DispatchingRule, RuleScore};

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use u_cpu_schedule::dispatching::RuleEngine;
/// use u_cpu_schedule::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::HighestPriority)
///     .with_rule(rules::ArrivalOrder);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Appends a rule. Earlier rules dominate; later ones break ties.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sorts candidates (highest priority first).
    ///
    /// Returns positions into the `candidates` slice.
    pub fn sort_indices(&self, candidates: &[Candidate<'_>]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&candidates[a], &candidates[b]));
        indices
    }

    /// Returns the highest-priority candidate.
    pub fn select<'a>(&self, candidates: &[Candidate<'a>]) -> Option<Candidate<'a>> {
        candidates
            .iter()
            .min_by(|a, b| self.compare(a, b))
            .copied()
    }

    /// Scores a candidate under each rule.
    pub fn evaluate(&self, candidate: &Candidate<'_>) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(candidate)).collect()
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        for rule in &self.rules {
            let ordering = match (rule.key(a), rule.key(b)) {
                (Some(key_a), Some(key_b)) => key_a.cmp(&key_b),
                _ => self.compare_scores(rule.evaluate(a), rule.evaluate(b)),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        a.index.cmp(&b.index)
    }

    fn compare_scores(&self, score_a: RuleScore, score_b: RuleScore) -> Ordering {
        if (score_a - score_b).abs() > self.epsilon {
            score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal)
        } else {
            Ordering::Equal
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

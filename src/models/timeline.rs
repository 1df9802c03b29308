//! Execution timeline (Gantt) model.
//!
//! A timeline records which subject owned the CPU over which interval.
//! Policies append entries as they dispatch; consumers sort, filter or
//! merge them before rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Ticks;

/// Label shown for idle intervals.
pub const IDLE: &str = "IDLE";

/// Occupant of a timeline interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// A named process held the CPU.
    Process(String),
    /// No process was eligible.
    Idle,
}

impl Subject {
    /// Creates a process subject.
    pub fn process(name: impl Into<String>) -> Self {
        Self::Process(name.into())
    }

    /// Whether this is the idle sentinel.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Process name, or `None` for idle.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Process(name) => Some(name),
            Self::Idle => None,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process(name) => f.write_str(name),
            Self::Idle => f.write_str(IDLE),
        }
    }
}

/// A `[start, end)` interval owned by one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Who held the CPU.
    pub subject: Subject,
    /// Interval start (inclusive).
    pub start: Ticks,
    /// Interval end (exclusive).
    pub end: Ticks,
}

impl TimelineEntry {
    /// Creates an entry.
    pub fn new(subject: Subject, start: Ticks, end: Ticks) -> Self {
        Self {
            subject,
            start,
            end,
        }
    }

    /// Interval length.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    /// Whether two entries share any instant.
    #[inline]
    pub fn overlaps(&self, other: &TimelineEntry) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A break in the tiling of `[0, last_end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineViolation {
    /// Nothing covers `[from, to)`.
    Gap { from: Ticks, to: Ticks },
    /// Two entries both cover `at`.
    Overlap { at: Ticks },
    /// An entry with `start >= end`.
    EmptyInterval { start: Ticks, end: Ticks },
}

/// Ordered record of CPU ownership for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Entries in emission order.
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `subject` over `[start, end)`. Zero-length intervals are
    /// dropped.
    pub fn record(&mut self, subject: Subject, start: Ticks, end: Ticks) {
        debug_assert!(start <= end, "interval [{start}, {end}) runs backwards");
        if start >= end {
            return;
        }
        let entry = TimelineEntry::new(subject, start, end);
        debug_assert!(
            entry.subject.is_idle()
                || !self
                    .entries
                    .iter()
                    .any(|e| !e.subject.is_idle() && e.overlaps(&entry)),
            "entry {} [{start}, {end}) overlaps an existing entry",
            entry.subject
        );
        self.entries.push(entry);
    }

    /// Records a process slice.
    pub fn record_process(&mut self, name: &str, start: Ticks, end: Ticks) {
        self.record(Subject::process(name), start, end);
    }

    /// Records an idle gap.
    pub fn record_idle(&mut self, start: Ticks, end: Ticks) {
        self.record(Subject::Idle, start, end);
    }

    /// Entries sorted by start time.
    pub fn sorted(&self) -> Vec<TimelineEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|e| e.start);
        entries
    }

    /// Sorted entries with idle gaps removed.
    pub fn without_idle(&self) -> Vec<TimelineEntry> {
        self.sorted()
            .into_iter()
            .filter(|e| !e.subject.is_idle())
            .collect()
    }

    /// Sorted entries with contiguous same-subject runs coalesced.
    pub fn merged(&self) -> Vec<TimelineEntry> {
        let mut merged: Vec<TimelineEntry> = Vec::with_capacity(self.entries.len());
        for entry in self.sorted() {
            match merged.last_mut() {
                Some(last) if last.subject == entry.subject && last.end == entry.start => {
                    last.end = entry.end;
                }
                _ => merged.push(entry),
            }
        }
        merged
    }

    /// Entries belonging to a process, sorted by start.
    pub fn entries_for(&self, name: &str) -> Vec<&TimelineEntry> {
        let mut entries: Vec<&TimelineEntry> = self
            .entries
            .iter()
            .filter(|e| e.subject.name() == Some(name))
            .collect();
        entries.sort_by_key(|e| e.start);
        entries
    }

    /// Latest end across all entries (0 if empty).
    pub fn makespan(&self) -> Ticks {
        self.entries.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Total duration owned by processes.
    pub fn busy_time(&self) -> Ticks {
        self.entries
            .iter()
            .filter(|e| !e.subject.is_idle())
            .map(TimelineEntry::duration)
            .sum()
    }

    /// Total recorded idle duration.
    pub fn idle_time(&self) -> Ticks {
        self.entries
            .iter()
            .filter(|e| e.subject.is_idle())
            .map(TimelineEntry::duration)
            .sum()
    }

    /// Number of hand-offs between two different processes.
    ///
    /// Idle gaps are skipped, so `A, IDLE, B` counts once and
    /// `A, IDLE, A` counts zero.
    pub fn context_switches(&self) -> usize {
        let busy = self.without_idle();
        busy.windows(2)
            .filter(|pair| pair[0].subject != pair[1].subject)
            .count()
    }

    /// Verifies that the entries tile `[0, makespan)` exactly.
    pub fn check_tiling(&self) -> Result<(), TimelineViolation> {
        let mut cursor = 0;
        for entry in self.sorted() {
            if entry.start >= entry.end {
                return Err(TimelineViolation::EmptyInterval {
                    start: entry.start,
                    end: entry.end,
                });
            }
            if entry.start > cursor {
                return Err(TimelineViolation::Gap {
                    from: cursor,
                    to: entry.start,
                });
            }
            if entry.start < cursor {
                return Err(TimelineViolation::Overlap { at: entry.start });
            }
            cursor = entry.end;
        }
        Ok(())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.record_idle(0, 1);
        t.record_process("P1", 1, 3);
        t.record_process("P1", 3, 5);
        t.record_process("P2", 5, 6);
        t
    }

    #[test]
    fn test_zero_length_dropped() {
        let mut t = Timeline::new();
        t.record_idle(4, 4);
        assert!(t.is_empty());
    }

    #[test]
    fn test_times() {
        let t = sample_timeline();
        assert_eq!(t.makespan(), 6);
        assert_eq!(t.busy_time(), 5);
        assert_eq!(t.idle_time(), 1);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_merged_coalesces_contiguous_runs() {
        let merged = sample_timeline().merged();
        assert_eq!(
            merged,
            vec![
                TimelineEntry::new(Subject::Idle, 0, 1),
                TimelineEntry::new(Subject::process("P1"), 1, 5),
                TimelineEntry::new(Subject::process("P2"), 5, 6),
            ]
        );
    }

    #[test]
    fn test_sorted_and_without_idle() {
        let mut t = Timeline::new();
        t.record_process("B", 4, 6);
        t.record_idle(2, 4);
        t.record_process("A", 0, 2);

        let sorted = t.sorted();
        assert_eq!(sorted[0].start, 0);
        assert_eq!(sorted[2].start, 4);

        let busy = t.without_idle();
        assert_eq!(busy.len(), 2);
        assert!(busy.iter().all(|e| !e.subject.is_idle()));
    }

    #[test]
    fn test_context_switches_skip_idle() {
        let mut t = Timeline::new();
        t.record_process("A", 0, 2);
        t.record_idle(2, 3);
        t.record_process("A", 3, 4);
        t.record_process("B", 4, 5);
        assert_eq!(t.context_switches(), 1);
        assert_eq!(sample_timeline().context_switches(), 1);
    }

    #[test]
    fn test_entries_for() {
        let t = sample_timeline();
        assert_eq!(t.entries_for("P1").len(), 2);
        assert!(t.entries_for("P9").is_empty());
    }

    #[test]
    fn test_check_tiling() {
        assert_eq!(sample_timeline().check_tiling(), Ok(()));
        assert_eq!(Timeline::new().check_tiling(), Ok(()));

        let mut gap = Timeline::new();
        gap.entries.push(TimelineEntry::new(Subject::process("P1"), 2, 4));
        assert_eq!(
            gap.check_tiling(),
            Err(TimelineViolation::Gap { from: 0, to: 2 })
        );

        let mut overlap = Timeline::new();
        overlap
            .entries
            .push(TimelineEntry::new(Subject::process("P1"), 0, 4));
        overlap
            .entries
            .push(TimelineEntry::new(Subject::process("P2"), 3, 5));
        assert_eq!(
            overlap.check_tiling(),
            Err(TimelineViolation::Overlap { at: 3 })
        );
    }

    #[test]
    fn test_subject_display() {
        assert_eq!(Subject::process("P1").to_string(), "P1");
        assert_eq!(Subject::Idle.to_string(), IDLE);
        assert_eq!(Subject::Idle.name(), None);
    }

    #[test]
    fn test_timeline_json() {
        let t = sample_timeline();
        let json = serde_json::to_string(&t).unwrap();
        let back: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}

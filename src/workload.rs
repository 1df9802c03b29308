//! Seeded workload generation.
//!
//! Produces valid process sets for demos and property tests. The same
//! seed and settings always yield the same processes.
//!
//! # Example
//!
//! ```
//! use u_cpu_schedule::workload::WorkloadGenerator;
//!
//! let a = WorkloadGenerator::new().with_count(5).with_seed(42).generate();
//! let b = WorkloadGenerator::new().with_count(5).with_seed(42).generate();
//! assert_eq!(a, b);
//! assert_eq!(a[0].name, "P1");
//! ```

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::models::{Process, Ticks};

/// Builder for random process sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadGenerator {
    count: usize,
    arrival_gap: (Ticks, Ticks),
    burst: (Ticks, Ticks),
    priority: Option<(i32, i32)>,
    shuffled: bool,
    seed: u64,
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            count: 8,
            arrival_gap: (0, 3),
            burst: (1, 8),
            priority: Some((1, 5)),
            shuffled: false,
            seed: 0,
        }
    }
}

/// Orders a range and clamps its lower end.
fn normalize<T: Ord + Copy>(a: T, b: T, floor: T) -> (T, T) {
    let lo = a.min(b).max(floor);
    let hi = a.max(b).max(lo);
    (lo, hi)
}

impl WorkloadGenerator {
    /// Generator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of processes for [`generate`](Self::generate).
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Inclusive range of gaps between consecutive arrivals.
    pub fn with_arrival_gap(mut self, min: Ticks, max: Ticks) -> Self {
        self.arrival_gap = normalize(min, max, 0);
        self
    }

    /// Inclusive burst range. Bursts are at least 1.
    pub fn with_burst_range(mut self, min: Ticks, max: Ticks) -> Self {
        self.burst = normalize(min, max, 1);
        self
    }

    /// Inclusive priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.priority = Some(normalize(min, max, i32::MIN));
        self
    }

    /// Leaves every priority unset.
    pub fn without_priorities(mut self) -> Self {
        self.priority = None;
        self
    }

    /// Returns processes in random input order instead of arrival order.
    ///
    /// Names still follow arrival order, so `P3` may come before `P1`.
    pub fn with_shuffled_input(mut self) -> Self {
        self.shuffled = true;
        self
    }

    /// RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// `count` processes named `P1..Pn` with cumulative arrivals.
    pub fn generate(&self) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut arrival = 0;
        let mut processes = Vec::with_capacity(self.count);

        for i in 0..self.count {
            let (gap_lo, gap_hi) = self.arrival_gap;
            arrival += rng.random_range(gap_lo..=gap_hi);
            processes.push(self.process(&mut rng, i + 1, arrival));
        }
        self.finish(&mut rng, processes)
    }

    /// One process per tick in `0..ticks` with probability `p_arrival`.
    ///
    /// Ignores the configured count and arrival gaps.
    pub fn bernoulli(&self, ticks: Ticks, p_arrival: f64) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut processes = Vec::new();

        for t in 0..ticks {
            if rng.random::<f64>() < p_arrival {
                let number = processes.len() + 1;
                processes.push(self.process(&mut rng, number, t));
            }
        }
        self.finish(&mut rng, processes)
    }

    fn finish(&self, rng: &mut StdRng, mut processes: Vec<Process>) -> Vec<Process> {
        if self.shuffled {
            processes.shuffle(rng);
        }
        processes
    }

    fn process(&self, rng: &mut StdRng, number: usize, arrival: Ticks) -> Process {
        let (burst_lo, burst_hi) = self.burst;
        let process = Process::new(
            format!("P{number}"),
            arrival,
            rng.random_range(burst_lo..=burst_hi),
        );
        match self.priority {
            Some((lo, hi)) => process.with_priority(rng.random_range(lo..=hi)),
            None => process,
        }
    }
}

//! Concurrency limits for parallel tile rendering.
//!
//! - **I/O-bound**: reading inputs and writing tiles, 3x CPU count
//! - **CPU-bound**: clipping, simplifying and encoding, 1x CPU count
//! - **Mixed**: 1.5x CPU count
//!
//! ```
//! use tilecut_core::ConcurrencyLimits;
//!
//! let limits = ConcurrencyLimits::default();
//! assert!(limits.io_bound > limits.cpu_bound);
//! ```

/// Concurrency limits per workload type.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrencyLimits {
	/// Concurrency for I/O-bound operations.
	pub io_bound: usize,

	/// Concurrency for CPU-bound operations such as rendering tiles in `spawn_blocking`.
	pub cpu_bound: usize,

	/// Concurrency for mixed workloads.
	pub mixed: usize,
}

impl ConcurrencyLimits {
	/// Creates limits with custom values. Every limit is at least 1.
	pub fn new(io_bound: usize, cpu_bound: usize, mixed: usize) -> Self {
		Self {
			io_bound: io_bound.max(1),
			cpu_bound: cpu_bound.max(1),
			mixed: mixed.max(1),
		}
	}

	/// Number of logical CPUs available.
	pub fn cpu_count() -> usize {
		num_cpus::get()
	}
}

impl Default for ConcurrencyLimits {
	fn default() -> Self {
		let cpus = num_cpus::get();
		Self {
			io_bound: cpus * 3,
			cpu_bound: cpus,
			mixed: cpus + (cpus / 2),
		}
	}
}

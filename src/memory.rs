//! Random-access memory latency sampler.
//!
//! Each trial times exactly one write followed by one read at random
//! indices, with its own timer pair, and the per-pair durations are summed.
//! Timer overhead is therefore part of the figure.

use std::collections::TryReserveError;
use std::hint::black_box;
use std::io;
use std::time::Duration;

use rand_chacha::rand_core::RngCore;

use crate::harness::{TimingSample, Workload};
use crate::report::MemoryReport;

/// Integer slots in the sampled buffer.
pub const BUFFER_SIZE: usize = 100_000;

/// Heap buffer owned by a single sampler invocation.
#[derive(Debug)]
pub struct MemoryBuffer {
    slots: Vec<i32>,
}

impl MemoryBuffer {
    /// Allocates `len` zeroed slots without aborting on exhaustion.
    pub fn allocate(len: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(len)?;
        slots.resize(len, 0);
        Ok(Self { slots })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// One timed write-then-read pair.
    #[inline]
    fn write_then_read(&mut self, write_index: usize, read_index: usize, value: i32) -> Duration {
        let start = TimingSample::start();
        self.slots[write_index] = black_box(value);
        black_box(self.slots[read_index]);
        TimingSample::finish(start).elapsed()
    }
}

/// Reduces a raw random draw to a valid slot index.
pub fn reduce_index(raw: u32, len: usize) -> usize {
    raw as usize % len
}

/// One trial's random inputs: write index, read index, value.
pub fn draw_trial<R: RngCore>(rng: &mut R, len: usize) -> (usize, usize, i32) {
    let write_index = reduce_index(rng.next_u32(), len);
    let read_index = reduce_index(rng.next_u32(), len);
    // Non-negative like C's rand().
    let value = (rng.next_u32() >> 1) as i32;
    (write_index, read_index, value)
}

/// Runs the memory test over a [`BUFFER_SIZE`] buffer.
pub fn test_memory_access<R: RngCore>(
    workload: &Workload,
    rng: &mut R,
) -> io::Result<MemoryReport> {
    sample(BUFFER_SIZE, workload.memory_trials, rng)
}

fn sample<R: RngCore>(slots: usize, trials: u64, rng: &mut R) -> io::Result<MemoryReport> {
    if slots == 0 {
        return Err(io::Error::other("memory buffer must have at least one slot"));
    }

    let mut buffer = MemoryBuffer::allocate(slots).map_err(|err| {
        eprintln!("memory allocation fail: {err}");
        io::Error::new(
            io::ErrorKind::OutOfMemory,
            format!("memory allocation fail ({slots} slots): {err}"),
        )
    })?;

    let mut total = Duration::ZERO;
    for _ in 0..trials {
        let (write_index, read_index, value) = draw_trial(rng, buffer.len());
        total += buffer.write_then_read(write_index, read_index, value);
    }

    Ok(MemoryReport {
        accesses: trials.saturating_mul(2),
        elapsed: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn reduce_index_covers_edges() {
        let len = BUFFER_SIZE;
        assert_eq!(reduce_index(0, len), 0);
        assert_eq!(reduce_index((len - 1) as u32, len), len - 1);
        assert_eq!(reduce_index(len as u32, len), 0);
        assert_eq!(reduce_index(len as u32 + 1, len), 1);
        assert!(reduce_index(u32::MAX, len) < len);
    }

    #[test]
    fn drawn_indices_stay_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200_000 {
            let (w, r, v) = draw_trial(&mut rng, BUFFER_SIZE);
            assert!(w < BUFFER_SIZE);
            assert!(r < BUFFER_SIZE);
            assert!(v >= 0);
        }
    }

    #[test]
    fn tiny_buffer_still_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = sample(1, 1_000, &mut rng).unwrap();
        assert_eq!(report.accesses, 2_000);
    }

    #[test]
    fn reports_two_accesses_per_trial() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let workload = Workload {
            operation_budget: 0,
            memory_trials: 10_000,
        };
        let report = test_memory_access(&workload, &mut rng).unwrap();
        assert_eq!(report.accesses, 20_000);
    }

    #[test]
    fn zero_trials_report_zero_time() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let report = sample(BUFFER_SIZE, 0, &mut rng).unwrap();
        assert_eq!(report.accesses, 0);
        assert_eq!(report.elapsed, Duration::ZERO);
    }

    #[test]
    fn allocation_failure_is_an_error_not_an_abort() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = sample(usize::MAX, 10, &mut rng).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::OutOfMemory);
    }

    #[test]
    fn buffer_starts_zeroed() {
        let buffer = MemoryBuffer::allocate(16).unwrap();
        assert_eq!(buffer.len(), 16);
        assert!(buffer.slots.iter().all(|&s| s == 0));
    }
}

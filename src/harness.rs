use std::io;
use std::num::NonZeroUsize;
use std::thread;
use std::time::{Duration, Instant};

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::kernels::{KernelKind, OPS_PER_ITERATION};
use crate::report::ArithmeticReport;
use crate::Mode;

/// Nominal arithmetic operation budget shared by every thread count (2^30).
pub const TOTAL_OPERATION_BUDGET: u64 = 1 << 30;

/// Write+read pairs timed by the memory sampler.
pub const MEMORY_TRIALS: u64 = 1_000_000;

/// Upper bound on workers a single fan-out will try to create.
pub const MAX_WORKERS: usize = 1 << 16;

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub threads: NonZeroUsize,
    pub mode: Mode,
    pub seed: u64,
}

impl BenchmarkConfig {
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

/// How much work each benchmark performs.
///
/// The CLI always runs [`Workload::default`]; smaller workloads keep tests
/// and criterion benches fast. Reported counts derive from the workload, so
/// the output stays consistent with whatever actually ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workload {
    pub operation_budget: u64,
    pub memory_trials: u64,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            operation_budget: TOTAL_OPERATION_BUDGET,
            memory_trials: MEMORY_TRIALS,
        }
    }
}

impl Workload {
    /// Kernel iterations each worker executes.
    pub fn iterations_per_thread(&self, threads: NonZeroUsize) -> u64 {
        self.operation_budget / threads.get() as u64
    }

    /// Nominal operation count reported for arithmetic tests.
    ///
    /// Independent of thread count: wall time is what changes with
    /// concurrency, not the reported work.
    pub fn nominal_operations(&self) -> u64 {
        self.operation_budget.saturating_mul(OPS_PER_ITERATION)
    }
}

/// Wall-clock bracket around a timed region.
#[derive(Clone, Copy, Debug)]
pub struct TimingSample {
    pub start: Instant,
    pub end: Instant,
}

impl TimingSample {
    pub fn start() -> Instant {
        Instant::now()
    }

    pub fn finish(start: Instant) -> Self {
        Self {
            start,
            end: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }
}

/// Result of a completed fan-out.
#[derive(Clone, Copy, Debug)]
pub struct FanOut {
    pub timing: TimingSample,
    pub workers_joined: usize,
}

/// Runs `task` once on each of `threads` OS threads and times the whole fan-out.
///
/// Every worker executes the full task (replication, not partition). The
/// sample starts right before the first spawn and ends right after the last
/// join, so thread creation and teardown are included.
///
/// If a worker cannot be spawned, the workers already running are still
/// joined before the error is returned. A panicking worker is reported as an
/// error at join time. Requests above [`MAX_WORKERS`] fail before anything is
/// spawned.
pub fn run_replicated<F>(threads: NonZeroUsize, task: F) -> io::Result<FanOut>
where
    F: Fn() + Sync,
{
    fan_out(threads, &task, worker_builder)
}

fn worker_builder(id: usize) -> thread::Builder {
    thread::Builder::new().name(format!("cpubm-worker-{id}"))
}

fn fan_out<F, B>(threads: NonZeroUsize, task: &F, builder: B) -> io::Result<FanOut>
where
    F: Fn() + Sync,
    B: Fn(usize) -> thread::Builder,
{
    if threads.get() > MAX_WORKERS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("failed to create {threads} workers: the limit is {MAX_WORKERS}"),
        ));
    }

    let start = TimingSample::start();

    let workers_joined = thread::scope(|scope| -> io::Result<usize> {
        let mut handles = Vec::new();
        let mut spawn_error = None;

        for id in 0..threads.get() {
            match builder(id).spawn_scoped(scope, move || task()) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    spawn_error = Some(io::Error::new(
                        err.kind(),
                        format!("failed to create worker {id} of {threads}: {err}"),
                    ));
                    break;
                }
            }
        }

        let mut joined = 0;
        let mut join_error = None;
        for (id, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(()) => joined += 1,
                Err(_) if join_error.is_none() => {
                    join_error = Some(io::Error::other(format!(
                        "failed to join worker {id} of {threads}: worker panicked"
                    )));
                }
                Err(_) => {}
            }
        }

        match spawn_error.or(join_error) {
            Some(err) => Err(err),
            None => Ok(joined),
        }
    })?;

    Ok(FanOut {
        timing: TimingSample::finish(start),
        workers_joined,
    })
}

/// Runs an arithmetic kernel on every configured thread.
pub fn test_arithmetic(
    cfg: &BenchmarkConfig,
    workload: &Workload,
    kind: KernelKind,
) -> io::Result<ArithmeticReport> {
    let iterations = workload.iterations_per_thread(cfg.threads);
    let out = run_replicated(cfg.threads, || kind.run(iterations))?;

    Ok(ArithmeticReport {
        kind,
        operations: workload.nominal_operations(),
        elapsed: out.timing.elapsed(),
        threads: cfg.threads,
    })
}

//! Sequences the selected benchmarks and writes one line per result.

use std::io::{self, Write};

use crate::cpu::cpu_info;
use crate::harness::{test_arithmetic, BenchmarkConfig, Workload};
use crate::kernels::KernelKind;
use crate::memory::test_memory_access;
use crate::Mode;

/// A single benchmark step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    CpuInfo,
    Memory,
    Arithmetic(KernelKind),
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::CpuInfo => "cpu info",
            Step::Memory => "memory access",
            Step::Arithmetic(KernelKind::FloatingPoint) => "floating point",
            Step::Arithmetic(KernelKind::Integer) => "integer",
        }
    }
}

/// Steps executed for `mode`, in output order.
pub fn plan(mode: Mode) -> &'static [Step] {
    match mode {
        Mode::Cpu => &[Step::CpuInfo],
        Mode::Flops => &[Step::Arithmetic(KernelKind::FloatingPoint)],
        Mode::Iops => &[Step::Arithmetic(KernelKind::Integer)],
        Mode::Mem => &[Step::Memory],
        Mode::All => &[
            Step::CpuInfo,
            Step::Memory,
            Step::Arithmetic(KernelKind::FloatingPoint),
            Step::Arithmetic(KernelKind::Integer),
        ],
    }
}

/// What happened across a run.
#[derive(Debug, Default)]
pub struct Outcome {
    pub completed: usize,
    pub failed: Vec<(Step, String)>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs every step of `cfg.mode`, writing each result line to `out`.
///
/// A failed step prints nothing to `out`; its error goes to stderr and the
/// remaining steps still run. Only errors writing to `out` abort the run.
pub fn run<W: Write>(
    cfg: &BenchmarkConfig,
    workload: &Workload,
    out: &mut W,
) -> io::Result<Outcome> {
    let mut rng = cfg.rng();
    let mut outcome = Outcome::default();

    for &step in plan(cfg.mode) {
        let line = match step {
            Step::CpuInfo => Ok(cpu_info().to_string()),
            Step::Memory => test_memory_access(workload, &mut rng).map(|r| r.to_string()),
            Step::Arithmetic(kind) => test_arithmetic(cfg, workload, kind).map(|r| r.to_string()),
        };

        match line {
            Ok(line) => {
                writeln!(out, "{line}")?;
                out.flush()?;
                outcome.completed += 1;
            }
            Err(err) => {
                eprintln!("{} test failed: {err}", step.name());
                outcome.failed.push((step, err.to_string()));
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn small() -> Workload {
        Workload {
            operation_budget: 8_192,
            memory_trials: 1_000,
        }
    }

    fn run_to_string(mode: Mode, threads: usize) -> (String, Outcome) {
        let cfg = BenchmarkConfig {
            threads: NonZeroUsize::new(threads).unwrap(),
            mode,
            seed: 11,
        };
        let mut buf = Vec::new();
        let outcome = run(&cfg, &small(), &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), outcome)
    }

    #[test]
    fn all_runs_four_steps_in_order() {
        let (text, outcome) = run_to_string(Mode::All, 4);
        let lines: Vec<&str> = text.lines().collect();

        assert!(outcome.is_success());
        assert_eq!(outcome.completed, 4);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("nr. of cpus: "));
        assert!(lines[1].starts_with("Did 2000 memory reads and writes in "));
        assert!(lines[2].starts_with("Did 245760 floating point operations in "));
        assert!(lines[2].ends_with(" seconds with 4 threads"));
        assert!(lines[3].starts_with("Did 245760 integer operations in "));
        assert!(lines[3].ends_with(" seconds with 4 threads"));
    }

    #[test]
    fn single_modes_print_one_line() {
        for (mode, prefix) in [
            (Mode::Cpu, "nr. of cpus: "),
            (Mode::Flops, "Did 245760 floating point operations"),
            (Mode::Iops, "Did 245760 integer operations"),
            (Mode::Mem, "Did 2000 memory reads and writes"),
        ] {
            let (text, outcome) = run_to_string(mode, 2);
            assert_eq!(outcome.completed, 1, "mode {}", mode.as_str());
            assert_eq!(text.lines().count(), 1);
            assert!(text.starts_with(prefix), "{text}");
        }
    }

    #[test]
    fn operation_count_independent_of_threads() {
        let counts: Vec<String> = [1, 2, 3, 6]
            .into_iter()
            .map(|t| {
                let (text, _) = run_to_string(Mode::Iops, t);
                text.split_whitespace().nth(1).unwrap().to_string()
            })
            .collect();
        assert!(counts.iter().all(|c| c == "245760"));
    }

    #[test]
    fn plan_for_all_is_fixed() {
        assert_eq!(
            plan(Mode::All),
            &[
                Step::CpuInfo,
                Step::Memory,
                Step::Arithmetic(KernelKind::FloatingPoint),
                Step::Arithmetic(KernelKind::Integer),
            ]
        );
    }
}

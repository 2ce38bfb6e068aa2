pub mod cpu;
pub mod harness;
pub mod kernels;
pub mod memory;
pub mod report;
pub mod runner;

/// Which benchmark(s) a run executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Print the logical processor count.
    Cpu,
    /// Floating-point kernel across all threads.
    Flops,
    /// Integer kernel across all threads.
    Iops,
    /// Random memory write/read latency (single-threaded).
    Mem,
    /// CPU info, memory, floating point, integer, in that order.
    All,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Cpu => "cpu",
            Mode::Flops => "flops",
            Mode::Iops => "iops",
            Mode::Mem => "mem",
            Mode::All => "all",
        }
    }
}

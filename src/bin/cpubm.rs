use clap::{Args as ClapArgs, Parser};
use cpubm::harness::{BenchmarkConfig, Workload};
use cpubm::runner;
use cpubm::Mode;
use std::ffi::OsString;
use std::io;
use std::num::NonZeroUsize;
use std::process::ExitCode;

const USAGE: &str = "./cpubm [--threads <n>] --[cpu/flops/iops/mem/all]";

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct ModeArgs {
    /// Print the number of logical cpus.
    #[arg(long)]
    cpu: bool,
    /// Floating-point throughput.
    #[arg(long)]
    flops: bool,
    /// Integer throughput.
    #[arg(long)]
    iops: bool,
    /// Random memory write/read latency.
    #[arg(long)]
    mem: bool,
    /// cpu, mem, flops and iops in sequence.
    #[arg(long)]
    all: bool,
}

impl From<&ModeArgs> for Mode {
    fn from(m: &ModeArgs) -> Self {
        if m.cpu {
            Mode::Cpu
        } else if m.flops {
            Mode::Flops
        } else if m.iops {
            Mode::Iops
        } else if m.mem {
            Mode::Mem
        } else {
            Mode::All
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cpubm")]
#[command(about = "CPU and memory micro-benchmarks")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Worker threads for the arithmetic tests.
    #[arg(long, value_name = "N")]
    threads: NonZeroUsize,

    #[command(flatten)]
    mode: ModeArgs,
}

/// Accepts exactly `--threads <n> --<mode>`, in that order.
fn parse_args(argv: &[OsString]) -> Option<(NonZeroUsize, Mode)> {
    if argv.len() != 4 || argv[1] != "--threads" {
        return None;
    }
    let args = Args::try_parse_from(argv).ok()?;
    Some((args.threads, Mode::from(&args.mode)))
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
        .unwrap_or_default()
}

fn main() -> ExitCode {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let Some((threads, mode)) = parse_args(&argv) else {
        println!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let cfg = BenchmarkConfig {
        threads,
        mode,
        seed: time_seed(),
    };

    let stdout = io::stdout();
    match runner::run(&cfg, &Workload::default(), &mut stdout.lock()) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(outcome) => {
            eprintln!(
                "{} of {} {} test(s) failed",
                outcome.failed.len(),
                outcome.failed.len() + outcome.completed,
                mode.as_str()
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("failed to write results: {err}");
            ExitCode::FAILURE
        }
    }
}

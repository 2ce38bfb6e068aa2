//! Result types and their one-line text rendering.

use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::kernels::KernelKind;

/// Significant digits used for every elapsed-seconds figure.
pub const ELAPSED_SIGNIFICANT_DIGITS: usize = 2;

#[derive(Clone, Debug)]
pub struct ArithmeticReport {
    pub kind: KernelKind,
    pub operations: u64,
    pub elapsed: Duration,
    pub threads: NonZeroUsize,
}

impl fmt::Display for ArithmeticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Did {} {} operations in {} seconds with {} threads",
            self.operations,
            self.kind.label(),
            format_seconds(self.elapsed),
            self.threads
        )
    }
}

#[derive(Clone, Debug)]
pub struct MemoryReport {
    /// Reads plus writes, two per trial.
    pub accesses: u64,
    /// Sum of the per-pair durations.
    pub elapsed: Duration,
}

impl fmt::Display for MemoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Did {} memory reads and writes in {} seconds",
            self.accesses,
            format_seconds(self.elapsed)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuInfo {
    /// `None` when the platform cannot report a count.
    pub logical_cpus: Option<usize>,
}

impl fmt::Display for CpuInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.logical_cpus {
            Some(n) => write!(f, "nr. of cpus: {n}"),
            None => write!(f, "nr. of cpus: unknown"),
        }
    }
}

pub fn format_seconds(elapsed: Duration) -> String {
    format_significant(elapsed.as_secs_f64(), ELAPSED_SIGNIFICANT_DIGITS)
}

/// Formats `value` the way C's `%.{digits}g` does.
///
/// Fixed notation when the decimal exponent is in `-4..digits`, scientific
/// otherwise; trailing zeros are stripped in both cases.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    // Rounding first so that e.g. 9.96 -> 1.0e1 picks the right notation.
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exp.unsigned_abs()
        )
    } else {
        let precision = (digits as i32 - 1 - exp).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", precision, value)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

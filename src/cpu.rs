use std::thread;

use crate::report::CpuInfo;

/// Logical processors available to this process.
pub fn cpu_info() -> CpuInfo {
    match thread::available_parallelism() {
        Ok(n) => CpuInfo {
            logical_cpus: Some(n.get()),
        },
        Err(err) => {
            eprintln!("could not query logical cpu count: {err}");
            CpuInfo { logical_cpus: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_at_least_one_cpu() {
        let info = cpu_info();
        if let Some(n) = info.logical_cpus {
            assert!(n >= 1);
        }
        assert!(info.to_string().starts_with("nr. of cpus: "));
    }
}

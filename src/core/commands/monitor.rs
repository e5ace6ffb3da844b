use std::env;

use super::{Command, CommandError};
use crate::core::session::SessionState;
use crate::metrics::{self, human_bytes, ProcessInfo, SharedMetrics};

const TOP_COUNT: usize = 10;

/// The monitor builtins report through whatever provider was picked at
/// startup; a failing provider degrades to an "unavailable" line and the
/// loop carries on.

#[derive(Clone)]
pub struct SysinfoCommand {
    metrics: SharedMetrics,
}

impl SysinfoCommand {
    pub fn new(metrics: SharedMetrics) -> Self {
        Self { metrics }
    }
}

impl Command for SysinfoCommand {
    fn execute(&self, session: &mut SessionState, _args: &[String]) -> Result<(), CommandError> {
        println!("Platform: {} {}", env::consts::OS, env::consts::ARCH);
        println!("CWD: {}", session.cwd().display());

        if let Ok(disk) = metrics::disk_usage(session.cwd()) {
            println!(
                "Disk: total={} used={} free={}",
                human_bytes(disk.total),
                human_bytes(disk.used),
                human_bytes(disk.free)
            );
        }

        let mut provider = self
            .metrics
            .lock()
            .map_err(|_| CommandError::Failed("sysinfo: metrics provider unavailable".to_string()))?;

        match provider.cpu_percent() {
            Ok(cpu) => println!("CPU: {:.1}%", cpu),
            Err(e) => println!("CPU: unavailable ({})", e),
        }

        match provider.memory() {
            Ok(mem) => println!(
                "Memory: {:.1}% ({} / {})",
                mem.percent(),
                human_bytes(mem.used),
                human_bytes(mem.total)
            ),
            Err(e) => println!("Memory: unavailable ({})", e),
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct PsCommand {
    metrics: SharedMetrics,
}

impl PsCommand {
    pub fn new(metrics: SharedMetrics) -> Self {
        Self { metrics }
    }
}

impl Command for PsCommand {
    fn execute(&self, _session: &mut SessionState, _args: &[String]) -> Result<(), CommandError> {
        let mut provider = self
            .metrics
            .lock()
            .map_err(|_| CommandError::Failed("ps: metrics provider unavailable".to_string()))?;

        let processes = provider
            .processes()
            .map_err(|e| CommandError::Failed(format!("ps: {}", e)))?;

        println!("{:>6} {:>10} {:>5} {:>5} CMD", "PID", "USER", "CPU%", "MEM%");
        for p in &processes {
            println!(
                "{:6} {:>10.10} {:5.1} {:5.1} {}",
                p.pid, p.user, p.cpu_percent, p.mem_percent, p.command
            );
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct TopCommand {
    metrics: SharedMetrics,
}

impl TopCommand {
    pub fn new(metrics: SharedMetrics) -> Self {
        Self { metrics }
    }
}

impl Command for TopCommand {
    fn execute(&self, _session: &mut SessionState, _args: &[String]) -> Result<(), CommandError> {
        let mut provider = self
            .metrics
            .lock()
            .map_err(|_| CommandError::Failed("top: metrics provider unavailable".to_string()))?;

        let processes = provider
            .processes()
            .map_err(|e| CommandError::Failed(format!("top: {}", e)))?;

        println!("{:>6} {:>5} {:>5} CMD", "PID", "CPU%", "MEM%");
        for p in hottest(processes, TOP_COUNT) {
            println!(
                "{:6} {:5.1} {:5.1} {}",
                p.pid, p.cpu_percent, p.mem_percent, p.command
            );
        }
        Ok(())
    }
}

/// The `count` entries with the highest CPU share, hottest first.
fn hottest(mut processes: Vec<ProcessInfo>, count: usize) -> Vec<ProcessInfo> {
    processes.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    processes.truncate(count);
    processes
}

use std::{fs, process::Command, thread, time::Duration};

use super::{MemoryUsage, MetricsError, MetricsProvider, ProcessInfo};

const CPU_SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Metrics read from operating-system text sources: `/proc/stat` and
/// `/proc/meminfo` for CPU and memory, `ps aux` output for the process
/// table. Parsing is deliberately loose; anything that does not look
/// like a record is skipped.
pub struct ProcfsMetrics;

impl Default for ProcfsMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcfsMetrics {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsProvider for ProcfsMetrics {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn cpu_percent(&mut self) -> Result<f32, MetricsError> {
        let first = cpu_totals(&fs::read_to_string("/proc/stat")?)?;
        thread::sleep(CPU_SAMPLE_INTERVAL);
        let second = cpu_totals(&fs::read_to_string("/proc/stat")?)?;

        let total_delta = second.total.saturating_sub(first.total);
        if total_delta == 0 {
            return Ok(0.0);
        }
        let idle_delta = second.idle.saturating_sub(first.idle);
        Ok(((1.0 - idle_delta as f64 / total_delta as f64) * 100.0) as f32)
    }

    fn memory(&mut self) -> Result<MemoryUsage, MetricsError> {
        parse_meminfo(&fs::read_to_string("/proc/meminfo")?)
    }

    fn processes(&mut self) -> Result<Vec<ProcessInfo>, MetricsError> {
        let output = Command::new("ps")
            .arg("aux")
            .output()
            .map_err(|e| MetricsError::Unavailable(format!("cannot run ps: {}", e)))?;

        if !output.status.success() {
            return Err(MetricsError::Unavailable(format!(
                "ps exited with status: {}",
                output.status
            )));
        }

        Ok(parse_ps_aux(&String::from_utf8_lossy(&output.stdout)))
    }
}

struct CpuSample {
    idle: u64,
    total: u64,
}

/// Parses the aggregate `cpu` line of /proc/stat. Idle time counts the
/// iowait field when present.
fn cpu_totals(stat: &str) -> Result<CpuSample, MetricsError> {
    let line = stat
        .lines()
        .find(|l| l.starts_with("cpu "))
        .ok_or_else(|| MetricsError::Parse("no aggregate cpu line in /proc/stat".to_string()))?;

    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .filter_map(|f| f.parse().ok())
        .collect();

    if fields.len() < 4 {
        return Err(MetricsError::Parse(format!(
            "short cpu line in /proc/stat: {}",
            line
        )));
    }

    let idle = fields[3] + fields.get(4).copied().unwrap_or(0);
    let total = fields.iter().sum();

    Ok(CpuSample { idle, total })
}

fn parse_meminfo(meminfo: &str) -> Result<MemoryUsage, MetricsError> {
    let mut total_kb = None;
    let mut available_kb = None;
    let mut free_kb = None;

    for line in meminfo.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            total_kb = first_number(rest);
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            available_kb = first_number(rest);
        } else if let Some(rest) = line.strip_prefix("MemFree:") {
            free_kb = first_number(rest);
        }
    }

    let total_kb =
        total_kb.ok_or_else(|| MetricsError::Parse("no MemTotal in /proc/meminfo".to_string()))?;
    // Older kernels lack MemAvailable; fall back to MemFree
    let available_kb = available_kb.or(free_kb).unwrap_or(0);

    Ok(MemoryUsage {
        total: total_kb * 1024,
        used: total_kb.saturating_sub(available_kb) * 1024,
    })
}

fn first_number(s: &str) -> Option<u64> {
    s.split_whitespace().next().and_then(|n| n.parse().ok())
}

/// Loose parse of `ps aux` output: USER PID %CPU %MEM ... COMMAND.
/// Lines that do not fit the column layout are skipped.
fn parse_ps_aux(output: &str) -> Vec<ProcessInfo> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 11 {
                return None;
            }
            let pid = fields[1].parse().ok()?;
            Some(ProcessInfo {
                pid,
                user: fields[0].to_string(),
                cpu_percent: fields[2].parse().unwrap_or(0.0),
                mem_percent: fields[3].parse().unwrap_or(0.0),
                command: fields[10..].join(" "),
            })
        })
        .collect()
}

#[cfg(feature = "native-metrics")]
mod native;
mod procfs;

use std::fmt;
use std::sync::{Arc, Mutex};

/// Handle shared between the monitor builtins and the shell.
pub type SharedMetrics = Arc<Mutex<Box<dyn MetricsProvider>>>;

/// A source of CPU, memory, and process data. The native implementation
/// wraps the `sysinfo` crate; the procfs implementation reads operating
/// system pseudo-files and diagnostic command output. One of the two is
/// picked at startup and used for the rest of the session.
pub trait MetricsProvider: Send {
    fn name(&self) -> &'static str;
    fn cpu_percent(&mut self) -> Result<f32, MetricsError>;
    fn memory(&mut self) -> Result<MemoryUsage, MetricsError>;
    fn processes(&mut self) -> Result<Vec<ProcessInfo>, MetricsError>;
}

/// Picks the metrics backend: native when compiled in and not bypassed,
/// otherwise the /proc reader.
pub fn select_provider(force_procfs: bool) -> Box<dyn MetricsProvider> {
    #[cfg(feature = "native-metrics")]
    {
        if !force_procfs {
            return Box::new(native::NativeMetrics::new());
        }
    }
    #[cfg(not(feature = "native-metrics"))]
    let _ = force_procfs;

    Box::new(procfs::ProcfsMetrics::new())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryUsage {
    pub total: u64,
    pub used: u64,
}

impl MemoryUsage {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f64 / self.total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub user: String,
    pub cpu_percent: f32,
    pub mem_percent: f32,
    pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

/// Filesystem usage of the volume holding `path`.
#[cfg(unix)]
pub fn disk_usage(path: &std::path::Path) -> Result<DiskUsage, MetricsError> {
    use std::os::unix::ffi::OsStrExt;

    let c_path = std::ffi::CString::new(path.as_os_str().as_bytes())
        .map_err(|_| MetricsError::Unavailable("path contains a NUL byte".to_string()))?;

    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(MetricsError::Io(std::io::Error::last_os_error()));
    }

    let frsize = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * frsize;
    let free = stat.f_bavail as u64 * frsize;
    let used = (stat.f_blocks as u64 - stat.f_bfree as u64) * frsize;

    Ok(DiskUsage { total, used, free })
}

#[cfg(not(unix))]
pub fn disk_usage(_path: &std::path::Path) -> Result<DiskUsage, MetricsError> {
    Err(MetricsError::Unavailable(
        "disk usage is only reported on unix".to_string(),
    ))
}

pub fn human_bytes(n: u64) -> String {
    let mut value = n as f64;
    for unit in ["B", "KB", "MB", "GB", "TB", "PB"] {
        if value < 1024.0 {
            return format!("{:.1}{}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1}EB", value)
}

#[derive(Debug)]
pub enum MetricsError {
    Unavailable(String),
    Parse(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for MetricsError {
    fn from(e: std::io::Error) -> Self {
        MetricsError::Io(e)
    }
}

impl fmt::Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::Unavailable(msg) => write!(f, "unavailable: {}", msg),
            MetricsError::Parse(msg) => write!(f, "parse error: {}", msg),
            MetricsError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for MetricsError {}

use std::thread;

use sysinfo::{ProcessesToUpdate, System, Users, MINIMUM_CPU_UPDATE_INTERVAL};

use super::{MemoryUsage, MetricsError, MetricsProvider, ProcessInfo};

/// Metrics backed by the `sysinfo` crate.
pub struct NativeMetrics {
    system: System,
    users: Users,
}

impl Default for NativeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeMetrics {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            users: Users::new_with_refreshed_list(),
        }
    }

    fn user_name(&self, process: &sysinfo::Process) -> String {
        process
            .user_id()
            .and_then(|uid| self.users.get_user_by_id(uid))
            .map(|user| user.name().to_string())
            .unwrap_or_default()
    }
}

impl MetricsProvider for NativeMetrics {
    fn name(&self) -> &'static str {
        "native"
    }

    fn cpu_percent(&mut self) -> Result<f32, MetricsError> {
        // CPU usage is a delta; two refreshes are needed for a reading.
        self.system.refresh_cpu_usage();
        thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        self.system.refresh_cpu_usage();
        Ok(self.system.global_cpu_usage())
    }

    fn memory(&mut self) -> Result<MemoryUsage, MetricsError> {
        self.system.refresh_memory();
        Ok(MemoryUsage {
            total: self.system.total_memory(),
            used: self.system.used_memory(),
        })
    }

    fn processes(&mut self) -> Result<Vec<ProcessInfo>, MetricsError> {
        self.system.refresh_memory();
        self.system.refresh_processes(ProcessesToUpdate::All, true);

        let total_memory = self.system.total_memory().max(1);
        let mut processes: Vec<ProcessInfo> = self
            .system
            .processes()
            .iter()
            .map(|(pid, process)| {
                let command = if process.cmd().is_empty() {
                    process.name().to_string_lossy().into_owned()
                } else {
                    process
                        .cmd()
                        .iter()
                        .map(|arg| arg.to_string_lossy())
                        .collect::<Vec<_>>()
                        .join(" ")
                };

                ProcessInfo {
                    pid: pid.as_u32(),
                    user: self.user_name(process),
                    cpu_percent: process.cpu_usage(),
                    mem_percent: (process.memory() as f64 / total_memory as f64 * 100.0) as f32,
                    command,
                }
            })
            .collect();

        processes.sort_by_key(|p| p.pid);
        Ok(processes)
    }
}

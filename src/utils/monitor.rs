use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct StageStats {
    pub rows: usize,
    pub memory_usage_mb: Option<u64>,
    pub peak_memory_mb: Option<u64>,
    pub elapsed_time: Duration,
}

/// Logs row counts and timings per pipeline stage; process memory is added
/// when the `cli` feature brings in sysinfo.
pub struct StageMonitor {
    enabled: bool,
    start_time: Instant,
    #[cfg(feature = "cli")]
    system: Mutex<System>,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
    #[cfg(feature = "cli")]
    peak_memory: Mutex<u64>,
}

impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            start_time: Instant::now(),
            #[cfg(feature = "cli")]
            system: Mutex::new(System::new()),
            #[cfg(feature = "cli")]
            pid: sysinfo::get_current_pid().ok(),
            #[cfg(feature = "cli")]
            peak_memory: Mutex::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[cfg(feature = "cli")]
    fn memory_mb(&self) -> Option<(u64, u64)> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let memory_mb = system.process(pid)?.memory() / 1024 / 1024;

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }
        Some((memory_mb, *peak))
    }

    #[cfg(not(feature = "cli"))]
    fn memory_mb(&self) -> Option<(u64, u64)> {
        None
    }

    pub fn stats(&self, rows: usize) -> Option<StageStats> {
        if !self.enabled {
            return None;
        }
        let memory = self.memory_mb();
        Some(StageStats {
            rows,
            memory_usage_mb: memory.map(|(current, _)| current),
            peak_memory_mb: memory.map(|(_, peak)| peak),
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stage(&self, stage: &str, rows: usize) {
        if let Some(stats) = self.stats(rows) {
            match stats.memory_usage_mb {
                Some(memory) => tracing::info!(
                    "📊 {} - rows: {}, Memory: {}MB, Time: {:?}",
                    stage,
                    stats.rows,
                    memory,
                    stats.elapsed_time
                ),
                None => tracing::info!(
                    "📊 {} - rows: {}, Time: {:?}",
                    stage,
                    stats.rows,
                    stats.elapsed_time
                ),
            }
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.stats(0) {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}",
                stats.elapsed_time,
                stats
                    .peak_memory_mb
                    .map_or_else(|| "n/a".to_string(), |mb| format!("{}MB", mb))
            );
        }
    }
}

impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

//! Snapshot data model and the provider trait the dashboard polls.
//!
//! A [`Snapshot`] is produced once per tick and handed to the controller as
//! owned data; the renderers never observe a half-updated snapshot.

pub mod history;
pub mod mock;
pub mod system;

use color_eyre::Result;

pub use history::HistorySeries;

#[derive(Debug, Clone, Default)]
pub struct CpuMetrics {
    pub global_usage_percent: f64,
    pub per_core_usage: Vec<f64>,
    pub per_core_temp: Vec<f64>,
    pub load_avg: [f64; 3],
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryMetrics {
    pub total: u64,
    pub used: u64,
    pub used_percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuHealth {
    #[default]
    Healthy,
    Degraded,
    Failed,
}

impl GpuHealth {
    pub fn label(self) -> &'static str {
        match self {
            GpuHealth::Healthy => "Healthy",
            GpuHealth::Degraded => "Degraded",
            GpuHealth::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GpuProcess {
    pub pid: u32,
    pub name: String,
    pub memory_used: u64,
}

#[derive(Debug, Clone, Default)]
pub struct GpuMetrics {
    pub available: bool,
    pub name: String,
    pub utilization: u32,
    pub memory_used: u64,
    pub memory_total: u64,
    pub memory_util: u32,
    pub temperature: u32,
    pub fan_speed: u32,
    pub graphics_clock: u32,
    pub memory_clock: u32,
    pub power_usage: u32,
    pub power_limit: u32,
    pub health: GpuHealth,
    pub error_count: u32,
    pub history: HistorySeries,
    pub processes: Vec<GpuProcess>,
}

impl GpuMetrics {
    /// Placeholder for hosts without a usable GPU backend.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiskMetrics {
    pub read_bytes_per_sec: u64,
    pub write_bytes_per_sec: u64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct NetMetrics {
    pub download_bytes_per_sec: u64,
    pub upload_bytes_per_sec: u64,
}

/// One process as seen at snapshot time. Regenerated wholesale each tick,
/// never mutated by the UI.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub pid: u32,
    pub user: String,
    pub command: String,
    pub state: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub threads: u32,
    pub priority: i32,
    pub gpu_user: bool,
}

/// Point-in-time capture of everything the dashboard displays.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub gpu: GpuMetrics,
    pub disk: DiskMetrics,
    pub net: NetMetrics,
    pub processes: Vec<ProcessRecord>,
}

/// Metric acquisition backend. Implementations must be cheap to poll at the
/// tick interval and are only ever called from the control-loop thread.
pub trait MetricsProvider {
    fn init(&mut self) -> Result<()>;
    fn snapshot(&mut self) -> Result<Snapshot>;
    fn shutdown(&mut self);
}

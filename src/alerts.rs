//! Threshold evaluation: one boolean per panel category, recomputed every
//! tick. No hysteresis; a metric oscillating around its threshold flaps
//! the flag.

use crate::config::AlertThresholds;
use crate::metrics::Snapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFlags {
    pub cpu: bool,
    pub gpu: bool,
    pub mem: bool,
    pub disk: bool,
}

/// A flag is raised iff any metric in its category reaches or exceeds the
/// configured threshold. The GPU flag stays low when no GPU is present.
pub fn evaluate(snapshot: &Snapshot, thresholds: &AlertThresholds) -> AlertFlags {
    let max_core_temp = snapshot
        .cpu
        .per_core_temp
        .iter()
        .copied()
        .fold(0.0f64, f64::max);

    AlertFlags {
        cpu: snapshot.cpu.global_usage_percent >= thresholds.cpu_usage_percent
            || max_core_temp >= thresholds.cpu_temp_celsius,
        gpu: snapshot.gpu.available
            && (snapshot.gpu.utilization as f64 >= thresholds.gpu_usage_percent
                || snapshot.gpu.temperature as f64 >= thresholds.gpu_temp_celsius),
        mem: snapshot.memory.used_percent >= thresholds.memory_usage_percent,
        disk: snapshot.disk.used_percent >= thresholds.disk_usage_percent,
    }
}

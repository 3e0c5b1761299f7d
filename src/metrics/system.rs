//! Live metrics provider backed by sysinfo.

use std::time::Instant;

use color_eyre::Result;
use sysinfo::{Components, Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System, Users};

use crate::system::platform;

use super::{
    CpuMetrics, DiskMetrics, GpuMetrics, MemoryMetrics, MetricsProvider, NetMetrics,
    ProcessRecord, Snapshot,
};

pub struct SystemProvider {
    sys: System,
    networks: Networks,
    disks: Disks,
    components: Components,
    users: Users,
    last_refresh: Instant,
    max_processes: usize,
}

impl SystemProvider {
    pub fn new(max_processes: usize) -> Self {
        Self {
            sys: System::new(),
            networks: Networks::new(),
            disks: Disks::new(),
            components: Components::new(),
            users: Users::new(),
            last_refresh: Instant::now(),
            max_processes: max_processes.max(1),
        }
    }

    fn build_snapshot(&self, elapsed_secs: f64) -> Snapshot {
        let per_core_usage: Vec<f64> = self
            .sys
            .cpus()
            .iter()
            .map(|c| c.cpu_usage() as f64)
            .collect();

        let mut core_temps: Vec<(String, f64)> = self
            .components
            .iter()
            .filter_map(|c| {
                let label = c.label().to_lowercase();
                if label.contains("core") || label.contains("cpu") {
                    c.temperature().map(|t| (label, t as f64))
                } else {
                    None
                }
            })
            .collect();
        core_temps.sort_by(|a, b| a.0.cmp(&b.0));
        let per_core_temp: Vec<f64> = (0..per_core_usage.len())
            .map(|i| core_temps.get(i).map(|(_, t)| *t).unwrap_or(0.0))
            .collect();

        let load = System::load_average();
        let cpu = CpuMetrics {
            global_usage_percent: self.sys.global_cpu_usage() as f64,
            per_core_usage,
            per_core_temp,
            load_avg: [load.one, load.five, load.fifteen],
            uptime_secs: System::uptime(),
        };

        let total = self.sys.total_memory();
        let used = self.sys.used_memory();
        let swap_total = self.sys.total_swap();
        let swap_used = self.sys.used_swap();
        let memory = MemoryMetrics {
            total,
            used,
            used_percent: percent(used, total),
            swap_total,
            swap_used,
            swap_percent: percent(swap_used, swap_total),
        };

        let mut disk_read = 0u64;
        let mut disk_write = 0u64;
        let mut processes = Vec::with_capacity(self.sys.processes().len());
        for (pid, process) in self.sys.processes() {
            let pid_u32 = pid.as_u32();
            let usage = process.disk_usage();
            disk_read += usage.read_bytes;
            disk_write += usage.written_bytes;

            let user = process
                .user_id()
                .and_then(|uid| self.users.get_user_by_id(uid))
                .map(|u| u.name().to_string())
                .unwrap_or_else(|| "?".to_string());

            let command = process.name().to_string_lossy().to_string();

            processes.push(ProcessRecord {
                pid: pid_u32,
                user,
                command,
                state: process
                    .status()
                    .to_string()
                    .chars()
                    .next()
                    .unwrap_or('?')
                    .to_string(),
                cpu_percent: process.cpu_usage() as f64,
                mem_percent: percent(process.memory(), total),
                threads: platform::process_threads(pid_u32).unwrap_or(1),
                priority: platform::process_niceness(pid_u32).unwrap_or(0),
                gpu_user: false,
            });
        }

        // Keep the busiest processes when the host has more than the display
        // budget; the pipeline re-sorts per the user's sort key anyway.
        processes.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        processes.truncate(self.max_processes);

        let disk_used_percent = self
            .disks
            .iter()
            .map(|d| {
                let total = d.total_space();
                percent(total.saturating_sub(d.available_space()), total)
            })
            .fold(0.0f64, f64::max);

        let disk = DiskMetrics {
            read_bytes_per_sec: rate(disk_read, elapsed_secs),
            write_bytes_per_sec: rate(disk_write, elapsed_secs),
            used_percent: disk_used_percent,
        };

        let mut rx = 0u64;
        let mut tx = 0u64;
        for (_, data) in self.networks.iter() {
            rx += data.received();
            tx += data.transmitted();
        }
        let net = NetMetrics {
            download_bytes_per_sec: rate(rx, elapsed_secs),
            upload_bytes_per_sec: rate(tx, elapsed_secs),
        };

        Snapshot {
            cpu,
            memory,
            // Vendor GPU backends are out of scope; the panel renders N/A.
            gpu: GpuMetrics::unavailable(),
            disk,
            net,
            processes,
        }
    }
}

impl MetricsProvider for SystemProvider {
    fn init(&mut self) -> Result<()> {
        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::everything(),
        );
        self.networks = Networks::new_with_refreshed_list();
        self.disks = Disks::new_with_refreshed_list();
        self.components = Components::new_with_refreshed_list();
        self.users = Users::new_with_refreshed_list();
        self.last_refresh = Instant::now();
        Ok(())
    }

    fn snapshot(&mut self) -> Result<Snapshot> {
        let elapsed = self.last_refresh.elapsed().as_secs_f64().max(0.001);
        self.last_refresh = Instant::now();

        self.sys.refresh_memory();
        self.sys.refresh_cpu_all();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_memory()
                .with_cpu()
                .with_disk_usage()
                .with_user(sysinfo::UpdateKind::OnlyIfNotSet),
        );
        self.networks.refresh(true);
        self.disks.refresh(true);
        self.components.refresh(true);

        Ok(self.build_snapshot(elapsed))
    }

    fn shutdown(&mut self) {}
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

fn rate(bytes: u64, elapsed_secs: f64) -> u64 {
    (bytes as f64 / elapsed_secs) as u64
}

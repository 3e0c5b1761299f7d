//! Deterministic scripted provider for demos and UI tests.

use color_eyre::Result;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    CpuMetrics, DiskMetrics, GpuHealth, GpuMetrics, GpuProcess, HistorySeries, MemoryMetrics,
    MetricsProvider, NetMetrics, ProcessRecord, Snapshot,
};

const USERS: [&str; 4] = ["root", "jules", "systemd", "mysql"];
const COMMANDS: [&str; 7] = ["chrome", "code", "cargo", "kworker", "bash", "python", "java"];
const CORES: usize = 8;
const GPU_PROCS: usize = 5;

/// Synthesizes plausible metrics from a seeded RNG. The same seed yields the
/// same sequence of snapshots, which is what the UI tests rely on.
pub struct MockProvider {
    rng: StdRng,
    history: HistorySeries,
    uptime_secs: u64,
    process_count: usize,
}

impl MockProvider {
    pub fn new(seed: u64, history_len: usize, process_count: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            history: HistorySeries::new(history_len),
            uptime_secs: 3600,
            process_count: process_count.clamp(1, 50),
        }
    }
}

impl MetricsProvider for MockProvider {
    fn init(&mut self) -> Result<()> {
        for _ in 0..self.history.capacity() {
            let sample = 10.0 + self.rng.random::<f64>() * 30.0;
            self.history.push(sample);
        }
        Ok(())
    }

    fn snapshot(&mut self) -> Result<Snapshot> {
        self.uptime_secs += 1;

        let mut per_core_usage = Vec::with_capacity(CORES);
        let mut per_core_temp = Vec::with_capacity(CORES);
        for _ in 0..CORES {
            per_core_usage.push(10.0 + self.rng.random::<f64>() * 30.0);
            per_core_temp.push(40.0 + self.rng.random::<f64>() * 10.0);
        }

        let cpu = CpuMetrics {
            global_usage_percent: 20.0 + self.rng.random::<f64>() * 10.0,
            per_core_usage,
            per_core_temp,
            load_avg: [1.5, 1.2, 0.8],
            uptime_secs: self.uptime_secs,
        };

        let mem_total = 32 * 1024 * 1024 * 1024u64;
        let mem_used = 12 * 1024 * 1024 * 1024 + self.rng.random_range(0..1024 * 1024 * 1024u64);
        let memory = MemoryMetrics {
            total: mem_total,
            used: mem_used,
            used_percent: mem_used as f64 / mem_total as f64 * 100.0,
            swap_total: 8 * 1024 * 1024 * 1024,
            swap_used: 1024 * 1024 * 1024,
            swap_percent: 12.5,
        };

        let utilization = 50 + self.rng.random_range(0..30u32);
        self.history.push(utilization as f64);

        let mut processes = Vec::with_capacity(self.process_count);
        let mut gpu_processes = Vec::with_capacity(GPU_PROCS);
        for i in 0..self.process_count {
            let pid = 1000 + i as u32;
            let gpu_user = i < GPU_PROCS;
            let command = COMMANDS[self.rng.random_range(0..COMMANDS.len())];
            processes.push(ProcessRecord {
                pid,
                user: USERS[self.rng.random_range(0..USERS.len())].to_string(),
                command: command.to_string(),
                state: "R".to_string(),
                cpu_percent: self.rng.random::<f64>() * 5.0,
                mem_percent: self.rng.random::<f64>() * 2.0,
                threads: 1 + self.rng.random_range(0..10u32),
                priority: 0,
                gpu_user,
            });
            if gpu_user {
                gpu_processes.push(GpuProcess {
                    pid,
                    name: command.to_string(),
                    memory_used: self.rng.random_range(0..1000u64) * 1024 * 1024,
                });
            }
        }

        let memory_total = 24_576 * 1024 * 1024u64;
        let memory_used = 8 * 1024 * 1024 * 1024u64;
        let gpu = GpuMetrics {
            available: true,
            name: "NVIDIA GeForce RTX 4090".to_string(),
            utilization,
            memory_used,
            memory_total,
            memory_util: (memory_used as f64 / memory_total as f64 * 100.0) as u32,
            temperature: 60 + self.rng.random_range(0..10u32),
            fan_speed: 40 + self.rng.random_range(0..10u32),
            graphics_clock: 2500,
            memory_clock: 10_500,
            power_usage: 150_000,
            power_limit: 450_000,
            health: GpuHealth::Healthy,
            error_count: 0,
            history: self.history.clone(),
            processes: gpu_processes,
        };

        let disk = DiskMetrics {
            read_bytes_per_sec: self.scaled_rate(10 * 1024 * 1024),
            write_bytes_per_sec: self.scaled_rate(5 * 1024 * 1024),
            used_percent: 62.0,
        };
        let net = NetMetrics {
            download_bytes_per_sec: self.scaled_rate(2 * 1024 * 1024),
            upload_bytes_per_sec: self.scaled_rate(1024 * 1024),
        };

        Ok(Snapshot {
            cpu,
            memory,
            gpu,
            disk,
            net,
            processes,
        })
    }

    fn shutdown(&mut self) {}
}

impl MockProvider {
    fn scaled_rate(&mut self, base: u64) -> u64 {
        (base as f64 * (0.8 + self.rng.random::<f64>() * 0.4)) as u64
    }
}

//! Process list pipeline: filter, sort, and materialize display rows.

use crate::metrics::ProcessRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Cpu,
    Mem,
    Pid,
}

impl SortKey {
    /// Fixed cycle order: CPU → Memory → PID → CPU.
    pub fn next(self) -> Self {
        match self {
            SortKey::Cpu => SortKey::Mem,
            SortKey::Mem => SortKey::Pid,
            SortKey::Pid => SortKey::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Cpu => "CPU",
            SortKey::Mem => "MEM",
            SortKey::Pid => "PID",
        }
    }
}

/// Filter text plus sort key. The pending buffer holds keystrokes while the
/// user is typing; committing copies it into `filter`.
#[derive(Debug, Clone, Default)]
pub struct FilterSortState {
    pub filter: String,
    pub pending: String,
    pub sort_key: SortKey,
}

impl FilterSortState {
    pub fn commit_pending(&mut self) {
        self.filter = self.pending.clone();
    }
}

/// One formatted row of the process table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRow {
    pub pid: u32,
    pub user: String,
    pub cpu: String,
    pub mem: String,
    pub command: String,
}

/// Case-insensitive substring match on command or user, or an exact decimal
/// match on the PID. An empty filter passes everything through unchanged.
pub fn matches_filter(record: &ProcessRecord, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    record.command.to_lowercase().contains(&needle)
        || record.user.to_lowercase().contains(&needle)
        || record.pid.to_string() == needle
}

/// Filter then sort a snapshot's process list into display order. CPU and
/// memory sort descending, PID ascending; ties keep the input order.
pub fn select(records: &[ProcessRecord], filter: &str, sort_key: SortKey) -> Vec<ProcessRecord> {
    let mut selected: Vec<ProcessRecord> = records
        .iter()
        .filter(|r| matches_filter(r, filter))
        .cloned()
        .collect();

    match sort_key {
        SortKey::Cpu => selected.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortKey::Mem => selected.sort_by(|a, b| {
            b.mem_percent
                .partial_cmp(&a.mem_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortKey::Pid => selected.sort_by_key(|r| r.pid),
    }
    selected
}

/// Format records into display rows, truncated to `max_rows`. Percentages
/// render with one decimal place.
pub fn materialize(records: &[ProcessRecord], max_rows: usize) -> Vec<ProcessRow> {
    records
        .iter()
        .take(max_rows)
        .map(|r| ProcessRow {
            pid: r.pid,
            user: r.user.clone(),
            cpu: format!("{:.1}", r.cpu_percent),
            mem: format!("{:.1}", r.mem_percent),
            command: r.command.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32, user: &str, command: &str, cpu: f64, mem: f64) -> ProcessRecord {
        ProcessRecord {
            pid,
            user: user.to_string(),
            command: command.to_string(),
            state: "R".to_string(),
            cpu_percent: cpu,
            mem_percent: mem,
            threads: 1,
            priority: 0,
            gpu_user: false,
        }
    }

    fn records() -> Vec<ProcessRecord> {
        vec![
            record(1234, "root", "chrome", 5.0, 2.0),
            record(12345, "jules", "cargo", 50.0, 1.0),
            record(7, "mysql", "mysqld", 5.0, 8.0),
        ]
    }

    #[test]
    fn sort_cycle_is_a_fixed_three_cycle() {
        assert_eq!(SortKey::Cpu.next(), SortKey::Mem);
        assert_eq!(SortKey::Mem.next(), SortKey::Pid);
        assert_eq!(SortKey::Pid.next(), SortKey::Cpu);
    }

    #[test]
    fn filter_is_case_insensitive_on_user_and_command() {
        let rows = select(&records(), "ROOT", SortKey::Pid);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pid, 1234);

        let rows = select(&records(), "CHRO", SortKey::Pid);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].command, "chrome");
    }

    #[test]
    fn pid_filter_is_exact() {
        let rows = select(&records(), "1234", SortKey::Pid);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pid, 1234);

        // "123" is not a prefix match on PID and matches no name either.
        let rows = select(&records(), "123", SortKey::Pid);
        assert!(rows.is_empty());
    }

    #[test]
    fn empty_filter_preserves_input_order() {
        let rows = select(&records(), "", SortKey::Cpu);
        assert_eq!(rows.len(), 3);
        // Equal CPU keys keep their relative input order.
        let pids: Vec<u32> = rows.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![12345, 1234, 7]);
    }

    #[test]
    fn cpu_and_mem_sort_descending_pid_ascending() {
        let rows = select(&records(), "", SortKey::Mem);
        let pids: Vec<u32> = rows.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![7, 1234, 12345]);

        let rows = select(&records(), "", SortKey::Pid);
        let pids: Vec<u32> = rows.iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![7, 1234, 12345]);
    }

    #[test]
    fn materialize_formats_one_decimal_and_bounds_rows() {
        let rows = materialize(&records(), 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cpu, "5.0");
        assert_eq!(rows[0].mem, "2.0");

        let rows = materialize(&select(&records(), "", SortKey::Cpu), 10);
        assert_eq!(rows[0].cpu, "50.0");
    }

    #[test]
    fn commit_pending_copies_buffer() {
        let mut state = FilterSortState::default();
        state.pending = "chr".to_string();
        state.commit_pending();
        assert_eq!(state.filter, "chr");
    }
}

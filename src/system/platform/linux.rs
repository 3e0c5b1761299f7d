use super::PlatformExtensions;

pub struct Platform;

/// Fields after the comm column in /proc/{pid}/stat:
/// state(0) ppid(1) pgrp(2) session(3) tty_nr(4) tpgid(5) flags(6)
/// minflt(7) cminflt(8) majflt(9) cmajflt(10) utime(11) stime(12)
/// cutime(13) cstime(14) priority(15) nice(16) num_threads(17)
fn stat_field(pid: u32, index: usize) -> Option<String> {
    let path = format!("/proc/{pid}/stat");
    let contents = std::fs::read_to_string(path).ok()?;
    // comm may contain spaces and parens, so find the closing )
    let after_comm = contents.rfind(')')? + 1;
    contents[after_comm..]
        .split_whitespace()
        .nth(index)
        .map(|s| s.to_string())
}

impl PlatformExtensions for Platform {
    fn process_niceness(pid: u32) -> Option<i32> {
        stat_field(pid, 16)?.parse().ok()
    }

    fn set_process_niceness(pid: u32, value: i32) -> bool {
        unsafe { libc::setpriority(libc::PRIO_PROCESS, pid as libc::id_t, value) == 0 }
    }

    fn process_threads(pid: u32) -> Option<u32> {
        stat_field(pid, 17)?.parse().ok()
    }
}

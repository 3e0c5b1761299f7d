pub trait PlatformExtensions {
    fn process_niceness(pid: u32) -> Option<i32>;
    fn set_process_niceness(pid: u32, value: i32) -> bool;
    fn process_threads(pid: u32) -> Option<u32>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

/// Scheduling-priority ("niceness") value for a process; lower means higher
/// priority on Unix.
pub fn process_niceness(pid: u32) -> Option<i32> {
    platform_impl::Platform::process_niceness(pid)
}

pub fn set_process_niceness(pid: u32, value: i32) -> bool {
    platform_impl::Platform::set_process_niceness(pid, value)
}

pub fn process_threads(pid: u32) -> Option<u32> {
    platform_impl::Platform::process_threads(pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_do_not_panic_for_current_pid() {
        let pid = std::process::id();
        let _ = process_niceness(pid);
        let _ = process_threads(pid);
    }
}

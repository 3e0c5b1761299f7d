//! OS-facing process control: termination and scheduling priority.
//!
//! All operations are synchronous, best-effort, single-shot. Callers log
//! failures and move on; nothing here retries.

use color_eyre::Result;
use color_eyre::eyre::eyre;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};

use super::platform;

pub trait ProcessControl {
    /// Request termination (SIGTERM or the platform equivalent).
    fn send_terminate(&mut self, pid: u32) -> Result<()>;
    /// Current niceness of the process.
    fn niceness(&mut self, pid: u32) -> Result<i32>;
    /// Request the niceness be set to `value`.
    fn set_niceness(&mut self, pid: u32, value: i32) -> Result<()>;
}

pub struct SysControl {
    sys: System,
}

impl SysControl {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for SysControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessControl for SysControl {
    fn send_terminate(&mut self, pid: u32) -> Result<()> {
        let sys_pid = Pid::from_u32(pid);
        let pids = [sys_pid];
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&pids),
            true,
            ProcessRefreshKind::nothing(),
        );
        let process = self
            .sys
            .process(sys_pid)
            .ok_or_else(|| eyre!("process {pid} not found"))?;
        match process.kill_with(Signal::Term) {
            Some(true) => Ok(()),
            Some(false) => Err(eyre!("failed to send SIGTERM to PID {pid}")),
            None => {
                // Signal not supported on this platform, fall back to kill()
                if process.kill() {
                    Ok(())
                } else {
                    Err(eyre!("failed to kill PID {pid} (permission denied?)"))
                }
            }
        }
    }

    fn niceness(&mut self, pid: u32) -> Result<i32> {
        platform::process_niceness(pid).ok_or_else(|| eyre!("cannot read niceness of PID {pid}"))
    }

    fn set_niceness(&mut self, pid: u32, value: i32) -> Result<()> {
        if platform::set_process_niceness(pid, value) {
            Ok(())
        } else {
            Err(eyre!("cannot set niceness of PID {pid} to {value}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminate_nonexistent_pid_errors() {
        let mut control = SysControl::new();
        assert!(control.send_terminate(u32::MAX).is_err());
    }

    #[test]
    fn niceness_of_current_process_is_readable_on_unix() {
        if cfg!(unix) {
            let mut control = SysControl::new();
            let nice = control.niceness(std::process::id()).unwrap();
            assert!((-20..=19).contains(&nice));
        }
    }
}

use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_niceness(pid: u32) -> Option<i32> {
        // getpriority returns -1 on error, but -1 can also be a valid
        // niceness; check errno to distinguish.
        unsafe { *libc::__error() = 0 };
        let nice = unsafe { libc::getpriority(libc::PRIO_PROCESS, pid as libc::id_t) };
        let errno = unsafe { *libc::__error() };
        if nice == -1 && errno != 0 { None } else { Some(nice) }
    }

    fn set_process_niceness(pid: u32, value: i32) -> bool {
        unsafe { libc::setpriority(libc::PRIO_PROCESS, pid as libc::id_t, value) == 0 }
    }

    fn process_threads(_pid: u32) -> Option<u32> {
        // Per-process thread counts need task_info, which requires
        // entitlements for other users' processes.
        None
    }
}

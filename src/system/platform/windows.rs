use super::PlatformExtensions;

pub struct Platform;

#[cfg(target_os = "windows")]
use windows_sys::Win32::{
    Foundation::CloseHandle,
    System::Threading::{GetPriorityClass, OpenProcess, PROCESS_QUERY_INFORMATION},
};

impl PlatformExtensions for Platform {
    #[cfg(target_os = "windows")]
    fn process_niceness(pid: u32) -> Option<i32> {
        unsafe {
            let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
            if handle.is_null() {
                return None;
            }
            let prio = GetPriorityClass(handle);
            CloseHandle(handle);
            if prio == 0 { None } else { Some(prio as i32) }
        }
    }

    #[cfg(not(target_os = "windows"))]
    fn process_niceness(_pid: u32) -> Option<i32> {
        None
    }

    fn set_process_niceness(_pid: u32, _value: i32) -> bool {
        // Windows priority classes do not map onto Unix niceness steps.
        false
    }

    fn process_threads(_pid: u32) -> Option<u32> {
        None
    }
}

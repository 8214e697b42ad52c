#![cfg(target_os = "windows")]

use crate::hw::error_fmt::hresult_from_win32;
use crate::hw::traits::ThreadScheduler;
use windows_sys::Win32::Foundation::{GetLastError, HANDLE};
use windows_sys::Win32::System::Threading::{
    AvRevertMmThreadCharacteristics, AvSetMmThreadCharacteristicsW,
};

/// Multimedia Class Scheduler Service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mmcss;

/// MMCSS registration of the thread that started the client.
#[derive(Debug)]
pub struct MmcssTask {
    handle: HANDLE,
    task_index: u32,
}

impl MmcssTask {
    pub fn task_index(&self) -> u32 {
        self.task_index
    }
}

impl Drop for MmcssTask {
    fn drop(&mut self) {
        // Best effort; the thread keeps its class if the revert fails.
        let _ = unsafe { AvRevertMmThreadCharacteristics(self.handle) };
    }
}

impl ThreadScheduler for Mmcss {
    type Task = MmcssTask;

    fn set_thread_characteristics(&self, task_class: &str) -> Result<MmcssTask, i32> {
        let wide: Vec<u16> = task_class.encode_utf16().chain(Some(0)).collect();
        let mut task_index = 0u32;
        let handle = unsafe { AvSetMmThreadCharacteristicsW(wide.as_ptr(), &mut task_index) };
        if handle.is_null() {
            return Err(hresult_from_win32(unsafe { GetLastError() }));
        }
        Ok(MmcssTask { handle, task_index })
    }
}

pub mod hw;

pub use hw::{ClientHandle, HResult, Properties, StartupError, StartupOptions, StartupSequencer, Step};

/// Start a minimum-latency shared-mode stream on the default render endpoint,
/// configured from the environment.
#[cfg(target_os = "windows")]
pub fn start() -> Result<hw::wasapi::WasapiClient, StartupError> {
    StartupSequencer::with_options(
        hw::wasapi::Wasapi,
        hw::wasapi::Mmcss,
        StartupOptions::from_env(),
    )
    .start()
}

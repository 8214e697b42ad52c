mod logging;

use minlat_engine::Properties;
use serde::Serialize;
use std::process::ExitCode;

const HOLD_ENV: &str = "MINLAT_HOLD_MS";

#[derive(Debug, Serialize)]
struct Report {
    period_frames: u32,
    current_period_frames: Option<u32>,
    period_ms: f64,
    properties: Properties,
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
impl Report {
    fn new(period_frames: u32, current: Option<u32>, properties: Properties) -> Self {
        let period_ms = properties.period_duration(period_frames).as_secs_f64() * 1_000.0;
        Self {
            period_frames,
            current_period_frames: current,
            period_ms,
            properties,
        }
    }
}

#[cfg(target_os = "windows")]
fn run() -> Result<Report, String> {
    use minlat_engine::hw::environment::EnvironmentGuard;
    use minlat_engine::hw::wasapi::Wasapi;
    use tracing::{info, warn};

    // Keep COM entered on this thread for as long as the client lives.
    let _com = EnvironmentGuard::enter(&Wasapi).map_err(|e| e.to_string())?;
    let mut client = minlat_engine::start().map_err(|e| e.to_string())?;
    let properties = client.get_properties().map_err(|e| e.to_string())?;
    let current = match client.current_period() {
        Ok(frames) => Some(frames),
        Err(e) => {
            warn!("{e}");
            None
        }
    };

    if let Some(ms) = std::env::var(HOLD_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
    {
        info!("holding stream open for {ms} ms");
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }

    let report = Report::new(client.period_frames(), current, properties);
    client.release();
    Ok(report)
}

#[cfg(not(target_os = "windows"))]
fn run() -> Result<Report, String> {
    let _ = HOLD_ENV;
    Err("WASAPI is only available on Windows".to_string())
}

fn main() -> ExitCode {
    logging::init();
    match run().and_then(|r| serde_json::to_string_pretty(&r).map_err(|e| e.to_string())) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod error_fmt;
pub mod options;
pub mod policy;
pub mod sequencer;
pub mod traits;
#[cfg(target_os = "windows")]
pub mod wasapi;

pub use self::client::{ClientHandle, Properties};
pub use self::error::{HResult, StartupError, Step};
pub use self::options::StartupOptions;
pub use self::sequencer::StartupSequencer;

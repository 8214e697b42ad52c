//! Seams to the platform collaborators the startup sequence drives.
//!
//! Every fallible call reports the native status code of the platform on
//! failure. Resources are returned as owned values whose `Drop` performs the
//! platform's release protocol, so a value that goes out of scope is released
//! exactly once.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFlow {
    Render,
    Capture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Console,
    Multimedia,
    Communications,
}

/// Fields of the engine mix format the core reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
}

/// Shared-mode engine period bounds, in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnginePeriod {
    pub default_frames: u32,
    pub fundamental_frames: u32,
    pub min_frames: u32,
    pub max_frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamFlags(pub u32);

impl StreamFlags {
    pub const NONE: StreamFlags = StreamFlags(0);
}

/// Arguments of a shared-mode stream initialization. No audio session GUID is
/// ever passed; the stream joins the process default session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedStreamRequest {
    pub flags: StreamFlags,
    pub period_frames: u32,
}

pub trait AudioSubsystem {
    type Enumerator;
    type Device;
    type Client;
    type Format;

    fn initialize_environment(&self) -> Result<(), i32>;
    /// Only called after a successful `initialize_environment`.
    fn uninitialize_environment(&self);

    fn device_enumerator(&self) -> Result<Self::Enumerator, i32>;
    fn default_endpoint(
        &self,
        enumerator: &Self::Enumerator,
        flow: DataFlow,
        role: Role,
    ) -> Result<Self::Device, i32>;
    /// Bind the device to a client that supports engine-period negotiation.
    /// There is no fallback to an older interface.
    fn activate_client(&self, device: &Self::Device) -> Result<Self::Client, i32>;

    fn mix_format(&self, client: &Self::Client) -> Result<Self::Format, i32>;
    fn describe_format(&self, format: &Self::Format) -> MixFormat;
    fn engine_period(
        &self,
        client: &Self::Client,
        format: &Self::Format,
    ) -> Result<EnginePeriod, i32>;
    fn current_engine_period(&self, client: &Self::Client) -> Result<u32, i32>;

    fn initialize_shared_stream(
        &self,
        client: &Self::Client,
        request: SharedStreamRequest,
        format: &Self::Format,
    ) -> Result<(), i32>;
    fn start_stream(&self, client: &Self::Client) -> Result<(), i32>;
}

pub trait ThreadScheduler {
    /// Registration of the calling thread; dropping it reverts the thread.
    type Task;

    fn set_thread_characteristics(&self, task_class: &str) -> Result<Self::Task, i32>;
}

use crate::hw::error::{StartupError, Step};
use crate::hw::traits::{AudioSubsystem, ThreadScheduler};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Properties {
    pub default_buffer_size: u32,
    pub fundamental_buffer_size: u32,
    pub minimum_buffer_size: u32,
    pub maximum_buffer_size: u32,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub num_channels: u16,
}

impl Properties {
    /// Wall-clock length of `frames` at the mix sample rate.
    pub fn period_duration(&self, frames: u32) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(frames as u64 * 1_000_000_000 / self.sample_rate as u64)
    }
}

/// The started client and its mix format, always held and released together.
struct StreamResources<A: AudioSubsystem> {
    client: A::Client,
    format: A::Format,
}

impl<A: AudioSubsystem> StreamResources<A> {
    fn release(self) {
        let Self { client, format } = self;
        drop(client);
        drop(format);
    }
}

/// Owner of a started shared-mode stream.
///
/// Moving the handle moves ownership; assigning over a live handle releases
/// the old stream first. Release happens at most once, explicitly through
/// [`ClientHandle::release`] or on drop.
pub struct ClientHandle<A: AudioSubsystem, S: ThreadScheduler> {
    subsystem: A,
    stream: Option<StreamResources<A>>,
    task: Option<S::Task>,
    period_frames: u32,
}

impl<A: AudioSubsystem, S: ThreadScheduler> ClientHandle<A, S> {
    pub(crate) fn new(
        subsystem: A,
        client: A::Client,
        format: A::Format,
        task: S::Task,
        period_frames: u32,
    ) -> Self {
        Self {
            subsystem,
            stream: Some(StreamResources { client, format }),
            task: Some(task),
            period_frames,
        }
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    /// Buffer size, in frames, the stream was initialized with.
    pub fn period_frames(&self) -> u32 {
        self.period_frames
    }

    pub fn get_properties(&self) -> Result<Properties, StartupError> {
        let stream = self.stream.as_ref().ok_or(StartupError::Released)?;
        let period = self
            .subsystem
            .engine_period(&stream.client, &stream.format)
            .map_err(|code| StartupError::platform(Step::QueryProperties, code))?;
        let format = self.subsystem.describe_format(&stream.format);
        Ok(Properties {
            default_buffer_size: period.default_frames,
            fundamental_buffer_size: period.fundamental_frames,
            minimum_buffer_size: period.min_frames,
            maximum_buffer_size: period.max_frames,
            sample_rate: format.sample_rate,
            bits_per_sample: format.bits_per_sample,
            num_channels: format.channels,
        })
    }

    /// Period the engine is currently running at, in frames.
    pub fn current_period(&self) -> Result<u32, StartupError> {
        let stream = self.stream.as_ref().ok_or(StartupError::Released)?;
        self.subsystem
            .current_engine_period(&stream.client)
            .map_err(|code| StartupError::platform(Step::QueryCurrentPeriod, code))
    }

    /// Release the client, then the format, then revert the thread
    /// registration. Calling it again is a no-op.
    pub fn release(&mut self) {
        let Some(stream) = self.stream.take() else {
            debug_assert!(self.task.is_none());
            return;
        };
        stream.release();
        drop(self.task.take());
        debug!("released audio client ({} frame period)", self.period_frames);
    }
}

impl<A: AudioSubsystem, S: ThreadScheduler> Drop for ClientHandle<A, S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<A: AudioSubsystem, S: ThreadScheduler> fmt::Debug for ClientHandle<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("live", &self.is_live())
            .field("period_frames", &self.period_frames)
            .finish()
    }
}

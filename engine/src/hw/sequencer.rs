use crate::hw::client::ClientHandle;
use crate::hw::environment::EnvironmentGuard;
use crate::hw::error::{StartupError, Step};
use crate::hw::options::StartupOptions;
use crate::hw::policy;
use crate::hw::traits::{
    AudioSubsystem, DataFlow, Role, SharedStreamRequest, StreamFlags, ThreadScheduler,
};
use tracing::{debug, error, info};

/// Runs the low-latency handshake against the default render endpoint.
///
/// Resources acquired before a failing step are dropped on the way out, so a
/// failed start leaves nothing initialized behind, including a stream whose
/// thread could not be elevated.
pub struct StartupSequencer<A, S> {
    subsystem: A,
    scheduler: S,
    options: StartupOptions,
}

impl<A, S> StartupSequencer<A, S>
where
    A: AudioSubsystem + Clone,
    S: ThreadScheduler,
{
    pub fn new(subsystem: A, scheduler: S) -> Self {
        Self::with_options(subsystem, scheduler, StartupOptions::default())
    }

    pub fn with_options(subsystem: A, scheduler: S, options: StartupOptions) -> Self {
        Self {
            subsystem,
            scheduler,
            options,
        }
    }

    pub fn options(&self) -> &StartupOptions {
        &self.options
    }

    pub fn start(&self) -> Result<ClientHandle<A, S>, StartupError> {
        self.run().inspect_err(|e| error!("audio client startup aborted: {e}"))
    }

    fn run(&self) -> Result<ClientHandle<A, S>, StartupError> {
        let audio = &self.subsystem;
        let _environment = EnvironmentGuard::enter(audio)?;

        let enumerator = audio
            .device_enumerator()
            .map_err(|code| StartupError::platform(Step::CreateEnumerator, code))?;
        let device = audio
            .default_endpoint(&enumerator, DataFlow::Render, Role::Console)
            .map_err(|code| StartupError::platform(Step::ResolveDefaultEndpoint, code))?;
        let client = audio
            .activate_client(&device)
            .map_err(|code| StartupError::platform(Step::ActivateClient, code))?;

        let format = audio
            .mix_format(&client)
            .map_err(|code| StartupError::platform(Step::QueryMixFormat, code))?;
        let mix = audio.describe_format(&format);
        debug!(
            "mix format: {} Hz, {} bit, {} channels",
            mix.sample_rate, mix.bits_per_sample, mix.channels
        );

        let period = audio
            .engine_period(&client, &format)
            .map_err(|code| StartupError::platform(Step::QueryEnginePeriod, code))?;
        debug!(
            "engine period: default {} fundamental {} min {} max {}",
            period.default_frames, period.fundamental_frames, period.min_frames, period.max_frames
        );

        let period_frames = policy::select_period_frames(
            self.options.target_period_frames,
            &period,
            self.options.align_to_fundamental,
        )?;

        let request = SharedStreamRequest {
            flags: StreamFlags::NONE,
            period_frames,
        };
        audio
            .initialize_shared_stream(&client, request, &format)
            .map_err(|code| StartupError::platform(Step::InitializeStream, code))?;

        let task = self
            .scheduler
            .set_thread_characteristics(&self.options.task_class)
            .map_err(|code| StartupError::platform(Step::ElevateThreadPriority, code))?;
        debug!("thread registered as '{}'", self.options.task_class);

        audio
            .start_stream(&client)
            .map_err(|code| StartupError::platform(Step::StartStream, code))?;

        info!(
            "shared stream started: {period_frames} frames at {} Hz",
            mix.sample_rate
        );
        Ok(ClientHandle::new(
            audio.clone(),
            client,
            format,
            task,
            period_frames,
        ))
    }
}

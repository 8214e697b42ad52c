use crate::hw::error::{StartupError, Step};
use crate::hw::traits::AudioSubsystem;
use tracing::debug;

/// Keeps the audio environment entered for the calling thread. A guard only
/// exists after a successful enter, so every exit is paired with an enter.
pub struct EnvironmentGuard<'a, A: AudioSubsystem> {
    subsystem: &'a A,
}

impl<'a, A: AudioSubsystem> EnvironmentGuard<'a, A> {
    pub fn enter(subsystem: &'a A) -> Result<Self, StartupError> {
        subsystem
            .initialize_environment()
            .map_err(|code| StartupError::platform(Step::InitializeEnvironment, code))?;
        Ok(Self { subsystem })
    }
}

impl<A: AudioSubsystem> Drop for EnvironmentGuard<'_, A> {
    fn drop(&mut self) {
        self.subsystem.uninitialize_environment();
        debug!("audio environment released");
    }
}

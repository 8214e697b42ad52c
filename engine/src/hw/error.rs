use crate::hw::error_fmt;
use std::fmt;
use thiserror::Error;

const E_NOINTERFACE: i32 = 0x8000_4002_u32 as i32;

/// Native status code of a failed platform call, kept unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HResult(pub i32);

impl HResult {
    pub fn is_failure(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&error_fmt::hresult(self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    InitializeEnvironment,
    CreateEnumerator,
    ResolveDefaultEndpoint,
    ActivateClient,
    QueryMixFormat,
    QueryEnginePeriod,
    SelectBufferSize,
    InitializeStream,
    ElevateThreadPriority,
    StartStream,
    QueryProperties,
    QueryCurrentPeriod,
}

impl Step {
    /// Startup steps in the order the sequencer runs them.
    pub const STARTUP: [Step; 10] = [
        Step::InitializeEnvironment,
        Step::CreateEnumerator,
        Step::ResolveDefaultEndpoint,
        Step::ActivateClient,
        Step::QueryMixFormat,
        Step::QueryEnginePeriod,
        Step::SelectBufferSize,
        Step::InitializeStream,
        Step::ElevateThreadPriority,
        Step::StartStream,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Step::InitializeEnvironment => "initialize audio environment",
            Step::CreateEnumerator => "create device enumerator",
            Step::ResolveDefaultEndpoint => "resolve default render endpoint",
            Step::ActivateClient => "activate IAudioClient3",
            Step::QueryMixFormat => "query mix format",
            Step::QueryEnginePeriod => "query shared-mode engine period",
            Step::SelectBufferSize => "select buffer size",
            Step::InitializeStream => "initialize shared audio stream",
            Step::ElevateThreadPriority => "set MMCSS thread characteristics",
            Step::StartStream => "start audio stream",
            Step::QueryProperties => "query client properties",
            Step::QueryCurrentPeriod => "query current engine period",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartupError {
    #[error("WASAPI {step} failed: {code}")]
    Platform { step: Step, code: HResult },

    #[error("engine reported an inverted period range (minimum {min} > maximum {max} frames)")]
    InvertedPeriodRange { min: u32, max: u32 },

    #[error("client handle has already been released")]
    Released,
}

impl StartupError {
    pub fn platform(step: Step, code: i32) -> Self {
        StartupError::Platform {
            step,
            code: HResult(code),
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            StartupError::Platform { step, .. } => Some(*step),
            StartupError::InvertedPeriodRange { .. } => Some(Step::SelectBufferSize),
            StartupError::Released => None,
        }
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            StartupError::Platform { code, .. } => Some(code.0),
            _ => None,
        }
    }

    /// True when the endpoint could not be bound to `IAudioClient3`.
    pub fn is_missing_capability(&self) -> bool {
        matches!(
            self,
            StartupError::Platform {
                step: Step::ActivateClient,
                code: HResult(E_NOINTERFACE),
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{HResult, StartupError, Step};

    #[test]
    fn reports_failing_step_and_code() {
        let err = StartupError::platform(Step::InitializeStream, 0x8889_0008_u32 as i32);
        assert_eq!(err.step(), Some(Step::InitializeStream));
        assert_eq!(err.code(), Some(0x8889_0008_u32 as i32));
        assert_eq!(
            err.to_string(),
            "WASAPI initialize shared audio stream failed: AUDCLNT_E_UNSUPPORTED_FORMAT (0x88890008)"
        );
    }

    #[test]
    fn recognises_missing_client_interface() {
        let err = StartupError::platform(Step::ActivateClient, 0x8000_4002_u32 as i32);
        assert!(err.is_missing_capability());
        let other = StartupError::platform(Step::QueryMixFormat, 0x8000_4002_u32 as i32);
        assert!(!other.is_missing_capability());
    }

    #[test]
    fn inverted_range_belongs_to_buffer_selection() {
        let err = StartupError::InvertedPeriodRange { min: 960, max: 480 };
        assert_eq!(err.step(), Some(Step::SelectBufferSize));
        assert_eq!(err.code(), None);
        assert!(!HResult(0).is_failure());
    }
}

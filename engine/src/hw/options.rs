use crate::hw::config;
use crate::hw::policy::TARGET_PERIOD_FRAMES;

pub const PRO_AUDIO_TASK: &str = "Pro Audio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupOptions {
    /// Preferred engine period in frames, clamped into the range the engine reports.
    pub target_period_frames: u32,
    /// Snap the clamped period to a multiple of the fundamental period.
    pub align_to_fundamental: bool,
    /// MMCSS task class requested for the calling thread.
    pub task_class: String,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            target_period_frames: TARGET_PERIOD_FRAMES,
            align_to_fundamental: false,
            task_class: PRO_AUDIO_TASK.to_string(),
        }
    }
}

impl StartupOptions {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            target_period_frames: config::env_u32(config::TARGET_PERIOD_ENV)
                .unwrap_or(defaults.target_period_frames),
            align_to_fundamental: config::env_flag(config::ALIGN_TO_FUNDAMENTAL_ENV),
            task_class: config::env_string(config::TASK_CLASS_ENV)
                .unwrap_or(defaults.task_class),
        }
    }
}

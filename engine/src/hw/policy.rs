use crate::hw::error::StartupError;
use crate::hw::traits::EnginePeriod;

pub const TARGET_PERIOD_FRAMES: u32 = 512;

/// Clamp `target` into `[min_frames, max_frames]`.
///
/// A minimum above the maximum is an inconsistent engine report and is
/// rejected instead of guessing which bound is meaningful.
pub fn clamp_period(target: u32, min_frames: u32, max_frames: u32) -> Result<u32, StartupError> {
    if min_frames > max_frames {
        return Err(StartupError::InvertedPeriodRange {
            min: min_frames,
            max: max_frames,
        });
    }
    Ok(target.clamp(min_frames, max_frames))
}

/// Round `frames` to a multiple of the fundamental period without leaving the
/// engine's range. Engines report min/max as fundamental multiples, so the
/// result only falls back to `frames` when no multiple fits.
pub fn align_to_fundamental(frames: u32, period: &EnginePeriod) -> u32 {
    let step = period.fundamental_frames;
    if step == 0 || frames % step == 0 {
        return frames;
    }
    let down = frames - frames % step;
    if down >= period.min_frames {
        return down;
    }
    match down.checked_add(step) {
        Some(up) if up <= period.max_frames => up,
        _ => frames,
    }
}

pub fn select_period_frames(
    target: u32,
    period: &EnginePeriod,
    align: bool,
) -> Result<u32, StartupError> {
    let frames = clamp_period(target, period.min_frames, period.max_frames)?;
    if align {
        Ok(align_to_fundamental(frames, period))
    } else {
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::{TARGET_PERIOD_FRAMES, align_to_fundamental, clamp_period, select_period_frames};
    use crate::hw::error::StartupError;
    use crate::hw::traits::EnginePeriod;

    fn period(fundamental: u32, min: u32, max: u32) -> EnginePeriod {
        EnginePeriod {
            default_frames: max,
            fundamental_frames: fundamental,
            min_frames: min,
            max_frames: max,
        }
    }

    #[test]
    fn keeps_target_inside_range() {
        for (min, max) in [(1, 512), (512, 512), (128, 480 * 4), (32, u32::MAX)] {
            assert_eq!(clamp_period(TARGET_PERIOD_FRAMES, min, max), Ok(512));
        }
    }

    #[test]
    fn raises_to_engine_minimum() {
        for (min, max) in [(513, 513), (960, 1920), (4096, u32::MAX)] {
            assert_eq!(clamp_period(TARGET_PERIOD_FRAMES, min, max), Ok(min));
        }
    }

    #[test]
    fn lowers_to_engine_maximum() {
        for (min, max) in [(0, 0), (128, 480), (511, 511)] {
            assert_eq!(clamp_period(TARGET_PERIOD_FRAMES, min, max), Ok(max));
        }
    }

    #[test]
    fn rejects_inverted_range() {
        assert_eq!(
            clamp_period(TARGET_PERIOD_FRAMES, 960, 480),
            Err(StartupError::InvertedPeriodRange { min: 960, max: 480 })
        );
        assert_eq!(
            clamp_period(TARGET_PERIOD_FRAMES, 600, 400),
            Err(StartupError::InvertedPeriodRange { min: 600, max: 400 })
        );
    }

    #[test]
    fn alignment_snaps_to_fundamental_multiple() {
        assert_eq!(align_to_fundamental(512, &period(48, 144, 960)), 480);
        assert_eq!(align_to_fundamental(512, &period(32, 128, 480)), 512);
        assert_eq!(align_to_fundamental(100, &period(48, 96, 960)), 96);
        assert_eq!(align_to_fundamental(50, &period(48, 49, 960)), 96);
        assert_eq!(align_to_fundamental(512, &period(0, 128, 960)), 512);
    }

    #[test]
    fn alignment_is_opt_in() {
        let p = period(48, 144, 960);
        assert_eq!(select_period_frames(512, &p, false), Ok(512));
        assert_eq!(select_period_frames(512, &p, true), Ok(480));
    }
}

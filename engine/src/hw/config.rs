pub const TARGET_PERIOD_ENV: &str = "MINLAT_TARGET_PERIOD_FRAMES";
pub const ALIGN_TO_FUNDAMENTAL_ENV: &str = "MINLAT_ALIGN_TO_FUNDAMENTAL";
pub const TASK_CLASS_ENV: &str = "MINLAT_TASK_CLASS";

pub fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

pub fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|v| parse_u32(&v))
}

pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    let s = value.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "yes" || s == "on"
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::{parse_flag, parse_u32};

    #[test]
    fn accepts_common_truthy_spellings() {
        for value in ["1", "true", "YES", " on "] {
            assert!(parse_flag(value), "{value:?} should be truthy");
        }
        for value in ["0", "false", "off", ""] {
            assert!(!parse_flag(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn rejects_zero_and_garbage_frame_counts() {
        assert_eq!(parse_u32(" 256 "), Some(256));
        assert_eq!(parse_u32("0"), None);
        assert_eq!(parse_u32("-1"), None);
        assert_eq!(parse_u32("fast"), None);
    }
}

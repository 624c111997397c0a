//! Timestamp display and parsing.
//!
//! Timestamps render as `M:SS` with unpadded minutes, so a 90-minute video
//! shows `95:30` rather than rolling over into hours. Parsing is the inverse
//! and is deliberately permissive: a seconds group like `73` is computed
//! literally instead of being rejected, which matches the loose timestamp
//! shapes that appear in generated text and scraped transcripts.

/// Regex fragment matching a timestamp: 1-3 digit minutes, 2 digit seconds.
pub const TIMESTAMP_PATTERN: &str = r"(\d{1,3}):(\d{2})";

/// Format seconds as an `M:SS` display string.
///
/// Minutes are unpadded and unbounded; seconds are zero-padded to two
/// digits. Negative input clamps to `0:00`.
pub fn format_timestamp(seconds: i64) -> String {
    let total = seconds.max(0);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parse the first timestamp in a text fragment into absolute seconds.
///
/// Accepts 1-3 digit minutes and an exactly two-digit seconds group.
/// Seconds values of 60 or above are computed literally (`1:90` -> 150),
/// not rejected.
pub fn parse_timestamp(fragment: &str) -> Option<u32> {
    let re = timestamp_regex();
    let caps = re.captures(fragment)?;
    let minutes: u32 = caps[1].parse().ok()?;
    let seconds: u32 = caps[2].parse().ok()?;
    Some(minutes * 60 + seconds)
}

/// Shared compiled timestamp regex.
pub fn timestamp_regex() -> &'static regex::Regex {
    static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(TIMESTAMP_PATTERN).expect("Invalid timestamp regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_basic() {
        assert_eq!(format_timestamp(0), "0:00");
        assert_eq!(format_timestamp(5), "0:05");
        assert_eq!(format_timestamp(90), "1:30");
        assert_eq!(format_timestamp(125), "2:05");
    }

    #[test]
    fn test_format_unpadded_minutes() {
        // Minutes keep growing past an hour instead of rolling over.
        assert_eq!(format_timestamp(3600), "60:00");
        assert_eq!(format_timestamp(6000), "100:00");
    }

    #[test]
    fn test_format_negative_clamps() {
        assert_eq!(format_timestamp(-1), "0:00");
        assert_eq!(format_timestamp(-500), "0:00");
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse_timestamp("1:30"), Some(90));
        assert_eq!(parse_timestamp("0:00"), Some(0));
        assert_eq!(parse_timestamp("12:05"), Some(725));
        assert_eq!(parse_timestamp("100:00"), Some(6000));
    }

    #[test]
    fn test_parse_inside_fragment() {
        assert_eq!(parse_timestamp("see [2:05] for details"), Some(125));
    }

    #[test]
    fn test_parse_no_match() {
        assert_eq!(parse_timestamp("no timestamp here"), None);
        assert_eq!(parse_timestamp("1:3"), None);
    }

    #[test]
    fn test_parse_permissive_seconds() {
        // 60+ second groups compute literally rather than failing.
        assert_eq!(parse_timestamp("1:90"), Some(150));
        assert_eq!(parse_timestamp("99:59"), Some(5999));
    }

    #[test]
    fn test_round_trip() {
        // Holds for every duration the display format can represent in
        // three minute digits (under 1000 minutes).
        for s in [0i64, 1, 59, 60, 61, 599, 600, 3599, 3600, 7325, 59_999] {
            assert_eq!(parse_timestamp(&format_timestamp(s)), Some(s as u32));
        }
    }
}

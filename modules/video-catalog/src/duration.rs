//! ISO-8601 content durations as reported by `contentDetails.duration`.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

/// Anything at or below this length is a short.
pub const SHORT_MAX: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed duration: {0:?}")]
pub struct MalformedDuration(pub String);

// Weeks and days are fixed-length; years and months are not and are rejected.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:(?P<w>\d+)W)?(?:(?P<d>\d+)D)?(?:T(?:(?P<h>\d+)H)?(?:(?P<m>\d+)M)?(?:(?P<s>\d+(?:[.,]\d+)?)S)?)?$",
    )
    .expect("duration regex is valid")
});

/// Parse an encoding such as `PT1H2M3S` or `P1DT30M`.
pub fn parse_duration(encoded: &str) -> Result<Duration, MalformedDuration> {
    let malformed = || MalformedDuration(encoded.to_string());
    let caps = DURATION_RE.captures(encoded).ok_or_else(malformed)?;

    // "P" and "PT" alone match the pattern but carry no components.
    let has_component = ["w", "d", "h", "m", "s"].iter().any(|n| caps.name(n).is_some());
    if !has_component || encoded.ends_with('T') {
        return Err(malformed());
    }

    let whole = |name: &str, unit: u64| -> Result<u64, MalformedDuration> {
        match caps.name(name) {
            Some(m) => m
                .as_str()
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_mul(unit))
                .ok_or_else(malformed),
            None => Ok(0),
        }
    };

    let mut secs = 0u64;
    for (name, unit) in [("w", 604_800), ("d", 86_400), ("h", 3_600), ("m", 60)] {
        secs = secs.checked_add(whole(name, unit)?).ok_or_else(malformed)?;
    }

    let mut nanos = 0u32;
    if let Some(s) = caps.name("s") {
        let text = s.as_str().replace(',', ".");
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let int_secs: u64 = int_part.parse().map_err(|_| malformed())?;
        secs = secs.checked_add(int_secs).ok_or_else(malformed)?;
        if !frac_part.is_empty() {
            let digits: String = frac_part.chars().chain("000000000".chars()).take(9).collect();
            nanos = digits.parse().map_err(|_| malformed())?;
        }
    }

    Ok(Duration::new(secs, nanos))
}

/// Whole seconds in an encoded duration. Fractions are truncated.
pub fn parse_total_seconds(encoded: &str) -> Result<u64, MalformedDuration> {
    parse_duration(encoded).map(|d| d.as_secs())
}

pub fn is_short(duration: Duration) -> bool {
    duration <= SHORT_MAX
}

/// Render seconds as `1h 1m 1s`, `2m 5s` or `45s`. Higher zero units are dropped.
pub fn format_compact(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typical_video_durations() {
        assert_eq!(parse_total_seconds("PT2M5S").unwrap(), 125);
        assert_eq!(parse_total_seconds("PT1H1M1S").unwrap(), 3661);
        assert_eq!(parse_total_seconds("PT45S").unwrap(), 45);
        assert_eq!(parse_total_seconds("PT10M").unwrap(), 600);
        assert_eq!(parse_total_seconds("PT3H").unwrap(), 10_800);
    }

    #[test]
    fn parses_day_and_week_components() {
        assert_eq!(parse_total_seconds("P1DT2H").unwrap(), 93_600);
        assert_eq!(parse_total_seconds("P1W").unwrap(), 604_800);
        assert_eq!(parse_total_seconds("P0D").unwrap(), 0);
    }

    #[test]
    fn fractional_seconds_truncate() {
        let d = parse_duration("PT1M0.5S").unwrap();
        assert_eq!(d, Duration::from_millis(60_500));
        assert_eq!(d.as_secs(), 60);
        assert!(!is_short(d));
    }

    #[test]
    fn rejects_malformed_encodings() {
        for bad in ["", "P", "PT", "P1DT", "1H", "PT1X", "PT-5S", "P1Y", "P2M", "pt5s", "PT5S "] {
            assert!(parse_duration(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn malformed_error_carries_input() {
        let err = parse_duration("bogus").unwrap_err();
        assert_eq!(err, MalformedDuration("bogus".to_string()));
        assert_eq!(err.to_string(), "Malformed duration: \"bogus\"");
    }

    #[test]
    fn format_compact_drops_zero_higher_units() {
        assert_eq!(format_compact(125), "2m 5s");
        assert_eq!(format_compact(3661), "1h 1m 1s");
        assert_eq!(format_compact(45), "45s");
        assert_eq!(format_compact(0), "0s");
        assert_eq!(format_compact(3600), "1h 0m 0s");
        assert_eq!(format_compact(60), "1m 0s");
    }

    #[test]
    fn parse_then_format_matches_decomposition() {
        for (encoded, expected) in [
            ("PT2M5S", "2m 5s"),
            ("PT1H1M1S", "1h 1m 1s"),
            ("PT45S", "45s"),
            ("P1DT1S", "24h 0m 1s"),
        ] {
            let secs = parse_total_seconds(encoded).unwrap();
            assert_eq!(format_compact(secs), expected);
        }
    }

    #[test]
    fn short_threshold_is_inclusive() {
        assert!(is_short(Duration::from_secs(60)));
        assert!(is_short(Duration::from_secs(30)));
        assert!(!is_short(Duration::from_secs(61)));
    }
}

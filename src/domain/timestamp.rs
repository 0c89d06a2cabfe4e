// Timestamp canonicalization and parsing
use chrono::{DateTime, FixedOffset, Utc};

/// Canonicalize an upstream timestamp into ISO-8601 form.
/// The feed emits either ISO-8601 proper or a space-separated
/// `"YYYY-MM-DD HH:MM:SS UTC"` variant; only the first space and a
/// trailing `" UTC"` are rewritten, so an already-canonical string
/// passes through unchanged.
pub fn canonicalize(raw: &str) -> String {
    let mut iso = raw.replacen(' ', "T", 1);
    if let Some(stripped) = iso.strip_suffix(" UTC") {
        iso = format!("{}Z", stripped);
    }
    iso
}

/// Parse a canonical timestamp. Returns None on malformed input; the
/// pipeline treats that as "skip the record", never as an error.
pub fn parse_instant(canonical: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(canonical).ok()
}

pub fn epoch_millis(canonical: &str) -> Option<i64> {
    parse_instant(canonical).map(|instant| instant.timestamp_millis())
}

/// Tooltip time label, rendered from an already offset-adjusted instant.
pub fn tooltip_label(epoch_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(instant) => instant.format("%Y/%m/%d %H:%M").to_string(),
        None => String::new(),
    }
}

/// Clock-only label for the wind-direction marker row.
pub fn clock_label(epoch_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(instant) => instant.format("%H:%M").to_string(),
        None => String::new(),
    }
}

/// Minute-precision label for "last report" fields in the detail panel.
/// Empty when the raw stamp does not parse.
pub fn report_label(raw: &str) -> String {
    match parse_instant(&canonicalize(raw)) {
        Some(instant) => instant
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_space_separated_utc() {
        assert_eq!(
            canonicalize("2024-11-22 12:34:56 UTC"),
            "2024-11-22T12:34:56Z"
        );
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let inputs = [
            "2024-11-22 12:34:56 UTC",
            "2024-11-22T12:34:56Z",
            "2024-01-01T02:00:00+09:00",
        ];
        for input in inputs {
            let once = canonicalize(input);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn test_canonicalize_rewrites_only_first_space() {
        // Malformed double-space input stays malformed; downstream parse
        // failure is the only error signal.
        let canonical = canonicalize("2024-11-22 12:34:56  broken");
        assert_eq!(canonical, "2024-11-22T12:34:56  broken");
        assert!(parse_instant(&canonical).is_none());
    }

    #[test]
    fn test_epoch_millis() {
        assert_eq!(epoch_millis("2024-01-01T00:00:00Z"), Some(1_704_067_200_000));
        assert_eq!(epoch_millis("not a timestamp"), None);
    }

    #[test]
    fn test_labels() {
        let ms = epoch_millis("2024-01-01T02:05:00Z").unwrap();
        assert_eq!(tooltip_label(ms), "2024/01/01 02:05");
        assert_eq!(clock_label(ms), "02:05");
        assert_eq!(report_label("2024-01-01 02:05:00 UTC"), "2024-01-01 02:05");
        assert_eq!(report_label("garbage"), "");
    }
}

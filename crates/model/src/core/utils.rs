use chrono::{DateTime, NaiveDate, NaiveDateTime};

const LOCAL_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses an ISO-8601 round-trip timestamp.
///
/// Accepted shapes:
/// - `YYYY-MM-DD` (midnight)
/// - `YYYY-MM-DDThh:mm[:ss[.fff]]` (no zone, kept as written)
/// - any of the above with `Z` or `±hh:mm`, normalised to UTC
///
/// Parsing never depends on the process locale.
pub fn parse_iso8601(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.naive_utc());
    }

    if has_zone_suffix(text) {
        // rfc3339 requires seconds; retry with them filled in
        let (local, zone) = split_zone(text);
        let padded = format!("{local}:00{zone}");
        return DateTime::parse_from_rfc3339(&padded)
            .ok()
            .map(|dt| dt.naive_utc());
    }

    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn has_zone_suffix(text: &str) -> bool {
    text.contains('T') && (text.ends_with('Z') || zone_offset_start(text).is_some())
}

fn zone_offset_start(text: &str) -> Option<usize> {
    let time_start = text.find('T')?;
    text[time_start..]
        .rfind(['+', '-'])
        .map(|offset| time_start + offset)
}

fn split_zone(text: &str) -> (&str, &str) {
    if let Some(local) = text.strip_suffix('Z') {
        return (local, "Z");
    }
    match zone_offset_start(text) {
        Some(idx) => text.split_at(idx),
        None => (text, ""),
    }
}

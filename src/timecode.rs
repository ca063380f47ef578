// @module: Subtitle time codes

/// Format a non-negative offset in seconds as `HH:MM:SS,mmm`.
///
/// Every field is truncated, never rounded: `59.999` stays `00:00:59,999`
/// and never carries into the next second. Float remainders are taken as-is,
/// so `2.3` renders as `00:00:02,299`. Hours are not clamped and grow past
/// two digits for offsets of 100 hours or more.
///
/// Callers must pass finite, non-negative values.
pub fn format_timecode(seconds: f64) -> String {
    let whole = seconds.floor() as u64;

    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = (whole / 60) % 60;
    let secs = whole % 60;
    let millis = ((seconds % 1.0) * 1000.0).floor() as u64;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

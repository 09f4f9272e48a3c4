use chrono::{Local, NaiveDateTime};
use std::time::{SystemTime, UNIX_EPOCH};

/// Format accepted for the `start_time` configuration field.
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A source of whole milliseconds since the Unix epoch.
///
/// This abstraction is the only place the crate touches a clock, which lets
/// tests plug in frozen or stepping time sources while production code uses
/// [`WallClock`].
///
/// # Example
///
/// ```
/// use snowbank::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in whole milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

/// The production time source: a plain wall-clock read per call.
///
/// Generators mask clock regression themselves (a reading at or before the
/// last observed millisecond falls into the same-bucket branch), so no
/// monotonic ticker is layered on top.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as u64
    }
}

/// Parses a `"YYYY-MM-DD HH:MM:SS"` local-calendar timestamp into whole
/// milliseconds since the Unix epoch.
///
/// Ambiguous local times (DST folds) resolve to the earliest valid instant.
/// Nonexistent local times (DST gaps) and pre-1970 instants return `None`.
pub(crate) fn local_datetime_millis(value: &str) -> Option<u64> {
    let naive = NaiveDateTime::parse_from_str(value, START_TIME_FORMAT).ok()?;
    let local = naive.and_local_timezone(Local).earliest()?;
    u64::try_from(local.timestamp_millis()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_reads_unix_millis() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let read = WallClock.current_millis();
        assert!(read >= before);
    }

    #[test]
    fn parses_local_calendar_timestamp() {
        let millis = local_datetime_millis("2020-06-15 12:30:45").expect("valid timestamp");
        // Exact value depends on the local offset; it must land on the same
        // calendar second when converted back.
        let roundtrip = chrono::DateTime::from_timestamp_millis(millis as i64)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(roundtrip, "2020-06-15 12:30:45");
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert_eq!(local_datetime_millis("2020-06-15"), None);
        assert_eq!(local_datetime_millis("15/06/2020 12:30:45"), None);
        assert_eq!(local_datetime_millis("2020-13-40 99:99:99"), None);
        assert_eq!(local_datetime_millis(""), None);
    }

    #[test]
    fn rejects_pre_unix_instants() {
        assert_eq!(local_datetime_millis("1960-01-01 00:00:00"), None);
    }
}

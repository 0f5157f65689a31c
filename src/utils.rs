//! Utility functions for the `rapidscan` tool.
//!
//! This module provides:
//! - Detection of unset ("zero") filesystem timestamps
//! - Conversion of raw `SystemTime` values into local, whole-second timestamps
//!
//! A raw timestamp is considered unset when it sits exactly on the NTFS
//! epoch (1601-01-01 00:00:00 UTC), which is what an all-zero file time
//! decodes to.

use crate::data::LocalTimestamp;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeDelta, TimeZone};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds between 1601-01-01 and 1970-01-01.
const NTFS_EPOCH_OFFSET_SECS: u64 = 11_644_473_600;

/// Returns `true` if `time` is the all-zero file time.
pub fn is_unset(time: SystemTime) -> bool {
    UNIX_EPOCH
        .checked_sub(Duration::from_secs(NTFS_EPOCH_OFFSET_SECS))
        .is_some_and(|zero| time == zero)
}

/// Whole seconds relative to the Unix epoch, floored for pre-epoch times.
fn unix_seconds(time: SystemTime) -> Option<i64> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).ok(),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            let secs = if before.subsec_nanos() > 0 {
                secs.checked_add(1)?
            } else {
                secs
            };
            Some(-secs)
        }
    }
}

/// Converts a raw timestamp to local time using the machine's time zone.
///
/// # Returns
/// * `None` if the timestamp is unset or cannot be decomposed into a calendar date
/// * `Some(LocalTimestamp)` otherwise
pub fn to_local_timestamp(time: SystemTime) -> Option<LocalTimestamp> {
    to_timestamp_with(time, |utc| Local.offset_from_utc_datetime(utc))
}

/// Converts a raw timestamp using a caller-supplied UTC offset lookup.
///
/// If applying the offset overflows the calendar range, the unconverted
/// UTC value is used instead.
pub fn to_timestamp_with<F>(time: SystemTime, offset_for: F) -> Option<LocalTimestamp>
where
    F: Fn(&NaiveDateTime) -> FixedOffset,
{
    if is_unset(time) {
        return None;
    }

    let utc = DateTime::from_timestamp(unix_seconds(time)?, 0)?.naive_utc();
    let offset = offset_for(&utc);
    let local = utc
        .checked_add_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .unwrap_or(utc);

    Some(LocalTimestamp::new(local))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(_: &NaiveDateTime) -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_ntfs_epoch_is_unset() {
        let zero = UNIX_EPOCH - Duration::from_secs(NTFS_EPOCH_OFFSET_SECS);
        assert!(is_unset(zero));
        assert_eq!(to_timestamp_with(zero, utc), None);
    }

    #[test]
    fn test_unix_epoch_is_a_real_time() {
        assert!(!is_unset(UNIX_EPOCH));
        let ts = to_timestamp_with(UNIX_EPOCH, utc).unwrap();
        assert_eq!(ts.to_string(), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_subsecond_part_is_truncated() {
        let time = UNIX_EPOCH + Duration::from_millis(1_700_000_000_999);
        let ts = to_timestamp_with(time, utc).unwrap();
        assert_eq!(ts.to_string(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_offset_is_applied() {
        let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let ts = to_timestamp_with(time, |_| FixedOffset::east_opt(2 * 3600).unwrap()).unwrap();
        assert_eq!(ts.to_string(), "2023-11-15 00:13:20");

        let ts = to_timestamp_with(time, |_| FixedOffset::west_opt(5 * 3600).unwrap()).unwrap();
        assert_eq!(ts.to_string(), "2023-11-14 17:13:20");
    }

    #[test]
    fn test_pre_epoch_times_floor_to_whole_seconds() {
        let time = UNIX_EPOCH - Duration::from_millis(500);
        let ts = to_timestamp_with(time, utc).unwrap();
        assert_eq!(ts.to_string(), "1969-12-31 23:59:59");
    }

    #[test]
    fn test_local_conversion_produces_a_value() {
        let time = UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        assert!(to_local_timestamp(time).is_some());
    }
}

//! Human-readable timestamps.

use chrono::{DateTime, Utc};

/// Text shown for a link that was never clicked.
pub const NEVER: &str = "Never";

/// Formats a timestamp as e.g. `January 2, 2025, 03:04 AM`.
pub fn format_timestamp(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%B %-d, %Y, %I:%M %p").to_string(),
        None => NEVER.to_string(),
    }
}

/// Describes how long ago `at` was, relative to `now`.
///
/// Minutes under an hour, hours under a day, days beyond. Anything under a
/// minute (including timestamps slightly in the future) is "Just now".
pub fn relative_time(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return NEVER.to_string();
    };

    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else {
        plural(days, "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n > 1 {
        format!("{n} {unit}s ago")
    } else {
        format!("{n} {unit} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_never() {
        assert_eq!(relative_time(None, now()), "Never");
        assert_eq!(format_timestamp(None), "Never");
    }

    #[test]
    fn test_just_now() {
        assert_eq!(relative_time(Some(now() - Duration::seconds(30)), now()), "Just now");
        assert_eq!(relative_time(Some(now() + Duration::seconds(5)), now()), "Just now");
    }

    #[test]
    fn test_minutes() {
        assert_eq!(relative_time(Some(now() - Duration::minutes(1)), now()), "1 minute ago");
        assert_eq!(relative_time(Some(now() - Duration::minutes(59)), now()), "59 minutes ago");
    }

    #[test]
    fn test_hours() {
        assert_eq!(relative_time(Some(now() - Duration::minutes(60)), now()), "1 hour ago");
        assert_eq!(relative_time(Some(now() - Duration::hours(23)), now()), "23 hours ago");
    }

    #[test]
    fn test_days() {
        assert_eq!(relative_time(Some(now() - Duration::hours(24)), now()), "1 day ago");
        assert_eq!(relative_time(Some(now() - Duration::days(40)), now()), "40 days ago");
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 15, 4, 0).unwrap();
        assert_eq!(format_timestamp(Some(at)), "January 2, 2025, 03:04 PM");
    }
}

//! Text formatting for timestamps and statuses.

use chrono::{DateTime, Utc};
use vigil_core::{Entity, Timestamp};

/// "just now", "5 minutes ago", "in 2 hours", ...
pub fn relative_time(ts: Timestamp, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(ts);
    let seconds = delta.num_seconds();
    let (amount, future) = if seconds < 0 {
        (-seconds, true)
    } else {
        (seconds, false)
    };
    if amount < 45 {
        return "just now".to_string();
    }
    let (value, unit) = match amount {
        s if s < 3_600 => ((s + 30) / 60, "minute"),
        s if s < 86_400 => ((s + 1_800) / 3_600, "hour"),
        s if s < 2_592_000 => ((s + 43_200) / 86_400, "day"),
        s if s < 31_536_000 => ((s + 1_296_000) / 2_592_000, "month"),
        s => ((s + 15_768_000) / 31_536_000, "year"),
    };
    let value = value.max(1);
    let plural = if value == 1 { "" } else { "s" };
    if future {
        format!("in {} {}{}", value, unit, plural)
    } else {
        format!("{} {}{} ago", value, unit, plural)
    }
}

pub fn entity_description(entity: &Entity, now: DateTime<Utc>) -> String {
    entity.status_description(|ts| relative_time(ts, now))
}

pub fn timestamp(ts: Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Clip to `width` cells, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut clipped: String = text.chars().take(width - 1).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(relative_time(now - Duration::seconds(10), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(relative_time(now - Duration::days(3), now), "3 days ago");
        assert_eq!(relative_time(now + Duration::hours(2), now), "in 2 hours");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("check-cpu", 20), "check-cpu");
        assert_eq!(truncate("check-cpu", 6), "check…");
        assert_eq!(truncate("check-cpu", 0), "");
    }
}

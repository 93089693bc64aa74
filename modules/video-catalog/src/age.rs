//! Coarse "published N units ago" labels.
//!
//! The difference between two instants is split calendar-style: whole months
//! are counted by stepping the earlier instant forward month by month (clamping
//! to the last day of shorter months), and only the remainder is broken into
//! days, hours and minutes. "Jan 31 to Feb 29" is therefore one month, and a
//! year is twelve calendar months rather than 365 days.

use chrono::{DateTime, Datelike, Months, Utc};

/// Calendar-aware difference between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarDelta {
    pub years: u32,
    pub months: u32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl CalendarDelta {
    /// Difference from `earlier` to `later`. Zero when `later` is not after `earlier`.
    pub fn between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> Self {
        if later <= earlier {
            return Self::default();
        }

        let mut months = (later.year() - earlier.year()) * 12 + later.month() as i32
            - earlier.month() as i32;
        let mut anchor = earlier;
        while months > 0 {
            match earlier.checked_add_months(Months::new(months as u32)) {
                Some(stepped) if stepped <= later => {
                    anchor = stepped;
                    break;
                }
                _ => months -= 1,
            }
        }
        let months = months.max(0) as u32;

        let remainder = later - anchor;
        let secs = remainder.num_seconds();
        Self {
            years: months / 12,
            months: months % 12,
            days: secs / 86_400,
            hours: (secs % 86_400) / 3_600,
            minutes: (secs % 3_600) / 60,
        }
    }

    /// Largest non-zero unit as `"{n} {unit} ago"`, or `"just now"`.
    pub fn label(&self) -> String {
        if self.years > 0 {
            format!("{} years ago", self.years)
        } else if self.months > 0 {
            format!("{} months ago", self.months)
        } else if self.days > 0 {
            format!("{} days ago", self.days)
        } else if self.hours > 0 {
            format!("{} hours ago", self.hours)
        } else if self.minutes > 0 {
            format!("{} minutes ago", self.minutes)
        } else {
            "just now".to_string()
        }
    }
}

pub fn format_age(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    CalendarDelta::between(published_at, now).label()
}

/// Parse an RFC 3339 timestamp such as `2024-05-01T12:00:00Z`, normalized to UTC.
pub fn parse_published(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

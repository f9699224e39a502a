//! Pure countdown computation.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Coarse urgency bucket derived from time left until a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UrgencyTier {
    /// Less than one hour left, or overdue.
    Critical,
    /// Less than six hours left.
    High,
    /// Less than a day left.
    Medium,
    /// A day or more left.
    Normal,
}

impl UrgencyTier {
    /// Buckets a positive remaining duration.
    #[must_use]
    pub fn for_remaining(remaining: TimeDelta) -> Self {
        if remaining < TimeDelta::hours(1) {
            Self::Critical
        } else if remaining < TimeDelta::hours(6) {
            Self::High
        } else if remaining < TimeDelta::days(1) {
            Self::Medium
        } else {
            Self::Normal
        }
    }
}

/// Display projection of a deadline at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    /// Human-readable time left, such as `2d 5h` or `Overdue`.
    pub label: String,
    /// Urgency bucket.
    pub tier: UrgencyTier,
    /// Whether the deadline has passed.
    pub is_overdue: bool,
    /// Time left, zero once overdue.
    pub remaining: TimeDelta,
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Label shown once a deadline has passed.
pub const OVERDUE_LABEL: &str = "Overdue";

/// Computes the countdown from `now` to `deadline`.
///
/// At a day or more the label uses days and hours; below a day it always
/// uses two units, hours and minutes or minutes and seconds. Sub-second
/// remainders are truncated.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use taskboard::deadline::{UrgencyTier, countdown};
///
/// let now = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
/// let view = countdown(now, now + TimeDelta::hours(5) + TimeDelta::minutes(12));
/// assert_eq!(view.label, "5h 12m");
/// assert_eq!(view.tier, UrgencyTier::High);
/// ```
#[must_use]
pub fn countdown(now: DateTime<Utc>, deadline: DateTime<Utc>) -> Countdown {
    if deadline <= now {
        return Countdown {
            label: OVERDUE_LABEL.to_owned(),
            tier: UrgencyTier::Critical,
            is_overdue: true,
            remaining: TimeDelta::zero(),
        };
    }

    let remaining = deadline - now;
    Countdown {
        label: format_remaining(remaining),
        tier: UrgencyTier::for_remaining(remaining),
        is_overdue: false,
        remaining,
    }
}

fn format_remaining(remaining: TimeDelta) -> String {
    let days = remaining.num_days();
    let after_days = remaining - TimeDelta::days(days);
    let hours = after_days.num_hours();
    let after_hours = after_days - TimeDelta::hours(hours);
    let minutes = after_hours.num_minutes();
    let seconds = (after_hours - TimeDelta::minutes(minutes)).num_seconds();

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m {seconds}s")
    }
}

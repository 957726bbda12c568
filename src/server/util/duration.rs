//! Human-readable durations for the stats pages and member list.

use std::fmt;
use std::time::Duration;

use chrono::TimeDelta;

/// Largest non-zero unit of an uptime, shown next to the `DD:HH:mm:ss` clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UptimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl fmt::Display for UptimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Seconds => "Seconds",
            Self::Minutes => "Minutes",
            Self::Hours => "Hours",
            Self::Days => "Days",
        };
        f.write_str(label)
    }
}

/// Formatted uptime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uptime {
    pub clock: String,
    pub unit: UptimeUnit,
}

/// Formats `uptime` as `DD:HH:mm:ss`, labelled with its largest non-zero unit.
///
/// Days are not capped at two digits.
pub fn format_uptime(uptime: Duration) -> Uptime {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let unit = if days > 0 {
        UptimeUnit::Days
    } else if hours > 0 {
        UptimeUnit::Hours
    } else if minutes > 0 {
        UptimeUnit::Minutes
    } else {
        UptimeUnit::Seconds
    };

    Uptime {
        clock: format!("{:02}:{:02}:{:02}:{:02}", days, hours, minutes, seconds),
        unit,
    }
}

/// Formats how long a member has been in a guild, e.g. `3 days, 4 hrs, 0 mins, 5 secs`.
///
/// Leading zero units are dropped; negative durations count as zero.
pub fn format_member_for(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    let parts = [
        (total / 86_400, "days"),
        ((total % 86_400) / 3_600, "hrs"),
        ((total % 3_600) / 60, "mins"),
        (total % 60, "secs"),
    ];

    let first = parts
        .iter()
        .position(|(value, _)| *value > 0)
        .unwrap_or(parts.len() - 1);

    parts[first..]
        .iter()
        .map(|(value, unit)| format!("{} {}", value, unit))
        .collect::<Vec<_>>()
        .join(", ")
}

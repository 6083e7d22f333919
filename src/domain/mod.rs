//! Domain primitives shared by the store, the seeding workflow and the API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five record collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Users,
    Teams,
    Activities,
    Leaderboard,
    Workouts,
}

impl Collection {
    /// Every collection, in the order the seeding workflow drops and reports them.
    pub const ALL: [Self; 5] = [
        Self::Users,
        Self::Teams,
        Self::Activities,
        Self::Leaderboard,
        Self::Workouts,
    ];

    /// Resource name used in URLs.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Teams => "teams",
            Self::Activities => "activities",
            Self::Leaderboard => "leaderboard",
            Self::Workouts => "workouts",
        }
    }

    /// Human readable label used in operator summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Teams => "Teams",
            Self::Activities => "Activities",
            Self::Leaderboard => "Leaderboard entries",
            Self::Workouts => "Workouts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Renders an elapsed time as `[D ]HH:MM:SS`.
///
/// ```rust
/// use octofit::domain::format_duration;
///
/// assert_eq!(format_duration(5400), "01:30:00");
/// assert_eq!(format_duration(90_000), "1 01:00:00");
/// ```
#[must_use]
pub fn format_duration(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let days = total / SECONDS_PER_DAY;
    let rest = total % SECONDS_PER_DAY;
    let (hours, minutes, seconds) = (rest / 3600, (rest % 3600) / 60, rest % 60);

    if days > 0 {
        format!("{days} {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Parses `[D ]HH:MM:SS`, `MM:SS` or a bare number of seconds.
///
/// Returns `None` for malformed or negative input.
#[must_use]
pub fn parse_duration(input: &str) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() || input.starts_with('-') {
        return None;
    }

    let (days, clock) = match input.split_once(' ') {
        Some((d, rest)) => (d.parse::<i64>().ok()?, rest.trim()),
        None => (0, input),
    };

    let parts: Vec<i64> = clock
        .split(':')
        .map(|p| p.parse::<i64>().ok().filter(|v| *v >= 0))
        .collect::<Option<_>>()?;

    let clock_seconds = match parts.as_slice() {
        [s] => *s,
        [m, s] if *s < 60 => m.checked_mul(60)?.checked_add(*s)?,
        [h, m, s] if *m < 60 && *s < 60 => h
            .checked_mul(3600)?
            .checked_add(m * 60)?
            .checked_add(*s)?,
        _ => return None,
    };

    days.checked_mul(SECONDS_PER_DAY)?.checked_add(clock_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(1800), "00:30:00");
        assert_eq!(format_duration(4500), "01:15:00");
        assert_eq!(format_duration(-5), "00:00:00");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("01:30:00"), Some(5400));
        assert_eq!(parse_duration("2 00:00:01"), Some(172_801));
        assert_eq!(parse_duration("45:10"), Some(2710));
        assert_eq!(parse_duration("3600"), Some(3600));
        assert_eq!(parse_duration("-01:00:00"), None);
        assert_eq!(parse_duration("01:75:00"), None);
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_parse_duration_rejects_overflow() {
        assert_eq!(parse_duration("9223372036854775:00:00"), None);
        assert_eq!(parse_duration("9223372036854775807:00"), None);
        assert_eq!(parse_duration("106751991167300 23:59:59"), None);
        assert_eq!(parse_duration("9223372036854775807"), Some(i64::MAX));
    }

    #[test]
    fn test_collection_labels() {
        let labels: Vec<_> = Collection::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            ["Users", "Teams", "Activities", "Leaderboard entries", "Workouts"]
        );
        assert_eq!(Collection::Leaderboard.to_string(), "leaderboard");
    }
}

//! Relative due-time labels for task lists

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

use crate::task::Task;

const TIME_FORMAT: &str = "%-I:%M %p";
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Describe `date` relative to `base` by calendar day.
///
/// Within a week either side the label names the day ("today at 3:05 PM",
/// "last Monday at 9:00 AM", "Friday at 6:30 PM"); anything further out is a
/// plain `MM/DD/YYYY` date.
pub fn format_relative<Tz>(date: &DateTime<Tz>, base: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let days = date
        .date_naive()
        .signed_duration_since(base.date_naive())
        .num_days();
    let time = date.format(TIME_FORMAT);

    match days {
        -6..=-2 => format!("last {} at {}", date.format("%A"), time),
        -1 => format!("yesterday at {}", time),
        0 => format!("today at {}", time),
        1 => format!("tomorrow at {}", time),
        2..=6 => format!("{} at {}", date.format("%A"), time),
        _ => date.format(DATE_FORMAT).to_string(),
    }
}

/// Label for a task's due date in `base`'s time zone, if it has one
pub fn due_label<Tz>(task: &Task, base: &DateTime<Tz>) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    task.date_and_time
        .map(|due: DateTime<Utc>| format_relative(&due.with_timezone(&base.timezone()), base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_same_and_adjacent_days() {
        // 2026-10-19 is a Monday
        let base = at(19, 12, 0);
        assert_eq!(format_relative(&at(19, 15, 5), &base), "today at 3:05 PM");
        assert_eq!(format_relative(&at(18, 9, 0), &base), "yesterday at 9:00 AM");
        assert_eq!(format_relative(&at(20, 0, 30), &base), "tomorrow at 12:30 AM");
    }

    #[test]
    fn test_within_a_week() {
        let base = at(19, 12, 0);
        assert_eq!(
            format_relative(&at(14, 8, 0), &base),
            "last Wednesday at 8:00 AM"
        );
        assert_eq!(
            format_relative(&at(13, 8, 0), &base),
            "last Tuesday at 8:00 AM"
        );
        assert_eq!(format_relative(&at(23, 18, 30), &base), "Friday at 6:30 PM");
        assert_eq!(format_relative(&at(25, 18, 30), &base), "Sunday at 6:30 PM");
    }

    #[test]
    fn test_far_dates() {
        let base = at(19, 12, 0);
        assert_eq!(format_relative(&at(12, 8, 0), &base), "10/12/2026");
        assert_eq!(format_relative(&at(26, 8, 0), &base), "10/26/2026");
    }

    #[test]
    fn test_calendar_days_not_elapsed_hours() {
        // Five minutes apart but on different calendar days
        let base = at(19, 23, 58);
        assert_eq!(format_relative(&at(20, 0, 3), &base), "tomorrow at 12:03 AM");
    }

    #[test]
    fn test_due_label_uses_base_zone() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let base = at(19, 12, 0).with_timezone(&zone);
        // 23:30 UTC on the 19th is 01:30 on the 20th at UTC+2
        let task = Task::new("Call mom").with_date_and_time(at(19, 23, 30));

        assert_eq!(
            due_label(&task, &base).as_deref(),
            Some("tomorrow at 1:30 AM")
        );
        assert_eq!(due_label(&Task::new("undated"), &base), None);
    }
}

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

use crate::datetime::DisplayInterval;

/// Days covered by the agenda view.
pub const AGENDA_LENGTH_DAYS: u64 = 30;

/// Granularity the calendar is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewKind {
    #[default]
    Month,
    Week,
    Day,
    Agenda,
}

impl ViewKind {
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Month => "Mes",
            ViewKind::Week => "Semana",
            ViewKind::Day => "Día",
            ViewKind::Agenda => "Agenda",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(ViewKind::Month),
            "week" => Ok(ViewKind::Week),
            "day" => Ok(ViewKind::Day),
            "agenda" => Ok(ViewKind::Agenda),
            other => Err(format!("unknown view {other:?}")),
        }
    }
}

/// Half-open span `[start, end)` the calendar currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl VisibleRange {
    /// Weeks start on Monday. `None` when the range would leave chrono's
    /// representable dates.
    pub fn for_view(kind: ViewKind, focus: NaiveDate) -> Option<Self> {
        let (first, last) = match kind {
            ViewKind::Month => {
                let first = focus.with_day(1)?;
                (first, first.checked_add_months(Months::new(1))?)
            }
            ViewKind::Week => {
                let back = u64::from(focus.weekday().num_days_from_monday());
                let first = focus.checked_sub_days(Days::new(back))?;
                (first, first.checked_add_days(Days::new(7))?)
            }
            ViewKind::Day => (focus, focus.checked_add_days(Days::new(1))?),
            ViewKind::Agenda => (focus, focus.checked_add_days(Days::new(AGENDA_LENGTH_DAYS))?),
        };
        Some(VisibleRange {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(NaiveTime::MIN),
        })
    }

    pub fn overlaps(&self, interval: &DisplayInterval) -> bool {
        interval.start < self.end && interval.end >= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_covers_the_calendar_month() {
        let range = VisibleRange::for_view(ViewKind::Month, day(2024, 2, 17)).unwrap();
        assert_eq!(range.start.date(), day(2024, 2, 1));
        assert_eq!(range.end.date(), day(2024, 3, 1));
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-05-01 is a Wednesday
        let range = VisibleRange::for_view(ViewKind::Week, day(2024, 5, 1)).unwrap();
        assert_eq!(range.start.date(), day(2024, 4, 29));
        assert_eq!(range.end.date(), day(2024, 5, 6));
    }

    #[test]
    fn agenda_spans_thirty_days() {
        let range = VisibleRange::for_view(ViewKind::Agenda, day(2024, 5, 1)).unwrap();
        assert_eq!(range.end.date(), day(2024, 5, 31));
    }

    #[test]
    fn ranges_past_the_last_date_are_rejected() {
        assert!(VisibleRange::for_view(ViewKind::Day, NaiveDate::MAX).is_none());
    }

    #[test]
    fn view_names_parse() {
        assert_eq!("Week".parse::<ViewKind>().unwrap(), ViewKind::Week);
        assert!("year".parse::<ViewKind>().is_err());
        assert_eq!(ViewKind::Day.to_string(), "Día");
    }
}

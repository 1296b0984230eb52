//! Conversions between the stored representation of an event (a `fecha`
//! date string plus `hora_inicio` / `hora_fin` time-of-day strings) and the
//! points in time the calendar displays.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::Event;

/// Start time used when an event has none.
pub const DEFAULT_START_TIME: &str = "00:00";
/// End time used when an event has none.
pub const DEFAULT_END_TIME: &str = "23:59";

const TIME_FORMAT: &str = "%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Warning shown when the end time had to be pushed past the start time.
pub const END_BEFORE_START_WARNING: &str =
    "La hora de fin debe ser posterior a la hora de inicio";

/// The date portion of `s`: everything before the first `T` or space.
pub fn date_part(s: &str) -> &str {
    match s.find(['T', ' ']) {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Parses a strict `HH:MM` 24h time of day.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit);
    if !shaped {
        return None;
    }
    NaiveTime::parse_from_str(s, TIME_FORMAT).ok()
}

/// Whether `s` is a strict `HH:MM` time of day.
pub fn is_valid_time(s: &str) -> bool {
    parse_time(s).is_some()
}

/// Returns `time` when it is a valid `HH:MM`, `"00:00"` otherwise.
pub fn normalize_time(time: Option<&str>) -> &str {
    time_or(time, DEFAULT_START_TIME)
}

/// Returns `time` when it is a valid `HH:MM`, `default` otherwise.
pub fn time_or<'a>(time: Option<&'a str>, default: &'a str) -> &'a str {
    match time {
        Some(t) if is_valid_time(t) => t,
        _ => default,
    }
}

/// Combines a date string and a time string into a timestamp, falling back
/// to the current local time when the date cannot be parsed.
pub fn combine(date: &str, time: Option<&str>) -> NaiveDateTime {
    combine_or(date, time, || Local::now().naive_local())
}

/// Same as [`combine`] with the value to use when the date does not parse.
pub fn combine_or<F>(date: &str, time: Option<&str>, fallback: F) -> NaiveDateTime
where
    F: FnOnce() -> NaiveDateTime,
{
    let date = date_part(date.trim());
    if date.is_empty() {
        return fallback();
    }
    let Ok(day) = NaiveDate::parse_from_str(date, DATE_FORMAT) else {
        return fallback();
    };
    // normalize_time only lets through strings parse_time accepts
    let time = parse_time(normalize_time(time)).unwrap_or(NaiveTime::MIN);
    day.and_time(time)
}

/// `HH:MM` of a timestamp.
pub fn format_time(at: NaiveDateTime) -> String {
    at.format(TIME_FORMAT).to_string()
}

/// If both times are valid `HH:MM` and `end` is not after `start`, returns
/// the replacement end time: `start` plus thirty minutes, wrapping at midnight.
pub fn end_time_after(start: &str, end: &str) -> Option<String> {
    let (start, end) = (parse_time(start)?, parse_time(end)?);
    if end > start {
        return None;
    }
    let (pushed, _) = start.overflowing_add_signed(Duration::minutes(30));
    Some(pushed.format(TIME_FORMAT).to_string())
}

/// The span an event occupies on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
}

impl DisplayInterval {
    pub fn for_event(event: &Event) -> Self {
        let now = Local::now().naive_local();
        Self::for_event_at(event, now)
    }

    /// Same as [`for_event`](Self::for_event) with an explicit "now" for
    /// events whose date does not parse.
    pub fn for_event_at(event: &Event, now: NaiveDateTime) -> Self {
        let start_time = present(event.hora_inicio.as_deref());
        let end_time = present(event.hora_fin.as_deref());

        let start = combine_or(
            &event.fecha,
            Some(start_time.unwrap_or(DEFAULT_START_TIME)),
            || now,
        );
        let end = combine_or(
            &event.fecha,
            Some(end_time.unwrap_or(DEFAULT_END_TIME)),
            || now,
        );

        DisplayInterval {
            start,
            end,
            all_day: start_time.is_none() && end_time.is_none(),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event(fecha: &str, inicio: Option<&str>, fin: Option<&str>) -> Event {
        Event {
            id: 1,
            nombre: "Talk".into(),
            fecha: fecha.into(),
            hora_inicio: inicio.map(Into::into),
            hora_fin: fin.map(Into::into),
            lugar: "Hall".into(),
            tipo_actividad: "Charla".into(),
            empresa: "ACME".into(),
            disertantes: "Jane".into(),
            descripcion: "desc".into(),
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn date_part_cuts_at_t_or_space() {
        assert_eq!(date_part("2024-05-01T12:00:00.000Z"), "2024-05-01");
        assert_eq!(date_part("2024-05-01 12:00"), "2024-05-01");
        assert_eq!(date_part("2024-05-01"), "2024-05-01");
        assert_eq!(date_part(""), "");
    }

    #[test]
    fn malformed_times_become_midnight() {
        assert_eq!(normalize_time(Some("09:30")), "09:30");
        assert_eq!(normalize_time(Some("")), "00:00");
        assert_eq!(normalize_time(Some("25:99")), "00:00");
        assert_eq!(normalize_time(Some("9:30")), "00:00");
        assert_eq!(normalize_time(Some("09:30:00")), "00:00");
        assert_eq!(normalize_time(None), "00:00");
    }

    #[test]
    fn combine_uses_only_the_date_portion() {
        let fallback = at("1999-01-01 00:00");
        assert_eq!(
            combine_or("2024-05-01T03:00:00Z", Some("09:15"), || fallback),
            at("2024-05-01 09:15")
        );
        assert_eq!(
            combine_or("2024-05-01", Some("bogus"), || fallback),
            at("2024-05-01 00:00")
        );
        assert_eq!(combine("2024-05-01 08:00", Some("09:15")), at("2024-05-01 09:15"));
    }

    #[test]
    fn combine_falls_back_on_bad_dates() {
        let fallback = at("1999-01-01 00:00");
        assert_eq!(combine_or("", Some("09:00"), || fallback), fallback);
        assert_eq!(combine_or("2024-02-30", Some("09:00"), || fallback), fallback);
        assert_eq!(combine_or("mañana", None, || fallback), fallback);
    }

    #[test]
    fn interval_uses_sentinel_bounds() {
        let now = at("1999-01-01 00:00");
        let interval = DisplayInterval::for_event_at(&event("2024-05-01", None, None), now);
        assert_eq!(interval.start, at("2024-05-01 00:00"));
        assert_eq!(interval.end, at("2024-05-01 23:59"));
        assert!(interval.all_day);

        let interval =
            DisplayInterval::for_event_at(&event("2024-05-01", Some("09:00"), Some("10:00")), now);
        assert_eq!(interval.start, at("2024-05-01 09:00"));
        assert_eq!(interval.end, at("2024-05-01 10:00"));
        assert!(!interval.all_day);
    }

    #[test]
    fn one_bound_is_enough_to_not_be_all_day() {
        let now = at("1999-01-01 00:00");
        let interval = DisplayInterval::for_event_at(&event("2024-05-01", Some("18:00"), None), now);
        assert!(!interval.all_day);
        assert_eq!(interval.end, at("2024-05-01 23:59"));
    }

    #[test]
    fn end_time_is_pushed_after_start() {
        assert_eq!(end_time_after("09:00", "10:00"), None);
        assert_eq!(end_time_after("10:00", "10:00").as_deref(), Some("10:30"));
        assert_eq!(end_time_after("10:00", "08:00").as_deref(), Some("10:30"));
        assert_eq!(end_time_after("23:45", "23:00").as_deref(), Some("00:15"));
        assert_eq!(end_time_after("", "08:00"), None);
    }

    #[test]
    fn malformed_times_are_never_nudged() {
        assert_eq!(end_time_after("9:00", "10:00"), None);
        assert_eq!(end_time_after("abc", "10:00"), None);
        assert_eq!(end_time_after("10:00", "9:00"), None);
        assert_eq!(end_time_after("25:99", "10:00"), None);
    }

    proptest! {
        #[test]
        fn valid_times_are_kept(h in 0u32..24, m in 0u32..60) {
            let t = format!("{h:02}:{m:02}");
            prop_assert_eq!(normalize_time(Some(t.as_str())), t.as_str());
        }

        #[test]
        fn out_of_range_times_are_replaced(h in 24u32..100, m in 0u32..100) {
            let t = format!("{h:02}:{m:02}");
            prop_assert_eq!(normalize_time(Some(t.as_str())), DEFAULT_START_TIME);
        }

        #[test]
        fn arbitrary_strings_normalize_to_a_valid_time(s in "\\PC*") {
            prop_assert!(is_valid_time(normalize_time(Some(s.as_str()))));
        }

        #[test]
        fn pushed_end_is_valid(h in 0u32..24, m in 0u32..60) {
            let start = format!("{h:02}:{m:02}");
            let end = end_time_after(&start, &start).unwrap();
            prop_assert!(is_valid_time(&end));
        }
    }
}

use super::*;
use time::{Date, Duration, OffsetDateTime, Time};
use tracky::TimeSpan;

impl App {
    /// Midnight-to-midnight bounds of `dt`'s day, exclusive end.
    pub(super) fn day_bounds(dt: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
        let start = dt.replace_time(Time::MIDNIGHT);
        (start, start + Duration::days(1))
    }

    /// Monday-to-Monday bounds of `dt`'s week, exclusive end.
    pub(super) fn week_bounds(dt: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
        let days_since_monday = dt.weekday().number_days_from_monday();
        let monday =
            (dt - Duration::days(days_since_monday as i64)).replace_time(Time::MIDNIGHT);
        (monday, monday + Duration::days(7))
    }

    /// First-of-month to first-of-next-month bounds, exclusive end.
    pub(super) fn month_bounds(dt: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
        let first = dt
            .replace_day(1)
            .expect("day 1 is valid in every month")
            .replace_time(Time::MIDNIGHT);
        let next = match first.month() {
            time::Month::December => first
                .replace_year(first.year() + 1)
                .expect("next year is representable")
                .replace_month(time::Month::January)
                .expect("day 1 is valid in every month"),
            month => first
                .replace_month(month.next())
                .expect("day 1 is valid in every month"),
        };
        (first, next)
    }

    /// Spans of all entries starting in `[from, to)`, the input for the
    /// cumulative displays.
    pub(super) fn spans_between(&self, from: OffsetDateTime, to: OffsetDateTime) -> Vec<TimeSpan> {
        self.entries
            .iter()
            .filter(|e| e.span.start() >= from && e.span.start() < to)
            .map(|e| e.span)
            .collect()
    }

    /// This month's entries grouped per local day, newest day first.
    /// Feeds the history view's day sections.
    pub fn month_groups(&self) -> Vec<(Date, Vec<&TimeEntry>)> {
        let (from, to) = Self::month_bounds(local_now());
        let mut groups: Vec<(Date, Vec<&TimeEntry>)> = Vec::new();

        for entry in &self.entries {
            if entry.span.start() < from || entry.span.start() >= to {
                continue;
            }
            let date = crate::time_utils::to_local_time(entry.span.start()).date();
            match groups.last_mut() {
                Some((last_date, entries)) if *last_date == date => entries.push(entry),
                _ => groups.push((date, vec![entry])),
            }
        }

        groups
    }

    /// Today's entries, newest first. Feeds the timer view's today panel.
    pub fn today_entries(&self) -> Vec<&TimeEntry> {
        let (from, to) = Self::day_bounds(local_now());
        self.entries
            .iter()
            .filter(|e| e.span.start() >= from && e.span.start() < to)
            .collect()
    }
}

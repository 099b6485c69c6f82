use time::{Duration, OffsetDateTime};

/// What displays show when there is nothing to measure.
pub const DEFAULT_LABEL: &str = "00:00:00";

/// Elapsed wall-clock time between two instants, clamped at zero.
pub fn elapsed(start: OffsetDateTime, end: OffsetDateTime) -> Duration {
    (end - start).max(Duration::ZERO)
}

/// Format a duration as zero-padded `HH:MM:SS`. The hours field grows past
/// two digits instead of wrapping, so long aggregates stay readable.
pub fn format_hms(duration: Duration) -> String {
    let total_secs = duration.whole_seconds().max(0);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Sum of a sequence of durations. The empty sum is the zero duration.
pub fn sum(durations: impl IntoIterator<Item = Duration>) -> Duration {
    durations
        .into_iter()
        .fold(Duration::ZERO, |acc, d| acc + d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn elapsed_five_seconds() {
        let d = elapsed(
            datetime!(2024-03-01 10:00:00 UTC),
            datetime!(2024-03-01 10:00:05 UTC),
        );
        assert_eq!(format_hms(d), "00:00:05");
    }

    #[test]
    fn elapsed_across_a_minute_boundary() {
        let d = elapsed(
            datetime!(2024-03-01 09:59:59 UTC),
            datetime!(2024-03-01 10:00:01 UTC),
        );
        assert_eq!(format_hms(d), "00:00:02");
    }

    #[test]
    fn elapsed_clamps_inverted_instants() {
        let d = elapsed(
            datetime!(2024-03-01 10:00:01 UTC),
            datetime!(2024-03-01 10:00:00 UTC),
        );
        assert_eq!(d, Duration::ZERO);
    }

    #[test]
    fn format_pads_every_field() {
        assert_eq!(format_hms(Duration::seconds(0)), "00:00:00");
        assert_eq!(
            format_hms(Duration::hours(1) + Duration::minutes(2) + Duration::seconds(3)),
            "01:02:03"
        );
    }

    #[test]
    fn format_does_not_wrap_past_99_hours() {
        assert_eq!(format_hms(Duration::hours(100)), "100:00:00");
        assert_eq!(
            format_hms(Duration::hours(123) + Duration::seconds(59)),
            "123:00:59"
        );
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(sum([]), Duration::ZERO);
    }

    #[test]
    fn sum_identities() {
        let d = Duration::minutes(45);
        assert_eq!(sum([d]), d);

        let a = Duration::minutes(30);
        let b = Duration::minutes(15);
        let c = Duration::seconds(5);
        assert_eq!(sum([a, b, c]), sum([c, b, a]));
        assert_eq!(sum([sum([a, b]), c]), sum([a, sum([b, c])]));
    }
}

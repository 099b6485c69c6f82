use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::duration::elapsed;

/// One interval of tracked time. `end == None` means the span is still
/// running ("open"). When `end` is present it is guaranteed to be at or
/// after `start`; the constructors reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    end: Option<OffsetDateTime>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeSpanError {
    #[error("time span ends at {end} before it starts at {start}")]
    EndsBeforeStart {
        start: OffsetDateTime,
        end: OffsetDateTime,
    },
}

impl TimeSpan {
    pub fn new(start: OffsetDateTime, end: Option<OffsetDateTime>) -> Result<Self, TimeSpanError> {
        if let Some(end) = end {
            if end < start {
                return Err(TimeSpanError::EndsBeforeStart { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// A span that is still running.
    pub fn open(start: OffsetDateTime) -> Self {
        Self { start, end: None }
    }

    pub fn closed(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, TimeSpanError> {
        Self::new(start, Some(end))
    }

    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    pub fn end(&self) -> Option<OffsetDateTime> {
        self.end
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Close the span at `end`. Fails if `end` is before `start`.
    pub fn close(self, end: OffsetDateTime) -> Result<Self, TimeSpanError> {
        Self::new(self.start, Some(end))
    }

    /// Elapsed duration at the instant `now`, using `end` when the span is
    /// closed. Never negative, even for an inconsistent `now`.
    pub fn duration_at(&self, now: OffsetDateTime) -> Duration {
        elapsed(self.start, self.end.unwrap_or(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn rejects_end_before_start() {
        let start = datetime!(2024-03-01 10:00:00 UTC);
        let end = datetime!(2024-03-01 09:59:59 UTC);
        assert_eq!(
            TimeSpan::closed(start, end),
            Err(TimeSpanError::EndsBeforeStart { start, end })
        );
    }

    #[test]
    fn closed_span_duration_ignores_now() {
        let span = TimeSpan::closed(
            datetime!(2024-03-01 10:00:00 UTC),
            datetime!(2024-03-01 10:00:05 UTC),
        )
        .unwrap();
        assert_eq!(
            span.duration_at(datetime!(2024-03-02 00:00:00 UTC)),
            Duration::seconds(5)
        );
    }

    #[test]
    fn open_span_duration_uses_now_and_clamps() {
        let span = TimeSpan::open(datetime!(2024-03-01 10:00:00 UTC));
        assert_eq!(
            span.duration_at(datetime!(2024-03-01 10:00:03 UTC)),
            Duration::seconds(3)
        );
        // A stale `now` before the start never renders negative.
        assert_eq!(
            span.duration_at(datetime!(2024-03-01 09:00:00 UTC)),
            Duration::ZERO
        );
    }

    #[test]
    fn closing_an_open_span() {
        let span = TimeSpan::open(datetime!(2024-03-01 10:00:00 UTC));
        let closed = span.close(datetime!(2024-03-01 11:30:00 UTC)).unwrap();
        assert!(!closed.is_open());
        assert_eq!(
            closed.duration_at(datetime!(2024-03-01 12:00:00 UTC)),
            Duration::minutes(90)
        );
    }
}

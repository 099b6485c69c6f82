use std::sync::{Arc, Mutex};

use time::OffsetDateTime;

use crate::domain::TimeSpan;
use crate::duration::{format_hms, sum, DEFAULT_LABEL};
use crate::ticker::{SyncedTicker, TickSubscription};

/// Live label for a single time span, e.g. the running timer in the header.
///
/// The element is `Idle` (no subscription) when its span is absent or
/// closed and `Live` (subscribed to the shared ticker) while the span is
/// open. Exactly one subscription exists per element; changing the input
/// cancels the old one before anything else happens, and dropping the
/// element cancels it too.
pub struct ElapsedDisplay {
    ticker: SyncedTicker,
    label: Arc<Mutex<String>>,
    subscription: Option<TickSubscription>,
}

impl ElapsedDisplay {
    pub fn new(ticker: SyncedTicker) -> Self {
        Self {
            ticker,
            label: Arc::new(Mutex::new(DEFAULT_LABEL.to_string())),
            subscription: None,
        }
    }

    /// Replace the element's input span.
    pub fn set_span(&mut self, span: Option<TimeSpan>) {
        // Cancel before resubscribing so there is never more than one
        // active subscription per element.
        self.subscription = None;

        match span {
            None => set_label(&self.label, DEFAULT_LABEL.to_string()),
            Some(span) if span.is_open() => {
                let label = Arc::clone(&self.label);
                self.subscription = Some(self.ticker.subscribe(Box::new(move |now| {
                    set_label(&label, format_hms(span.duration_at(now)));
                })));
                // Show a correct value before the first natural tick.
                self.ticker.trigger();
            }
            Some(span) => {
                // Closed span: the duration is static, compute it once.
                let now = OffsetDateTime::now_utc();
                set_label(&self.label, format_hms(span.duration_at(now)));
            }
        }
    }

    pub fn label(&self) -> String {
        self.label
            .lock()
            .expect("display label lock poisoned")
            .clone()
    }

    pub fn is_live(&self) -> bool {
        self.subscription.is_some()
    }
}

/// Live label for the sum of several time spans, e.g. "Today" or
/// "This Week" totals. Subscribes to the ticker only while at least one
/// input span is open; closed-only and empty inputs are computed once so
/// historical aggregates cost nothing per tick.
pub struct CumulativeDisplay {
    ticker: SyncedTicker,
    label: Arc<Mutex<String>>,
    subscription: Option<TickSubscription>,
}

impl CumulativeDisplay {
    pub fn new(ticker: SyncedTicker) -> Self {
        Self {
            ticker,
            label: Arc::new(Mutex::new(DEFAULT_LABEL.to_string())),
            subscription: None,
        }
    }

    /// Replace the element's input spans. Order is irrelevant to the result.
    pub fn set_spans(&mut self, spans: Vec<TimeSpan>) {
        self.subscription = None;

        if spans.is_empty() {
            set_label(&self.label, DEFAULT_LABEL.to_string());
            return;
        }

        if spans.iter().any(TimeSpan::is_open) {
            let label = Arc::clone(&self.label);
            self.subscription = Some(self.ticker.subscribe(Box::new(move |now| {
                set_label(&label, total_label(&spans, now));
            })));
            self.ticker.trigger();
        } else {
            let now = OffsetDateTime::now_utc();
            set_label(&self.label, total_label(&spans, now));
        }
    }

    pub fn label(&self) -> String {
        self.label
            .lock()
            .expect("display label lock poisoned")
            .clone()
    }

    pub fn is_live(&self) -> bool {
        self.subscription.is_some()
    }
}

/// Recomputed from the raw spans on every tick; the previous label is
/// never an input, so repeated derivation cannot drift.
fn total_label(spans: &[TimeSpan], now: OffsetDateTime) -> String {
    format_hms(sum(spans.iter().map(|span| span.duration_at(now))))
}

fn set_label(label: &Mutex<String>, value: String) {
    *label.lock().expect("display label lock poisoned") = value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::Duration;

    #[test]
    fn no_span_shows_default_and_stays_idle() {
        let ticker = SyncedTicker::new();
        let mut display = ElapsedDisplay::new(ticker.clone());
        display.set_span(None);

        assert_eq!(display.label(), DEFAULT_LABEL);
        assert!(!display.is_live());

        ticker.tick_at(datetime!(2024-03-01 10:00:00 UTC));
        assert_eq!(display.label(), DEFAULT_LABEL);
    }

    #[test]
    fn closed_span_is_computed_once_without_subscribing() {
        let ticker = SyncedTicker::new();
        let mut display = ElapsedDisplay::new(ticker.clone());
        display.set_span(Some(
            TimeSpan::closed(
                datetime!(2024-03-01 10:00:00 UTC),
                datetime!(2024-03-01 10:00:05 UTC),
            )
            .unwrap(),
        ));

        assert_eq!(display.label(), "00:00:05");
        assert!(!display.is_live());

        // Ticks change nothing for a closed span.
        ticker.tick_at(datetime!(2024-03-01 12:00:00 UTC));
        assert_eq!(display.label(), "00:00:05");
    }

    #[test]
    fn open_span_advances_one_second_per_tick() {
        let start = datetime!(2024-03-01 10:00:00 UTC);
        let ticker = SyncedTicker::new();
        let mut display = ElapsedDisplay::new(ticker.clone());
        display.set_span(Some(TimeSpan::open(start)));
        assert!(display.is_live());

        for tick in 1..=3 {
            ticker.tick_at(start + Duration::seconds(tick));
        }
        assert_eq!(display.label(), "00:00:03");

        ticker.tick_at(start + Duration::seconds(4));
        assert_eq!(display.label(), "00:00:04");
    }

    #[test]
    fn changing_the_input_replaces_the_subscription() {
        let start = datetime!(2024-03-01 10:00:00 UTC);
        let ticker = SyncedTicker::new();
        let mut display = ElapsedDisplay::new(ticker.clone());

        display.set_span(Some(TimeSpan::open(start)));
        assert!(display.is_live());

        // Span closes: the element goes back to Idle and its old callback
        // no longer runs.
        display.set_span(Some(
            TimeSpan::closed(start, start + Duration::minutes(90)).unwrap(),
        ));
        assert!(!display.is_live());
        assert_eq!(display.label(), "01:30:00");

        ticker.tick_at(start + Duration::hours(5));
        assert_eq!(display.label(), "01:30:00");
    }

    #[test]
    fn cumulative_of_closed_spans_has_no_subscription() {
        let ticker = SyncedTicker::new();
        let mut display = CumulativeDisplay::new(ticker.clone());
        display.set_spans(vec![
            TimeSpan::closed(
                datetime!(2024-03-01 09:00:00 UTC),
                datetime!(2024-03-01 09:30:00 UTC),
            )
            .unwrap(),
            TimeSpan::closed(
                datetime!(2024-03-01 10:00:00 UTC),
                datetime!(2024-03-01 10:15:00 UTC),
            )
            .unwrap(),
        ]);

        assert_eq!(display.label(), "00:45:00");
        assert!(!display.is_live());
    }

    #[test]
    fn cumulative_with_an_open_span_stays_live() {
        let now = datetime!(2024-03-01 10:30:00 UTC);
        let ticker = SyncedTicker::new();
        let mut display = CumulativeDisplay::new(ticker.clone());
        display.set_spans(vec![
            TimeSpan::closed(
                datetime!(2024-03-01 09:00:00 UTC),
                datetime!(2024-03-01 09:30:00 UTC),
            )
            .unwrap(),
            TimeSpan::open(now),
        ]);
        assert!(display.is_live());

        for tick in 1..=5 {
            ticker.tick_at(now + Duration::seconds(tick));
        }
        assert_eq!(display.label(), "00:30:05");
    }

    #[test]
    fn cumulative_of_nothing_shows_default_and_stays_idle() {
        let ticker = SyncedTicker::new();
        let mut display = CumulativeDisplay::new(ticker);
        display.set_spans(Vec::new());

        assert_eq!(display.label(), DEFAULT_LABEL);
        assert!(!display.is_live());
    }

    #[test]
    fn dropping_a_display_cancels_its_subscription() {
        let start = datetime!(2024-03-01 10:00:00 UTC);
        let ticker = SyncedTicker::new();

        let mut display = ElapsedDisplay::new(ticker.clone());
        display.set_span(Some(TimeSpan::open(start)));
        let label = Arc::clone(&display.label);
        drop(display);

        // The label last written before the drop is untouched afterwards.
        let before = label.lock().unwrap().clone();
        ticker.tick_at(start + Duration::seconds(30));
        assert_eq!(*label.lock().unwrap(), before);
    }
}

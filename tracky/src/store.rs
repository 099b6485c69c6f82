use std::sync::{Arc, Mutex};

use time::OffsetDateTime;

use crate::domain::{TimeEntry, TimeSpan, TimeSpanError};

/// In-memory record of time entries, including the single active (open)
/// entry the displays read. Mutated only through the explicit start/stop
/// operations below; displays never write here.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone)]
pub struct EntryStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    entries: Vec<TimeEntry>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("a timer is already running")]
    TimerAlreadyRunning,
    #[error("no timer is running")]
    NoActiveTimer,
    #[error("no entry with id {0}")]
    UnknownEntry(i64),
    #[error(transparent)]
    InvalidSpan(#[from] TimeSpanError),
}

impl EntryStore {
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// Seed the store with existing (typically closed) entries.
    pub fn with_entries(entries: Vec<TimeEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id + 1).max().unwrap_or(1);
        Self {
            inner: Arc::new(Mutex::new(Inner { next_id, entries })),
        }
    }

    /// Start the timer: create a new open entry. At most one open entry
    /// exists at any time; starting while one is open is rejected.
    pub fn start_timer(
        &self,
        now: OffsetDateTime,
        project_name: Option<String>,
        task_name: Option<String>,
        note: Option<String>,
    ) -> Result<TimeEntry, StoreError> {
        let mut inner = self.lock();
        if inner.entries.iter().any(TimeEntry::is_open) {
            return Err(StoreError::TimerAlreadyRunning);
        }

        let entry = TimeEntry {
            id: inner.next_id,
            span: TimeSpan::open(now),
            project_name,
            task_name,
            note,
        };
        inner.next_id += 1;
        inner.entries.push(entry.clone());
        Ok(entry)
    }

    /// Stop the timer: close the open entry at `now`.
    pub fn stop_timer(&self, now: OffsetDateTime) -> Result<TimeEntry, StoreError> {
        let mut inner = self.lock();
        let entry = inner
            .entries
            .iter_mut()
            .find(|e| e.is_open())
            .ok_or(StoreError::NoActiveTimer)?;
        entry.span = entry.span.close(now)?;
        Ok(entry.clone())
    }

    /// The open entry, if any.
    pub fn active(&self) -> Option<TimeEntry> {
        self.lock().entries.iter().find(|e| e.is_open()).cloned()
    }

    pub fn entries(&self) -> Vec<TimeEntry> {
        self.lock().entries.clone()
    }

    /// Entries whose start lies in `[from, to)`.
    pub fn entries_between(&self, from: OffsetDateTime, to: OffsetDateTime) -> Vec<TimeEntry> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.span.start() >= from && e.span.start() < to)
            .cloned()
            .collect()
    }

    pub fn update_note(&self, id: i64, note: Option<String>) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let entry = inner
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::UnknownEntry(id))?;
        entry.note = note;
        Ok(())
    }

    pub fn delete_entry(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|e| e.id != id);
        if inner.entries.len() == before {
            return Err(StoreError::UnknownEntry(id));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("entry store lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn start_then_stop_closes_the_single_open_entry() {
        let store = EntryStore::new();
        let started = store
            .start_timer(
                datetime!(2024-03-01 09:00:00 UTC),
                Some("Tracky".into()),
                Some("Core".into()),
                None,
            )
            .unwrap();
        assert!(started.is_open());
        assert_eq!(store.active().map(|e| e.id), Some(started.id));

        let stopped = store.stop_timer(datetime!(2024-03-01 09:30:00 UTC)).unwrap();
        assert_eq!(stopped.id, started.id);
        assert!(!stopped.is_open());
        assert!(store.active().is_none());
    }

    #[test]
    fn second_start_is_rejected_while_running() {
        let store = EntryStore::new();
        store
            .start_timer(datetime!(2024-03-01 09:00:00 UTC), None, None, None)
            .unwrap();
        assert_eq!(
            store.start_timer(datetime!(2024-03-01 09:05:00 UTC), None, None, None),
            Err(StoreError::TimerAlreadyRunning)
        );
    }

    #[test]
    fn stop_without_running_timer_is_rejected() {
        let store = EntryStore::new();
        assert_eq!(
            store.stop_timer(datetime!(2024-03-01 09:00:00 UTC)),
            Err(StoreError::NoActiveTimer)
        );
    }

    #[test]
    fn stop_before_start_is_rejected_and_entry_stays_open() {
        let store = EntryStore::new();
        store
            .start_timer(datetime!(2024-03-01 09:00:00 UTC), None, None, None)
            .unwrap();
        assert!(matches!(
            store.stop_timer(datetime!(2024-03-01 08:00:00 UTC)),
            Err(StoreError::InvalidSpan(_))
        ));
        assert!(store.active().is_some());
    }

    #[test]
    fn entries_between_filters_on_start() {
        let store = EntryStore::new();
        store
            .start_timer(datetime!(2024-03-01 09:00:00 UTC), None, None, None)
            .unwrap();
        store.stop_timer(datetime!(2024-03-01 09:30:00 UTC)).unwrap();
        store
            .start_timer(datetime!(2024-03-02 09:00:00 UTC), None, None, None)
            .unwrap();
        store.stop_timer(datetime!(2024-03-02 09:15:00 UTC)).unwrap();

        let day_one = store.entries_between(
            datetime!(2024-03-01 00:00:00 UTC),
            datetime!(2024-03-02 00:00:00 UTC),
        );
        assert_eq!(day_one.len(), 1);
        assert_eq!(day_one[0].span.start(), datetime!(2024-03-01 09:00:00 UTC));
    }

    #[test]
    fn update_note_sets_and_clears() {
        let store = EntryStore::new();
        let started = store
            .start_timer(datetime!(2024-03-01 09:00:00 UTC), None, None, None)
            .unwrap();

        store
            .update_note(started.id, Some("standup notes".to_string()))
            .unwrap();
        assert_eq!(
            store.entries()[0].note.as_deref(),
            Some("standup notes")
        );

        store.update_note(started.id, None).unwrap();
        assert_eq!(store.entries()[0].note, None);
    }

    #[test]
    fn update_note_on_unknown_entry_is_rejected() {
        let store = EntryStore::new();
        assert_eq!(
            store.update_note(42, Some("x".to_string())),
            Err(StoreError::UnknownEntry(42))
        );
    }

    #[test]
    fn delete_unknown_entry_is_rejected() {
        let store = EntryStore::new();
        assert_eq!(store.delete_entry(9), Err(StoreError::UnknownEntry(9)));
    }

    #[test]
    fn seeded_ids_do_not_collide() {
        let seeded = TimeEntry {
            id: 7,
            span: TimeSpan::closed(
                datetime!(2024-03-01 09:00:00 UTC),
                datetime!(2024-03-01 09:30:00 UTC),
            )
            .unwrap(),
            project_name: None,
            task_name: None,
            note: None,
        };
        let store = EntryStore::with_entries(vec![seeded]);
        let started = store
            .start_timer(datetime!(2024-03-01 10:00:00 UTC), None, None, None)
            .unwrap();
        assert_eq!(started.id, 8);
    }
}

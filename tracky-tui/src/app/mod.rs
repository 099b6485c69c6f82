use crate::config::TrackyConfig;
use crate::demo_data;
use crate::time_utils::local_now;
use time::OffsetDateTime;
use tracky::{
    Client, CumulativeDisplay, ElapsedDisplay, EntryStore, Project, SyncedTicker, Task, TimeEntry,
};

mod history;
mod state;
pub use state::{NoteEdit, TimerState, View};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub store: EntryStore,
    pub ticker: SyncedTicker,

    // Display elements, all driven by the one shared ticker.
    pub header_timer: ElapsedDisplay,
    pub today_total: CumulativeDisplay,
    pub week_total: CumulativeDisplay,
    pub month_total: CumulativeDisplay,

    // Render cache, newest first. Rebuilt by `refresh`.
    pub entries: Vec<TimeEntry>,

    // Catalog the timer is tagged with.
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub selected_task_index: usize,

    pub status_message: Option<String>,
    pub history_scroll: usize,
    pub week_hours_target: f64,
    pub note_edit: Option<NoteEdit>,

    /// End of the local day the render cache was last built for. Once the
    /// clock passes it, the day/week/month span sets are stale.
    pub next_day_start: OffsetDateTime,
}

impl App {
    pub fn new(store: EntryStore, ticker: SyncedTicker, config: &TrackyConfig) -> Self {
        let mut app = Self {
            running: true,
            current_view: View::Timer,
            header_timer: ElapsedDisplay::new(ticker.clone()),
            today_total: CumulativeDisplay::new(ticker.clone()),
            week_total: CumulativeDisplay::new(ticker.clone()),
            month_total: CumulativeDisplay::new(ticker.clone()),
            store,
            ticker,
            entries: Vec::new(),
            clients: demo_data::demo_clients(),
            projects: demo_data::demo_projects(),
            tasks: demo_data::demo_tasks(),
            selected_task_index: 0,
            status_message: None,
            history_scroll: 0,
            week_hours_target: config.week_hours_target,
            note_edit: None,
            next_day_start: OffsetDateTime::now_utc(),
        };
        app.refresh();
        app
    }

    pub fn timer_state(&self) -> TimerState {
        if self.store.active().is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    /// Rebuild the render cache from the store and point every display
    /// element at its current input spans. Each display re-subscribes to
    /// the ticker only when it still has an open span to follow.
    pub fn refresh(&mut self) {
        let mut entries = self.store.entries();
        entries.sort_by(|a, b| b.span.start().cmp(&a.span.start()));
        self.entries = entries;

        self.header_timer
            .set_span(self.store.active().map(|e| e.span));

        let now = local_now();
        let (day_from, day_to) = Self::day_bounds(now);
        let (week_from, week_to) = Self::week_bounds(now);
        let (month_from, month_to) = Self::month_bounds(now);
        self.today_total.set_spans(self.spans_between(day_from, day_to));
        self.week_total
            .set_spans(self.spans_between(week_from, week_to));
        self.month_total
            .set_spans(self.spans_between(month_from, month_to));
        self.next_day_start = day_to;
    }

    /// Rebuild when the local date has changed since the last refresh, so
    /// the "Today"/"Week" totals never keep yesterday's span set after the
    /// app idles past midnight.
    pub fn refresh_if_day_rolled_over(&mut self) {
        if local_now() >= self.next_day_start {
            self.refresh();
        }
    }

    /// Open the note editor on the running entry, or the latest one.
    pub fn open_note_editor(&mut self) {
        let target = self.store.active().or_else(|| self.entries.first().cloned());
        match target {
            Some(entry) => {
                self.note_edit = Some(NoteEdit {
                    entry_id: entry.id,
                    input: entry.note.unwrap_or_default(),
                });
            }
            None => self.set_status("No entry to annotate".to_string()),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected_task_index)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        let task = self.selected_task()?;
        self.projects.iter().find(|p| p.id == task.project_id)
    }

    pub fn selected_client(&self) -> Option<&Client> {
        let project = self.selected_project()?;
        self.clients.iter().find(|c| c.id == project.client_id)
    }

    /// "Client / Project — Task" label for the timer box.
    pub fn selected_task_label(&self) -> String {
        match (self.selected_client(), self.selected_project(), self.selected_task()) {
            (Some(client), Some(project), Some(task)) => {
                format!("{} / {}: {}", client.name, project.name, task.name)
            }
            (_, Some(project), Some(task)) => format!("{}: {}", project.name, task.name),
            (_, _, Some(task)) => task.name.clone(),
            _ => "No task selected".to_string(),
        }
    }

    pub fn cycle_task(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        self.selected_task_index = (self.selected_task_index + 1) % self.tasks.len();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Total hours worked this week (completed entries only).
    pub fn worked_hours_this_week(&self) -> f64 {
        let (from, to) = Self::week_bounds(local_now());
        self.entries
            .iter()
            .filter(|e| e.span.start() >= from && e.span.start() < to)
            .filter_map(|e| {
                let end = e.span.end()?;
                let secs = (end - e.span.start()).whole_seconds();
                (secs > 0).then_some(secs as f64 / 3600.0)
            })
            .sum()
    }
}

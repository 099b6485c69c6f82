use crate::app::{App, TimerState};
use time::OffsetDateTime;

use super::action_queue::Action;

pub(super) fn run_action(action: Action, app: &mut App) {
    match action {
        Action::StartTimer => handle_start_timer(app),
        Action::StopTimer => handle_stop_timer(app),
        Action::SaveNote { id, note } => handle_save_note(app, id, note),
        Action::DeleteEntry { id } => handle_delete_entry(app, id),
        Action::Refresh => app.refresh(),
    }
}

fn handle_start_timer(app: &mut App) {
    if app.timer_state() == TimerState::Running {
        app.set_status("Timer already running (press s to stop)".to_string());
        return;
    }

    let project_name = app.selected_project().map(|p| p.name.clone());
    let task_name = app.selected_task().map(|t| t.name.clone());
    match app
        .store
        .start_timer(OffsetDateTime::now_utc(), project_name, task_name, None)
    {
        Ok(_) => {
            app.clear_status();
            app.refresh();
        }
        Err(e) => app.set_status(format!("Error starting timer: {}", e)),
    }
}

fn handle_stop_timer(app: &mut App) {
    match app.store.stop_timer(OffsetDateTime::now_utc()) {
        Ok(entry) => {
            let now = OffsetDateTime::now_utc();
            app.set_status(format!(
                "Saved {} on {}",
                tracky::duration::format_hms(entry.span.duration_at(now)),
                entry.task_name.as_deref().unwrap_or("(no task)")
            ));
            app.refresh();
        }
        Err(e) => app.set_status(format!("Cannot stop timer: {}", e)),
    }
}

fn handle_save_note(app: &mut App, id: i64, note: Option<String>) {
    match app.store.update_note(id, note) {
        Ok(()) => {
            app.set_status("Note updated".to_string());
            app.refresh();
        }
        Err(e) => app.set_status(format!("Cannot update note: {}", e)),
    }
}

fn handle_delete_entry(app: &mut App, id: i64) {
    match app.store.delete_entry(id) {
        Ok(()) => {
            app.set_status("Entry deleted".to_string());
            app.refresh();
        }
        Err(e) => app.set_status(format!("Cannot delete entry: {}", e)),
    }
}

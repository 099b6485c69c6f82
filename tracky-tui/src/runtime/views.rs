use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, View};

use super::action_queue::{Action, ActionTx};

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    // The note editor captures every key while it is open.
    if app.note_edit.is_some() {
        handle_note_edit_key(key, app, action_tx);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.running = false;
        }
        KeyCode::Tab => {
            app.current_view = match app.current_view {
                View::Timer => View::History,
                View::History => View::Timer,
            };
            app.history_scroll = 0;
        }
        _ => match app.current_view {
            View::Timer => handle_timer_key(key, app, action_tx),
            View::History => handle_history_key(key, app, action_tx),
        },
    }
}

fn handle_timer_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char(' ') => {
            let action = match app.timer_state() {
                crate::app::TimerState::Stopped => Action::StartTimer,
                crate::app::TimerState::Running => Action::StopTimer,
            };
            let _ = action_tx.send(action);
        }
        KeyCode::Char('p') => {
            app.cycle_task();
            app.clear_status();
        }
        KeyCode::Char('n') => {
            app.open_note_editor();
        }
        KeyCode::Char('r') => {
            let _ = action_tx.send(Action::Refresh);
        }
        _ => {}
    }
}

fn handle_note_edit_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => app.note_edit = None,
        KeyCode::Enter => {
            if let Some(edit) = app.note_edit.take() {
                let trimmed = edit.input.trim();
                let note = (!trimmed.is_empty()).then(|| trimmed.to_string());
                let _ = action_tx.send(Action::SaveNote {
                    id: edit.entry_id,
                    note,
                });
            }
        }
        KeyCode::Backspace => {
            if let Some(edit) = app.note_edit.as_mut() {
                edit.input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(edit) = app.note_edit.as_mut() {
                edit.input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_history_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.history_scroll = app.history_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.history_scroll = app.history_scroll.saturating_sub(1);
        }
        KeyCode::Char('d') => {
            // Entries are cached newest first; delete the latest one.
            if let Some(entry) = app.entries.first() {
                let _ = action_tx.send(Action::DeleteEntry { id: entry.id });
            }
        }
        KeyCode::Char('r') => {
            let _ = action_tx.send(Action::Refresh);
        }
        _ => {}
    }
}

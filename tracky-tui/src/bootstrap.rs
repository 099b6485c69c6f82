use crate::app::{App, TimerState};

/// Prime the app after construction: pull the store into the render cache
/// and report a restored running timer, if one survived in the store.
pub fn initialize_app_state(app: &mut App) {
    app.refresh();

    if app.timer_state() == TimerState::Running {
        app.set_status("Restored running timer".to_string());
        tracing::info!("restored running timer from store");
    }
}

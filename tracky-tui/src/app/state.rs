#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Timer,
    History,
}

/// In-progress note edit targeting one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEdit {
    pub entry_id: i64,
    pub input: String,
}

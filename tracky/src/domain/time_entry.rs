use serde::{Deserialize, Serialize};

use super::TimeSpan;

/// One tracked unit of work. The entry is open while its span is open; at
/// most one open entry exists per store at any time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: i64,
    #[serde(flatten)]
    pub span: TimeSpan,
    pub project_name: Option<String>,
    pub task_name: Option<String>,
    pub note: Option<String>,
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.span.is_open()
    }
}

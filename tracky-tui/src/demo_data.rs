//! Demo clients/projects/tasks and seeded history, so the tracker is
//! usable without any persisted data.

use time::macros::time;
use time::{Duration, OffsetDateTime, Time};
use tracky::{Client, Project, Task, TimeEntry, TimeSpan};

pub fn demo_clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            name: "Acme GmbH".to_string(),
        },
        Client {
            id: 2,
            name: "Internal".to_string(),
        },
    ]
}

pub fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Website Relaunch".to_string(),
            client_id: 1,
        },
        Project {
            id: 2,
            name: "Mobile App".to_string(),
            client_id: 1,
        },
        Project {
            id: 3,
            name: "Tooling".to_string(),
            client_id: 2,
        },
    ]
}

pub fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            name: "Backend".to_string(),
            project_id: 1,
        },
        Task {
            id: 2,
            name: "Frontend".to_string(),
            project_id: 1,
        },
        Task {
            id: 3,
            name: "Code Review".to_string(),
            project_id: 2,
        },
        Task {
            id: 4,
            name: "CI Maintenance".to_string(),
            project_id: 3,
        },
    ]
}

/// Closed entries spread over today, this week and the previous weeks,
/// anchored at `now` so the day/week/month views always have content.
pub fn seed_entries(now: OffsetDateTime) -> Vec<TimeEntry> {
    let at = |days_ago: i64, t: Time| now.replace_time(t) - Duration::days(days_ago);

    let mut id = 0;
    let mut entry = |days_ago: i64,
                     start: Time,
                     end: Time,
                     project: &str,
                     task: &str,
                     note: Option<&str>| {
        id += 1;
        TimeEntry {
            id,
            span: closed(at(days_ago, start), at(days_ago, end)),
            project_name: Some(project.to_string()),
            task_name: Some(task.to_string()),
            note: note.map(str::to_string),
        }
    };

    vec![
        // Today
        entry(
            0,
            time!(08:30:00),
            time!(09:15:00),
            "Website Relaunch",
            "Backend",
            Some("API pagination"),
        ),
        entry(
            0,
            time!(09:30:00),
            time!(10:00:00),
            "Mobile App",
            "Code Review",
            None,
        ),
        // Yesterday
        entry(
            1,
            time!(09:00:00),
            time!(12:00:00),
            "Website Relaunch",
            "Frontend",
            Some("Calendar widget"),
        ),
        entry(
            1,
            time!(13:00:00),
            time!(16:30:00),
            "Website Relaunch",
            "Backend",
            None,
        ),
        // Earlier in the month
        entry(
            6,
            time!(10:00:00),
            time!(11:45:00),
            "Tooling",
            "CI Maintenance",
            Some("Flaky pipeline"),
        ),
        entry(
            8,
            time!(09:00:00),
            time!(12:30:00),
            "Mobile App",
            "Code Review",
            None,
        ),
        entry(
            13,
            time!(08:45:00),
            time!(15:00:00),
            "Website Relaunch",
            "Backend",
            None,
        ),
        entry(
            20,
            time!(09:15:00),
            time!(13:00:00),
            "Tooling",
            "CI Maintenance",
            None,
        ),
    ]
}

fn closed(start: OffsetDateTime, end: OffsetDateTime) -> TimeSpan {
    TimeSpan::closed(start, end).expect("demo spans are well-formed")
}

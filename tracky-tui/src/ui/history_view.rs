use super::*;
use crate::time_utils::to_local_time;
use time::OffsetDateTime;
use tracky::duration::{format_hms, sum};
use tracky::TimeEntry;

pub fn render_history_view(frame: &mut Frame, app: &mut App, body: Rect) {
    let area = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(body);

    render_month_history(frame, area[0], app);
    render_controls(frame, area[1]);
}

fn render_month_history(frame: &mut Frame, area: Rect, app: &mut App) {
    let groups = app.month_groups();
    let entry_count: usize = groups.iter().map(|(_, entries)| entries.len()).sum();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" This Month ({} days tracked) ", groups.len()))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entry_count == 0 {
        let empty = Paragraph::new("Nothing tracked this month yet")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let now = OffsetDateTime::now_utc();
    let mut lines: Vec<Line> = Vec::new();
    for (date, entries) in &groups {
        // Historical days are closed sets, so a plain sum here is enough;
        // only today's separator can move between frames.
        let day_total = format_hms(sum(entries.iter().map(|e| e.span.duration_at(now))));
        lines.push(Line::from(Span::styled(
            format!("── {} {} · {} ──", date.weekday(), date, day_total),
            Style::default().fg(Color::Cyan),
        )));
        for entry in entries {
            lines.push(history_row(entry, now));
        }
    }

    // Clamp the scroll so the last line stays reachable but not beyond.
    let max_scroll = lines.len().saturating_sub(inner.height as usize);
    if app.history_scroll > max_scroll {
        app.history_scroll = max_scroll;
    }

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(app.history_scroll)
        .take(inner.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

fn history_row(entry: &TimeEntry, now: OffsetDateTime) -> Line<'static> {
    let start = to_local_time(entry.span.start());
    let start_label = format!("{:02}:{:02}", start.hour(), start.minute());
    let end_label = match entry.span.end() {
        Some(end) => {
            let end = to_local_time(end);
            format!("{:02}:{:02}", end.hour(), end.minute())
        }
        None => "now  ".to_string(),
    };

    let label = match (&entry.project_name, &entry.task_name) {
        (Some(project), Some(task)) => format!("{}: {}", project, task),
        (Some(project), None) => project.clone(),
        (None, Some(task)) => task.clone(),
        (None, None) => "(no task)".to_string(),
    };

    let style = if entry.is_open() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(
            format!("  {}–{}  ", start_label, end_label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{}  ", format_hms(entry.span.duration_at(now))),
            style,
        ),
        Span::raw(label),
    ];
    if let Some(note) = &entry.note {
        spans.push(Span::styled(
            format!(" — {}", note),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("j/k scroll · d delete latest entry · Tab timer · q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, area);
}

use super::*;
use crate::app::TimerState;
use crate::time_utils::to_local_time;
use time::OffsetDateTime;
use tracky::duration::format_hms;
use tracky::TimeEntry;

/// One-line totals bar on top of every view. All three totals come from
/// cumulative display elements fed by the shared ticker, so they stay in
/// step with the header timer.
pub fn render_compact_stats(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled("Today ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.today_total.label(), Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled("Week ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.week_total.label(), Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled("Month ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.month_total.label(), Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled(
            format!(
                "{:.1}/{:.1} h this week",
                app.worked_hours_this_week(),
                app.week_hours_target
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let stats = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(stats, area);
}

pub fn render_timer_view(frame: &mut Frame, app: &mut App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Timer display
            Constraint::Length(3), // Task info
            Constraint::Min(5),    // Today's entries
            Constraint::Length(3), // Status
            Constraint::Length(2), // Controls
        ])
        .split(body);

    render_timer(frame, chunks[0], app);
    render_task(frame, chunks[1], app);
    render_today(frame, chunks[2], app);
    render_status(frame, chunks[3], app);
    render_controls(frame, chunks[4]);
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let is_running = app.timer_state() == TimerState::Running;

    let border_style = if is_running {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let timer_text = if is_running {
        format!("{} ⏵ (running)", app.header_timer.label())
    } else {
        format!("{} (not running)", app.header_timer.label())
    };

    let timer = Paragraph::new(timer_text)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Timer ")
                .border_style(border_style)
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(timer, area);
}

fn render_task(frame: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Span::raw(" "),
        Span::styled("T", Style::default().add_modifier(Modifier::UNDERLINED)),
        Span::raw("ask "),
    ];

    let widget = Paragraph::new(app.selected_task_label())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(title))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_today(frame: &mut Frame, area: Rect, app: &App) {
    let entries = app.today_entries();
    let is_running = app.timer_state() == TimerState::Running;

    let title = today_title(&entries, is_running);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entries.is_empty() {
        let empty = Paragraph::new("No entries yet today — press s to start the timer")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let max_rows = inner.height as usize;
    let lines: Vec<Line> = entries
        .iter()
        .take(max_rows)
        .map(|entry| entry_row(entry, app))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Counts only closed entries: the running entry may have started before
/// midnight, in which case it is not in today's list at all.
fn today_title(entries: &[&TimeEntry], is_running: bool) -> String {
    let closed = entries.iter().filter(|e| !e.is_open()).count();
    if is_running {
        format!(" Today ({} entries + running) ", closed)
    } else {
        format!(" Today ({} entries) ", closed)
    }
}

fn entry_row<'a>(entry: &'a TimeEntry, app: &App) -> Line<'a> {
    let start = to_local_time(entry.span.start());
    let start_label = format!("{:02}:{:02}", start.hour(), start.minute());

    let (end_label, duration_label, style) = match entry.span.end() {
        Some(end) => {
            let end = to_local_time(end);
            let closed = format!("{:02}:{:02}", end.hour(), end.minute());
            let duration = format_hms(entry.span.duration_at(OffsetDateTime::now_utc()));
            (closed, duration, Style::default().fg(Color::White))
        }
        // The open entry's duration comes from the header display, so all
        // running clocks on screen agree to the second.
        None => (
            "now  ".to_string(),
            app.header_timer.label(),
            Style::default().fg(Color::Green),
        ),
    };

    let label = match (&entry.project_name, &entry.task_name) {
        (Some(project), Some(task)) => format!("{}: {}", project, task),
        (Some(project), None) => project.clone(),
        (None, Some(task)) => task.clone(),
        (None, None) => "(no task)".to_string(),
    };

    let mut spans = vec![
        Span::styled(
            format!("{}–{}  ", start_label, end_label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{}  ", duration_label), style),
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

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(edit) = &app.note_edit {
        let editor = Paragraph::new(format!("{}▏", edit.input))
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Note (Enter save · Esc cancel) ")
                    .border_style(Style::default().fg(Color::Magenta))
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(editor, area);
        return;
    }

    let default_status = match app.timer_state() {
        TimerState::Running => "Recording — press s to stop",
        TimerState::Stopped => "Idle — press s to start",
    };
    let status_text = app.status_message.as_deref().unwrap_or(default_status);

    let is_error = {
        let lower = status_text.to_lowercase();
        lower.contains("error") || lower.contains("cannot")
    };
    let color = if is_error { Color::Red } else { Color::DarkGray };

    let status = Paragraph::new(status_text.to_string())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("s start/stop · p task · n note · Tab history · r refresh · q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, area);
}

use crate::app::AppState;
use crate::domain::{format_duration, format_minutes, TimerPhase};
use crate::report::calculate_history_summary;
use crate::ui::styles::{border_style, default_style, gauge_style, hint_style, score_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};

/// Days listed in the history table
const HISTORY_ROWS: usize = 14;

/// Render the Stats view: today on top, archived days below
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    render_today(f, app, chunks[0]);
    render_history(f, app, chunks[1]);
}

fn render_today(f: &mut Frame, app: &AppState, area: Rect) {
    let stats = app.day_stats();
    let probability = app.not_finishing_probability();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Today ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let done_ratio = if stats.total_tasks == 0 {
        0.0
    } else {
        stats.tasks_completed as f64 / stats.total_tasks as f64
    };
    let gauge = Gauge::default()
        .gauge_style(gauge_style(TimerPhase::BreakRunning))
        .ratio(done_ratio)
        .label(format!("{}/{} tasks", stats.tasks_completed, stats.total_tasks));
    f.render_widget(gauge, chunks[0]);

    let lines = vec![
        Line::from(vec![
            Span::styled("Score: ", title_style()),
            Span::styled(stats.score.to_string(), score_style(stats.score)),
        ]),
        Line::from(vec![
            Span::styled("Focus: ", title_style()),
            Span::raw(format_duration(stats.focus_seconds)),
            Span::styled("   Idle: ", title_style()),
            Span::raw(format_duration(stats.idle_seconds)),
        ]),
        Line::from(vec![
            Span::styled("Planned: ", title_style()),
            Span::raw(format_minutes(stats.total_planned_minutes)),
            Span::styled("   Remaining: ", title_style()),
            Span::raw(format_minutes(stats.remaining_minutes)),
        ]),
        Line::from(vec![
            Span::styled("Chance of not finishing: ", title_style()),
            Span::raw(format!("{}%", probability)),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).style(default_style(app.settings.theme)),
        chunks[1],
    );
}

fn render_history(f: &mut Frame, app: &AppState, area: Rect) {
    let recent = app.history.last(HISTORY_ROWS);
    let summary = calculate_history_summary(app.history.iter());

    let title = format!(
        " History ({} days, avg focus {}) ",
        summary.days,
        format_duration(summary.avg_focus_seconds)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if recent.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No finished days yet. History fills in at the daily reset.",
            hint_style(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Newest first
    let rows: Vec<Row> = recent
        .iter()
        .rev()
        .map(|day| {
            Row::new(vec![
                day.date.clone(),
                format!("{}/{}", day.tasks_completed, day.total_tasks),
                format_duration(day.focus_time),
                format_duration(day.idle_time),
                format_minutes(day.total_planned_time),
                day.score.to_string(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["Date", "Done", "Focus", "Idle", "Planned", "Score"]).style(title_style()))
        .block(block);
    f.render_widget(table, area);
}

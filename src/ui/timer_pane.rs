use crate::app::AppState;
use crate::domain::{format_clock, format_minutes, progress_ratio, TimerPhase};
use crate::ui::styles::{
    border_style, default_style, gauge_style, phase_style, quote_style, score_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Heading under the clock: the bound task, the break, or an invitation to start
fn heading(app: &AppState) -> String {
    let phase = app.phase();
    if phase.is_break() {
        return "Break Time!".to_string();
    }
    match app.session.current_task() {
        Some(task) => task.name.clone(),
        None if app.session.tasks().first_incomplete().is_some() => {
            "Press Space to start the next task".to_string()
        }
        None => "Nothing planned. Press a to add a task".to_string(),
    }
}

/// Render the Focus view
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.settings.theme;
    let phase = app.phase();
    let timer = app.session.timer();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" Focus · {} ", app.now().format("%a %b %d")),
            title_style(),
        ))
        .style(default_style(theme));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Clock + phase
            Constraint::Length(1), // Gauge
            Constraint::Length(2), // Heading
            Constraint::Min(3),    // Quote
            Constraint::Length(2), // Day summary
        ])
        .split(inner);

    let clock = Paragraph::new(vec![
        Line::from(Span::styled(format_clock(timer.time_remaining), title_style())),
        Line::from(Span::styled(phase.to_tag(), phase_style(phase))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(clock, chunks[1]);

    let ratio = match phase {
        TimerPhase::Idle => 0.0,
        _ => progress_ratio(timer.time_remaining, timer.countdown_total),
    };
    let gauge = Gauge::default()
        .gauge_style(gauge_style(phase))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    f.render_widget(gauge, chunks[2]);

    let heading = Paragraph::new(Line::from(Span::styled(heading(app), title_style())))
        .alignment(Alignment::Center);
    f.render_widget(heading, chunks[3]);

    let quote = Paragraph::new(Line::from(Span::styled(
        format!("\"{}\"", app.current_quote()),
        quote_style(),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(quote, chunks[4]);

    let stats = app.day_stats();
    let summary = Line::from(vec![
        Span::raw("Score "),
        Span::styled(stats.score.to_string(), score_style(stats.score)),
        Span::raw(format!(
            "   Done {}/{}   Left {}   Miss risk {}%",
            stats.tasks_completed,
            stats.total_tasks,
            format_minutes(stats.remaining_minutes),
            app.not_finishing_probability()
        )),
    ]);
    f.render_widget(
        Paragraph::new(summary).alignment(Alignment::Center),
        chunks[5],
    );
}

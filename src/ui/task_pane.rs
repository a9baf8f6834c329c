use crate::app::AppState;
use crate::domain::{format_duration, format_minutes, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, idle_style, paused_style, running_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Status badge for a task row
fn status_badge(task: &Task, is_current: bool, ticking: bool) -> (&'static str, ratatui::style::Style) {
    if task.completed {
        ("DONE", done_style())
    } else if is_current && ticking {
        ("RUNNING", running_style())
    } else if is_current {
        ("PAUSED", paused_style())
    } else {
        ("", idle_style())
    }
}

/// Create a single line for a task
/// Format: [x] Write proposal  ⏱ 12m / 25m (RUNNING)
fn create_task_line(task: &Task, is_current: bool, ticking: bool) -> Line<'static> {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let mut spans = vec![
        Span::raw(format!("{} ", check)),
        Span::raw(task.name.clone()),
        Span::raw("  ".to_string()),
    ];

    let planned = if task.completed {
        // Completed tasks show actual against estimate
        format!("⏱ {} / {} ", format_minutes(task.duration as u64), format_minutes(task.estimated_duration as u64))
    } else {
        format!("⏱ {} / {} ", format_duration(task.time_spent_seconds), format_minutes(task.estimated_duration as u64))
    };
    spans.push(Span::raw(planned));

    let (badge, style) = status_badge(task, is_current, ticking);
    if !badge.is_empty() {
        spans.push(Span::styled(format!("({})", badge), style));
    }

    Line::from(spans)
}

/// Render the Plan view task list
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.settings.theme;
    let current = app.session.current_task().map(|t| t.id);
    let ticking = app.phase().is_ticking();

    let items: Vec<ListItem> = app
        .session
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, Some(task.id) == current, ticking);
            let style = if idx == app.selected_task {
                selected_style(theme)
            } else {
                default_style(theme)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let stats = app.day_stats();
    let title = format!(
        " Plan ({} of {} done, {} planned) ",
        stats.tasks_completed,
        stats.total_tasks,
        format_minutes(stats.total_planned_minutes)
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_line() {
        let mut task = Task::new("Write proposal".to_string(), 25);
        task.time_spent_seconds = 720;

        let line = create_task_line(&task, true, true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[ ] Write proposal  ⏱ 12m / 25m (RUNNING)");

        task.completed = true;
        task.duration = 14;
        let line = create_task_line(&task, false, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[x] Write proposal  ⏱ 14m / 25m (DONE)");
    }

    #[test]
    fn test_idle_task_has_no_badge() {
        let task = Task::new("Later".to_string(), 10);
        let (badge, _) = status_badge(&task, false, true);
        assert_eq!(badge, "");
    }
}

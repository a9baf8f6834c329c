use crate::app::AppState;
use crate::domain::View;
use crate::ui::styles::{error_style, hint_style, modal_title_style, tab_active_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the view tabs, numbered for the 1-5 shortcuts
pub fn render_tabs(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::styled(" nudge ", modal_title_style())];
    for (i, view) in View::all().iter().enumerate() {
        let label = format!(" {} {} ", i + 1, view.name());
        if *view == app.view {
            spans.push(Span::styled(label, tab_active_style()));
        } else {
            spans.push(Span::styled(label, hint_style()));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the latest toast, if any
pub fn render_toast(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let style = if toast.is_error {
        error_style()
    } else {
        modal_title_style()
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", toast.title), style),
        Span::raw(toast.body.clone()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

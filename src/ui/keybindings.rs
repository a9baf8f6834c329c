use crate::domain::{UiMode, View};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the current mode and view, as (key, action) pairs
pub fn hints(view: View, mode: UiMode) -> Vec<(&'static str, &'static str)> {
    match mode {
        UiMode::AddingTask => vec![("Tab", "field"), ("Enter", "add"), ("Esc", "cancel")],
        UiMode::AddingSpiral => vec![("Enter", "add"), ("Esc", "cancel")],
        UiMode::Prompt => vec![("Enter", "confirm"), ("Esc", "cancel")],
        UiMode::Normal => {
            let mut hints = vec![("Space", "play/pause"), ("d", "done"), ("e", "extend"), ("s", "skip break")];
            match view {
                View::Focus => hints.push(("a", "add")),
                View::Plan => hints.extend([
                    ("↑/↓", "select"),
                    ("Enter", "start"),
                    ("a", "add"),
                    ("x", "remove"),
                    ("C", "clear"),
                ]),
                View::Spirals => hints.extend([
                    ("↑/↓", "select"),
                    ("a", "add"),
                    ("p", "promote"),
                    ("x", "remove"),
                ]),
                View::Stats => {}
                View::Settings => hints.extend([("↑/↓", "select"), ("←/→", "change")]),
            }
            hints.extend([("Tab", "view"), ("q", "quit")]);
            hints
        }
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, view: View, mode: UiMode, area: Rect) {
    let spans: Vec<Span> = hints(view, mode)
        .into_iter()
        .enumerate()
        .map(|(i, (key, action))| {
            let lead = if i == 0 { " " } else { "   " };
            Span::raw(format!("{}{} {}", lead, key, action))
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}

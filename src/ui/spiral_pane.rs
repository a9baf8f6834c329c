use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the Spirals view: ideas parked for later
pub fn render_spiral_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.settings.theme;
    let spirals = app.session.spirals();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" Spirals ({}) ", spirals.len()), title_style()));

    if spirals.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "Caught yourself drifting? Press a to park the thought here.",
            hint_style(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = spirals
        .iter()
        .enumerate()
        .map(|(idx, spiral)| {
            let style = if idx == app.selected_spiral {
                selected_style(theme)
            } else {
                default_style(theme)
            };
            ListItem::new(Line::raw(format!("~ {}", spiral.name))).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

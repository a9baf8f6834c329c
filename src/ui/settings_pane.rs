use crate::app::{AppState, SettingField};
use crate::ui::styles::{border_style, default_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the Settings view
pub fn render_settings_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.settings.theme;

    let mut items: Vec<ListItem> = SettingField::all()
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let line = Line::raw(format!("{:<26}{}", field.label(), field.value(&app.settings)));
            let style = if idx == app.selected_setting {
                selected_style(theme)
            } else {
                default_style(theme)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    if app.persistence_degraded {
        items.push(ListItem::new(Line::raw("")));
        items.push(ListItem::new(Line::from(Span::styled(
            "Saving failed earlier; changes only live in memory.",
            hint_style(),
        ))));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Settings ", title_style())),
    );
    f.render_widget(list, area);
}

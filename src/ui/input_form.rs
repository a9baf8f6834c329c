use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// One labelled field with a cursor when focused
fn field_lines(label: &str, value: &str, editing: bool) -> [Line<'static>; 2] {
    let label = if editing {
        format!("{}: (editing)", label)
    } else {
        format!("{}:", label)
    };
    [
        Line::raw(label),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(value.to_string(), modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]),
    ]
}

/// Render the input form for adding tasks/spirals
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let is_task = app.ui_mode == UiMode::AddingTask;
        let modal_area = create_modal_area(area, if is_task { 11 } else { 8 });

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];
        lines.extend(field_lines("Name", &form.name, form.editing_field == 0));
        lines.push(Line::raw(""));

        let (title_text, instructions) = if is_task {
            lines.extend(field_lines("Minutes", &form.minutes, form.editing_field == 1));
            lines.push(Line::raw(""));
            (" Add Task ", "Tab to switch fields  ·  Enter to add  ·  Esc to cancel")
        } else {
            (" Add Spiral ", "Enter to park it  ·  Esc to cancel")
        };
        lines.push(Line::raw(instructions));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

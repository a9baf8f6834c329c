use crate::app::AppState;
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

/// Render the minutes prompt (extension or spiral promotion)
pub fn render_prompt_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(prompt) = &app.prompt {
        let modal_area = create_modal_area(area, 9);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::raw(format!("  {}", prompt.pending.message)),
            Line::raw(""),
            Line::from(vec![
                Span::raw("  Minutes > "),
                Span::styled(prompt.input.clone(), modal_title_style()),
                Span::styled("█", modal_title_style()), // Cursor
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [Enter]", modal_title_style()),
                Span::raw(" Confirm  "),
                Span::styled("[Esc]", modal_title_style()),
                Span::raw(" Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(
                        format!(" {} ", prompt.pending.title),
                        modal_title_style(),
                    ))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

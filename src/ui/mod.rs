pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod settings_pane;
pub mod spiral_pane;
pub mod stats_pane;
pub mod status_bar;
pub mod styles;
pub mod task_pane;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::{UiMode, View};
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_prompt_modal;
use ratatui::Frame;
use settings_pane::render_settings_pane;
use spiral_pane::render_spiral_pane;
use stats_pane::render_stats_pane;
use status_bar::{render_tabs, render_toast};
use task_pane::render_task_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_tabs(f, app, layout.tabs_area);

    match app.view {
        View::Focus => render_timer_pane(f, app, layout.body_area),
        View::Plan => render_task_pane(f, app, layout.body_area),
        View::Spirals => render_spiral_pane(f, app, layout.body_area),
        View::Stats => render_stats_pane(f, app, layout.body_area),
        View::Settings => render_settings_pane(f, app, layout.body_area),
    }

    render_toast(f, app, layout.toast_area);
    render_keybindings(f, app.view, app.ui_mode, layout.keybindings_area);

    match app.ui_mode {
        UiMode::Prompt => render_prompt_modal(f, app, size),
        UiMode::AddingTask | UiMode::AddingSpiral => render_input_form(f, app, size),
        UiMode::Normal => {}
    }
}

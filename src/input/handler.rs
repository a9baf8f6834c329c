use crate::app::AppState;
use crate::domain::{UiMode, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::AddingSpiral => handle_input_form_mode(app, key),
        UiMode::Prompt => handle_prompt_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,

        // Views
        KeyCode::Tab => app.next_view(),
        KeyCode::BackTab => app.previous_view(),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            if let Some(view) = View::all().get(idx) {
                app.set_view(*view);
            }
        }

        // Selection
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Timer controls work from every view
        KeyCode::Char(' ') => app.toggle_play_pause(),
        KeyCode::Char('d') => app.mark_done(),
        KeyCode::Char('e') => app.request_extension(),
        KeyCode::Char('s') => app.skip_break(),

        _ => match app.view {
            View::Focus | View::Plan => handle_task_keys(app, key),
            View::Spirals => handle_spiral_keys(app, key),
            View::Settings => handle_settings_keys(app, key),
            View::Stats => {}
        },
    }
    false
}

fn handle_task_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Enter if app.view == View::Plan => app.start_selected_task(),
        KeyCode::Char('x') | KeyCode::Delete if app.view == View::Plan => {
            app.remove_selected_task()
        }
        KeyCode::Char('C') if app.view == View::Plan => app.clear_tasks(),
        _ => {}
    }
}

fn handle_spiral_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.start_add_spiral(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_selected_spiral(),
        KeyCode::Char('p') | KeyCode::Enter => app.request_promotion(),
        _ => {}
    }
}

fn handle_settings_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Enter => {
            app.adjust_setting(1)
        }
        KeyCode::Left | KeyCode::Char('-') => app.adjust_setting(-1),
        _ => {}
    }
}

/// Handle keys in input form mode (adding task/spiral)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        // Switch between name and minutes
        KeyCode::Tab => app.input_form_toggle_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    false
}

/// Handle keys while a minutes prompt is open
fn handle_prompt_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.confirm_prompt(),
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Backspace => app.prompt_backspace(),
        KeyCode::Char(c) => app.prompt_add_char(c),
        _ => {}
    }
    false
}

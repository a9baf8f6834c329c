use crate::domain::{Theme, TimerPhase};
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().fg(Color::White),
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
    }
}

/// Selected row highlight style
pub fn selected_style(theme: Theme) -> Style {
    let bg = match theme {
        Theme::Dark => Color::LightCyan,
        Theme::Light => Color::Cyan,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// Running status badge style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused status badge style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Idle status badge style
pub fn idle_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Break badge style
pub fn break_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

/// Style for the phase tag shown next to the clock
pub fn phase_style(phase: TimerPhase) -> Style {
    match phase {
        TimerPhase::TaskRunning => running_style(),
        TimerPhase::TaskPaused | TimerPhase::BreakPaused => paused_style(),
        TimerPhase::TaskExpired => error_style(),
        TimerPhase::BreakRunning | TimerPhase::BreakExpired => break_style(),
        TimerPhase::Idle => idle_style(),
    }
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Countdown gauge style
pub fn gauge_style(phase: TimerPhase) -> Style {
    let fg = if phase.is_break() {
        Color::Green
    } else if phase == TimerPhase::TaskExpired {
        Color::Red
    } else {
        Color::Magenta
    };
    Style::default().fg(fg).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Score style, red once it drops below zero
pub fn score_style(score: i64) -> Style {
    let fg = if score < 0 { Color::Red } else { Color::Yellow };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Quote text style
pub fn quote_style() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::ITALIC)
}

/// Active tab in the tab bar
pub fn tab_active_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_changes_default_style() {
        assert_ne!(default_style(Theme::Dark), default_style(Theme::Light));
        assert_eq!(default_style(Theme::Dark).fg, Some(Color::White));
    }

    #[test]
    fn test_score_style() {
        assert_eq!(score_style(-1).fg, Some(Color::Red));
        assert_eq!(score_style(0).fg, Some(Color::Yellow));
    }
}

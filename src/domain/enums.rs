use serde::{Deserialize, Serialize};

/// Observable phase of the single countdown, derived from the session fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// No task bound, no break
    Idle,
    TaskRunning,
    TaskPaused,
    /// Task countdown hit zero; waiting for Done or Extend
    TaskExpired,
    BreakRunning,
    BreakPaused,
    BreakExpired,
}

impl TimerPhase {
    /// Short tag shown in the status line
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::TaskRunning => "RUNNING",
            Self::TaskPaused => "PAUSED",
            Self::TaskExpired => "TIME UP",
            Self::BreakRunning => "BREAK",
            Self::BreakPaused => "BREAK PAUSED",
            Self::BreakExpired => "BREAK OVER",
        }
    }

    /// Whether the countdown is currently ticking
    pub fn is_ticking(&self) -> bool {
        matches!(self, Self::TaskRunning | Self::BreakRunning)
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Self::BreakRunning | Self::BreakPaused | Self::BreakExpired)
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    AddingSpiral,
    Prompt,
}

/// Top-level views, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Focus,
    Plan,
    Spirals,
    Stats,
    Settings,
}

impl View {
    pub fn all() -> &'static [View] {
        &[View::Focus, View::Plan, View::Spirals, View::Stats, View::Settings]
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Focus => "Focus",
            View::Plan => "Plan",
            View::Spirals => "Spirals",
            View::Stats => "Stats",
            View::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    /// Next view in tab order (wraps)
    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Tone of the motivational quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteType {
    Nagging,
    Rude,
    Annoying,
    Abusive,
}

impl QuoteType {
    pub fn all() -> &'static [QuoteType] {
        &[
            QuoteType::Nagging,
            QuoteType::Rude,
            QuoteType::Annoying,
            QuoteType::Abusive,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuoteType::Nagging => "Nagging",
            QuoteType::Rude => "Rude",
            QuoteType::Annoying => "Annoying",
            QuoteType::Abusive => "Abusive",
        }
    }

    pub fn next(&self) -> QuoteType {
        let all = Self::all();
        let idx = all.iter().position(|q| q == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_phase_is_ticking() {
        assert!(TimerPhase::TaskRunning.is_ticking());
        assert!(TimerPhase::BreakRunning.is_ticking());
        assert!(!TimerPhase::TaskPaused.is_ticking());
        assert!(!TimerPhase::TaskExpired.is_ticking());
        assert!(!TimerPhase::Idle.is_ticking());
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Focus.next(), View::Plan);
        assert_eq!(View::Settings.next(), View::Focus);
        assert_eq!(View::Focus.previous(), View::Settings);
    }

    #[test]
    fn test_quote_type_serde() {
        let json = serde_json::to_string(&QuoteType::Annoying).unwrap();
        assert_eq!(json, "\"annoying\"");
        let parsed: QuoteType = serde_json::from_str("\"rude\"").unwrap();
        assert_eq!(parsed, QuoteType::Rude);
        assert_eq!(QuoteType::Abusive.next(), QuoteType::Nagging);
    }
}

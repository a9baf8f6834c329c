use crate::domain::quotes::{quote_at, QUOTE_ROTATION_SECS};
use crate::domain::{ClockTime, Settings, TimerPhase, UiMode, View};
use crate::error::SessionError;
use crate::notifications::Notifier;
use crate::persistence::{
    load_history, load_session, load_settings, save_history, save_session, save_settings,
    KeyValueStore,
};
use crate::report::{
    calculate_day_stats, calculate_not_finishing_probability, DayStats, StatsHistory,
};
use crate::session::{
    parse_minutes, Outcome, PendingPrompt, PromptResponse, Session, SessionEvent,
};
use crate::ticker::{Clock, Ticker};
use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use tracing::{debug, info, warn};

/// Seconds between daily rollover checks
pub const ROLLOVER_CHECK_SECS: i64 = 60;

/// Seconds a toast stays on screen
pub const TOAST_SECS: i64 = 4;

/// Minutes the reset and finish times move per adjustment
const TIME_STEP_MINUTES: i64 = 15;

/// Input form state for adding tasks and spirals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormState {
    pub name: String,
    pub minutes: String,
    pub editing_field: usize, // 0 = name, 1 = minutes
}

/// A pending prompt plus what the user has typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub pending: PendingPrompt,
    pub input: String,
}

/// Latest feedback line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub body: String,
    pub is_error: bool,
    pub shown_at: DateTime<Local>,
}

/// Rows of the Settings view, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    BreakMinutes,
    AllowExtendBreak,
    DailyResetTime,
    CustomFinishTime,
    QuoteType,
    Sound,
    Theme,
}

impl SettingField {
    pub fn all() -> &'static [SettingField] {
        &[
            SettingField::BreakMinutes,
            SettingField::AllowExtendBreak,
            SettingField::DailyResetTime,
            SettingField::CustomFinishTime,
            SettingField::QuoteType,
            SettingField::Sound,
            SettingField::Theme,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingField::BreakMinutes => "Break length",
            SettingField::AllowExtendBreak => "Allow extending breaks",
            SettingField::DailyResetTime => "Daily reset time",
            SettingField::CustomFinishTime => "Finish work by",
            SettingField::QuoteType => "Quote style",
            SettingField::Sound => "Sound",
            SettingField::Theme => "Theme",
        }
    }

    pub fn value(&self, settings: &Settings) -> String {
        let on_off = |b: bool| if b { "On" } else { "Off" }.to_string();
        match self {
            SettingField::BreakMinutes => format!("{} min", settings.break_minutes),
            SettingField::AllowExtendBreak => on_off(settings.allow_extend_break),
            SettingField::DailyResetTime => settings.daily_reset_time.to_string(),
            SettingField::CustomFinishTime => settings
                .custom_finish_time
                .map(|t| t.to_string())
                .unwrap_or_else(|| "Not set".to_string()),
            SettingField::QuoteType => settings.quote_type.name().to_string(),
            SettingField::Sound => on_off(settings.sound_enabled),
            SettingField::Theme => settings.theme.name().to_string(),
        }
    }
}

/// Main application state
pub struct AppState {
    pub session: Session,
    pub settings: Settings,
    pub history: StatsHistory,
    store: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,
    ticker: Ticker,
    pub view: View,
    pub ui_mode: UiMode,
    pub selected_task: usize,
    pub selected_spiral: usize,
    pub selected_setting: usize,
    pub input_form: Option<InputFormState>,
    pub prompt: Option<PromptState>,
    pub toast: Option<Toast>,
    pub quote_index: usize,
    last_quote_rotation: DateTime<Local>,
    last_rollover_check: DateTime<Local>,
    last_periodic_save: DateTime<Local>,
    pub needs_save: bool,
    /// Set once a save has failed; the app keeps running in memory
    pub persistence_degraded: bool,
}

impl AppState {
    /// Load everything from `store` and run the start-up rollover check
    pub fn new(
        store: Box<dyn KeyValueStore>,
        notifier: Box<dyn Notifier>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        let settings = load_settings(store.as_ref());
        let history = load_history(store.as_ref());
        let session = load_session(store.as_ref());
        info!(
            tasks = session.tasks().len(),
            spirals = session.spirals().len(),
            phase = session.phase().to_tag(),
            "Session loaded"
        );

        let mut app = Self {
            session,
            settings,
            history,
            store,
            notifier,
            clock,
            ticker: Ticker::new(),
            view: View::Focus,
            ui_mode: UiMode::Normal,
            selected_task: 0,
            selected_spiral: 0,
            selected_setting: 0,
            input_form: None,
            prompt: None,
            toast: None,
            quote_index: 0,
            last_quote_rotation: now,
            last_rollover_check: now,
            last_periodic_save: now,
            needs_save: false,
            persistence_degraded: false,
        };
        app.check_rollover(now);
        app.sync_ticker(now);
        app
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn phase(&self) -> TimerPhase {
        self.session.phase()
    }

    /// Today's derived metrics
    pub fn day_stats(&self) -> DayStats {
        calculate_day_stats(&self.session, self.now())
    }

    pub fn not_finishing_probability(&self) -> u8 {
        let now = self.now();
        calculate_not_finishing_probability(
            &calculate_day_stats(&self.session, now),
            &self.settings,
            now,
        )
    }

    pub fn current_quote(&self) -> &'static str {
        quote_at(self.settings.quote_type, self.quote_index)
    }

    /// Drive time-based work: countdown ticks, rollover, quote rotation, toast expiry
    pub fn on_frame(&mut self) {
        let now = self.now();

        while let Some(at) = self.ticker.next_due(now) {
            let outcome = self.session.tick(at);
            self.apply(outcome);
            self.sync_ticker(at);
        }
        self.sync_ticker(now);

        if now.signed_duration_since(self.last_rollover_check) >= Duration::seconds(ROLLOVER_CHECK_SECS) {
            self.last_rollover_check = now;
            self.check_rollover(now);
        }

        // Ticks only touch counters; mirror them to storage once a minute
        if self.phase().is_ticking()
            && now.signed_duration_since(self.last_periodic_save) >= Duration::seconds(60)
        {
            self.last_periodic_save = now;
            self.needs_save = true;
        }

        if !self.phase().is_ticking()
            && now.signed_duration_since(self.last_quote_rotation)
                >= Duration::seconds(QUOTE_ROTATION_SECS)
        {
            self.quote_index = self.quote_index.wrapping_add(1);
            self.last_quote_rotation = now;
        }

        if let Some(toast) = &self.toast {
            if now.signed_duration_since(toast.shown_at) >= Duration::seconds(TOAST_SECS) {
                self.toast = None;
            }
        }
    }

    fn check_rollover(&mut self, now: DateTime<Local>) {
        let before = self.session.last_reset();
        let events = self
            .session
            .check_rollover(now, &self.settings, &mut self.history);
        if self.session.last_reset() != before {
            self.needs_save = true;
            self.selected_task = 0;
        }
        for event in events {
            self.dispatch(event);
        }
        self.sync_ticker(now);
    }

    fn sync_ticker(&mut self, now: DateTime<Local>) {
        self.ticker
            .sync(self.phase().is_ticking(), self.session.run_id(), now);
    }

    /// Route a session outcome to toasts and notifications. Returns whether it succeeded.
    fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Ok(events) => {
                if !events.is_empty() {
                    self.needs_save = true;
                }
                for event in events {
                    self.dispatch(event);
                }
                true
            }
            Err(err) => {
                self.report_error(&err);
                false
            }
        }
    }

    fn dispatch(&mut self, event: SessionEvent) {
        let title = event.title();
        let body = event.description();

        match &event {
            SessionEvent::TimeUp { .. } | SessionEvent::BreakOver => {
                if self.settings.sound_enabled {
                    self.notifier.play_sound();
                }
                self.notifier.show_notification(title, &body);
            }
            SessionEvent::TaskFinished { .. } => {
                self.notifier.show_notification(title, &body);
            }
            _ => {}
        }

        self.show_toast(title, &body, false);
    }

    fn report_error(&mut self, err: &SessionError) {
        debug!(kind = ?err.kind(), error = %err, "Action rejected");
        self.show_toast(err.title(), &err.to_string(), true);
    }

    fn show_toast(&mut self, title: &str, body: &str, is_error: bool) {
        self.toast = Some(Toast {
            title: title.to_string(),
            body: body.to_string(),
            is_error,
            shown_at: self.now(),
        });
    }

    fn run<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&mut Session, DateTime<Local>, &Settings) -> Outcome,
    {
        let now = self.now();
        let outcome = op(&mut self.session, now, &self.settings);
        let ok = self.apply(outcome);
        self.sync_ticker(now);
        ok
    }

    // --- Timer actions ---

    pub fn toggle_play_pause(&mut self) {
        self.run(|s, now, _| s.toggle_play_pause(now));
    }

    /// Start the task selected in the Plan view
    pub fn start_selected_task(&mut self) {
        let idx = self.selected_task;
        self.run(|s, now, _| s.start_task(idx, now));
    }

    pub fn mark_done(&mut self) {
        self.run(|s, now, settings| s.done(now, settings));
    }

    pub fn skip_break(&mut self) {
        self.run(|s, _, _| s.skip_break());
    }

    /// Open the extension prompt if the countdown is exhausted
    pub fn request_extension(&mut self) {
        match self.session.request_extension(&self.settings) {
            Ok(pending) => self.open_prompt(pending),
            Err(err) => self.report_error(&err),
        }
    }

    // --- Task and spiral actions ---

    pub fn add_task(&mut self, name: &str, minutes: u32) -> bool {
        let ok = self.run(|s, _, _| s.add_task(name, minutes));
        if ok {
            self.selected_task = self.session.tasks().len().saturating_sub(1);
        }
        ok
    }

    pub fn remove_selected_task(&mut self) {
        let Some(id) = self.session.tasks().get(self.selected_task).map(|t| t.id) else {
            return;
        };
        self.run(|s, _, _| s.remove_task(id));
        self.clamp_selections();
    }

    pub fn clear_tasks(&mut self) {
        self.run(|s, _, _| s.clear_tasks());
        self.clamp_selections();
    }

    pub fn add_spiral(&mut self, name: &str) -> bool {
        self.run(|s, _, _| s.add_spiral(name))
    }

    pub fn remove_selected_spiral(&mut self) {
        let Some(id) = self.session.spirals().get(self.selected_spiral).map(|s| s.id) else {
            return;
        };
        self.run(|s, _, _| s.remove_spiral(id));
        self.clamp_selections();
    }

    /// Open the prompt asking how long the selected spiral should take as a task
    pub fn request_promotion(&mut self) {
        let Some(id) = self.session.spirals().get(self.selected_spiral).map(|s| s.id) else {
            return;
        };
        match self.session.request_promotion(id) {
            Ok(pending) => self.open_prompt(pending),
            Err(err) => self.report_error(&err),
        }
    }

    // --- Prompt ---

    fn open_prompt(&mut self, pending: PendingPrompt) {
        let input = pending.default_value.clone();
        self.prompt = Some(PromptState { pending, input });
        self.ui_mode = UiMode::Prompt;
    }

    pub fn prompt_add_char(&mut self, c: char) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.push(c);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.pop();
        }
    }

    /// Confirm the prompt. Invalid input keeps the prompt open.
    pub fn confirm_prompt(&mut self) {
        let Some(prompt) = self.prompt.clone() else {
            return;
        };
        let response = PromptResponse::Confirm(prompt.input.clone());
        let ok = self.run(|s, now, settings| s.resolve_prompt(&prompt.pending, response, now, settings));

        // Let the user fix a typo; anything else closes the prompt
        let keep_open = !ok && parse_minutes(&prompt.input).is_err();
        if !keep_open {
            self.close_prompt();
        }
        self.clamp_selections();
    }

    /// Dismiss the prompt; nothing in the session changes
    pub fn cancel_prompt(&mut self) {
        if let Some(prompt) = &self.prompt {
            debug!(title = %prompt.pending.title, "Prompt cancelled");
        }
        self.close_prompt();
    }

    fn close_prompt(&mut self) {
        self.prompt = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- Input form ---

    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            name: String::new(),
            minutes: "25".to_string(),
            editing_field: 0,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn start_add_spiral(&mut self) {
        self.input_form = Some(InputFormState {
            name: String::new(),
            minutes: String::new(),
            editing_field: 0,
        });
        self.ui_mode = UiMode::AddingSpiral;
    }

    /// Toggle between editing fields in input form (name -> minutes)
    pub fn input_form_toggle_field(&mut self) {
        if self.ui_mode != UiMode::AddingTask {
            return;
        }
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.name.push(c),
                _ => {
                    if c.is_ascii_digit() {
                        form.minutes.push(c)
                    }
                }
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => {
                    form.name.pop();
                }
                _ => {
                    form.minutes.pop();
                }
            }
        }
    }

    /// Submit the form. Rejected input keeps the form open.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.clone() else {
            return;
        };

        let ok = match self.ui_mode {
            UiMode::AddingTask => match parse_minutes(&form.minutes) {
                Ok(minutes) => self.add_task(&form.name, minutes),
                Err(err) => {
                    self.report_error(&err);
                    false
                }
            },
            UiMode::AddingSpiral => self.add_spiral(&form.name),
            _ => true,
        };

        if ok {
            self.cancel_input_form();
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- Navigation ---

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn next_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn previous_view(&mut self) {
        self.view = self.view.previous();
    }

    pub fn move_selection_up(&mut self) {
        match self.view {
            View::Plan => self.selected_task = self.selected_task.saturating_sub(1),
            View::Spirals => self.selected_spiral = self.selected_spiral.saturating_sub(1),
            View::Settings => self.selected_setting = self.selected_setting.saturating_sub(1),
            _ => {}
        }
    }

    pub fn move_selection_down(&mut self) {
        let (selected, len) = match self.view {
            View::Plan => (&mut self.selected_task, self.session.tasks().len()),
            View::Spirals => (&mut self.selected_spiral, self.session.spirals().len()),
            View::Settings => (&mut self.selected_setting, SettingField::all().len()),
            _ => return,
        };
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    fn clamp_selections(&mut self) {
        self.selected_task = self
            .selected_task
            .min(self.session.tasks().len().saturating_sub(1));
        self.selected_spiral = self
            .selected_spiral
            .min(self.session.spirals().len().saturating_sub(1));
    }

    // --- Settings ---

    pub fn selected_setting_field(&self) -> SettingField {
        let all = SettingField::all();
        all[self.selected_setting.min(all.len() - 1)]
    }

    /// Change the selected setting by one step in `direction` (+1 or -1)
    pub fn adjust_setting(&mut self, direction: i64) {
        let now = self.now();
        let field = self.selected_setting_field();
        match field {
            SettingField::BreakMinutes => self.settings.adjust_break_minutes(direction),
            SettingField::AllowExtendBreak => {
                self.settings.allow_extend_break = !self.settings.allow_extend_break
            }
            SettingField::DailyResetTime => {
                self.settings.daily_reset_time =
                    self.settings.daily_reset_time.shifted(direction * TIME_STEP_MINUTES);
                self.session.realign_reset(now, self.settings.daily_reset_time);
                self.needs_save = true;
            }
            SettingField::CustomFinishTime => {
                self.settings.custom_finish_time = match self.settings.custom_finish_time {
                    Some(t) => {
                        let next = t.shifted(direction * TIME_STEP_MINUTES);
                        // Stepping through midnight clears it
                        if (direction > 0 && next < t) || (direction < 0 && next > t) {
                            None
                        } else {
                            Some(next)
                        }
                    }
                    None => ClockTime::new(17, 0),
                };
            }
            SettingField::QuoteType => {
                self.settings.quote_type = self.settings.quote_type.next();
                self.quote_index = 0;
            }
            SettingField::Sound => self.settings.sound_enabled = !self.settings.sound_enabled,
            SettingField::Theme => self.settings.theme = self.settings.theme.toggled(),
        }
        info!(setting = field.label(), value = %field.value(&self.settings), "Setting changed");
        self.save_settings();
    }

    fn save_settings(&mut self) {
        if let Err(e) = save_settings(self.store.as_mut(), &self.settings) {
            self.persistence_failed(e);
        }
    }

    // --- Persistence ---

    /// Write everything to the store
    pub fn try_save(&mut self) -> Result<()> {
        let now = self.now();
        if self.session.session_start_time().is_some() {
            self.history.record(self.session.day_record(now));
        }
        save_session(self.store.as_mut(), &self.session)?;
        save_settings(self.store.as_mut(), &self.settings)?;
        save_history(self.store.as_mut(), &self.history)?;
        Ok(())
    }

    /// Save if anything changed. Failures are logged and the app carries on in memory.
    pub fn save(&mut self) {
        if !self.needs_save {
            return;
        }
        self.needs_save = false;
        if let Err(e) = self.try_save() {
            self.persistence_failed(e);
        }
    }

    fn persistence_failed(&mut self, e: anyhow::Error) {
        warn!(error = %format!("{:#}", e), "Failed to save; continuing without persistence");
        if !self.persistence_degraded {
            self.show_toast("Save Failed", "Changes will not survive a restart.", true);
        }
        self.persistence_degraded = true;
    }
}

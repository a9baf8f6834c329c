use super::{Session, SessionEvent, TimerState};
use crate::domain::{ClockTime, Settings};
use crate::report::history::{DailyRecord, StatsHistory};
use crate::report::stats::calculate_day_stats;
use chrono::{DateTime, Duration, Local};
use tracing::info;

/// Most recent reset boundary at or before `now`
pub fn reset_boundary(now: DateTime<Local>, reset_time: ClockTime) -> DateTime<Local> {
    let today = reset_time.on(now.date_naive());
    if today <= now {
        today
    } else {
        reset_time.on(now.date_naive() - Duration::days(1))
    }
}

/// First reset boundary strictly after `now`
pub fn next_reset(now: DateTime<Local>, reset_time: ClockTime) -> DateTime<Local> {
    let boundary = reset_boundary(now, reset_time);
    reset_time.on(boundary.date_naive() + Duration::days(1))
}

impl Session {
    /// Whether anything happened worth archiving
    fn has_day_activity(&self) -> bool {
        !self.tasks.is_empty() || self.score != 0 || self.session_start_time.is_some()
    }

    /// Today's aggregate as a history record, keyed by the day the session belongs to
    pub fn day_record(&self, now: DateTime<Local>) -> DailyRecord {
        let date = self.last_reset.unwrap_or(now).date_naive();
        DailyRecord::from_stats(date, &calculate_day_stats(self, now))
    }

    /// Move the recorded boundary onto a new reset time without archiving anything.
    /// The boundary never moves to an earlier date: that date keys the live day's record.
    pub fn realign_reset(&mut self, now: DateTime<Local>, reset_time: ClockTime) {
        let Some(current) = self.last_reset else {
            return;
        };
        let realigned = reset_boundary(now, reset_time);
        if realigned.date_naive() >= current.date_naive() {
            self.last_reset = Some(realigned);
        }
    }

    /// Archive and clear the day once the reset boundary has passed.
    /// Spirals survive. A first run only records the boundary.
    pub fn check_rollover(
        &mut self,
        now: DateTime<Local>,
        settings: &Settings,
        history: &mut StatsHistory,
    ) -> Vec<SessionEvent> {
        let boundary = reset_boundary(now, settings.daily_reset_time);

        let Some(last_reset) = self.last_reset else {
            info!(%boundary, "No previous reset recorded; establishing boundary");
            self.last_reset = Some(boundary);
            return Vec::new();
        };
        if last_reset >= boundary {
            return Vec::new();
        }

        // Idle time stops counting at the end of the archived day
        let day_end = (last_reset + Duration::days(1)).min(boundary);
        let date = last_reset.date_naive();
        let mut events = Vec::new();

        if self.has_day_activity() {
            let record = DailyRecord::from_stats(date, &calculate_day_stats(self, day_end));
            info!(
                date = %record.date,
                score = record.score,
                completed = record.tasks_completed,
                "Archiving day"
            );
            history.record(record);
            events.push(SessionEvent::DayRolledOver { date });
        }

        self.tasks.clear();
        self.score = 0;
        self.session_start_time = None;
        self.timer = TimerState::default();
        self.last_reset = Some(boundary);
        events
    }
}

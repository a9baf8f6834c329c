pub mod events;
pub mod machine;
pub mod prompt;
pub mod rollover;
pub mod scoring;

pub use events::SessionEvent;
pub use prompt::{PendingPrompt, PromptAction, PromptResponse};
pub use rollover::{next_reset, reset_boundary};
pub use scoring::ScoringPolicy;

use crate::domain::{Spiral, SpiralId, SpiralRegistry, Task, TaskId, TaskRegistry, TimerPhase};
use crate::error::SessionError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of a session operation
pub type Outcome = Result<Vec<SessionEvent>, SessionError>;

/// The single countdown: task focus, break, or nothing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimerState {
    /// Index into the task registry of the bound task
    pub current_task_index: Option<usize>,
    pub time_remaining: u64,
    /// Length of the countdown as started plus extensions (for progress display)
    pub countdown_total: u64,
    pub is_timer_active: bool,
    pub is_break_time: bool,
}

impl TimerState {
    pub fn phase(&self) -> TimerPhase {
        if self.is_break_time {
            if self.time_remaining == 0 {
                TimerPhase::BreakExpired
            } else if self.is_timer_active {
                TimerPhase::BreakRunning
            } else {
                TimerPhase::BreakPaused
            }
        } else if self.current_task_index.is_some() {
            if self.time_remaining == 0 {
                TimerPhase::TaskExpired
            } else if self.is_timer_active {
                TimerPhase::TaskRunning
            } else {
                TimerPhase::TaskPaused
            }
        } else {
            TimerPhase::Idle
        }
    }
}

/// Owned context holding everything the timer state machine mutates
#[derive(Debug, Clone, Default)]
pub struct Session {
    tasks: TaskRegistry,
    spirals: SpiralRegistry,
    timer: TimerState,
    score: i64,
    session_start_time: Option<DateTime<Local>>,
    last_reset: Option<DateTime<Local>>,
    /// Bumped on every entry into a ticking state
    run_id: u64,
}

/// Persisted pieces a session is rebuilt from
#[derive(Debug, Clone, Default)]
pub struct SessionParts {
    pub tasks: Vec<Task>,
    pub spirals: Vec<Spiral>,
    pub timer: TimerState,
    pub score: i64,
    pub session_start_time: Option<DateTime<Local>>,
    pub last_reset: Option<DateTime<Local>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted parts, repairing anything inconsistent.
    /// A countdown that was ticking is restored paused.
    pub fn restore(parts: SessionParts) -> Self {
        let mut session = Self {
            tasks: TaskRegistry::new(parts.tasks),
            spirals: SpiralRegistry::new(parts.spirals),
            timer: parts.timer,
            score: parts.score,
            session_start_time: parts.session_start_time,
            last_reset: parts.last_reset,
            run_id: 0,
        };

        if session.timer.is_break_time && session.timer.current_task_index.is_some() {
            warn!("Restored break still had a task bound; clearing the binding");
            session.timer.current_task_index = None;
        }

        if let Some(idx) = session.timer.current_task_index {
            let valid = session.tasks.get(idx).map(|t| !t.completed).unwrap_or(false);
            if !valid {
                warn!(index = idx, "Restored task binding is stale; returning to idle");
                session.timer = TimerState::default();
            }
        }

        if session.timer.countdown_total < session.timer.time_remaining {
            session.timer.countdown_total = session.timer.time_remaining;
        }

        if session.timer.is_timer_active {
            info!("Countdown was running at shutdown; restoring it paused");
            session.timer.is_timer_active = false;
        }

        // Open segments cannot survive a restart; bank what the tick counter recorded
        for idx in 0..session.tasks.len() {
            if let Some(task) = session.tasks.get_mut(idx) {
                if task.timer_start_time.is_some() {
                    task.timer_start_time = None;
                    task.banked_seconds = task.banked_seconds.max(task.time_spent_seconds);
                }
            }
        }

        session
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    pub fn spirals(&self) -> &SpiralRegistry {
        &self.spirals
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn phase(&self) -> TimerPhase {
        self.timer.phase()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn session_start_time(&self) -> Option<DateTime<Local>> {
        self.session_start_time
    }

    pub fn last_reset(&self) -> Option<DateTime<Local>> {
        self.last_reset
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Task bound to the countdown, if any
    pub fn current_task(&self) -> Option<&Task> {
        if self.timer.is_break_time {
            return None;
        }
        self.timer.current_task_index.and_then(|idx| self.tasks.get(idx))
    }

    /// Add a task with a planned duration in minutes
    pub fn add_task(&mut self, name: &str, minutes: u32) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if minutes == 0 {
            return Err(SessionError::InvalidMinutes(minutes.to_string()));
        }
        self.tasks.push(Task::new(name.to_string(), minutes));
        info!(task = name, minutes, "Task added");
        Ok(vec![SessionEvent::TaskAdded {
            name: name.to_string(),
        }])
    }

    /// Remove a task; removing the bound task forces the session back to idle
    pub fn remove_task(&mut self, id: TaskId) -> Outcome {
        let (idx, task) = self.tasks.remove(id).ok_or(SessionError::TaskNotFound(id))?;

        match self.timer.current_task_index {
            Some(current) if current == idx => {
                info!(task = %task.name, "Bound task removed; session back to idle");
                self.reset_timer();
            }
            Some(current) if current > idx => {
                self.timer.current_task_index = Some(current - 1);
            }
            _ => {}
        }

        Ok(vec![SessionEvent::TaskRemoved { name: task.name }])
    }

    /// Remove every task; a bound task forces the session back to idle
    pub fn clear_tasks(&mut self) -> Outcome {
        let count = self.tasks.len();
        if self.timer.current_task_index.is_some() {
            self.reset_timer();
        }
        self.tasks.clear();
        Ok(vec![SessionEvent::TasksCleared { count }])
    }

    pub fn add_spiral(&mut self, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        self.spirals.push(Spiral::new(name.to_string()));
        Ok(vec![SessionEvent::SpiralAdded {
            name: name.to_string(),
        }])
    }

    pub fn remove_spiral(&mut self, id: SpiralId) -> Outcome {
        let spiral = self.spirals.remove(id).ok_or(SessionError::SpiralNotFound(id))?;
        Ok(vec![SessionEvent::SpiralRemoved { name: spiral.name }])
    }

    /// Turn a spiral into a task of `minutes`, removing the spiral
    fn promote_spiral(&mut self, id: SpiralId, minutes: u32) -> Outcome {
        let name = self
            .spirals
            .find(id)
            .map(|s| s.name.clone())
            .ok_or(SessionError::SpiralNotFound(id))?;
        if minutes == 0 {
            return Err(SessionError::InvalidMinutes(minutes.to_string()));
        }
        self.tasks.push(Task::new(name.clone(), minutes));
        self.spirals.remove(id);
        Ok(vec![SessionEvent::SpiralPromoted { name, minutes }])
    }

    /// Stop everything and go back to idle
    fn reset_timer(&mut self) {
        self.timer = TimerState::default();
    }

    /// Enter a ticking state; the scheduler re-arms on a new run id
    fn arm(&mut self) {
        self.timer.is_timer_active = true;
        self.run_id = self.run_id.wrapping_add(1);
    }
}

/// Parse user-entered minutes: a positive whole number
pub fn parse_minutes(input: &str) -> Result<u32, SessionError> {
    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(SessionError::InvalidMinutes(input.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("25"), Ok(25));
        assert_eq!(parse_minutes(" 5 "), Ok(5));
        assert!(parse_minutes("0").is_err());
        assert!(parse_minutes("-3").is_err());
        assert!(parse_minutes("abc").is_err());
        assert!(parse_minutes("").is_err());
    }

    #[test]
    fn test_add_task_validation() {
        let mut session = Session::new();
        assert_eq!(session.add_task("   ", 10), Err(SessionError::EmptyName));
        assert!(matches!(
            session.add_task("Write", 0),
            Err(SessionError::InvalidMinutes(_))
        ));
        assert!(session.tasks().is_empty());

        let events = session.add_task("  Write report ", 25).unwrap();
        assert_eq!(
            events,
            vec![SessionEvent::TaskAdded {
                name: "Write report".to_string()
            }]
        );
        assert_eq!(session.tasks().get(0).unwrap().name, "Write report");
    }

    #[test]
    fn test_remove_earlier_task_shifts_binding() {
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.add_task("B", 10).unwrap();
        session.start_task(1, now()).unwrap();

        let a = session.tasks().get(0).unwrap().id;
        session.remove_task(a).unwrap();

        assert_eq!(session.timer().current_task_index, Some(0));
        assert_eq!(session.current_task().unwrap().name, "B");
        assert_eq!(session.phase(), TimerPhase::TaskRunning);
    }

    #[test]
    fn test_remove_missing_task() {
        let mut session = Session::new();
        let id = uuid::Uuid::new_v4();
        assert_eq!(session.remove_task(id), Err(SessionError::TaskNotFound(id)));
    }

    #[test]
    fn test_clear_tasks_resets_binding() {
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.start_task(0, now()).unwrap();

        let events = session.clear_tasks().unwrap();
        assert_eq!(events, vec![SessionEvent::TasksCleared { count: 1 }]);
        assert_eq!(session.phase(), TimerPhase::Idle);
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn test_spirals() {
        let mut session = Session::new();
        assert_eq!(session.add_spiral(""), Err(SessionError::EmptyName));
        session.add_spiral("Call the dentist").unwrap();
        let id = session.spirals().get(0).unwrap().id;
        session.remove_spiral(id).unwrap();
        assert!(session.spirals().is_empty());
        assert_eq!(session.remove_spiral(id), Err(SessionError::SpiralNotFound(id)));
    }

    #[test]
    fn test_restore_repairs_inconsistent_state() {
        let mut task = Task::new("A".to_string(), 10);
        task.time_spent_seconds = 120;
        task.timer_start_time = Some(now());

        let parts = SessionParts {
            tasks: vec![task],
            timer: TimerState {
                current_task_index: Some(0),
                time_remaining: 480,
                countdown_total: 600,
                is_timer_active: true,
                is_break_time: false,
            },
            ..SessionParts::default()
        };
        let session = Session::restore(parts);

        assert_eq!(session.phase(), TimerPhase::TaskPaused);
        let task = session.current_task().unwrap();
        assert!(task.timer_start_time.is_none());
        assert_eq!(task.banked_seconds, 120);
    }

    #[test]
    fn test_restore_drops_stale_binding() {
        let mut done = Task::new("Done".to_string(), 10);
        done.completed = true;
        let parts = SessionParts {
            tasks: vec![done],
            timer: TimerState {
                current_task_index: Some(0),
                time_remaining: 100,
                ..TimerState::default()
            },
            ..SessionParts::default()
        };
        let session = Session::restore(parts);
        assert_eq!(session.phase(), TimerPhase::Idle);

        let parts = SessionParts {
            timer: TimerState {
                current_task_index: Some(3),
                is_break_time: true,
                time_remaining: 100,
                ..TimerState::default()
            },
            ..SessionParts::default()
        };
        let session = Session::restore(parts);
        assert_eq!(session.phase(), TimerPhase::BreakPaused);
        assert_eq!(session.timer().current_task_index, None);
    }
}

use super::{Outcome, Session, SessionEvent};
use crate::domain::{Settings, TimerPhase};
use crate::error::SessionError;
use chrono::{DateTime, Local};
use tracing::{debug, info};

impl Session {
    /// Bind the countdown to the task at `idx` and start ticking
    pub fn start_task(&mut self, idx: usize, now: DateTime<Local>) -> Outcome {
        let task = self
            .tasks
            .get(idx)
            .ok_or(SessionError::TaskIndexOutOfRange(idx))?;
        if task.completed {
            return Err(SessionError::AlreadyCompleted {
                name: task.name.clone(),
            });
        }

        if self.phase() == TimerPhase::TaskRunning {
            let current = self.current_task().map(|t| t.name.clone()).unwrap_or_default();
            if self.timer.current_task_index == Some(idx) {
                return Err(SessionError::AlreadyRunning { name: current });
            }
            return Err(SessionError::TimerBusy { name: current });
        }

        let mut events = Vec::new();
        if self.timer.is_break_time {
            info!("Break interrupted by a task start");
            events.push(SessionEvent::BreakInterrupted);
        }

        // A paused or expired task losing the binding keeps its banked work
        if let Some(previous) = self.timer.current_task_index.filter(|&p| p != idx) {
            if let Some(task) = self.tasks.get_mut(previous) {
                task.close_segment(now);
            }
        }

        let Some(task) = self.tasks.get_mut(idx) else {
            return Err(SessionError::TaskIndexOutOfRange(idx));
        };
        task.started = true;
        task.close_segment(now);
        task.open_segment(now);
        let countdown = task.initial_countdown();
        let name = task.name.clone();

        self.timer.current_task_index = Some(idx);
        self.timer.is_break_time = false;
        self.timer.time_remaining = countdown;
        self.timer.countdown_total = countdown;
        self.arm();

        if self.session_start_time.is_none() {
            self.session_start_time = Some(now);
        }

        info!(task = %name, seconds = countdown, "Task started");
        events.push(SessionEvent::TaskStarted { name });
        Ok(events)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self, now: DateTime<Local>) -> Outcome {
        if !self.timer.is_timer_active || self.timer.time_remaining == 0 {
            return Ok(Vec::new());
        }

        self.timer.time_remaining -= 1;
        if !self.timer.is_break_time {
            if let Some(task) = self
                .timer
                .current_task_index
                .and_then(|idx| self.tasks.get_mut(idx))
            {
                task.time_spent_seconds += 1;
            }
        }

        if self.timer.time_remaining > 0 {
            return Ok(Vec::new());
        }

        self.timer.is_timer_active = false;
        if self.timer.is_break_time {
            info!("Break finished");
            self.reset_timer();
            return Ok(vec![SessionEvent::BreakOver]);
        }

        let name = match self
            .timer
            .current_task_index
            .and_then(|idx| self.tasks.get_mut(idx))
        {
            Some(task) => {
                task.close_segment(now);
                task.name.clone()
            }
            None => String::new(),
        };
        info!(task = %name, "Task time is up");
        Ok(vec![SessionEvent::TimeUp { name }])
    }

    /// Stop ticking, keeping the remaining time
    pub fn pause(&mut self, now: DateTime<Local>) -> Outcome {
        if !self.phase().is_ticking() {
            return Err(SessionError::NotRunning);
        }
        self.timer.is_timer_active = false;

        let is_break = self.timer.is_break_time;
        if !is_break {
            if let Some(task) = self
                .timer
                .current_task_index
                .and_then(|idx| self.tasks.get_mut(idx))
            {
                task.close_segment(now);
            }
        }
        debug!(remaining = self.timer.time_remaining, is_break, "Paused");
        Ok(vec![SessionEvent::Paused { is_break }])
    }

    /// Continue a paused countdown from where it stopped
    pub fn resume(&mut self, now: DateTime<Local>) -> Outcome {
        let is_break = match self.phase() {
            TimerPhase::TaskPaused => false,
            TimerPhase::BreakPaused => true,
            _ => return Err(SessionError::NotResumable),
        };

        if !is_break {
            if let Some(task) = self
                .timer
                .current_task_index
                .and_then(|idx| self.tasks.get_mut(idx))
            {
                task.open_segment(now);
            }
        }
        self.arm();
        debug!(remaining = self.timer.time_remaining, is_break, "Resumed");
        Ok(vec![SessionEvent::Resumed { is_break }])
    }

    /// Finish the bound task, score it, and go straight into a break
    pub fn done(&mut self, now: DateTime<Local>, settings: &Settings) -> Outcome {
        if self.timer.is_break_time {
            return Err(SessionError::NoActiveTask);
        }
        let idx = self.timer.current_task_index.ok_or(SessionError::NoActiveTask)?;
        let task = self.tasks.get_mut(idx).ok_or(SessionError::NoActiveTask)?;
        if task.completed {
            return Err(SessionError::AlreadyCompleted {
                name: task.name.clone(),
            });
        }

        let elapsed = task.wall_clock_seconds(now);
        let points = settings
            .scoring
            .completion_points(task.estimated_duration, elapsed);

        task.timer_start_time = None;
        task.banked_seconds = elapsed;
        task.time_spent_seconds = elapsed;
        task.duration = elapsed.div_ceil(60).max(1) as u32;
        task.completed = true;
        task.completion_timestamp = Some(now);
        let name = task.name.clone();

        self.score = settings.scoring.apply(self.score, points);
        self.reset_timer();
        info!(task = %name, elapsed, points, score = self.score, "Task finished");

        let mut events = vec![SessionEvent::TaskFinished { name, points }];
        events.extend(self.start_break(settings.break_minutes.max(1), now)?);
        Ok(events)
    }

    /// Start a break countdown of `minutes`
    pub fn start_break(&mut self, minutes: u32, now: DateTime<Local>) -> Outcome {
        if minutes == 0 {
            return Err(SessionError::InvalidMinutes(minutes.to_string()));
        }
        if let Some(idx) = self.timer.current_task_index {
            if let Some(task) = self.tasks.get_mut(idx) {
                task.close_segment(now);
            }
        }

        let seconds = minutes as u64 * 60;
        self.timer.current_task_index = None;
        self.timer.is_break_time = true;
        self.timer.time_remaining = seconds;
        self.timer.countdown_total = seconds;
        self.arm();

        info!(minutes, "Break started");
        Ok(vec![SessionEvent::BreakStarted { minutes }])
    }

    /// End a running break early
    pub fn skip_break(&mut self) -> Outcome {
        if self.phase() != TimerPhase::BreakRunning {
            return Err(SessionError::NoActiveBreak);
        }
        self.reset_timer();
        info!("Break skipped");
        Ok(vec![SessionEvent::BreakSkipped])
    }

    /// Single play/pause control: pause, resume, or start the next open task
    pub fn toggle_play_pause(&mut self, now: DateTime<Local>) -> Outcome {
        match self.phase() {
            TimerPhase::TaskRunning | TimerPhase::BreakRunning => self.pause(now),
            TimerPhase::TaskPaused | TimerPhase::BreakPaused => self.resume(now),
            TimerPhase::TaskExpired => Err(SessionError::NotResumable),
            TimerPhase::Idle | TimerPhase::BreakExpired => {
                let idx = self.tasks.first_incomplete().ok_or(SessionError::NoTasks)?;
                self.start_task(idx, now)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TimerState;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    /// Run `n` ticks one second apart, returning the clock after the last one
    fn run_ticks(
        session: &mut Session,
        from: DateTime<Local>,
        n: u64,
    ) -> (DateTime<Local>, Vec<SessionEvent>) {
        let mut now = from;
        let mut events = Vec::new();
        for _ in 0..n {
            now = now + Duration::seconds(1);
            events.extend(session.tick(now).unwrap());
        }
        (now, events)
    }

    #[test]
    fn test_scenario_task_runs_out() {
        let mut session = Session::new();
        session.add_task("Write report", 25).unwrap();
        session.start_task(0, start()).unwrap();
        assert_eq!(session.phase(), TimerPhase::TaskRunning);
        assert_eq!(session.timer().time_remaining, 1500);

        let (_, events) = run_ticks(&mut session, start(), 1500);

        assert_eq!(session.phase(), TimerPhase::TaskExpired);
        assert_eq!(session.timer().time_remaining, 0);
        assert!(!session.timer().is_timer_active);
        let task = session.tasks().get(0).unwrap();
        assert!(!task.completed);
        assert_eq!(task.time_spent_seconds, 1500);
        assert_eq!(
            events,
            vec![SessionEvent::TimeUp {
                name: "Write report".to_string()
            }]
        );
    }

    #[test]
    fn test_scenario_done_starts_break() {
        let settings = Settings::default();
        let mut session = Session::new();
        session.add_task("Write report", 25).unwrap();
        session.start_task(0, start()).unwrap();
        let (now, _) = run_ticks(&mut session, start(), 1500);

        let events = session.done(now, &settings).unwrap();

        let task = session.tasks().get(0).unwrap();
        assert!(task.completed);
        assert_eq!(task.completion_timestamp, Some(now));
        assert!(session.score() >= settings.scoring.points_per_task);
        assert_eq!(session.phase(), TimerPhase::BreakRunning);
        assert_eq!(
            session.timer().time_remaining,
            settings.break_minutes as u64 * 60
        );
        assert_eq!(session.timer().current_task_index, None);
        assert_eq!(
            events,
            vec![
                SessionEvent::TaskFinished {
                    name: "Write report".to_string(),
                    points: 10
                },
                SessionEvent::BreakStarted { minutes: 5 },
            ]
        );
    }

    #[test]
    fn test_scenario_pause_and_resume() {
        let mut session = Session::new();
        session.add_task("Quick fix", 10).unwrap();
        session.start_task(0, start()).unwrap();
        let (now, _) = run_ticks(&mut session, start(), 120);

        session.pause(now).unwrap();
        assert_eq!(session.timer().time_remaining, 480);
        assert!(!session.timer().is_timer_active);
        assert_eq!(session.phase(), TimerPhase::TaskPaused);

        // Ticks while paused do nothing
        session.tick(now + Duration::seconds(1)).unwrap();
        assert_eq!(session.timer().time_remaining, 480);

        let later = now + Duration::minutes(3);
        session.resume(later).unwrap();
        assert_eq!(session.phase(), TimerPhase::TaskRunning);
        run_ticks(&mut session, later, 1);
        assert_eq!(session.timer().time_remaining, 479);
    }

    #[test]
    fn test_scenario_remove_running_task() {
        let mut session = Session::new();
        session.add_task("Quick fix", 10).unwrap();
        session.start_task(0, start()).unwrap();
        run_ticks(&mut session, start(), 30);

        let id = session.tasks().get(0).unwrap().id;
        session.remove_task(id).unwrap();

        assert_eq!(session.phase(), TimerPhase::Idle);
        assert_eq!(session.timer(), &TimerState::default());
        assert_eq!(session.timer().current_task_index, None);
        assert_eq!(session.timer().time_remaining, 0);
        assert!(!session.timer().is_timer_active);
    }

    #[test]
    fn test_second_start_rejected_while_running() {
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.add_task("B", 10).unwrap();
        session.start_task(0, start()).unwrap();
        let before = session.clone();

        let err = session.start_task(1, start()).unwrap_err();
        assert_eq!(err, SessionError::TimerBusy { name: "A".to_string() });
        assert_eq!(
            session.start_task(0, start()).unwrap_err(),
            SessionError::AlreadyRunning { name: "A".to_string() }
        );
        assert_eq!(session.timer(), before.timer());
        assert_eq!(session.tasks(), before.tasks());
        assert_eq!(session.run_id(), before.run_id());
    }

    #[test]
    fn test_start_guards() {
        let settings = Settings::default();
        let mut session = Session::new();
        assert_eq!(
            session.start_task(0, start()),
            Err(SessionError::TaskIndexOutOfRange(0))
        );

        session.add_task("A", 1).unwrap();
        session.start_task(0, start()).unwrap();
        session.done(start() + Duration::seconds(30), &settings).unwrap();
        session.skip_break().unwrap();

        assert_eq!(
            session.start_task(0, start()),
            Err(SessionError::AlreadyCompleted { name: "A".to_string() })
        );
    }

    #[test]
    fn test_tick_stops_exactly_at_zero() {
        let mut session = Session::new();
        session.add_task("A", 1).unwrap();
        session.start_task(0, start()).unwrap();
        let (now, _) = run_ticks(&mut session, start(), 59);
        assert_eq!(session.timer().time_remaining, 1);

        let events = session.tick(now + Duration::seconds(1)).unwrap();
        assert_eq!(session.timer().time_remaining, 0);
        assert!(!session.timer().is_timer_active);
        assert_eq!(events.len(), 1);

        // Further ticks never underflow
        assert_eq!(session.tick(now + Duration::seconds(2)).unwrap(), vec![]);
        assert_eq!(session.timer().time_remaining, 0);
        assert_eq!(session.tasks().get(0).unwrap().time_spent_seconds, 60);
    }

    #[test]
    fn test_time_spent_monotonic_and_frozen() {
        let settings = Settings::default();
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.start_task(0, start()).unwrap();

        let mut now = start();
        let mut last = 0;
        for _ in 0..90 {
            now = now + Duration::seconds(1);
            session.tick(now).unwrap();
            let spent = session.tasks().get(0).unwrap().time_spent_seconds;
            assert!(spent >= last);
            last = spent;
        }

        session.done(now, &settings).unwrap();
        let frozen = session.tasks().get(0).unwrap().time_spent_seconds;
        run_ticks(&mut session, now, 60);
        assert_eq!(session.tasks().get(0).unwrap().time_spent_seconds, frozen);
    }

    #[test]
    fn test_second_done_rejected() {
        let settings = Settings::default();
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.start_task(0, start()).unwrap();
        let (now, _) = run_ticks(&mut session, start(), 60);
        session.done(now, &settings).unwrap();
        let score = session.score();

        let err = session.done(now, &settings).unwrap_err();
        assert_eq!(err, SessionError::NoActiveTask);
        assert_eq!(session.score(), score);
        assert_eq!(session.phase(), TimerPhase::BreakRunning);
    }

    #[test]
    fn test_done_uses_wall_clock_across_pauses() {
        let settings = Settings::default();
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.start_task(0, start()).unwrap();

        // Ticks were throttled: only 60 arrived during five real minutes
        let (_, _) = run_ticks(&mut session, start(), 60);
        let paused_at = start() + Duration::minutes(5);
        session.pause(paused_at).unwrap();

        let resumed_at = paused_at + Duration::minutes(10);
        session.resume(resumed_at).unwrap();
        let done_at = resumed_at + Duration::minutes(2);

        let events = session.done(done_at, &settings).unwrap();
        let task = session.tasks().get(0).unwrap();
        assert_eq!(task.time_spent_seconds, 7 * 60);
        assert_eq!(task.duration, 7);
        assert_eq!(task.estimated_duration, 10);
        // 180 seconds saved at 0.5 points each
        assert_eq!(
            events[0],
            SessionEvent::TaskFinished {
                name: "A".to_string(),
                points: 100
            }
        );
    }

    #[test]
    fn test_pause_and_resume_guards() {
        let mut session = Session::new();
        assert_eq!(session.pause(start()), Err(SessionError::NotRunning));
        assert_eq!(session.resume(start()), Err(SessionError::NotResumable));

        session.add_task("A", 1).unwrap();
        session.start_task(0, start()).unwrap();
        assert_eq!(session.resume(start()), Err(SessionError::NotResumable));

        run_ticks(&mut session, start(), 60);
        assert_eq!(session.phase(), TimerPhase::TaskExpired);
        assert_eq!(session.resume(start()), Err(SessionError::NotResumable));
        assert_eq!(session.pause(start()), Err(SessionError::NotRunning));
    }

    #[test]
    fn test_break_runs_out_to_idle() {
        let mut session = Session::new();
        session.start_break(1, start()).unwrap();
        assert_eq!(session.phase(), TimerPhase::BreakRunning);

        let (_, events) = run_ticks(&mut session, start(), 60);
        assert_eq!(events, vec![SessionEvent::BreakOver]);
        assert_eq!(session.phase(), TimerPhase::Idle);
        assert_eq!(session.timer(), &TimerState::default());
    }

    #[test]
    fn test_skip_break() {
        let mut session = Session::new();
        assert_eq!(session.skip_break(), Err(SessionError::NoActiveBreak));

        session.start_break(5, start()).unwrap();
        session.pause(start()).unwrap();
        assert_eq!(session.skip_break(), Err(SessionError::NoActiveBreak));

        session.resume(start()).unwrap();
        assert_eq!(session.skip_break(), Ok(vec![SessionEvent::BreakSkipped]));
        assert_eq!(session.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_start_task_interrupts_break() {
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.start_break(5, start()).unwrap();

        let events = session.start_task(0, start()).unwrap();
        assert_eq!(events[0], SessionEvent::BreakInterrupted);
        assert_eq!(session.phase(), TimerPhase::TaskRunning);
        assert!(!session.timer().is_break_time);
        assert_eq!(session.timer().current_task_index, Some(0));
    }

    #[test]
    fn test_switching_from_paused_task() {
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.add_task("B", 20).unwrap();
        session.start_task(0, start()).unwrap();
        let (now, _) = run_ticks(&mut session, start(), 30);
        session.pause(now).unwrap();

        session.start_task(1, now).unwrap();
        assert_eq!(session.current_task().unwrap().name, "B");
        assert_eq!(session.timer().time_remaining, 1200);

        // Coming back to A picks up where it left off
        session.pause(now).unwrap();
        session.start_task(0, now).unwrap();
        assert_eq!(session.timer().time_remaining, 570);
    }

    #[test]
    fn test_session_start_recorded_once() {
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        session.add_task("B", 10).unwrap();
        session.start_task(0, start()).unwrap();
        session.pause(start()).unwrap();
        session.start_task(1, start() + Duration::hours(1)).unwrap();
        assert_eq!(session.session_start_time(), Some(start()));
    }

    #[test]
    fn test_run_id_changes_on_every_arm() {
        let mut session = Session::new();
        session.add_task("A", 10).unwrap();
        let r0 = session.run_id();
        session.start_task(0, start()).unwrap();
        let r1 = session.run_id();
        session.pause(start()).unwrap();
        assert_eq!(session.run_id(), r1);
        session.resume(start()).unwrap();
        assert!(r1 > r0);
        assert!(session.run_id() > r1);
    }

    #[test]
    fn test_toggle_play_pause() {
        let mut session = Session::new();
        assert_eq!(session.toggle_play_pause(start()), Err(SessionError::NoTasks));

        session.add_task("A", 10).unwrap();
        session.toggle_play_pause(start()).unwrap();
        assert_eq!(session.phase(), TimerPhase::TaskRunning);
        session.toggle_play_pause(start()).unwrap();
        assert_eq!(session.phase(), TimerPhase::TaskPaused);
        session.toggle_play_pause(start()).unwrap();
        assert_eq!(session.phase(), TimerPhase::TaskRunning);
    }

    #[test]
    fn test_start_break_rejects_zero() {
        let mut session = Session::new();
        assert!(matches!(
            session.start_break(0, start()),
            Err(SessionError::InvalidMinutes(_))
        ));
        assert_eq!(session.phase(), TimerPhase::Idle);
    }
}

use super::{parse_minutes, Outcome, Session, SessionEvent};
use crate::domain::{Settings, SpiralId, TaskId, TimerPhase};
use crate::error::SessionError;
use chrono::{DateTime, Local};
use tracing::info;

/// What a confirmed prompt will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    ExtendTask { task_id: TaskId },
    ExtendBreak,
    PromoteSpiral { spiral_id: SpiralId },
}

/// A question waiting on the user: how many minutes?
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPrompt {
    pub action: PromptAction,
    pub title: String,
    pub message: String,
    pub default_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Confirm(String),
    Cancel,
}

impl Session {
    /// Ask for extension minutes; only allowed once the countdown is exhausted
    pub fn request_extension(&self, settings: &Settings) -> Result<PendingPrompt, SessionError> {
        match self.phase() {
            TimerPhase::TaskExpired => {
                let task = self.current_task().ok_or(SessionError::NoCountdown)?;
                Ok(PendingPrompt {
                    action: PromptAction::ExtendTask { task_id: task.id },
                    title: "Extend Task".to_string(),
                    message: format!("Add minutes to \"{}\":", task.name),
                    default_value: "5".to_string(),
                })
            }
            TimerPhase::BreakExpired => {
                if !settings.allow_extend_break {
                    return Err(SessionError::BreakExtensionDisabled);
                }
                Ok(PendingPrompt {
                    action: PromptAction::ExtendBreak,
                    title: "Extend Break".to_string(),
                    message: "Add minutes to your break:".to_string(),
                    default_value: "5".to_string(),
                })
            }
            TimerPhase::Idle => Err(SessionError::NoCountdown),
            _ => {
                if self.timer.is_break_time && !settings.allow_extend_break {
                    return Err(SessionError::BreakExtensionDisabled);
                }
                Err(SessionError::TimeRemaining {
                    seconds: self.timer.time_remaining,
                })
            }
        }
    }

    /// Ask for the minutes a spiral should get as a task
    pub fn request_promotion(&self, spiral_id: SpiralId) -> Result<PendingPrompt, SessionError> {
        let spiral = self
            .spirals
            .find(spiral_id)
            .ok_or(SessionError::SpiralNotFound(spiral_id))?;
        Ok(PendingPrompt {
            action: PromptAction::PromoteSpiral { spiral_id },
            title: "Move To Tasks".to_string(),
            message: format!("Minutes for \"{}\":", spiral.name),
            default_value: "25".to_string(),
        })
    }

    /// Apply the user's answer to a pending prompt. Cancel changes nothing.
    pub fn resolve_prompt(
        &mut self,
        prompt: &PendingPrompt,
        response: PromptResponse,
        now: DateTime<Local>,
        settings: &Settings,
    ) -> Outcome {
        let input = match response {
            PromptResponse::Cancel => return Ok(Vec::new()),
            PromptResponse::Confirm(input) => input,
        };
        let minutes = parse_minutes(&input)?;

        match &prompt.action {
            PromptAction::ExtendTask { task_id } => self.extend_task(*task_id, minutes, now, settings),
            PromptAction::ExtendBreak => self.extend_break(minutes, settings),
            PromptAction::PromoteSpiral { spiral_id } => self.promote_spiral(*spiral_id, minutes),
        }
    }

    fn extend_task(
        &mut self,
        task_id: TaskId,
        minutes: u32,
        now: DateTime<Local>,
        settings: &Settings,
    ) -> Outcome {
        if self.phase() != TimerPhase::TaskExpired {
            return Err(SessionError::StalePrompt);
        }
        let idx = self.timer.current_task_index.ok_or(SessionError::StalePrompt)?;
        let task = self.tasks.get_mut(idx).ok_or(SessionError::StalePrompt)?;
        if task.id != task_id {
            return Err(SessionError::StalePrompt);
        }

        task.duration += minutes;
        task.estimated_duration += minutes;
        task.open_segment(now);
        let name = task.name.clone();

        let penalty = settings.scoring.extension_penalty(minutes);
        self.score = settings.scoring.apply(self.score, -penalty);
        self.add_time(minutes);

        info!(task = %name, minutes, penalty, "Task extended");
        Ok(vec![SessionEvent::Extended {
            target: name,
            minutes,
            penalty,
        }])
    }

    fn extend_break(&mut self, minutes: u32, settings: &Settings) -> Outcome {
        if !settings.allow_extend_break {
            return Err(SessionError::BreakExtensionDisabled);
        }
        if self.phase() != TimerPhase::BreakExpired {
            return Err(SessionError::StalePrompt);
        }
        self.add_time(minutes);

        info!(minutes, "Break extended");
        Ok(vec![SessionEvent::Extended {
            target: "break".to_string(),
            minutes,
            penalty: 0,
        }])
    }

    fn add_time(&mut self, minutes: u32) {
        let seconds = minutes as u64 * 60;
        self.timer.time_remaining += seconds;
        self.timer.countdown_total += seconds;
        if self.timer.time_remaining > 0 {
            self.arm();
        }
    }
}

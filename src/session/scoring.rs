use serde::{Deserialize, Serialize};

/// Point rules for completions and extensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringPolicy {
    /// Flat award for every completed task
    pub points_per_task: i64,
    /// Bonus points per second finished ahead of the estimate
    pub bonus_per_second_saved: f64,
    /// Upper bound on the time-saved bonus
    pub max_bonus: Option<i64>,
    /// Points deducted per minute added to a task
    pub extension_penalty_per_minute: i64,
    /// Keep the running total from dropping below zero
    pub floor_total_at_zero: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            points_per_task: 10,
            bonus_per_second_saved: 0.5,
            max_bonus: None,
            extension_penalty_per_minute: 1,
            floor_total_at_zero: false,
        }
    }
}

impl ScoringPolicy {
    /// Time-saved bonus for finishing after `elapsed_seconds` of an `estimated_minutes` plan
    pub fn time_saved_bonus(&self, estimated_minutes: u32, elapsed_seconds: u64) -> i64 {
        let estimated_seconds = estimated_minutes as u64 * 60;
        let capped_elapsed = elapsed_seconds.min(estimated_seconds);
        let saved = estimated_seconds - capped_elapsed;
        let bonus = (saved as f64 * self.bonus_per_second_saved).floor() as i64;
        let bonus = bonus.max(0);
        match self.max_bonus {
            Some(max) => bonus.min(max),
            None => bonus,
        }
    }

    /// Points awarded for one completion, never negative
    pub fn completion_points(&self, estimated_minutes: u32, elapsed_seconds: u64) -> i64 {
        let earned = self.points_per_task + self.time_saved_bonus(estimated_minutes, elapsed_seconds);
        earned.max(0)
    }

    /// Points deducted for extending a task by `minutes`
    pub fn extension_penalty(&self, minutes: u32) -> i64 {
        (minutes as i64 * self.extension_penalty_per_minute).max(0)
    }

    /// Apply a signed delta to the running total
    pub fn apply(&self, score: i64, delta: i64) -> i64 {
        let next = score.saturating_add(delta);
        if self.floor_total_at_zero {
            next.max(0)
        } else {
            next
        }
    }
}

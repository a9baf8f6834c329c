use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;
pub type SpiralId = Uuid;

/// A planned task with an estimated duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Planned minutes; grows only through extensions
    pub estimated_duration: u32,
    /// Working minutes; becomes the actual minutes spent once completed
    pub duration: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub started: bool,
    /// Start of the open run segment, `None` while not ticking
    #[serde(default)]
    pub timer_start_time: Option<DateTime<Local>>,
    /// Focus seconds recorded tick by tick
    #[serde(default)]
    pub time_spent_seconds: u64,
    /// Wall-clock seconds of run segments already closed
    #[serde(default)]
    pub banked_seconds: u64,
    #[serde(default)]
    pub completion_timestamp: Option<DateTime<Local>>,
}

impl Task {
    pub fn new(name: String, minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            estimated_duration: minutes,
            duration: minutes,
            completed: false,
            started: false,
            timer_start_time: None,
            time_spent_seconds: 0,
            banked_seconds: 0,
            completion_timestamp: None,
        }
    }

    /// Open a run segment at `now`
    pub fn open_segment(&mut self, now: DateTime<Local>) {
        self.timer_start_time = Some(now);
    }

    /// Close the open run segment and bank its wall-clock length
    pub fn close_segment(&mut self, now: DateTime<Local>) {
        if let Some(started) = self.timer_start_time.take() {
            let secs = now.signed_duration_since(started).num_seconds().max(0) as u64;
            self.banked_seconds += secs;
        }
    }

    /// Wall-clock seconds worked, including an open segment, never below the tick counter
    pub fn wall_clock_seconds(&self, now: DateTime<Local>) -> u64 {
        let open = self
            .timer_start_time
            .map(|started| now.signed_duration_since(started).num_seconds().max(0) as u64)
            .unwrap_or(0);
        (self.banked_seconds + open).max(self.time_spent_seconds)
    }

    /// Seconds to put on the clock when (re)starting this task
    pub fn initial_countdown(&self) -> u64 {
        let full = self.duration as u64 * 60;
        if full > self.time_spent_seconds {
            full - self.time_spent_seconds
        } else {
            full
        }
    }
}

/// A captured idea waiting to become a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spiral {
    pub id: SpiralId,
    pub name: String,
}

impl Spiral {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

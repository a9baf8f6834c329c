use chrono::NaiveDate;

/// Something the session did, reported back to the caller for toasts and notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    TaskAdded { name: String },
    TaskRemoved { name: String },
    TasksCleared { count: usize },
    TaskStarted { name: String },
    BreakInterrupted,
    Paused { is_break: bool },
    Resumed { is_break: bool },
    /// Task countdown reached zero
    TimeUp { name: String },
    /// Break countdown reached zero
    BreakOver,
    TaskFinished { name: String, points: i64 },
    BreakStarted { minutes: u32 },
    BreakSkipped,
    Extended { target: String, minutes: u32, penalty: i64 },
    SpiralAdded { name: String },
    SpiralRemoved { name: String },
    SpiralPromoted { name: String, minutes: u32 },
    DayRolledOver { date: NaiveDate },
}

impl SessionEvent {
    pub fn title(&self) -> &'static str {
        match self {
            SessionEvent::TaskAdded { .. } => "Task Added",
            SessionEvent::TaskRemoved { .. } => "Task Removed",
            SessionEvent::TasksCleared { .. } => "Tasks Cleared",
            SessionEvent::TaskStarted { .. } => "Task Started",
            SessionEvent::BreakInterrupted => "Break Interrupted",
            SessionEvent::Paused { is_break: true } => "Break Paused",
            SessionEvent::Paused { is_break: false } => "Timer Paused",
            SessionEvent::Resumed { is_break: true } => "Break Resumed",
            SessionEvent::Resumed { is_break: false } => "Timer Resumed",
            SessionEvent::TimeUp { .. } => "Time's Up!",
            SessionEvent::BreakOver => "Break Over!",
            SessionEvent::TaskFinished { .. } => "Task Finished!",
            SessionEvent::BreakStarted { .. } => "Break Time!",
            SessionEvent::BreakSkipped => "Break Skipped",
            SessionEvent::Extended { .. } => "Timer Extended",
            SessionEvent::SpiralAdded { .. } => "Spiral Added",
            SessionEvent::SpiralRemoved { .. } => "Spiral Removed",
            SessionEvent::SpiralPromoted { .. } => "Spiral Moved",
            SessionEvent::DayRolledOver { .. } => "New Day",
        }
    }

    pub fn description(&self) -> String {
        match self {
            SessionEvent::TaskAdded { name } => format!("\"{}\" added to your list.", name),
            SessionEvent::TaskRemoved { name } => format!("\"{}\" has been removed.", name),
            SessionEvent::TasksCleared { count } => format!("{} tasks removed.", count),
            SessionEvent::TaskStarted { name } => format!("Timer for \"{}\" has begun.", name),
            SessionEvent::BreakInterrupted => "Starting a new task.".to_string(),
            SessionEvent::Paused { .. } | SessionEvent::Resumed { .. } => String::new(),
            SessionEvent::TimeUp { name } => {
                format!("\"{}\" timer finished. Mark done or extend.", name)
            }
            SessionEvent::BreakOver => "Ready for the next task?".to_string(),
            SessionEvent::TaskFinished { name, points } => {
                format!("\"{}\" complete. Points: +{}", name, points)
            }
            SessionEvent::BreakStarted { minutes } => {
                format!("Taking a {} minute break.", minutes)
            }
            SessionEvent::BreakSkipped => "Break ended. Ready for the next task?".to_string(),
            SessionEvent::Extended {
                target,
                minutes,
                penalty,
            } => {
                if *penalty > 0 {
                    format!("Added {} minutes to {}. Points: -{}", minutes, target, penalty)
                } else {
                    format!("Added {} minutes to {}.", minutes, target)
                }
            }
            SessionEvent::SpiralAdded { name } => format!("\"{}\" added to spirals.", name),
            SessionEvent::SpiralRemoved { name } => format!("\"{}\" removed.", name),
            SessionEvent::SpiralPromoted { name, minutes } => {
                format!("\"{}\" moved to tasks ({} min).", name, minutes)
            }
            SessionEvent::DayRolledOver { date } => {
                format!("Stats for {} archived. Fresh start!", date)
            }
        }
    }
}

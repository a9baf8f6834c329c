use crate::domain::{SpiralId, TaskId};
use thiserror::Error;

/// Category of a rejected session operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Action attempted in the wrong state
    Guard,
    /// Bad user input
    Validation,
    /// Target no longer exists
    MissingEntity,
}

/// A rejected session operation. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("\"{name}\" is already running.")]
    AlreadyRunning { name: String },

    #[error("\"{name}\" is in progress. Complete or stop it first.")]
    TimerBusy { name: String },

    #[error("\"{name}\" is already completed.")]
    AlreadyCompleted { name: String },

    #[error("No task to mark as done.")]
    NoActiveTask,

    #[error("There is no active break to skip.")]
    NoActiveBreak,

    #[error("Start a task or break to extend its time.")]
    NoCountdown,

    #[error("The timer is not running.")]
    NotRunning,

    #[error("There is nothing to resume.")]
    NotResumable,

    #[error("{seconds}s are still on the clock; extend once time is up.")]
    TimeRemaining { seconds: u64 },

    #[error("Extending break time is disabled in settings.")]
    BreakExtensionDisabled,

    #[error("Add a task or all tasks are complete.")]
    NoTasks,

    #[error("The prompt no longer matches the timer.")]
    StalePrompt,

    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("Please enter a positive number of minutes (got \"{0}\").")]
    InvalidMinutes(String),

    #[error("Task not found or index {0} is out of bounds.")]
    TaskIndexOutOfRange(usize),

    #[error("Task {0} no longer exists.")]
    TaskNotFound(TaskId),

    #[error("Spiral {0} no longer exists.")]
    SpiralNotFound(SpiralId),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::EmptyName | SessionError::InvalidMinutes(_) => ErrorKind::Validation,
            SessionError::TaskIndexOutOfRange(_)
            | SessionError::TaskNotFound(_)
            | SessionError::SpiralNotFound(_) => ErrorKind::MissingEntity,
            _ => ErrorKind::Guard,
        }
    }

    /// Short heading for a toast
    pub fn title(&self) -> &'static str {
        match self {
            SessionError::AlreadyRunning { .. } => "Already Active",
            SessionError::TimerBusy { .. } => "Timer Busy",
            SessionError::AlreadyCompleted { .. } => "Task Completed",
            SessionError::NoActiveTask => "No Active Task",
            SessionError::NoActiveBreak => "No Active Break",
            SessionError::NoCountdown => "No Timer Active",
            SessionError::NotRunning => "Not Running",
            SessionError::NotResumable => "Nothing To Resume",
            SessionError::TimeRemaining { .. } => "Time Remaining",
            SessionError::BreakExtensionDisabled => "Extend Break Disabled",
            SessionError::NoTasks => "No Tasks",
            SessionError::StalePrompt => "Prompt Expired",
            SessionError::EmptyName => "Invalid Name",
            SessionError::InvalidMinutes(_) => "Invalid Input",
            SessionError::TaskIndexOutOfRange(_) | SessionError::TaskNotFound(_) => "Invalid Task",
            SessionError::SpiralNotFound(_) => "Invalid Spiral",
        }
    }
}

pub mod enums;
pub mod item;
pub mod quotes;
pub mod registry;
pub mod settings;
pub mod views;

pub use enums::{QuoteType, Theme, TimerPhase, UiMode, View};
pub use item::{Spiral, SpiralId, Task, TaskId};
pub use registry::{SpiralRegistry, TaskRegistry};
pub use settings::{ClockTime, Settings};
pub use views::{format_clock, format_duration, format_minutes, progress_ratio};

pub mod generator;
pub mod history;
pub mod stats;

pub use generator::{generate_report, render_report};
pub use history::{DailyRecord, StatsHistory};
pub use stats::{
    calculate_day_stats, calculate_history_summary, calculate_not_finishing_probability, DayStats,
};

use crate::domain::Settings;
use crate::report::history::DailyRecord;
use crate::session::{next_reset, Session};
use chrono::{DateTime, Duration, Local};

/// Derived metrics for the current day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayStats {
    pub total_tasks: usize,
    pub tasks_completed: usize,
    pub total_planned_minutes: u64,
    pub remaining_minutes: u64,
    pub focus_seconds: u64,
    pub idle_seconds: u64,
    pub score: i64,
}

/// Aggregate over a run of archived days
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySummary {
    pub days: usize,
    pub tasks_completed: u64,
    pub total_tasks: u64,
    pub focus_seconds: u64,
    pub idle_seconds: u64,
    pub planned_minutes: u64,
    pub total_score: i64,
    pub best_day: Option<(String, i64)>,
    pub avg_focus_seconds: u64,
}

/// Calculate today's metrics from the session as of `now`
pub fn calculate_day_stats(session: &Session, now: DateTime<Local>) -> DayStats {
    let tasks = session.tasks();
    let current = session.current_task().map(|t| t.id);
    let timer = session.timer();

    let total_planned_minutes = tasks.iter().map(|t| t.estimated_duration as u64).sum();

    let remaining_minutes = tasks
        .iter()
        .filter(|t| !t.completed)
        .map(|t| {
            if Some(t.id) == current {
                timer.time_remaining.div_ceil(60)
            } else {
                t.estimated_duration as u64
            }
        })
        .sum();

    let completed_focus: u64 = tasks
        .iter()
        .filter(|t| t.completed)
        .map(|t| t.time_spent_seconds)
        .sum();
    let live_focus = session.current_task().map(|t| t.time_spent_seconds).unwrap_or(0);
    let focus_seconds = completed_focus + live_focus;

    let idle_seconds = session
        .session_start_time()
        .map(|started| {
            let session_secs = now.signed_duration_since(started).num_seconds().max(0) as u64;
            session_secs.saturating_sub(focus_seconds)
        })
        .unwrap_or(0);

    DayStats {
        total_tasks: tasks.len(),
        tasks_completed: tasks.completed_count(),
        total_planned_minutes,
        remaining_minutes,
        focus_seconds,
        idle_seconds,
        score: session.score(),
    }
}

/// The moment today's work should be done by
pub fn day_end_target(settings: &Settings, now: DateTime<Local>) -> DateTime<Local> {
    match settings.custom_finish_time {
        Some(finish) => {
            let today = finish.on(now.date_naive());
            if today < now {
                finish.on(now.date_naive() + Duration::days(1))
            } else {
                today
            }
        }
        None => next_reset(now, settings.daily_reset_time),
    }
}

/// Chance (0-100) of not getting through the remaining work before the day's end.
/// Workload over time left, inflated by the share of the session spent idle.
pub fn calculate_not_finishing_probability(
    stats: &DayStats,
    settings: &Settings,
    now: DateTime<Local>,
) -> u8 {
    if stats.remaining_minutes == 0 {
        return 0;
    }

    let minutes_left = day_end_target(settings, now)
        .signed_duration_since(now)
        .num_minutes()
        .max(0);
    if minutes_left == 0 {
        return 100;
    }

    let workload = (stats.remaining_minutes as f64 / minutes_left as f64).min(1.0);
    let session_secs = stats.focus_seconds + stats.idle_seconds;
    let penalty = if session_secs > 0 {
        let efficiency = stats.focus_seconds as f64 / session_secs as f64;
        1.0 + (1.0 - efficiency)
    } else {
        1.0
    };

    (workload * penalty * 100.0).round().min(100.0) as u8
}

/// Summarise a set of archived days
pub fn calculate_history_summary<'a, I>(records: I) -> HistorySummary
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    let mut summary = HistorySummary::default();

    for record in records {
        summary.days += 1;
        summary.tasks_completed += record.tasks_completed as u64;
        summary.total_tasks += record.total_tasks as u64;
        summary.focus_seconds += record.focus_time;
        summary.idle_seconds += record.idle_time;
        summary.planned_minutes += record.total_planned_time;
        summary.total_score += record.score;

        let better = match &summary.best_day {
            Some((_, best)) => record.score > *best,
            None => true,
        };
        if better {
            summary.best_day = Some((record.date.clone(), record.score));
        }
    }

    if summary.days > 0 {
        summary.avg_focus_seconds = summary.focus_seconds / summary.days as u64;
    }
    summary
}

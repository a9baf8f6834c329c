use crate::domain::format_duration;
use crate::report::history::StatsHistory;
use crate::report::stats::calculate_history_summary;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Render a markdown summary of the most recent `days` archived days
pub fn render_report(history: &StatsHistory, days: usize, generated_on: NaiveDate) -> String {
    let records = history.last(days);
    let summary = calculate_history_summary(records.iter().copied());

    let mut report = String::new();
    report.push_str(&format!("# Nudge Report - {}\n\n", generated_on));

    if records.is_empty() {
        report.push_str("No archived days yet. Finish a day and come back.\n");
        return report;
    }

    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Days:** {}\n", summary.days));
    report.push_str(&format!(
        "- **Tasks Completed:** {}/{} ({})\n",
        summary.tasks_completed,
        summary.total_tasks,
        format_percent(ratio_percent(summary.tasks_completed, summary.total_tasks))
    ));
    report.push_str(&format!(
        "- **Focus:** {} total, {} per day\n",
        format_duration(summary.focus_seconds),
        format_duration(summary.avg_focus_seconds)
    ));
    report.push_str(&format!("- **Idle:** {}\n", format_duration(summary.idle_seconds)));
    report.push_str(&format!(
        "- **Efficiency:** {}\n",
        format_percent(ratio_percent(
            summary.focus_seconds,
            summary.focus_seconds + summary.idle_seconds
        ))
    ));
    report.push_str(&format!("- **Score:** {}\n", summary.total_score));
    if let Some((date, score)) = &summary.best_day {
        report.push_str(&format!("- **Best Day:** {} ({} points)\n", date, score));
    }
    report.push('\n');

    report.push_str("## Days\n\n");
    report.push_str("| Date | Done | Planned | Focus | Idle | Score |\n");
    report.push_str("|------|------|---------|-------|------|-------|\n");
    for record in &records {
        report.push_str(&format!(
            "| {} | {}/{} | {} | {} | {} | {} |\n",
            record.date,
            record.tasks_completed,
            record.total_tasks,
            format_duration(record.total_planned_time * 60),
            format_duration(record.focus_time),
            format_duration(record.idle_time),
            record.score
        ));
    }

    report
}

/// Write the report to `output`, or next to the stored data when no path is given
pub fn generate_report(
    history: &StatsHistory,
    days: usize,
    generated_on: NaiveDate,
    data_dir: &Path,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let report = render_report(history, days, generated_on);

    let output = match output_path {
        Some(path) => path,
        None => data_dir.join(format!("report-{}.md", generated_on)),
    };

    fs::write(&output, report)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::history::DailyRecord;

    fn history() -> StatsHistory {
        let mut history = StatsHistory::new();
        for (date, score, done) in [("2024-01-13", 5, 1), ("2024-01-14", 42, 3), ("2024-01-15", 12, 2)] {
            history.record(DailyRecord {
                date: date.to_string(),
                focus_time: 3600,
                idle_time: 1200,
                tasks_completed: done,
                score,
                total_tasks: 4,
                total_planned_time: 90,
            });
        }
        history
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    #[test]
    fn test_render_report_last_days() {
        let report = render_report(&history(), 2, today());

        assert!(report.starts_with("# Nudge Report - 2024-01-16"));
        assert!(report.contains("- **Days:** 2"));
        assert!(report.contains("- **Tasks Completed:** 5/8 (62.5%)"));
        assert!(report.contains("- **Best Day:** 2024-01-14 (42 points)"));
        assert!(report.contains("| 2024-01-15 | 2/4 | 1h 30m | 1h | 20m | 12 |"));
        assert!(!report.contains("2024-01-13"));
    }

    #[test]
    fn test_render_empty_history() {
        let report = render_report(&StatsHistory::new(), 7, today());
        assert!(report.contains("No archived days yet"));
    }

    #[test]
    fn test_generate_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate_report(&history(), 7, today(), dir.path(), None).unwrap();

        assert_eq!(path, dir.path().join("report-2024-01-16.md"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("- **Days:** 3"));
    }
}

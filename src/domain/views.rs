/// Format seconds as a countdown clock "MM:SS" (minutes may exceed 59)
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Format seconds as "Xh Ym" (omits 0 values)
pub fn format_duration(total_seconds: u64) -> String {
    let total_minutes = total_seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

/// Format planned minutes as "Xh Ym"
pub fn format_minutes(minutes: u64) -> String {
    format_duration(minutes * 60)
}

/// Ratio of the countdown already consumed (0.0 to 1.0)
pub fn progress_ratio(remaining: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let done = total.saturating_sub(remaining) as f64;
    (done / total as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(480), "08:00");
        assert_eq!(format_clock(1499), "24:59");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5400), "1h 30m");
        assert_eq!(format_duration(7200), "2h");
        assert_eq!(format_duration(2700), "45m");
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_minutes(125), "2h 5m");
    }

    #[test]
    fn test_progress_ratio() {
        assert_eq!(progress_ratio(600, 600), 0.0);
        assert_eq!(progress_ratio(300, 600), 0.5);
        assert_eq!(progress_ratio(0, 600), 1.0);
        assert_eq!(progress_ratio(0, 0), 0.0);
    }
}

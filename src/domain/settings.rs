use super::enums::{QuoteType, Theme};
use crate::session::scoring::ScoringPolicy;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_BREAK_MINUTES: u32 = 1;
pub const MAX_BREAK_MINUTES: u32 = 120;

/// A wall-clock time of day stored as "HH:MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn midnight() -> Self {
        Self { hour: 0, minute: 0 }
    }

    /// Shift by a signed number of minutes, wrapping around the day
    pub fn shifted(&self, minutes: i64) -> Self {
        let total = (self.hour as i64 * 60 + self.minute as i64 + minutes).rem_euclid(24 * 60);
        Self {
            hour: (total / 60) as u32,
            minute: (total % 60) as u32,
        }
    }

    /// This time of day on `date`, resolved in the local timezone
    pub fn on(&self, date: NaiveDate) -> DateTime<Local> {
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN);
        resolve_local(&Local, date.and_time(time))
    }
}

/// Resolve a wall time in `tz`. A time skipped by a DST jump lands an hour later.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got '{}'", s))?;
        let hour: u32 = h.parse().map_err(|_| format!("invalid hour in '{}'", s))?;
        let minute: u32 = m.parse().map_err(|_| format!("invalid minute in '{}'", s))?;
        ClockTime::new(hour, minute).ok_or_else(|| format!("time out of range: '{}'", s))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// User-configurable settings, persisted under the `settings` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub break_minutes: u32,
    pub allow_extend_break: bool,
    pub daily_reset_time: ClockTime,
    /// Overrides the reset boundary as today's target end
    pub custom_finish_time: Option<ClockTime>,
    pub quote_type: QuoteType,
    pub sound_enabled: bool,
    pub theme: Theme,
    pub scoring: ScoringPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            break_minutes: 5,
            allow_extend_break: true,
            daily_reset_time: ClockTime::midnight(),
            custom_finish_time: None,
            quote_type: QuoteType::Abusive,
            sound_enabled: true,
            theme: Theme::Dark,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl Settings {
    /// Adjust the break length, clamped to the allowed range
    pub fn adjust_break_minutes(&mut self, delta: i64) {
        let next = (self.break_minutes as i64 + delta)
            .clamp(MIN_BREAK_MINUTES as i64, MAX_BREAK_MINUTES as i64);
        self.break_minutes = next as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, Timelike};

    #[test]
    fn test_clock_time_parse() {
        assert_eq!("04:30".parse::<ClockTime>(), Ok(ClockTime { hour: 4, minute: 30 }));
        assert_eq!(" 0:05 ".parse::<ClockTime>(), Ok(ClockTime { hour: 0, minute: 5 }));
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("12:60".parse::<ClockTime>().is_err());
        assert!("noon".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_clock_time_shift_wraps() {
        let t = ClockTime::new(23, 45).unwrap();
        assert_eq!(t.shifted(30), ClockTime::new(0, 15).unwrap());
        assert_eq!(ClockTime::midnight().shifted(-15), ClockTime::new(23, 45).unwrap());
    }

    #[test]
    fn test_clock_time_on_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let dt = ClockTime::new(4, 30).unwrap().on(date);
        assert_eq!(dt.date_naive(), date);
        assert_eq!((dt.hour(), dt.minute()), (4, 30));
    }

    /// UTC+1, jumping to UTC+2 at 02:00 local on 2024-03-31
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn winter() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(7200).unwrap()
        }

        fn local_at(h: u32) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap().and_hms_opt(h, 0, 0).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if *local < Self::local_at(2) {
                LocalResult::Single(Self::winter())
            } else if *local < Self::local_at(3) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::summer())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::local_at(1) {
                Self::winter()
            } else {
                Self::summer()
            }
        }
    }

    #[test]
    fn test_time_in_dst_gap_moves_forward_an_hour() {
        let gap = SpringForward::local_at(2) + Duration::minutes(30);
        let resolved = resolve_local(&SpringForward, gap);

        assert_eq!(resolved.naive_local(), SpringForward::local_at(3) + Duration::minutes(30));
        assert_eq!(resolved.naive_utc(), SpringForward::local_at(1) + Duration::minutes(30));
    }

    #[test]
    fn test_time_outside_gap_is_unchanged() {
        let before = SpringForward::local_at(1);
        assert_eq!(resolve_local(&SpringForward, before).naive_local(), before);

        let after = SpringForward::local_at(4);
        assert_eq!(resolve_local(&SpringForward, after).naive_local(), after);
    }

    #[test]
    fn test_settings_serde_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"breakMinutes": 10}"#).unwrap();
        assert_eq!(settings.break_minutes, 10);
        assert!(settings.allow_extend_break);
        assert_eq!(settings.daily_reset_time, ClockTime::midnight());
        assert_eq!(settings.quote_type, QuoteType::Abusive);

        let json = serde_json::to_value(&Settings::default()).unwrap();
        assert_eq!(json["dailyResetTime"], "00:00");
    }

    #[test]
    fn test_adjust_break_minutes_clamps() {
        let mut settings = Settings::default();
        settings.adjust_break_minutes(-10);
        assert_eq!(settings.break_minutes, MIN_BREAK_MINUTES);
        settings.adjust_break_minutes(500);
        assert_eq!(settings.break_minutes, MAX_BREAK_MINUTES);
    }
}

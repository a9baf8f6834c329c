use crate::report::stats::DayStats;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One archived day, keyed by its `YYYY-MM-DD` date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: String,
    /// Focus seconds
    pub focus_time: u64,
    /// Idle seconds
    pub idle_time: u64,
    pub tasks_completed: usize,
    pub score: i64,
    pub total_tasks: usize,
    /// Planned minutes
    pub total_planned_time: u64,
}

impl DailyRecord {
    pub fn from_stats(date: NaiveDate, stats: &DayStats) -> Self {
        Self {
            date: date_key(date),
            focus_time: stats.focus_seconds,
            idle_time: stats.idle_seconds,
            tasks_completed: stats.tasks_completed,
            score: stats.score,
            total_tasks: stats.total_tasks,
            total_planned_time: stats.total_planned_minutes,
        }
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date-keyed map of archived days
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsHistory {
    days: BTreeMap<String, DailyRecord>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for its date
    pub fn record(&mut self, record: DailyRecord) {
        self.days.insert(record.date.clone(), record);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.days.get(&date_key(date))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Records in date order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DailyRecord> {
        self.days.values()
    }

    /// The most recent `n` records, oldest first
    pub fn last(&self, n: usize) -> Vec<&DailyRecord> {
        let mut recent: Vec<&DailyRecord> = self.days.values().rev().take(n).collect();
        recent.reverse();
        recent
    }

    /// Serialise the whole map as pretty JSON
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize stats history")
    }

    /// Parse an exported map. The top level must be a JSON object.
    pub fn import_json(content: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(content).context("Stats file is not valid JSON")?;
        if !value.is_object() {
            bail!("Stats file must contain a JSON object keyed by date");
        }
        serde_json::from_value(value).context("Stats file has an unexpected record layout")
    }

    /// Replace every record with `other`
    pub fn replace(&mut self, other: StatsHistory) {
        self.days = other.days;
    }
}

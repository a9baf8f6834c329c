use crate::domain::{Settings, Spiral, Task};
use crate::persistence::store::{
    read_json, write_json, KeyValueStore, KEY_LAST_RESET, KEY_SCORE, KEY_SESSION, KEY_SETTINGS,
    KEY_SPIRALS, KEY_STATS_HISTORY, KEY_TASKS,
};
use crate::report::StatsHistory;
use crate::session::{Session, SessionParts, TimerState};
use anyhow::Result;
use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Timer fields plus session start, stored under the `session` key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(flatten)]
    pub timer: TimerState,
    pub session_start_time: Option<DateTime<Local>>,
}

/// Read a key, falling back to the default when absent or unreadable
fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %format!("{:#}", e), "Discarding stored value");
            T::default()
        }
    }
}

pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
    load_or_default(store, KEY_SETTINGS)
}

pub fn load_history(store: &dyn KeyValueStore) -> StatsHistory {
    load_or_default(store, KEY_STATS_HISTORY)
}

/// Rebuild the session from its keys; see `Session::restore` for the repairs applied
pub fn load_session(store: &dyn KeyValueStore) -> Session {
    let tasks: Vec<Task> = load_or_default(store, KEY_TASKS);
    let spirals: Vec<Spiral> = load_or_default(store, KEY_SPIRALS);
    let score: i64 = load_or_default(store, KEY_SCORE);
    let record: SessionRecord = load_or_default(store, KEY_SESSION);
    let last_reset: Option<DateTime<Local>> = load_or_default(store, KEY_LAST_RESET);

    Session::restore(SessionParts {
        tasks,
        spirals,
        timer: record.timer,
        score,
        session_start_time: record.session_start_time,
        last_reset,
    })
}

pub fn save_session(store: &mut dyn KeyValueStore, session: &Session) -> Result<()> {
    write_json(store, KEY_TASKS, &session.tasks().as_slice())?;
    write_json(store, KEY_SPIRALS, &session.spirals().as_slice())?;
    write_json(store, KEY_SCORE, &session.score())?;
    write_json(
        store,
        KEY_SESSION,
        &SessionRecord {
            timer: session.timer().clone(),
            session_start_time: session.session_start_time(),
        },
    )?;
    write_json(store, KEY_LAST_RESET, &session.last_reset())?;
    Ok(())
}

pub fn save_settings(store: &mut dyn KeyValueStore, settings: &Settings) -> Result<()> {
    write_json(store, KEY_SETTINGS, settings)
}

pub fn save_history(store: &mut dyn KeyValueStore, history: &StatsHistory) -> Result<()> {
    write_json(store, KEY_STATS_HISTORY, history)
}

//! Cumulative study statistics and the store they are flushed to.
//!
//! Statistics are kept as two independent scalar records:
//!
//! - `pomodoroCount` -> decimal integer string
//! - `totalMinutes`  -> decimal floating-point string
//!
//! Either record may be missing or garbled; such records load as absent.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{CoreError, Result};

pub const COUNT_KEY: &str = "pomodoroCount";
pub const MINUTES_KEY: &str = "totalMinutes";

/// Cumulative statistics owned by the session controller.
///
/// Study time is a loaded baseline in minutes plus whole seconds accrued
/// since, so repeated one-second accruals never drift.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    completed_sessions: u64,
    carried_minutes: f64,
    accrued_secs: u64,
}

impl Statistics {
    pub fn new(completed_sessions: u64, total_minutes: f64) -> Self {
        Self {
            completed_sessions,
            carried_minutes: total_minutes.max(0.0),
            accrued_secs: 0,
        }
    }

    pub fn from_stored(stored: StoredStats) -> Self {
        Self::new(
            stored.completed_sessions.unwrap_or(0),
            stored.total_minutes.unwrap_or(0.0),
        )
    }

    pub fn completed_sessions(&self) -> u64 {
        self.completed_sessions
    }

    /// Exact total study minutes.
    pub fn total_minutes(&self) -> f64 {
        self.carried_minutes + self.accrued_secs as f64 / 60.0
    }

    /// Total study minutes rounded down, as displayed.
    pub fn whole_minutes(&self) -> u64 {
        self.total_minutes().floor() as u64
    }

    pub(crate) fn accrue_second(&mut self) {
        self.accrued_secs += 1;
    }

    pub(crate) fn record_completion(&mut self) {
        self.completed_sessions = self.completed_sessions.saturating_add(1);
    }
}

/// Raw statistics as read back from a store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StoredStats {
    pub completed_sessions: Option<u64>,
    pub total_minutes: Option<f64>,
}

impl StoredStats {
    /// Decode the two string records.
    pub fn decode(count: Option<&str>, minutes: Option<&str>) -> Self {
        Self {
            completed_sessions: count.and_then(|raw| decode_count(raw, COUNT_KEY)),
            total_minutes: minutes.and_then(|raw| decode_minutes(raw, MINUTES_KEY)),
        }
    }
}

/// Encode statistics into (`pomodoroCount`, `totalMinutes`) string records.
pub fn encode(stats: &Statistics) -> (String, String) {
    (
        stats.completed_sessions().to_string(),
        stats.total_minutes().to_string(),
    )
}

fn decode_count(raw: &str, key: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    // Accept "12.0"-style values by truncating, like integer parsing of a
    // float-formatted string would.
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f < u64::MAX as f64 => Some(f.trunc() as u64),
        _ => {
            warn!(key, value = raw, "ignoring unparseable stored statistic");
            None
        }
    }
}

fn decode_minutes(raw: &str, key: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Some(f),
        _ => {
            warn!(key, value = raw, "ignoring unparseable stored statistic");
            None
        }
    }
}

/// Best-effort, synchronous, device-local statistics storage.
pub trait StatsStore {
    fn load(&self) -> Result<StoredStats>;
    fn save(&mut self, stats: &Statistics) -> Result<()>;
}

/// In-memory key-value store using the same record layout as the database.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, String>,
    fail_saves: bool,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose saves always fail.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.records.insert(key.to_string(), value.to_string());
    }

    /// Number of successful flushes.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl StatsStore for MemoryStore {
    fn load(&self) -> Result<StoredStats> {
        Ok(StoredStats::decode(
            self.get(COUNT_KEY),
            self.get(MINUTES_KEY),
        ))
    }

    fn save(&mut self, stats: &Statistics) -> Result<()> {
        if self.fail_saves {
            return Err(CoreError::Io(std::io::Error::other("store is read-only")));
        }
        let (count, minutes) = encode(stats);
        self.set(COUNT_KEY, &count);
        self.set(MINUTES_KEY, &minutes);
        self.saves += 1;
        Ok(())
    }
}

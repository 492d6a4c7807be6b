use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sinks::View;
use crate::timer::Mode;

/// Every state change of the session controller produces an Event.
/// The terminal UI logs them; the CLI prints them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStopped {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero; the controller has already moved on.
    SessionCompleted {
        mode: Mode,
        next_mode: Mode,
        completed_sessions: u64,
        at: DateTime<Utc>,
    },
    ModeAdvanced {
        from: Mode,
        to: Mode,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StatisticsReset {
        at: DateTime<Utc>,
    },
    ViewChanged {
        view: View,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        remaining_secs: u32,
        running: bool,
        view: View,
        completed_sessions: u64,
        total_minutes: f64,
        at: DateTime<Utc>,
    },
}

use serde::{Deserialize, Serialize};

/// Study interval length in seconds.
pub const STUDY_SECS: u32 = 25 * 60;
/// Short break length in seconds.
pub const SHORT_BREAK_SECS: u32 = 5 * 60;
/// Long break length in seconds.
pub const LONG_BREAK_SECS: u32 = 15 * 60;
/// Every n-th completed study session is followed by a long break.
pub const SESSIONS_PER_LONG_BREAK: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Study,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// Full length of this mode in seconds.
    pub fn duration_secs(self) -> u32 {
        match self {
            Mode::Study => STUDY_SECS,
            Mode::ShortBreak => SHORT_BREAK_SECS,
            Mode::LongBreak => LONG_BREAK_SECS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Study => "Study",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Mode::Study)
    }

    /// Mode that follows the completion of `self`.
    ///
    /// `completed_sessions` is the study count *after* the completion has
    /// been counted.
    pub fn next(self, completed_sessions: u64) -> Mode {
        match self {
            Mode::Study if completed_sessions % SESSIONS_PER_LONG_BREAK == 0 => Mode::LongBreak,
            Mode::Study => Mode::ShortBreak,
            Mode::ShortBreak | Mode::LongBreak => Mode::Study,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Render seconds as `MM:SS`.
///
/// Minutes are not wrapped at 60, so `3600` renders as `60:00`.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

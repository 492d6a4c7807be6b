mod controller;
mod mode;
mod ticks;

pub use controller::{SessionController, COMPLETION_MESSAGE, RESET_STATS_PROMPT};
pub use mode::{
    format_clock, Mode, LONG_BREAK_SECS, SESSIONS_PER_LONG_BREAK, SHORT_BREAK_SECS, STUDY_SECS,
};
pub use ticks::{ManualTicks, TickSource};

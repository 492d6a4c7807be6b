//! # pomotick Core Library
//!
//! Core logic for the pomotick Pomodoro timer: Study intervals alternating
//! with short and long breaks, plus cumulative study statistics that survive
//! restarts. The terminal binary in `pomotick-cli` is a thin layer over the
//! same types.
//!
//! ## Architecture
//!
//! - **Session Controller**: owns the countdown and mode cycle; the caller
//!   invokes `tick()` whenever its [`TickSource`] fires
//! - **Sinks**: display, notification and confirmation collaborators the
//!   controller drives through traits
//! - **Storage**: SQLite key-value statistics and TOML configuration
//!
//! ## Key Components
//!
//! - [`SessionController`]: timer state machine
//! - [`Database`]: statistics persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod sinks;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use sinks::{Confirm, DisplaySink, Notifier, NullDisplay, SilentNotifier, View};
pub use storage::{Config, Database, MemoryStore, Permission, Statistics, StatsStore, StoredStats};
pub use timer::{
    format_clock, ManualTicks, Mode, SessionController, TickSource, COMPLETION_MESSAGE,
    RESET_STATS_PROMPT,
};

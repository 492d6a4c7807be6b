//! Collaborators driven by the session controller.
//!
//! The controller pushes derived display values out through [`DisplaySink`],
//! fires completion cues through [`Notifier`] and asks [`Confirm`] before
//! destructive commands. None of them may mutate session state.

use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Which view the display is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Countdown, mode and statistics.
    #[default]
    Timer,
    /// Full time-of-day clock.
    Clock,
}

/// Receives rendered state from the controller.
pub trait DisplaySink {
    /// Remaining time, already formatted as `MM:SS`.
    fn set_time(&mut self, text: &str);
    fn set_mode(&mut self, mode: Mode);
    /// `true` shows the "Stop" control, `false` the "Start" control.
    fn set_running(&mut self, running: bool);
    /// Completed study sessions and whole study minutes.
    fn set_statistics(&mut self, completed_sessions: u64, whole_minutes: u64);
    fn set_break_indicator(&mut self, on: bool);
    fn set_view(&mut self, view: View);
}

/// Fire-and-forget completion cues.
pub trait Notifier {
    fn notify(&mut self, message: &str);
    fn play_sound(&mut self);
}

/// Blocking yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// A pre-decided answer.
impl Confirm for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn set_time(&mut self, _text: &str) {}
    fn set_mode(&mut self, _mode: Mode) {}
    fn set_running(&mut self, _running: bool) {}
    fn set_statistics(&mut self, _completed_sessions: u64, _whole_minutes: u64) {}
    fn set_break_indicator(&mut self, _on: bool) {}
    fn set_view(&mut self, _view: View) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _message: &str) {}
    fn play_sound(&mut self) {}
}

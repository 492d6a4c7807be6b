//! Session controller.
//!
//! Owns the countdown, the Study/break cycle and the cumulative statistics.
//! It has no internal thread: a [`TickSource`] is armed on start and the
//! caller invokes `tick()` whenever that source fires.
//!
//! ## State Transitions
//!
//! ```text
//! (Study, Stopped) -start-> (Study, Running) -1500 ticks-> (ShortBreak | LongBreak, Stopped)
//! (ShortBreak | LongBreak, Running) -countdown ends-> (Study, Stopped)
//! any -reset-> (Study, Stopped)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut ctl = SessionController::new(store, ticks, display, notifier);
//! ctl.start();
//! // Whenever the tick source fires:
//! ctl.tick(); // Returns Some(Event::SessionCompleted) when a session ends
//! ```

use chrono::Utc;
use tracing::{debug, info, warn};

use super::mode::{format_clock, Mode};
use super::ticks::TickSource;
use crate::events::Event;
use crate::sinks::{Confirm, DisplaySink, Notifier, View};
use crate::storage::{Statistics, StatsStore};

pub const COMPLETION_MESSAGE: &str = "Session complete!";
pub const RESET_STATS_PROMPT: &str = "Are you sure you want to reset your stats?";

pub struct SessionController<S, T, D, N> {
    mode: Mode,
    time_left_secs: u32,
    running: bool,
    view: View,
    stats: Statistics,
    store: S,
    ticks: T,
    display: D,
    notifier: N,
}

impl<S, T, D, N> SessionController<S, T, D, N>
where
    S: StatsStore,
    T: TickSource,
    D: DisplaySink,
    N: Notifier,
{
    /// Create a controller at (Study, full duration, stopped), rehydrating
    /// statistics from `store`.
    ///
    /// A store that cannot be read yields zeroed statistics.
    pub fn new(store: S, ticks: T, display: D, notifier: N) -> Self {
        let stats = match store.load() {
            Ok(stored) => Statistics::from_stored(stored),
            Err(e) => {
                warn!(error = %e, "could not load statistics, starting from zero");
                Statistics::default()
            }
        };
        info!(
            completed_sessions = stats.completed_sessions(),
            total_minutes = stats.total_minutes(),
            "session controller ready"
        );

        let mut ctl = Self {
            mode: Mode::Study,
            time_left_secs: Mode::Study.duration_secs(),
            running: false,
            view: View::Timer,
            stats,
            store,
            ticks,
            display,
            notifier,
        };
        ctl.render_all();
        ctl
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            running: self.running,
            view: self.view,
            completed_sessions: self.stats.completed_sessions(),
            total_minutes: self.stats.total_minutes(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down. No-op when already running or nothing is left.
    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.time_left_secs == 0 {
            return None;
        }
        self.running = true;
        self.ticks.arm();
        self.display.set_running(true);
        info!(mode = %self.mode, remaining_secs = self.time_left_secs, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting down and flush statistics.
    ///
    /// Returns an event only if the timer was running; the flush happens
    /// either way.
    pub fn stop(&mut self) -> Option<Event> {
        let was_running = self.running;
        self.running = false;
        self.ticks.cancel();
        self.display.set_running(false);
        self.flush();
        if !was_running {
            return None;
        }
        info!(mode = %self.mode, remaining_secs = self.time_left_secs, "timer stopped");
        Some(Event::TimerStopped {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// The start/stop control.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Advance by one second. Returns `Some(Event::SessionCompleted)` when
    /// the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }

        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.mode == Mode::Study {
            self.stats.accrue_second();
            self.render_statistics();
        }
        self.render_time();
        debug!(remaining_secs = self.time_left_secs, "tick");

        if self.time_left_secs > 0 {
            return None;
        }

        let finished = self.mode;
        self.stop();
        self.render_time();
        self.notifier.play_sound();
        self.notifier.notify(COMPLETION_MESSAGE);
        self.advance_mode();
        if self.view == View::Clock {
            self.show_timer();
        }

        info!(
            mode = %finished,
            next_mode = %self.mode,
            completed_sessions = self.stats.completed_sessions(),
            "session completed"
        );
        Some(Event::SessionCompleted {
            mode: finished,
            next_mode: self.mode,
            completed_sessions: self.stats.completed_sessions(),
            at: Utc::now(),
        })
    }

    /// Move to the mode that follows the current one.
    ///
    /// Leaving Study counts a completed session and flushes statistics.
    /// A running timer is stopped first; the new mode starts stopped.
    pub fn advance_mode(&mut self) -> Event {
        if self.running {
            self.stop();
        }
        let from = self.mode;
        if from == Mode::Study {
            self.stats.record_completion();
            self.render_statistics();
            self.flush();
        }
        let to = from.next(self.stats.completed_sessions());
        self.enter_mode(to);
        Event::ModeAdvanced {
            from,
            to,
            duration_secs: self.time_left_secs,
            at: Utc::now(),
        }
    }

    /// Stop and return to a full Study session. Statistics are kept.
    pub fn reset(&mut self) -> Event {
        self.stop();
        self.enter_mode(Mode::Study);
        info!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// Zero the statistics if `confirm` agrees.
    ///
    /// Declining is a normal outcome and leaves everything untouched.
    pub fn reset_statistics<C>(&mut self, confirm: &mut C) -> Option<Event>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(RESET_STATS_PROMPT) {
            debug!("statistics reset declined");
            return None;
        }
        self.stats = Statistics::default();
        self.render_statistics();
        self.flush();
        info!("statistics reset");
        Some(Event::StatisticsReset { at: Utc::now() })
    }

    pub fn show_clock(&mut self) -> Option<Event> {
        self.set_view(View::Clock)
    }

    pub fn show_timer(&mut self) -> Option<Event> {
        self.set_view(View::Timer)
    }

    pub fn toggle_view(&mut self) -> Option<Event> {
        match self.view {
            View::Timer => self.show_clock(),
            View::Clock => self.show_timer(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// The single mode transition shared by completion and reset.
    fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.time_left_secs = mode.duration_secs();
        self.display.set_mode(mode);
        self.display.set_break_indicator(mode.is_break());
        self.render_time();
    }

    fn set_view(&mut self, view: View) -> Option<Event> {
        if self.view == view {
            return None;
        }
        self.view = view;
        self.display.set_view(view);
        Some(Event::ViewChanged {
            view,
            at: Utc::now(),
        })
    }

    fn flush(&mut self) {
        if let Err(e) = self.store.save(&self.stats) {
            warn!(error = %e, "failed to persist statistics");
        }
    }

    fn render_time(&mut self) {
        self.display.set_time(&format_clock(self.time_left_secs));
    }

    fn render_statistics(&mut self) {
        self.display
            .set_statistics(self.stats.completed_sessions(), self.stats.whole_minutes());
    }

    fn render_all(&mut self) {
        self.render_time();
        self.display.set_mode(self.mode);
        self.display.set_running(self.running);
        self.display.set_break_indicator(self.mode.is_break());
        self.display.set_view(self.view);
        self.render_statistics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{NullDisplay, SilentNotifier};
    use crate::storage::MemoryStore;
    use crate::timer::ManualTicks;

    #[derive(Debug, Default)]
    struct RecordingDisplay {
        time: String,
        mode: Option<Mode>,
        running: bool,
        stats: (u64, u64),
        break_indicator: bool,
        view: View,
    }

    impl DisplaySink for RecordingDisplay {
        fn set_time(&mut self, text: &str) {
            self.time = text.to_string();
        }
        fn set_mode(&mut self, mode: Mode) {
            self.mode = Some(mode);
        }
        fn set_running(&mut self, running: bool) {
            self.running = running;
        }
        fn set_statistics(&mut self, completed_sessions: u64, whole_minutes: u64) {
            self.stats = (completed_sessions, whole_minutes);
        }
        fn set_break_indicator(&mut self, on: bool) {
            self.break_indicator = on;
        }
        fn set_view(&mut self, view: View) {
            self.view = view;
        }
    }

    #[derive(Debug, Default)]
    struct CountingNotifier {
        messages: Vec<String>,
        sounds: u32,
    }

    impl Notifier for CountingNotifier {
        fn notify(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
        fn play_sound(&mut self) {
            self.sounds += 1;
        }
    }

    type TestController =
        SessionController<MemoryStore, ManualTicks, RecordingDisplay, CountingNotifier>;

    fn controller() -> TestController {
        SessionController::new(
            MemoryStore::new(),
            ManualTicks::new(),
            RecordingDisplay::default(),
            CountingNotifier::default(),
        )
    }

    fn run_out(ctl: &mut TestController) -> Option<Event> {
        ctl.start();
        let mut last = None;
        while ctl.is_running() {
            last = ctl.tick();
        }
        last
    }

    #[test]
    fn initial_state_is_rendered() {
        let ctl = controller();
        assert_eq!(ctl.mode(), Mode::Study);
        assert_eq!(ctl.time_left_secs(), 1500);
        assert!(!ctl.is_running());
        assert_eq!(ctl.display().time, "25:00");
        assert_eq!(ctl.display().mode, Some(Mode::Study));
        assert_eq!(ctl.display().stats, (0, 0));
    }

    #[test]
    fn start_arms_ticks_once() {
        let mut ctl = controller();
        assert!(ctl.start().is_some());
        assert!(ctl.start().is_none());
        assert_eq!(ctl.ticks().arm_count(), 1);
        assert!(ctl.ticks().is_armed());
        assert!(ctl.display().running);
    }

    #[test]
    fn start_with_nothing_left_is_a_no_op() {
        let mut ctl = controller();
        ctl.time_left_secs = 0;
        assert!(ctl.start().is_none());
        assert!(!ctl.is_running());
        assert_eq!(ctl.ticks().arm_count(), 0);
        assert!(!ctl.display().running);
    }

    #[test]
    fn stop_cancels_and_flushes() {
        let mut ctl = controller();
        ctl.start();
        ctl.tick();
        assert!(ctl.stop().is_some());
        assert!(!ctl.ticks().is_armed());
        assert!(!ctl.display().running);
        assert_eq!(ctl.store().saves(), 1);
        // Not running: still flushes, no event.
        assert!(ctl.stop().is_none());
        assert_eq!(ctl.store().saves(), 2);
    }

    #[test]
    fn ticks_ignored_while_stopped() {
        let mut ctl = controller();
        assert!(ctl.tick().is_none());
        assert_eq!(ctl.time_left_secs(), 1500);
        assert_eq!(ctl.statistics().total_minutes(), 0.0);
    }

    #[test]
    fn tick_counts_down_and_accrues() {
        let mut ctl = controller();
        ctl.start();
        for _ in 0..60 {
            ctl.tick();
        }
        assert_eq!(ctl.time_left_secs(), 1440);
        assert_eq!(ctl.display().time, "24:00");
        assert_eq!(ctl.statistics().total_minutes(), 1.0);
        assert_eq!(ctl.display().stats, (0, 1));
    }

    #[test]
    fn full_study_session_completes_once() {
        let mut ctl = controller();
        let event = run_out(&mut ctl);
        assert!(matches!(
            event,
            Some(Event::SessionCompleted {
                mode: Mode::Study,
                next_mode: Mode::ShortBreak,
                completed_sessions: 1,
                ..
            })
        ));
        assert_eq!(ctl.mode(), Mode::ShortBreak);
        assert_eq!(ctl.time_left_secs(), 300);
        assert!(!ctl.is_running());
        assert_eq!(ctl.statistics().total_minutes(), 25.0);
        assert_eq!(ctl.notifier().sounds, 1);
        assert_eq!(ctl.notifier().messages, vec![COMPLETION_MESSAGE.to_string()]);
        assert!(ctl.display().break_indicator);
        assert_eq!(ctl.display().time, "05:00");
    }

    #[test]
    fn break_does_not_accrue_minutes() {
        let mut ctl = controller();
        run_out(&mut ctl);
        let before = ctl.statistics().total_minutes();
        let event = run_out(&mut ctl);
        assert_eq!(ctl.statistics().total_minutes(), before);
        assert!(matches!(
            event,
            Some(Event::SessionCompleted {
                mode: Mode::ShortBreak,
                next_mode: Mode::Study,
                ..
            })
        ));
        assert!(!ctl.display().break_indicator);
        assert_eq!(ctl.statistics().completed_sessions(), 1);
    }

    #[test]
    fn fourth_study_goes_to_long_break() {
        let mut store = MemoryStore::new();
        store.set("pomodoroCount", "3");
        let mut ctl = SessionController::new(
            store,
            ManualTicks::new(),
            RecordingDisplay::default(),
            CountingNotifier::default(),
        );
        run_out(&mut ctl);
        assert_eq!(ctl.mode(), Mode::LongBreak);
        assert_eq!(ctl.time_left_secs(), 900);
        assert_eq!(ctl.statistics().completed_sessions(), 4);
        assert_eq!(ctl.store().get("pomodoroCount"), Some("4"));
    }

    #[test]
    fn advance_while_running_stops_first() {
        let mut ctl = controller();
        ctl.start();
        ctl.tick();
        ctl.advance_mode();
        assert!(!ctl.is_running());
        assert!(!ctl.ticks().is_armed());
        assert!(!ctl.display().running);
        assert_eq!(ctl.mode(), Mode::ShortBreak);
        assert_eq!(ctl.time_left_secs(), 300);
        assert!(ctl.tick().is_none());
        assert_eq!(ctl.time_left_secs(), 300);
    }

    #[test]
    fn huge_stored_count_does_not_overflow() {
        let mut store = MemoryStore::new();
        store.set("pomodoroCount", "18446744073709551615");
        let mut ctl = SessionController::new(
            store,
            ManualTicks::new(),
            RecordingDisplay::default(),
            CountingNotifier::default(),
        );
        ctl.advance_mode();
        assert_eq!(ctl.statistics().completed_sessions(), u64::MAX);
        assert_eq!(ctl.mode(), Mode::ShortBreak);
    }

    #[test]
    fn completion_returns_to_timer_view() {
        let mut ctl = controller();
        ctl.start();
        assert!(ctl.show_clock().is_some());
        assert_eq!(ctl.display().view, View::Clock);
        while ctl.is_running() {
            ctl.tick();
        }
        assert_eq!(ctl.view(), View::Timer);
        assert_eq!(ctl.display().view, View::Timer);
    }

    #[test]
    fn reset_keeps_statistics() {
        let mut ctl = controller();
        run_out(&mut ctl);
        ctl.start();
        ctl.tick();
        ctl.reset();
        assert_eq!(ctl.mode(), Mode::Study);
        assert_eq!(ctl.time_left_secs(), 1500);
        assert!(!ctl.is_running());
        assert!(!ctl.ticks().is_armed());
        assert_eq!(ctl.statistics().completed_sessions(), 1);
        assert!(!ctl.display().break_indicator);
        assert_eq!(ctl.display().time, "25:00");
    }

    #[test]
    fn reset_statistics_requires_confirmation() {
        let mut ctl = controller();
        run_out(&mut ctl);

        assert!(ctl.reset_statistics(&mut false).is_none());
        assert_eq!(ctl.statistics().completed_sessions(), 1);

        assert!(ctl.reset_statistics(&mut true).is_some());
        assert_eq!(ctl.statistics().completed_sessions(), 0);
        assert_eq!(ctl.statistics().total_minutes(), 0.0);
        assert_eq!(ctl.display().stats, (0, 0));
        assert_eq!(ctl.store().get("pomodoroCount"), Some("0"));
        assert_eq!(ctl.store().get("totalMinutes"), Some("0"));
    }

    #[test]
    fn prompt_text_reaches_confirm() {
        struct Asker(Option<String>);
        impl Confirm for Asker {
            fn confirm(&mut self, prompt: &str) -> bool {
                self.0 = Some(prompt.to_string());
                false
            }
        }
        let mut ctl = controller();
        let mut asker = Asker(None);
        ctl.reset_statistics(&mut asker);
        assert_eq!(asker.0.as_deref(), Some(RESET_STATS_PROMPT));
    }

    #[test]
    fn toggle_view_round_trip() {
        let mut ctl = controller();
        assert!(ctl.show_timer().is_none());
        ctl.toggle_view();
        assert_eq!(ctl.view(), View::Clock);
        ctl.toggle_view();
        assert_eq!(ctl.view(), View::Timer);
    }

    #[test]
    fn failing_store_does_not_disturb_timer() {
        let mut ctl = SessionController::new(
            MemoryStore::failing(),
            ManualTicks::new(),
            NullDisplay,
            SilentNotifier,
        );
        ctl.start();
        while ctl.is_running() {
            ctl.tick();
        }
        assert_eq!(ctl.mode(), Mode::ShortBreak);
        assert_eq!(ctl.statistics().completed_sessions(), 1);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut ctl = controller();
        ctl.start();
        ctl.tick();
        match ctl.snapshot() {
            Event::StateSnapshot {
                mode,
                remaining_secs,
                running,
                ..
            } => {
                assert_eq!(mode, Mode::Study);
                assert_eq!(remaining_secs, 1499);
                assert!(running);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}

//! Application state for the terminal UI.

use pomotick_core::storage::UiConfig;
use pomotick_core::{Database, Event, SessionController, StatsStore};
use tracing::{debug, info};

use super::input::Action;
use super::screen::Screen;
use super::ticks::IntervalTicks;
use crate::notifier::DesktopNotifier;

pub type Controller<S> = SessionController<S, IntervalTicks, Screen, DesktopNotifier>;

pub struct App<S = Database> {
    pub controller: Controller<S>,
    pub monochrome: bool,
    /// Hide borders, statistics and the help line.
    pub fullscreen: bool,
    /// The reset-statistics question is open.
    pub confirming: bool,
    pub should_quit: bool,
    /// One-line feedback shown in the status bar.
    pub status: Option<String>,
}

impl<S: StatsStore> App<S> {
    pub fn new(controller: Controller<S>, ui: &UiConfig) -> Self {
        Self {
            controller,
            monochrome: ui.monochrome,
            fullscreen: ui.fullscreen,
            confirming: false,
            should_quit: false,
            status: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        self.controller.display()
    }

    /// Handle one user action.
    pub fn apply(&mut self, action: Action) -> Option<Event> {
        if action != Action::None {
            debug!(?action, "action");
        }
        let event = match action {
            Action::None => None,
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::Toggle => self.controller.toggle(),
            Action::Reset => {
                self.status = None;
                Some(self.controller.reset())
            }
            Action::AskResetStats => {
                self.confirming = true;
                None
            }
            Action::AnswerResetStats(mut answer) => {
                self.confirming = false;
                let event = self.controller.reset_statistics(&mut answer);
                self.status = Some(if event.is_some() {
                    "Statistics reset".into()
                } else {
                    "Statistics kept".into()
                });
                event
            }
            Action::ShowClock => self.controller.show_clock(),
            Action::ShowTimer => self.controller.show_timer(),
            Action::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                None
            }
            Action::ToggleMonochrome => {
                self.monochrome = !self.monochrome;
                None
            }
        };
        if let Some(event) = &event {
            info!(?event, "session event");
        }
        event
    }

    /// Forward a tick from the tick source.
    pub fn on_tick(&mut self) -> Option<Event> {
        let event = self.controller.tick();
        if let Some(Event::SessionCompleted { next_mode, .. }) = &event {
            self.status = Some(format!("Session complete! Next: {next_mode}"));
        }
        event
    }

    /// Stop the timer so accrued statistics are flushed before exit.
    pub fn shutdown(&mut self) {
        self.controller.stop();
    }
}

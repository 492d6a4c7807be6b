use pomotick_core::{DisplaySink, Mode, View};

/// Display state pushed by the controller and read by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub time: String,
    pub mode: Mode,
    pub running: bool,
    pub completed_sessions: u64,
    pub whole_minutes: u64,
    pub on_break: bool,
    pub view: View,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            time: "00:00".into(),
            mode: Mode::Study,
            running: false,
            completed_sessions: 0,
            whole_minutes: 0,
            on_break: false,
            view: View::Timer,
        }
    }
}

impl Screen {
    /// Label of the start/stop control.
    pub fn control_label(&self) -> &'static str {
        if self.running {
            "Stop"
        } else {
            "Start"
        }
    }
}

impl DisplaySink for Screen {
    fn set_time(&mut self, text: &str) {
        self.time.clear();
        self.time.push_str(text);
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn set_statistics(&mut self, completed_sessions: u64, whole_minutes: u64) {
        self.completed_sessions = completed_sessions;
        self.whole_minutes = whole_minutes;
    }

    fn set_break_indicator(&mut self, on: bool) {
        self.on_break = on;
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
    }
}

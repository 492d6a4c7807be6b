//! Desktop notifications and the completion sound.
//!
//! Both are fire-and-forget: helper processes are spawned detached and
//! reaped on a background thread, and failures are only logged.

use std::io::Write;
use std::process::{Command, Stdio};

use pomotick_core::storage::NotificationsConfig;
use pomotick_core::{Notifier, Permission};
use tracing::{debug, warn};

pub const NOTIFICATION_TITLE: &str = "Pomodoro Timer";

/// Available notification backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Linux notify-send
    NotifySend,
    /// macOS osascript
    Osascript,
    /// Nothing usable found
    Unavailable,
}

impl Backend {
    /// Detect the best available backend for the current platform.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            return Self::Osascript;
        }
        if command_exists("notify-send") {
            return Self::NotifySend;
        }
        Self::Unavailable
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotifySend => "notify-send",
            Self::Osascript => "osascript",
            Self::Unavailable => "none",
        }
    }

    fn command(&self, title: &str, message: &str) -> Option<Command> {
        match self {
            Self::NotifySend => {
                let mut cmd = Command::new("notify-send");
                cmd.args([title, message]);
                Some(cmd)
            }
            Self::Osascript => {
                let script = format!(
                    r#"display notification "{}" with title "{}""#,
                    message.replace('"', r#"\""#),
                    title.replace('"', r#"\""#),
                );
                let mut cmd = Command::new("osascript");
                cmd.args(["-e", &script]);
                Some(cmd)
            }
            Self::Unavailable => None,
        }
    }
}

/// How the completion sound is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sound {
    Off,
    /// ASCII BEL on the controlling terminal.
    Bell,
    /// Play a file through the platform player.
    File(String),
}

impl Sound {
    pub fn from_config(config: &NotificationsConfig) -> Self {
        if !config.sound {
            Self::Off
        } else if config.sound_file.trim().is_empty() {
            Self::Bell
        } else {
            Self::File(config.sound_file.trim().to_string())
        }
    }
}

/// Permission-gated desktop notifier.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    permission: Permission,
    backend: Backend,
    sound: Sound,
}

impl DesktopNotifier {
    pub fn new(permission: Permission, backend: Backend, sound: Sound) -> Self {
        Self {
            permission,
            backend,
            sound,
        }
    }

    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self::new(config.permission, Backend::detect(), Sound::from_config(config))
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Whether a call to `notify` would reach the desktop.
    pub fn can_notify(&self) -> bool {
        self.permission == Permission::Granted && self.backend != Backend::Unavailable
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&mut self, message: &str) {
        if !self.can_notify() {
            debug!(permission = ?self.permission, backend = self.backend.name(), "notification skipped");
            return;
        }
        if let Some(cmd) = self.backend.command(NOTIFICATION_TITLE, message) {
            spawn_detached(cmd);
        }
    }

    fn play_sound(&mut self) {
        match &self.sound {
            Sound::Off => {}
            Sound::Bell => {
                let mut out = std::io::stdout();
                if let Err(e) = out.write_all(b"\x07").and_then(|()| out.flush()) {
                    debug!(error = %e, "terminal bell failed");
                }
            }
            Sound::File(path) => {
                let player = if cfg!(target_os = "macos") { "afplay" } else { "paplay" };
                let mut cmd = Command::new(player);
                cmd.arg(path);
                spawn_detached(cmd);
            }
        }
    }
}

fn spawn_detached(mut cmd: Command) {
    let program = cmd.get_program().to_string_lossy().into_owned();
    match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(mut child) => {
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
        Err(e) => warn!(program, error = %e, "failed to spawn helper"),
    }
}

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

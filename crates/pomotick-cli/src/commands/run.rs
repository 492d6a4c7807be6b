use std::io::{self, IsTerminal};

use pomotick_core::{Config, Confirm, Permission};
use tracing::{info, warn};

use crate::prompt::LineConfirm;
use crate::tui;

pub const NOTIFICATION_PROMPT: &str = "Allow desktop notifications when a session ends?";

/// Ask once for notification permission while it is still undecided.
///
/// Needs an interactive terminal; otherwise the permission stays undecided
/// and notifications stay off.
fn ask_notification_permission<C: Confirm>(config: &mut Config, confirm: &mut C) {
    if config.notifications.permission != Permission::Default {
        return;
    }
    let permission = if confirm.confirm(NOTIFICATION_PROMPT) {
        Permission::Granted
    } else {
        Permission::Denied
    };
    info!(?permission, "notification permission decided");
    config.notifications.permission = permission;
    if let Err(e) = config.save() {
        warn!(error = %e, "could not save notification permission");
    }
}

pub fn run(mut config: Config) -> Result<(), Box<dyn std::error::Error>> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        ask_notification_permission(&mut config, &mut LineConfirm::stdio());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(tui::run(&config))?;
    Ok(())
}

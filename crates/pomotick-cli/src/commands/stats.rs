use clap::Subcommand;
use pomotick_core::{
    Database, ManualTicks, NullDisplay, SessionController, SilentNotifier, Statistics, StatsStore,
};

use crate::prompt::LineConfirm;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Show completed pomodoros and study minutes
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Zero the statistics
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Show { json } => {
            let stats = Statistics::from_stored(db.load()?);
            if json {
                let value = serde_json::json!({
                    "completed_sessions": stats.completed_sessions(),
                    "whole_minutes": stats.whole_minutes(),
                    "total_minutes": stats.total_minutes(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Pomodoros: {}", stats.completed_sessions());
                println!("Study minutes: {}", stats.whole_minutes());
            }
        }
        StatsAction::Reset { yes } => {
            let mut ctl =
                SessionController::new(db, ManualTicks::new(), NullDisplay, SilentNotifier);
            let reset = if yes {
                ctl.reset_statistics(&mut true)
            } else {
                ctl.reset_statistics(&mut LineConfirm::stdio())
            };
            if reset.is_some() {
                println!("statistics reset");
            } else {
                println!("statistics kept");
            }
        }
    }
    Ok(())
}

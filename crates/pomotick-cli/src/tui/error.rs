//! Error types for the terminal UI.

use pomotick_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    /// Raw mode or the alternate screen could not be set up.
    ///
    /// Usually means stdout is not a terminal.
    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    /// The terminal could not be restored; running `reset` can help.
    #[error("Failed to restore terminal: {0}")]
    TerminalCleanup(String),

    #[error("Failed to draw: {0}")]
    Draw(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, TuiError>;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::fs::{File, OpenOptions};

/// Ratatui terminal bound to the controlling tty.
pub type TtyTerminal = Terminal<CrosstermBackend<File>>;

/// Capture of the controlling terminal for interactive editing.
///
/// The message arrives on stdin and stdout may be a pipe (the tool is often
/// spawned from a mail client hook), so the editor talks to /dev/tty
/// directly. Crossterm picks the same device for key events when stdin is
/// not a terminal. Dropping the guard restores the terminal on every exit
/// path, including errors mid-edit.
pub struct TtyGuard {
    tty: File,
}

impl TtyGuard {
    /// Open the controlling terminal and enter raw alternate-screen mode.
    /// Fails when there is no controlling terminal; interactive editing is
    /// impossible then.
    pub fn capture() -> Result<(Self, TtyTerminal)> {
        let tty = OpenOptions::new()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .context("no controlling terminal available")?;

        enable_raw_mode()?;
        // The guard owns the tty from here, so any failure below drops
        // through it and restores the terminal before the error propagates
        let mut guard = Self { tty };

        execute!(guard.tty, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(guard.tty.try_clone()?);
        let terminal = Terminal::new(backend)?;
        Ok((guard, terminal))
    }
}

impl Drop for TtyGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.tty, LeaveAlternateScreen);
    }
}

#![forbid(unsafe_code)]

//! Raw-mode ownership for the dashboard's terminal.
//!
//! A [`TerminalSession`] enters raw mode on creation and restores the
//! terminal when dropped. A process-wide panic hook performs the same
//! restore before the panic message is printed, so a crash never leaves
//! the user's shell in raw mode or on the alternate screen.
//!
//! Restore undoes setup in reverse: paste markers off, cursor shown,
//! alternate screen left, raw mode off, stdout flushed.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crate::event::Event;
use crate::program::EventSource;

/// Terminal features to enable for the session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer, preserving scrollback.
    pub alternate_screen: bool,
    /// Wrap pasted text in bracketed-paste markers.
    pub bracketed_paste: bool,
}

/// Owns raw mode (and optionally the alternate screen) until dropped.
///
/// Only one session should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    alternate_screen_enabled: bool,
    bracketed_paste_enabled: bool,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested features.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled or a feature toggle
    /// cannot be written.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        tracing::debug!("terminal raw mode enabled");

        // From here on Drop restores whatever was enabled, even if a later
        // toggle fails.
        let mut session = Self {
            options: options.clone(),
            alternate_screen_enabled: false,
            bracketed_paste_enabled: false,
        };

        let mut stdout = io::stdout();
        if options.alternate_screen {
            crossterm::execute!(
                stdout,
                crossterm::terminal::EnterAlternateScreen,
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
                crossterm::cursor::MoveTo(0, 0)
            )?;
            session.alternate_screen_enabled = true;
            tracing::debug!("alternate screen enabled");
        }

        if options.bracketed_paste {
            crossterm::execute!(stdout, crossterm::event::EnableBracketedPaste)?;
            session.bracketed_paste_enabled = true;
            tracing::debug!("bracketed paste enabled");
        }

        Ok(session)
    }

    /// Full-screen session: alternate screen plus bracketed paste.
    pub fn fullscreen() -> io::Result<Self> {
        Self::new(SessionOptions {
            alternate_screen: true,
            bracketed_paste: true,
        })
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Current terminal size (columns, rows), never smaller than 2x2.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let (w, h) = crossterm::terminal::size()?;
        Ok((w.max(2), h.max(2)))
    }

    /// Wait up to `timeout` for the next event the dashboard understands.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        Ok(Event::from_crossterm(crossterm::event::read()?))
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.bracketed_paste_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableBracketedPaste);
            self.bracketed_paste_enabled = false;
        }

        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
        }

        let _ = crossterm::terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::debug!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl EventSource for TerminalSession {
    fn size(&self) -> io::Result<(u16, u16)> {
        TerminalSession::size(self)
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        TerminalSession::poll_event(self, timeout)
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

/// Best-effort restore for termination paths that skip `Drop`.
///
/// Call this before `std::process::exit` (or under `panic = "abort"`).
pub fn best_effort_cleanup_for_exit() {
    best_effort_cleanup();
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::terminal::EndSynchronizedUpdate);
    let _ = crossterm::execute!(stdout, crossterm::event::DisableBracketedPaste);
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

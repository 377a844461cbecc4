#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! The program runtime manages the update/view loop, handling events and
//! rendering frames. It separates state (Model) from rendering (View) and
//! provides a command pattern for side effects.
//!
//! # Example
//!
//! ```
//! use bcap_render::Frame;
//! use bcap_runtime::{Cmd, Event, Model};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//!     Ignore,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             Event::Key(k) if k.is_char('+') => Msg::Increment,
//!             _ => Msg::Ignore,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
//!         match msg {
//!             Msg::Increment => {
//!                 self.count += 1;
//!                 Cmd::none()
//!             }
//!             Msg::Quit => Cmd::quit(),
//!             Msg::Ignore => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         let text = format!("count: {}", self.count);
//!         frame.buffer.set_string(0, 0, &text, Default::default(), frame.area().width);
//!     }
//! }
//! ```

use std::io::{self, Stdout, Write};
use std::time::Duration;

use bcap_render::presenter::Presenter;
use bcap_render::{Buffer, Frame};

use crate::event::Event;
use crate::terminal_session::TerminalSession;

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// Messages represent actions that update the model state.
    /// Must be convertible from terminal events.
    type Message: From<Event>;

    /// Called once when the program starts.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);
}

/// Commands represent side effects to be executed by the runtime.
#[derive(Debug)]
pub enum Cmd<M> {
    /// No operation.
    None,
    /// Quit the application.
    Quit,
    /// Execute multiple commands in order.
    Batch(Vec<Cmd<M>>),
    /// Send a message to the model.
    Msg(M),
    /// Record a line in the application log.
    ///
    /// The terminal is owned by the UI, so log lines go to the tracing
    /// subscriber rather than the screen.
    Log(String),
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Create a batch, collapsing empty and single-element batches.
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// Where the runtime reads input and terminal size from.
///
/// [`TerminalSession`] is the real source; tests drive the loop with a
/// scripted one.
pub trait EventSource {
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Wait up to `timeout` for the next event.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Configuration for the program runtime.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Input poll timeout.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(100),
        }
    }
}

/// The program runtime that manages the update/view loop.
pub struct Program<M: Model, S: EventSource, W: Write = Stdout> {
    model: M,
    source: S,
    presenter: Presenter<W>,
    config: ProgramConfig,
    running: bool,
    dirty: bool,
    size: (u16, u16),
    /// Last presented buffer; `None` forces a full redraw.
    previous: Option<Buffer>,
}

impl<M: Model> Program<M, TerminalSession, Stdout> {
    /// Take over the terminal (alternate screen, raw mode) and build a
    /// program that renders to stdout.
    pub fn fullscreen(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::fullscreen()?;
        Self::with_source(model, session, io::stdout(), config)
    }
}

impl<M: Model, S: EventSource, W: Write> Program<M, S, W> {
    pub fn with_source(model: M, source: S, writer: W, config: ProgramConfig) -> io::Result<Self> {
        let size = source.size()?;
        Ok(Self {
            model,
            source,
            presenter: Presenter::new(writer),
            config,
            running: true,
            dirty: true,
            size,
            previous: None,
        })
    }

    /// Run until the model returns [`Cmd::Quit`].
    pub fn run(&mut self) -> io::Result<()> {
        tracing::info!(width = self.size.0, height = self.size.1, "program started");
        let cmd = self.model.init();
        self.execute_cmd(cmd);

        while self.running {
            if self.dirty {
                self.render_frame()?;
            }
            let Some(event) = self.source.poll_event(self.config.poll_timeout)? else {
                continue;
            };
            self.handle_event(event);
        }

        tracing::info!("program stopped");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            self.size = (width.max(1), height.max(1));
            self.previous = None;
            tracing::debug!(width, height, "terminal resized");
        }
        let cmd = self.model.update(M::Message::from(event));
        self.dirty = true;
        self.execute_cmd(cmd);
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.dirty = true;
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Log(text) => tracing::info!(target: "bcap_runtime::log", "{text}"),
        }
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let (width, height) = self.size;
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        let changed = self.presenter.present(self.previous.as_ref(), &frame)?;
        tracing::trace!(changed, "frame presented");
        self.previous = Some(frame.buffer);
        self.dirty = false;
        Ok(())
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Hand back the model, e.g. to inspect its final state.
    pub fn into_model(self) -> M {
        self.model
    }
}

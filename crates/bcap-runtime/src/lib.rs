#![forbid(unsafe_code)]

//! Runtime loop for the battery capacity dashboard.
//!
//! A [`Model`] owns application state, turns [`Event`]s into messages, and
//! draws itself into a [`Frame`](bcap_render::Frame). The [`Program`] polls
//! input from an [`EventSource`], feeds the model, executes the returned
//! [`Cmd`]s, and presents changed cells through the render presenter.

pub mod event;
pub mod program;
pub mod terminal_session;

pub use event::{Event, KeyCode, KeyEvent, Modifiers};
pub use program::{Cmd, EventSource, Model, Program, ProgramConfig};
pub use terminal_session::{SessionOptions, TerminalSession, best_effort_cleanup_for_exit};

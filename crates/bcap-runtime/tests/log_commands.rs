//! `Cmd::Log` lines reach the tracing subscriber, never the screen.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bcap_render::Frame;
use bcap_runtime::{Cmd, Event, EventSource, KeyCode, KeyEvent, Model, Program, ProgramConfig};

#[derive(Clone, Default)]
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct Logger;

enum Msg {
    Announce,
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(k) if k.is_char('q') => Msg::Quit,
            _ => Msg::Announce,
        }
    }
}

impl Model for Logger {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Announce => Cmd::log("prediction requested"),
            Msg::Quit => Cmd::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        frame.buffer.set_string(0, 0, "ui", Default::default(), 10);
    }
}

struct Keys(VecDeque<Event>);

impl EventSource for Keys {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((10, 1))
    }

    fn poll_event(&mut self, _timeout: Duration) -> io::Result<Option<Event>> {
        Ok(self.0.pop_front())
    }
}

#[test]
fn log_command_goes_to_subscriber() {
    let logs = SharedWriter::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .finish();

    let keys = Keys(
        [KeyCode::Enter, KeyCode::Char('q')]
            .into_iter()
            .map(|code| Event::Key(KeyEvent::new(code)))
            .collect(),
    );
    let screen = SharedWriter::default();

    tracing::subscriber::with_default(subscriber, || {
        let mut program = Program::with_source(Logger, keys, screen.clone(), ProgramConfig::default())
            .expect("program");
        program.run().expect("run");
    });

    let logged = String::from_utf8(logs.0.lock().expect("lock").clone()).expect("utf8");
    assert!(logged.contains("prediction requested"));
    let shown = String::from_utf8(screen.0.lock().expect("lock").clone()).expect("utf8");
    assert!(!shown.contains("prediction requested"));
}

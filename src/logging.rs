//! Routes `tracing` events to the browser console.

use std::io;

use tracing::Level;

use crate::util::clog;

/// Collects one formatted event and hands it to `sink` as a single line when dropped.
pub struct ConsoleWriter {
    buf: Vec<u8>,
    sink: fn(&str),
}

impl ConsoleWriter {
    pub fn new(sink: fn(&str)) -> Self {
        Self { buf: Vec::new(), sink }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        (self.sink)(line.trim_end());
    }
}

/// Plain-text subscriber writing through `sink`. No timestamps: the wasm
/// target has no system clock.
pub fn console_subscriber(sink: fn(&str)) -> impl tracing::Subscriber + Send + Sync + 'static {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(move || ConsoleWriter::new(sink))
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .finish()
}

/// Installs the console subscriber as the global default.
pub fn init() {
    if let Err(e) = tracing::subscriber::set_global_default(console_subscriber(clog)) {
        clog(&format!("logging already initialized: {e}"));
    }
}

//! Tracing subscriber that writes to the browser console.

use gloo::console;
use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

pub(crate) struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
        if line.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => console::error!(line),
            Level::WARN => console::warn!(line),
            Level::INFO => console::info!(line),
            _ => console::debug!(line),
        }
    }
}

pub(crate) struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Install the global subscriber once.
pub(crate) fn init_logging(max_level: Level) {
    let subscriber = tracing_subscriber::fmt()
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_max_level(max_level)
        .with_writer(ConsoleMakeWriter)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        console::warn!("tracing subscriber already installed");
    }
}

//! Serialized solution output
//!
//! Workers render solutions into their own buffers and hand complete lines to
//! the [`SolutionPrinter`], which writes each line under a single lock so
//! lines from different workers never interleave.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::expr::PrintStyle;

pub struct SolutionPrinter {
    style: PrintStyle,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl SolutionPrinter {
    /// Printer writing to buffered standard output
    pub fn stdout(style: PrintStyle) -> Self {
        Self::new(style, Box::new(io::BufWriter::new(io::stdout())))
    }

    pub fn new(style: PrintStyle, sink: Box<dyn Write + Send>) -> Self {
        Self {
            style,
            sink: Mutex::new(sink),
        }
    }

    pub fn style(&self) -> PrintStyle {
        self.style
    }

    /// Write one line; `line` must not carry its own newline
    pub fn emit(&self, line: &str) -> io::Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::other("solution output lock poisoned"))?;
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")
    }

    pub fn flush(&self) -> io::Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::other("solution output lock poisoned"))?;
        sink.flush()
    }
}

impl std::fmt::Debug for SolutionPrinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolutionPrinter")
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// In-memory sink shared between a printer and a test
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(pub std::sync::Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8(bytes.clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

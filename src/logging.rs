//! Tracing setup. Console mode sends log lines to the TUI log panel instead of
//! stderr, which the alternate screen would otherwise garble.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// Bounded, shared buffer of formatted log lines.
#[derive(Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push_back(line.into());
            while lines.len() > self.capacity {
                lines.pop_front();
            }
        }
    }

    /// The most recent `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().skip(lines.len().saturating_sub(n)).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Collects one event's output and commits it on drop.
pub struct LineWriter {
    buffer: LogBuffer,
    pending: Vec<u8>,
}

impl io::Write for LineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.pending);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            self.buffer.push(line);
        }
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LineWriter {
            buffer: self.clone(),
            pending: Vec::new(),
        }
    }
}

/// Install the global subscriber. Without a buffer, logs go to stderr.
pub fn init(log_level: &str, buffer: Option<LogBuffer>) {
    let filter = log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    let builder = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false);

    match buffer {
        Some(buffer) => builder.with_ansi(false).with_writer(buffer).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_buffer_keeps_most_recent_lines() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {i}"));
        }
        assert_eq!(buffer.tail(10), ["line 2", "line 3", "line 4"]);
        assert_eq!(buffer.tail(1), ["line 4"]);
    }

    #[test]
    fn test_writer_commits_lines_on_drop() {
        let buffer = LogBuffer::new(10);
        {
            let mut w = buffer.make_writer();
            w.write_all(b" INFO loaded page\n").unwrap();
            w.write_all(b" WARN remote failed\n\n").unwrap();
            assert!(buffer.tail(10).is_empty());
        }
        assert_eq!(buffer.tail(10), [" INFO loaded page", " WARN remote failed"]);
    }
}

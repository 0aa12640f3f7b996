//! Diff report storage and emission.
//!
//! A [`Report`] is the ordered list of mismatch descriptions a comparison pass
//! produced. Emitting it goes through a [`ReportSink`] so the caller decides
//! where the text ends up: a writer (stderr, a file), the `log` facade, or a
//! plain `Vec<String>` for assertions.

use std::{fmt, io::Write};

use anyhow::Context;

/// Ordered, append-only collection of diff messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`. Empty messages are dropped.
    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        if entry.is_empty() {
            return;
        }
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Feed every entry to `sink` in insertion order. Nothing is written for an empty report.
    pub fn emit(&self, sink: &mut dyn ReportSink) -> anyhow::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        for entry in &self.entries {
            sink.write_entry(entry)?;
        }
        sink.finish()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One entry per line followed by a blank line, the same text `WriterSink` produces.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f)
    }
}

/// Destination for an emitted report.
pub trait ReportSink {
    fn write_entry(&mut self, entry: &str) -> anyhow::Result<()>;

    /// Called once after the last entry of a non-empty report.
    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl ReportSink for Vec<String> {
    fn write_entry(&mut self, entry: &str) -> anyhow::Result<()> {
        self.push(entry.to_string());
        Ok(())
    }
}

/// Writes newline separated entries and a terminating blank line to any `io::Write`.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn write_entry(&mut self, entry: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{entry}").context("Failed to write report entry")
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer).context("Failed to terminate report")?;
        self.writer.flush().context("Failed to flush report")
    }
}

/// Forwards each entry as one `log` record.
pub struct LogSink {
    level: log::Level,
}

impl LogSink {
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(log::Level::Warn)
    }
}

impl ReportSink for LogSink {
    fn write_entry(&mut self, entry: &str) -> anyhow::Result<()> {
        log::log!(self.level, "{entry}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(entries: &[&str]) -> Report {
        let mut report = Report::new();
        for entry in entries {
            report.push(*entry);
        }
        report
    }

    #[test]
    fn empty_entries_are_dropped() {
        let report = report(&["first", "", "second"]);
        assert_eq!(report.entries(), ["first", "second"]);
        let walked: Vec<&str> = (&report).into_iter().map(String::as_str).collect();
        assert_eq!(walked, ["first", "second"]);
    }

    #[test]
    fn writer_sink_terminates_with_blank_line() {
        let mut sink = WriterSink::new(Vec::new());
        report(&["a", "b"]).emit(&mut sink).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "a\nb\n\n");
    }

    #[test]
    fn empty_report_writes_nothing() {
        let mut sink = WriterSink::new(Vec::new());
        Report::new().emit(&mut sink).unwrap();
        assert!(sink.into_inner().is_empty());
        assert_eq!(Report::new().to_string(), "");
    }

    #[test]
    fn display_matches_writer_output() {
        let report = report(&["x", "y"]);
        let mut sink = WriterSink::new(Vec::new());
        report.emit(&mut sink).unwrap();
        assert_eq!(report.to_string().into_bytes(), sink.into_inner());
    }

    #[test]
    fn collecting_sink_keeps_order() {
        let mut collected: Vec<String> = Vec::new();
        report(&["1", "2", "3"]).emit(&mut collected).unwrap();
        assert_eq!(collected, ["1", "2", "3"]);
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_errors_propagate() {
        let mut sink = WriterSink::new(BrokenWriter);
        assert!(report(&["a"]).emit(&mut sink).is_err());
    }
}

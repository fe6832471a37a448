//! Presentation surfaces.
//!
//! The runner reports through a [`Presentation`] implementation: it opens a
//! group, streams one record per reported outcome into the group's handle,
//! and closes it. Hosts decide when results become visible by calling
//! [`Presentation::reveal`]; the runner never does.

use std::io::{self, Write};

use crate::result::{ResultRecord, RunSummary, Status};

/// Consumer of result notifications.
pub trait Presentation {
    /// Per-group reporting handle returned by [`Presentation::begin_group`].
    type Group;

    fn begin_group(&mut self, name: &str) -> Self::Group;

    fn report_result(&mut self, group: &mut Self::Group, record: &ResultRecord);

    fn end_group(&mut self, group: Self::Group);

    /// Make accumulated results visible.
    fn reveal(&mut self) {}
}

// ResultLog

/// A group as recorded by [`ResultLog`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoggedGroup {
    pub name: String,
    /// Set once any reported record in the group failed.
    pub failed: bool,
    /// Whether `end_group` was called for this group.
    pub closed: bool,
    pub results: Vec<ResultRecord>,
}

impl LoggedGroup {
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.description.as_str())
    }
}

/// Handle into a [`ResultLog`] group.
#[derive(Debug)]
pub struct LogGroup {
    index: usize,
}

/// In-memory recorder of the reported record stream.
#[derive(Clone, Debug, Default)]
pub struct ResultLog {
    groups: Vec<LoggedGroup>,
    revealed: bool,
}

impl ResultLog {
    pub fn new() -> Self {
        ResultLog::default()
    }

    pub fn groups(&self) -> &[LoggedGroup] {
        &self.groups
    }

    /// First logged group named `name`.
    pub fn group(&self, name: &str) -> Option<&LoggedGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn failed_groups(&self) -> impl Iterator<Item = &LoggedGroup> {
        self.groups.iter().filter(|g| g.failed)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

impl Presentation for ResultLog {
    type Group = LogGroup;

    fn begin_group(&mut self, name: &str) -> LogGroup {
        self.groups.push(LoggedGroup {
            name: name.to_string(),
            ..LoggedGroup::default()
        });
        LogGroup {
            index: self.groups.len() - 1,
        }
    }

    fn report_result(&mut self, group: &mut LogGroup, record: &ResultRecord) {
        if let Some(logged) = self.groups.get_mut(group.index) {
            logged.failed |= record.is_failed();
            logged.results.push(record.clone());
        }
    }

    fn end_group(&mut self, group: LogGroup) {
        if let Some(logged) = self.groups.get_mut(group.index) {
            logged.closed = true;
        }
    }

    fn reveal(&mut self) {
        self.revealed = true;
    }
}

// ConsoleSurface

/// Handle for a group being rendered by [`ConsoleSurface`].
#[derive(Debug)]
pub struct ConsoleGroup {
    name: String,
    failed: bool,
    lines: Vec<String>,
}

/// Line-oriented text surface.
///
/// Output is buffered until [`Presentation::reveal`], then written to the
/// sink in one go. Groups with a failure are always shown; passing groups
/// and pass lines only when `verbose` is set.
pub struct ConsoleSurface<W: Write> {
    sink: W,
    verbose: bool,
    pending: String,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(sink: W) -> Self {
        ConsoleSurface {
            sink,
            verbose: false,
            pending: String::new(),
        }
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Text buffered since the last reveal.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Buffer the closing summary block for `summary`.
    pub fn summarize(&mut self, summary: &RunSummary) {
        self.pending.push_str("\nTest Summary:\n");
        self.pending.push_str(&format!("  {summary}\n"));
        self.pending.push_str(&format!("  Completed in {:.2?}\n\n", summary.duration));
        let verdict = if summary.has_failures() {
            "FAILED"
        } else if summary.passed == 0 {
            "NO TESTS RAN"
        } else {
            "OK"
        };
        self.pending.push_str(verdict);
        self.pending.push('\n');
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_pending(&mut self) -> io::Result<()> {
        self.sink.write_all(self.pending.as_bytes())?;
        self.sink.flush()
    }
}

impl<W: Write> Presentation for ConsoleSurface<W> {
    type Group = ConsoleGroup;

    fn begin_group(&mut self, name: &str) -> ConsoleGroup {
        ConsoleGroup {
            name: name.to_string(),
            failed: false,
            lines: Vec::new(),
        }
    }

    fn report_result(&mut self, group: &mut ConsoleGroup, record: &ResultRecord) {
        match (&record.status, &record.error) {
            (Status::Fail, Some(error)) => {
                group.failed = true;
                group
                    .lines
                    .push(format!("  FAIL: {} - {error}", record.description));
            }
            (Status::Fail, None) => {
                group.failed = true;
                group.lines.push(format!("  FAIL: {}", record.description));
            }
            (Status::Pass, _) => {
                if self.verbose {
                    group.lines.push(format!("  PASS: {}", record.description));
                }
            }
        }
    }

    fn end_group(&mut self, group: ConsoleGroup) {
        if !(self.verbose || group.failed) {
            return;
        }
        let marker = if group.failed { "[FAIL]" } else { "[pass]" };
        self.pending.push_str(&format!("{} {marker}\n", group.name));
        for line in &group.lines {
            self.pending.push_str(line);
            self.pending.push('\n');
        }
    }

    fn reveal(&mut self) {
        if let Err(error) = self.write_pending() {
            tracing::warn!(%error, "failed to write test results");
            return;
        }
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests;

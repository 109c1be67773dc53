//! Reporter that writes error messages to a byte stream.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::report::{ReportContext, ReportMetadata, Reporter, SharedError};

/// Writes `"{err}\n"` for every reported error.
///
/// A reporter without a writer discards everything. Write failures are
/// logged and otherwise ignored.
pub struct WriterReporter<W = io::Stderr> {
    writer: Option<Mutex<W>>,
}

impl<W> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(Mutex::new(writer)),
        }
    }

    /// A reporter with no output stream.
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn into_inner(self) -> Option<W> {
        self.writer
            .map(|writer| writer.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

impl WriterReporter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W> Default for WriterReporter<W> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<W: Write> WriterReporter<W> {
    fn write_line(&self, err: &SharedError) {
        let Some(writer) = &self.writer else {
            return;
        };
        let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{}", err).and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "Failed to write error report");
        }
    }
}

#[async_trait]
impl<W: Write + Send + 'static> Reporter for WriterReporter<W> {
    async fn report(&self, _ctx: &ReportContext, err: SharedError, _metadata: Option<ReportMetadata>) {
        self.write_line(&err);
    }
}

impl<W> fmt::Debug for WriterReporter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterReporter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

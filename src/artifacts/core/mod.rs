//! Terminal output helpers
//!
//! Long command output (a big `log`, a scenario replay) can be routed
//! through the `minus` pager instead of stdout.

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter over the minus pager
///
/// ```ignore
/// let mut writer = PagerWriter::new(Pager::new());
/// writeln!(writer, "{}", line)?;
/// writer.show()?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Display everything written so far and block until the user quits
    pub fn show(self) -> anyhow::Result<()> {
        minus::page_all(self.pager)?;
        Ok(())
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output sink chosen at startup: plain stdout or the pager
pub enum OutputSink {
    Stdout(io::Stdout),
    Pager(PagerWriter),
}

impl OutputSink {
    pub fn stdout() -> Self {
        OutputSink::Stdout(io::stdout())
    }

    pub fn pager() -> Self {
        OutputSink::Pager(PagerWriter::new(Pager::new()))
    }

    /// Flush stdout, or hand the collected text to the pager
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            OutputSink::Stdout(mut stdout) => Ok(stdout.flush()?),
            OutputSink::Pager(writer) => writer.show(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(stdout) => stdout.write(buf),
            OutputSink::Pager(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(stdout) => stdout.flush(),
            OutputSink::Pager(writer) => writer.flush(),
        }
    }
}

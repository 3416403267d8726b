use std::io::Write;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;

/// Opens an external link on the user's behalf.
///
/// Anything the opener prints goes to `out`, never straight to stdout.
pub trait LinkOpener {
    fn open(
        &self,
        url: &str,
        out: &mut dyn Write,
    ) -> Result<()>;
}

/// Prints the link instead of launching a browser.
#[derive(Debug, Default)]
pub struct PrintLinkOpener;

impl LinkOpener for PrintLinkOpener {
    fn open(
        &self,
        url: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        info!(url, "opening link");
        writeln!(out, "Open in your browser: {url}").context("Writing link")
    }
}

/// Remembers every URL it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingLinkOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingLinkOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

impl LinkOpener for RecordingLinkOpener {
    fn open(
        &self,
        url: &str,
        _out: &mut dyn Write,
    ) -> Result<()> {
        self.opened
            .lock()
            .map_err(|_| anyhow::anyhow!("link recorder poisoned"))?
            .push(url.to_string());
        Ok(())
    }
}

use std::io::Write;

use tracing::warn;

use crate::application::services::HostSurface;

/// Host surface for the CLI: "opening" a URL prints it on stdout so it can
/// be piped, alerts go to stderr.
#[derive(Debug, Default)]
pub struct TerminalHost;

impl HostSurface for TerminalHost {
    fn open_url(&self, url: &str) {
        let mut stdout = std::io::stdout().lock();
        if writeln!(stdout, "{}", url).is_err() {
            warn!("Could not write URL to stdout");
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

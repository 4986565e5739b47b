//! Small side-effecting helpers used by the CLI.

use anyhow::Result;
use tracing::debug;

use crate::output::{print_success, print_warning};

/// Open a URL in the default browser
///
/// Failing to launch a browser is not fatal: the URL is printed so the user
/// can open it by hand.
pub fn open_url_in_browser(url: &str) -> Result<()> {
  debug!("Opening {url} in browser");

  match open::that(url) {
    Ok(()) => {
      print_success(&format!("Opened: {url}"));
      Ok(())
    }
    Err(e) => {
      print_warning(&format!("Failed to open browser to {url}: {e}"));
      Ok(())
    }
  }
}

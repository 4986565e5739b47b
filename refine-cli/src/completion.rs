//! # Shell Completion
//!
//! Generates shell completion scripts so `refine` subcommands and flags tab
//! complete in bash, zsh, fish and PowerShell.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::Cli;

/// Generate shell completions for the specified shell
pub fn generate_completions(shell: clap_complete::Shell) -> Result<()> {
  let mut cmd = Cli::command();
  let app_name = cmd.get_name().to_string();

  generate(shell, &mut cmd, app_name, &mut io::stdout());

  Ok(())
}

#[cfg(test)]
mod tests {
  use clap_complete::Shell;

  use super::generate_completions;

  #[test]
  fn test_generate_completions_succeeds() {
    let shells = [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

    for shell in shells {
      let result = generate_completions(shell);
      assert!(result.is_ok(), "Failed to generate completions for {:?}", shell);
    }
  }
}

//! # Config Command

use anyhow::Result;
use clap::{Args, Subcommand};
use refine_core::config::{get_config_dirs, load_dotenv};
use refine_core::output::{print_header, print_info};
use refine_core::{IssueKeyMode, RefineConfig};

/// Inspect configuration
#[derive(Args)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Print the resolved configuration
  Show {
    /// Print as TOML, suitable for config.toml
    #[arg(long)]
    toml: bool,
  },

  /// Print the location of config.toml
  Path,
}

pub(crate) fn handle_config_command(config: ConfigArgs) -> Result<()> {
  match config.subcommand {
    ConfigSubcommands::Show { toml } => handle_show_command(toml),
    ConfigSubcommands::Path => {
      println!("{}", get_config_dirs()?.config_path().display());
      Ok(())
    }
  }
}

fn handle_show_command(as_toml: bool) -> Result<()> {
  let env_file = load_dotenv();
  let dirs = get_config_dirs()?;
  let config = RefineConfig::resolve(dirs.load_file_config()?, refine_core::config::env_lookup)?;

  if as_toml {
    print!("{}", toml::to_string_pretty(&config)?);
    return Ok(());
  }

  print_header("Configuration");
  println!("  Jira site:      {}", config.base_url);
  println!(
    "  Project key:    {}",
    if config.project_key.is_empty() {
      "(not set)"
    } else {
      config.project_key.as_str()
    }
  );
  println!("  Backlog JQL:    {}", config.backlog_jql);
  println!(
    "  Issue keys:     {}",
    match config.issue_key_mode {
      IssueKeyMode::Strict => "strict",
      IssueKeyMode::Flexible => "flexible",
    }
  );

  print_header("Sources");
  let config_path = dirs.config_path();
  println!(
    "  Config file:    {}{}",
    config_path.display(),
    if config_path.exists() { "" } else { " (not found)" }
  );
  match env_file {
    Some(path) => println!("  Env file:       {}", path.display()),
    None => print_info("No .env file loaded"),
  }
  Ok(())
}

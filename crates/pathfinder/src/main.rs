use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pathfinder::cli::{commands, prompt, OutputFormat};
use pathfinder::config::{Overrides, Settings};
use pathfinder::logging;
use pathfinder::profile::ProfileInput;

#[derive(Parser)]
#[command(name = "pathfinder")]
#[command(
  about = "Pathfinder - Internship Recommendations\nFind internships that fit your education, skills and location"
)]
#[command(version)]
struct Cli {
  #[command(flatten)]
  global: GlobalArgs,

  #[command(subcommand)]
  command: Command,
}

#[derive(Args)]
struct GlobalArgs {
  /// Base URL of the recommendation service
  #[arg(long, global = true, env = "PATHFINDER_API_URL")]
  api_url: Option<String>,

  /// Request timeout in seconds
  #[arg(long, global = true, env = "PATHFINDER_TIMEOUT_SECS")]
  timeout: Option<u64>,

  /// Path to a YAML config file
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
  format: OutputFormat,

  /// Disable colored output
  #[arg(long, global = true)]
  no_color: bool,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Command {
  /// Find internships matching your profile
  Search {
    /// Education level (12th, UG, BTech, PG)
    #[arg(short, long)]
    education: Option<String>,
    /// Skills, comma separated
    #[arg(short, long)]
    skills: Option<String>,
    /// Preferred location
    #[arg(short, long)]
    location: Option<String>,
    /// Ask for any field not given on the command line
    #[arg(short, long)]
    interactive: bool,
  },
  /// Check that the recommendation service is running
  Health,
  /// Show catalog statistics
  Stats,
  /// List every internship in the catalog
  Internships,
  /// Inspect or rebuild the service's embeddings
  Embeddings {
    #[command(subcommand)]
    action: EmbeddingsAction,
  },
}

#[derive(Subcommand)]
enum EmbeddingsAction {
  /// Show embedding coverage
  Status,
  /// Force recomputation of all embeddings
  Recompute,
}

async fn handle(command: Command, settings: &Settings, format: OutputFormat) -> Result<()> {
  let client = commands::client_from(settings)?;

  match command {
    Command::Search { education, skills, location, interactive } => {
      let mut input = ProfileInput { education, skills, location };
      if interactive {
        let stdin = std::io::stdin();
        input = prompt::complete_profile(input, &mut stdin.lock(), &mut std::io::stderr())?;
      }
      commands::search(&client, input, format).await
    }
    Command::Health => commands::health(&client).await,
    Command::Stats => commands::stats(&client, format).await,
    Command::Internships => commands::internships(&client, format).await,
    Command::Embeddings { action: EmbeddingsAction::Status } => {
      commands::embeddings_status(&client, format).await
    }
    Command::Embeddings { action: EmbeddingsAction::Recompute } => {
      commands::recompute_embeddings(&client).await
    }
  }
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  logging::init(cli.global.verbose);

  let overrides = Overrides {
    api_url: cli.global.api_url.clone(),
    timeout_secs: cli.global.timeout,
    no_color: cli.global.no_color,
  };

  let result = match Settings::load(cli.global.config.as_deref()) {
    Ok(settings) => {
      let settings = settings.apply_overrides(overrides);
      if !settings.color {
        colored::control::set_override(false);
      }
      handle(cli.command, &settings, cli.global.format).await
    }
    Err(e) => Err(e.into()),
  };

  if let Err(e) = result {
    logging::error(&format!("{e:#}"));
    std::process::exit(1);
  }
}

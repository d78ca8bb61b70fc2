//! Command line front end
//!
//! The search form and the results view of the client, plus thin wrappers
//! over the service's catalog and embedding endpoints.

pub mod commands;
pub mod prompt;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Pretty,
  Json,
}

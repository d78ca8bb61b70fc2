//! Logging setup and user-facing status lines
//!
//! Diagnostics go through `tracing`; short status lines for the person at the
//! terminal go to stderr with a colored bracketed prefix.

use colored::*;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Install the tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) {
  let default_filter = if verbose { "pathfinder=debug,info" } else { "pathfinder=warn,error" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  // Already installed when called twice (e.g. from tests)
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter)
    .try_init()
    .ok();
}

/// Format a colored prefix padded to a fixed width
fn format_prefix(color: Color, prefix: &str) -> String {
  format!("[{}]{:<width$}", prefix.color(color).bold(), "", width = 7usize.saturating_sub(prefix.len() + 2))
}

fn emit(color: Color, prefix: &str, message: &str) {
  let prefix = format_prefix(color, prefix);
  for line in message.lines() {
    eprintln!("{prefix} {line}");
  }
}

pub fn info(message: &str) {
  emit(Color::Blue, "info", message);
}

pub fn warn(message: &str) {
  emit(Color::Yellow, "warn", message);
}

pub fn error(message: &str) {
  emit(Color::Red, "error", message);
}

pub fn success(message: &str) {
  emit(Color::Green, "sccs", message);
}

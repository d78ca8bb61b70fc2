//! Profile collection
//!
//! Turns whatever the user typed into the request payload. Nothing is
//! validated here: empty skills travel to the service as-is and any rejection
//! comes back as a validation error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of recommendations requested per search
pub const DEFAULT_TOP_K: u32 = 4;

pub const DEFAULT_LOCATION: &str = "remote";

/// Education levels understood by the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
  #[serde(rename = "12th")]
  TwelfthGrade,
  #[default]
  #[serde(rename = "UG")]
  Undergraduate,
  #[serde(rename = "BTech")]
  BTech,
  #[serde(rename = "PG")]
  Postgraduate,
}

impl Education {
  pub const ALL: [Education; 4] =
    [Education::TwelfthGrade, Education::Undergraduate, Education::BTech, Education::Postgraduate];

  pub fn as_str(&self) -> &'static str {
    match self {
      Education::TwelfthGrade => "12th",
      Education::Undergraduate => "UG",
      Education::BTech => "BTech",
      Education::Postgraduate => "PG",
    }
  }

  /// Case-insensitive lookup by wire name
  pub fn parse(text: &str) -> Option<Self> {
    let wanted = text.trim();
    Self::ALL.into_iter().find(|level| level.as_str().eq_ignore_ascii_case(wanted))
  }
}

impl fmt::Display for Education {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Raw, unvalidated form input
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
  pub education: Option<String>,
  pub skills: Option<String>,
  pub location: Option<String>,
}

/// The submitted profile, sent verbatim as the request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub education: Education,
  pub skills: String,
  pub location: String,
  pub top_k: u32,
}

/// Builds profiles from form input and hands them to a submit callback
pub struct ProfileCollector<F>
where
  F: FnMut(&Profile),
{
  on_submit: F,
}

impl<F> ProfileCollector<F>
where
  F: FnMut(&Profile),
{
  pub fn new(on_submit: F) -> Self {
    Self { on_submit }
  }

  /// Apply defaults, notify the callback and return the profile
  pub fn submit(&mut self, raw: ProfileInput) -> Profile {
    let profile = build_profile(raw);
    (self.on_submit)(&profile);
    profile
  }
}

/// Apply form defaults without any callback
pub fn build_profile(raw: ProfileInput) -> Profile {
  let education = raw
    .education
    .as_deref()
    .filter(|text| !text.trim().is_empty())
    .and_then(Education::parse)
    .unwrap_or_default();

  let location = match raw.location {
    Some(location) if !location.trim().is_empty() => location,
    _ => DEFAULT_LOCATION.to_string(),
  };

  Profile { education, skills: raw.skills.unwrap_or_default(), location, top_k: DEFAULT_TOP_K }
}

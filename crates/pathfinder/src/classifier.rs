//! Result classification
//!
//! Annotates a service result list for display: which results satisfy the
//! user's location preference, which status banner applies, which match
//! quality badge each result earns, and a one-line justification. Pure and
//! deterministic. Missing optional fields count as "no signal" and never fail.

use serde::Serialize;
use std::fmt;

use crate::model::{MatchDetails, Recommendation};

const REMOTE: &str = "remote";

/// Both location signals, kept side by side so disagreements stay visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocationSignal {
  /// `match_details.location_match` as reported by the service
  pub server: bool,
  /// Client-side string heuristic
  pub heuristic: bool,
}

impl LocationSignal {
  /// The server flag is authoritative; the heuristic can only add matches
  pub fn is_match(&self) -> bool {
    self.server || self.heuristic
  }
}

fn is_remote(text: &str) -> bool {
  text.trim().eq_ignore_ascii_case(REMOTE)
}

/// Lenient, symmetric location comparison
pub fn location_heuristic(result_location: &str, user_location: &str) -> bool {
  if is_remote(result_location) || is_remote(user_location) {
    return true;
  }

  let result_location = result_location.trim().to_lowercase();
  let user_location = user_location.trim().to_lowercase();
  if result_location.is_empty() || user_location.is_empty() {
    return false;
  }

  result_location.contains(&user_location) || user_location.contains(&result_location)
}

pub fn location_signal(result: &Recommendation, user_location: &str) -> LocationSignal {
  LocationSignal {
    server: result.match_details.as_ref().is_some_and(|details| details.location_match),
    heuristic: location_heuristic(&result.location, user_location),
  }
}

pub fn is_location_match(result: &Recommendation, user_location: &str) -> bool {
  location_signal(result, user_location).is_match()
}

/// Status banner shown above a non-empty result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusBanner {
  /// Some results match the location, some don't
  Mixed { matches: usize, others: usize, location: String },
  /// Every result matches the location
  Success { matches: usize, location: String },
  /// Nothing matches the location
  NoLocalMatches { total: usize, location: String },
}

impl StatusBanner {
  /// Pick the banner for a partition; `None` when no preference was given
  pub fn select(matches: usize, others: usize, user_location: &str) -> Option<Self> {
    let location = user_location.trim();
    if location.is_empty() {
      return None;
    }

    let location = location.to_string();
    Some(match (matches, others) {
      (0, others) => StatusBanner::NoLocalMatches { total: others, location },
      (matches, 0) => StatusBanner::Success { matches, location },
      (matches, others) => StatusBanner::Mixed { matches, others, location },
    })
  }

  pub fn message(&self) -> String {
    match self {
      StatusBanner::Mixed { matches, others, location } => format!(
        "Found {matches} {} in or near {location}, plus {others} {} elsewhere you may like.",
        plural(*matches, "internship", "internships"),
        plural(*others, "option", "options"),
      ),
      StatusBanner::Success { matches, location } => format!(
        "Great news! {} {matches} {} {} your preferred location: {location}.",
        if *matches == 1 { "The" } else { "All" },
        plural(*matches, "recommendation", "recommendations"),
        plural(*matches, "matches", "match"),
      ),
      StatusBanner::NoLocalMatches { location, .. } => format!(
        "No internships found in {location} right now. Showing the best matches from other locations."
      ),
    }
  }
}

/// Match quality label, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MatchQuality {
  Perfect,
  Excellent,
  Good,
  Skill,
}

impl MatchQuality {
  pub fn label(&self) -> &'static str {
    match self {
      MatchQuality::Perfect => "Perfect Match",
      MatchQuality::Excellent => "Excellent Match",
      MatchQuality::Good => "Good Match",
      MatchQuality::Skill => "Skill Match",
    }
  }
}

/// First satisfied rule wins
pub fn match_quality(details: &MatchDetails) -> Option<MatchQuality> {
  let exact = details.exact_skill_matches;
  if exact >= 2 && details.education_match && details.location_match {
    Some(MatchQuality::Perfect)
  } else if exact >= 2 && details.education_match {
    Some(MatchQuality::Excellent)
  } else if exact >= 1 && details.education_match {
    Some(MatchQuality::Good)
  } else if exact >= 1 {
    Some(MatchQuality::Skill)
  } else {
    None
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
  Quality(MatchQuality),
  SimilarContent,
}

impl Badge {
  pub fn label(&self) -> &'static str {
    match self {
      Badge::Quality(quality) => quality.label(),
      Badge::SimilarContent => "Similar Content",
    }
  }
}

impl fmt::Display for Badge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// Quality badge plus the independent fallback badge
pub fn badges(details: Option<&MatchDetails>) -> Vec<Badge> {
  let Some(details) = details else {
    return Vec::new();
  };

  let mut badges = Vec::with_capacity(2);
  if let Some(quality) = match_quality(details) {
    badges.push(Badge::Quality(quality));
  }
  if details.fallback_recommendation {
    badges.push(Badge::SimilarContent);
  }
  badges
}

pub const JUSTIFICATION_SEPARATOR: &str = " • ";
pub const JUSTIFICATION_FALLBACK: &str = "semantic similarity";

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
  if count == 1 {
    one
  } else {
    many
  }
}

/// Clauses in fixed order: exact, partial, education, location
pub fn justification(details: &MatchDetails) -> String {
  let mut clauses = Vec::new();

  let exact = details.exact_skill_matches as usize;
  if exact > 0 {
    clauses.push(format!("{exact} exact skill {}", plural(exact, "match", "matches")));
  }
  let partial = details.partial_skill_matches as usize;
  if partial > 0 {
    clauses.push(format!("{partial} related {}", plural(partial, "skill", "skills")));
  }
  if details.education_match {
    clauses.push("education match".to_string());
  }
  if details.location_match {
    clauses.push("location match".to_string());
  }

  if clauses.is_empty() {
    JUSTIFICATION_FALLBACK.to_string()
  } else {
    clauses.join(JUSTIFICATION_SEPARATOR)
  }
}

/// How a result's location relates to the user's preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationNote {
  YourPreference,
  WorkFromAnywhere,
}

impl LocationNote {
  pub fn label(&self) -> &'static str {
    match self {
      LocationNote::YourPreference => "your preference",
      LocationNote::WorkFromAnywhere => "work from anywhere",
    }
  }
}

/// Display annotations for one result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
  pub location: LocationSignal,
  pub location_note: Option<LocationNote>,
  pub badges: Vec<Badge>,
  /// `None` when the service sent no match details at all
  pub justification: Option<String>,
}

pub fn annotate(result: &Recommendation, user_location: &str) -> Annotation {
  let location = location_signal(result, user_location);
  let location_note = if is_remote(&result.location) {
    Some(LocationNote::WorkFromAnywhere)
  } else if location.is_match() {
    Some(LocationNote::YourPreference)
  } else {
    None
  };

  Annotation {
    location,
    location_note,
    badges: badges(result.match_details.as_ref()),
    justification: result.match_details.as_ref().map(justification),
  }
}

/// Classified view of one result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
  pub annotations: Vec<Annotation>,
  pub banner: Option<StatusBanner>,
  pub location_matches: usize,
  pub other_locations: usize,
}

impl Classification {
  pub fn total(&self) -> usize {
    self.annotations.len()
  }
}

pub fn classify(results: &[Recommendation], user_location: &str) -> Classification {
  let annotations: Vec<Annotation> =
    results.iter().map(|result| annotate(result, user_location)).collect();

  let location_matches = annotations.iter().filter(|a| a.location.is_match()).count();
  let other_locations = annotations.len() - location_matches;

  Classification {
    banner: StatusBanner::select(location_matches, other_locations, user_location),
    annotations,
    location_matches,
    other_locations,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn details(exact: u32, partial: u32, education: bool, location: bool) -> MatchDetails {
    MatchDetails {
      exact_skill_matches: exact,
      partial_skill_matches: partial,
      education_match: education,
      location_match: location,
      ..Default::default()
    }
  }

  #[test]
  fn test_heuristic_substring_both_directions() {
    assert!(location_heuristic("New Delhi", "delhi"));
    assert!(location_heuristic("Pune", "Pune, Maharashtra"));
    assert!(!location_heuristic("Mumbai", "Delhi"));
  }

  #[test]
  fn test_heuristic_empty_strings_never_match_by_substring() {
    assert!(!location_heuristic("", "Delhi"));
    assert!(!location_heuristic("Mumbai", "   "));
  }

  #[test]
  fn test_quality_priority_order() {
    assert_eq!(match_quality(&details(3, 0, true, true)), Some(MatchQuality::Perfect));
    assert_eq!(match_quality(&details(2, 0, true, false)), Some(MatchQuality::Excellent));
    assert_eq!(match_quality(&details(1, 5, true, true)), Some(MatchQuality::Good));
    assert_eq!(match_quality(&details(2, 0, false, true)), Some(MatchQuality::Skill));
    assert_eq!(match_quality(&details(0, 4, true, true)), None);
  }

  #[test]
  fn test_justification_pluralization() {
    assert_eq!(justification(&details(2, 3, false, false)), "2 exact skill matches • 3 related skills");
    assert_eq!(justification(&details(1, 1, false, false)), "1 exact skill match • 1 related skill");
  }

  #[test]
  fn test_banner_absent_without_location() {
    assert_eq!(StatusBanner::select(1, 1, ""), None);
    assert_eq!(StatusBanner::select(0, 3, " \t"), None);
  }

  #[test]
  fn test_banner_messages_mention_location() {
    let banner = StatusBanner::select(2, 0, "Delhi").unwrap();
    assert!(banner.message().contains("Delhi"));
    assert!(banner.message().contains("All 2 recommendations"));
  }
}

//! Result rendering
//!
//! Formats a classified result set for the terminal. Purely a function of the
//! classifier output and the raw recommendation fields; the only arithmetic is
//! percentage rounding.

use colored::*;

use crate::classifier::{classify, Annotation, Badge, Classification, MatchQuality, StatusBanner};
use crate::model::{CatalogStats, EmbeddingsStatus, InternshipCatalog, Recommendation};
use crate::profile::Profile;

pub const NO_RESULTS_HINT: &str = "No recommendations yet. Enter your education, skills and preferred location, then search to see internships picked for you.";

pub const APPLY_UNAVAILABLE_NOTICE: &str =
  "The application link for this internship isn't available yet. Please check back later.";

pub const NO_LOCAL_MATCHES_TIP: &str =
  "Tip: try \"remote\" or a nearby city to discover more opportunities close to you.";

const RULE_WIDTH: usize = 72;

/// What the apply button on a card does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyAction {
  Link(String),
  Unavailable,
}

/// Result of activating an apply action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
  Navigate(String),
  Notice(&'static str),
}

impl ApplyAction {
  pub fn for_result(result: &Recommendation) -> Self {
    match result.apply_url.as_deref().map(str::trim) {
      Some(url) if !url.is_empty() => ApplyAction::Link(url.to_string()),
      _ => ApplyAction::Unavailable,
    }
  }

  pub fn is_enabled(&self) -> bool {
    matches!(self, ApplyAction::Link(_))
  }

  /// An unavailable action only ever yields the notice
  pub fn activate(&self) -> ApplyOutcome {
    match self {
      ApplyAction::Link(url) => ApplyOutcome::Navigate(url.clone()),
      ApplyAction::Unavailable => ApplyOutcome::Notice(APPLY_UNAVAILABLE_NOTICE),
    }
  }
}

/// Score as a whole percentage, or "N/A".
///
/// Values are shown as received. The service adds skill and location boosts
/// on top of similarity, so a score above 1.0 renders above 100% (e.g. "142%").
pub fn format_percentage(score: Option<f64>) -> String {
  match score {
    Some(score) if score.is_finite() => format!("{}%", (score * 100.0).round() as i64),
    _ => "N/A".to_string(),
  }
}

fn rule(ch: char) -> String {
  ch.to_string().repeat(RULE_WIDTH)
}

fn badge_text(badge: &Badge) -> ColoredString {
  let label = format!("[{}]", badge.label());
  match badge {
    Badge::Quality(MatchQuality::Perfect) => label.green().bold(),
    Badge::Quality(MatchQuality::Excellent) => label.green(),
    Badge::Quality(MatchQuality::Good) => label.cyan(),
    Badge::Quality(MatchQuality::Skill) => label.blue(),
    Badge::SimilarContent => label.magenta(),
  }
}

fn banner_text(banner: &StatusBanner) -> ColoredString {
  let message = banner.message();
  match banner {
    StatusBanner::Mixed { .. } => format!("◐ {message}").yellow(),
    StatusBanner::Success { .. } => format!("✓ {message}").green(),
    StatusBanner::NoLocalMatches { .. } => format!("ℹ {message}").blue(),
  }
}

/// Summary line echoing the submitted profile
pub fn render_query(query: &Profile) -> String {
  let skills = if query.skills.trim().is_empty() { "(none)" } else { query.skills.as_str() };
  format!(
    "{} {} | {} {} | {} {}",
    "Education:".dimmed(),
    query.education,
    "Skills:".dimmed(),
    skills,
    "Location:".dimmed(),
    query.location
  )
}

/// One card per recommendation
pub fn render_card(index: usize, result: &Recommendation, annotation: &Annotation) -> String {
  let mut lines = Vec::new();

  let badges: Vec<String> = annotation.badges.iter().map(|b| badge_text(b).to_string()).collect();
  if !badges.is_empty() {
    lines.push(badges.join(" "));
  }

  let title = if result.title.is_empty() { "Untitled internship" } else { result.title.as_str() };
  lines.push(format!("{}. {}", index + 1, title.bold()));
  if !result.org.is_empty() {
    lines.push(format!("   {}", result.org.cyan()));
  }

  let location = if result.location.is_empty() { "Not specified" } else { result.location.as_str() };
  match annotation.location_note {
    Some(note) => lines.push(format!("   Location: {} ({})", location, note.label().green())),
    None => lines.push(format!("   Location: {location}")),
  }

  if !result.required_education.is_empty() {
    lines.push(format!("   Education: {}", result.required_education));
  }
  if !result.skills.is_empty() {
    lines.push(format!("   Skills: {}", result.skills.joined()));
  }
  if let Some(sector) = result.sector.as_ref().filter(|sector| !sector.is_empty()) {
    lines.push(format!("   Sector: {}", sector.joined()));
  }

  let mut score_line = format!("   Match: {}", format_percentage(result.score).bold());
  if let Some(similarity) = result.match_details.as_ref().and_then(|d| d.semantic_similarity) {
    score_line.push_str(&format!(
      "  {}",
      format!("(semantic relevance {})", format_percentage(Some(similarity))).dimmed()
    ));
  }
  lines.push(score_line);

  if let Some(justification) = &annotation.justification {
    lines.push(format!("   Why: {}", justification.italic()));
  }

  match ApplyAction::for_result(result) {
    ApplyAction::Link(url) => lines.push(format!("   Apply: {}", url.underline())),
    ApplyAction::Unavailable => {
      lines.push(format!("   Apply: {}", APPLY_UNAVAILABLE_NOTICE.dimmed()))
    }
  }

  lines.join("\n")
}

pub fn render_footer(classification: &Classification) -> String {
  let total = classification.total();
  let mut footer = format!(
    "Showing {} {}: {} in your preferred location, {} elsewhere.",
    total,
    if total == 1 { "recommendation" } else { "recommendations" },
    classification.location_matches,
    classification.other_locations,
  );
  if classification.location_matches == 0 {
    footer.push('\n');
    footer.push_str(NO_LOCAL_MATCHES_TIP);
  }
  footer
}

/// Render a whole result set with an already computed classification
pub fn render_classified(
  results: &[Recommendation],
  classification: &Classification,
  query: &Profile,
) -> String {
  let mut sections = vec![render_query(query)];

  if let Some(banner) = &classification.banner {
    sections.push(banner_text(banner).to_string());
  }

  sections.push(rule('─'));
  for (index, (result, annotation)) in
    results.iter().zip(classification.annotations.iter()).enumerate()
  {
    sections.push(render_card(index, result, annotation));
    sections.push(rule('─'));
  }
  sections.push(render_footer(classification));

  sections.join("\n")
}

/// Render results for a submitted query. Empty lists never reach the classifier.
pub fn render_results(results: &[Recommendation], query: &Profile) -> String {
  if results.is_empty() {
    return NO_RESULTS_HINT.to_string();
  }

  let classification = classify(results, &query.location);
  render_classified(results, &classification, query)
}

pub fn render_stats(stats: &CatalogStats) -> String {
  if let Some(message) = &stats.message {
    return message.clone();
  }

  let mut lines = vec![
    format!("{}", "Catalog statistics".bold()),
    format!("  Internships:      {}", stats.total_internships),
    format!("  Organizations:    {}", stats.unique_organizations),
    format!("  Locations:        {}", stats.unique_locations),
    format!("  Skills:           {}", stats.unique_skills),
    format!("  Education levels: {}", stats.unique_education_levels),
  ];
  if !stats.sample_locations.is_empty() {
    lines.push(format!("  Sample locations: {}", stats.sample_locations.join(", ")));
  }
  if !stats.sample_skills.is_empty() {
    lines.push(format!("  Sample skills:    {}", stats.sample_skills.join(", ")));
  }
  if let Some(version) = &stats.api_version {
    lines.push(format!("  API version:      {version}"));
  }
  lines.join("\n")
}

pub fn render_catalog(catalog: &InternshipCatalog) -> String {
  if catalog.internships.is_empty() {
    return "No internships loaded.".to_string();
  }

  let mut lines = vec![format!("{} internships in catalog", catalog.count.to_string().bold())];
  for internship in &catalog.internships {
    let org = if internship.org.is_empty() { String::new() } else { format!(" @ {}", internship.org) };
    let location =
      if internship.location.is_empty() { String::new() } else { format!(" ({})", internship.location) };
    lines.push(format!("  {} {}{}{}", "•".cyan(), internship.title.bold(), org, location.dimmed()));
  }
  lines.join("\n")
}

pub fn render_embeddings_status(status: &EmbeddingsStatus) -> String {
  let yes_no = |flag: bool| if flag { "yes".green() } else { "no".red() };
  [
    format!("{}", "Embedding coverage".bold()),
    format!(
      "  {}/{} internships embedded ({:.1}%)",
      status.internships_with_embeddings, status.total_internships, status.coverage_percentage
    ),
    format!("  Stored embeddings: {}", status.total_embeddings),
    format!("  Catalog file present:   {}", yes_no(status.internships_file_exists)),
    format!("  Embeddings file present: {}", yes_no(status.embeddings_file_exists)),
  ]
  .join("\n")
}

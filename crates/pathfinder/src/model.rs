//! Wire types for the recommendation service
//!
//! Everything here is received verbatim from the service and never mutated.
//! Optional fields default when absent so a partially populated response still
//! deserializes; the classifier treats missing values as "no signal".

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like an absent key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A field the service sends either as one comma-separated string or as a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextList {
  Text(String),
  Items(Vec<String>),
}

impl TextList {
  /// Render as a single comma-separated line
  pub fn joined(&self) -> String {
    match self {
      TextList::Text(text) => text.clone(),
      TextList::Items(items) => items.join(", "),
    }
  }

  pub fn is_empty(&self) -> bool {
    match self {
      TextList::Text(text) => text.trim().is_empty(),
      TextList::Items(items) => items.iter().all(|item| item.trim().is_empty()),
    }
  }
}

impl Default for TextList {
  fn default() -> Self {
    TextList::Text(String::new())
  }
}

/// Why the service surfaced a recommendation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
  #[serde(default, deserialize_with = "null_as_default")]
  pub exact_skill_matches: u32,
  #[serde(default, deserialize_with = "null_as_default")]
  pub partial_skill_matches: u32,
  #[serde(default, deserialize_with = "null_as_default")]
  pub education_match: bool,
  #[serde(default, deserialize_with = "null_as_default")]
  pub location_match: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub semantic_similarity: Option<f64>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub fallback_recommendation: bool,
}

/// One internship posting as returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<serde_json::Value>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub title: String,
  #[serde(default, alias = "company", deserialize_with = "null_as_default")]
  pub org: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub location: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub required_education: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub skills: TextList,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sector: Option<TextList>,
  #[serde(default, alias = "apply_link", skip_serializing_if = "Option::is_none")]
  pub apply_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub score: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub match_details: Option<MatchDetails>,
}

/// Metadata block attached to a recommendation response.
///
/// Different service revisions report different counters, so every field is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub algorithm_version: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_internships_available: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub skill_based_filtering: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_internships: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub internships_with_embeddings: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub returned_recommendations: Option<u64>,
}

/// The query as echoed back by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEcho {
  #[serde(default)]
  pub education: Option<String>,
  #[serde(default)]
  pub skills: Option<String>,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub validation_used: Option<bool>,
}

/// Success body of `POST /api/recommend`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
  #[serde(default, deserialize_with = "null_as_default")]
  pub recommendations: Vec<Recommendation>,
  #[serde(default)]
  pub metadata: Option<ResponseMetadata>,
  #[serde(default)]
  pub query: Option<QueryEcho>,
}

/// Failure body the service sends with non-2xx statuses.
///
/// `detail` is a plain string for handler errors and a list of
/// `{loc, msg}` entries when request validation rejects the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
  #[serde(default)]
  pub detail: serde_json::Value,
}

impl ErrorBody {
  /// Human-readable detail, e.g. "body.skills: field required"
  pub fn message(&self) -> Option<String> {
    match &self.detail {
      serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
      serde_json::Value::Array(entries) => {
        let parts: Vec<String> = entries.iter().filter_map(validation_entry).collect();
        (!parts.is_empty()).then(|| parts.join("; "))
      }
      _ => None,
    }
  }
}

fn validation_entry(entry: &serde_json::Value) -> Option<String> {
  let msg = entry.get("msg")?.as_str()?;
  let loc = entry
    .get("loc")
    .and_then(|loc| loc.as_array())
    .map(|parts| {
      parts
        .iter()
        .map(|part| match part {
          serde_json::Value::String(text) => text.clone(),
          other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(".")
    })
    .unwrap_or_default();

  Some(if loc.is_empty() { msg.to_string() } else { format!("{loc}: {msg}") })
}

/// Response of the root health endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub version: Option<String>,
  #[serde(default)]
  pub internships_loaded: u64,
  #[serde(default)]
  pub status: String,
}

impl HealthStatus {
  pub fn is_healthy(&self) -> bool {
    self.status.eq_ignore_ascii_case("healthy")
  }
}

/// Catalog statistics from `GET /api/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
  #[serde(default)]
  pub total_internships: u64,
  #[serde(default)]
  pub unique_locations: u64,
  #[serde(default)]
  pub unique_skills: u64,
  #[serde(default)]
  pub unique_education_levels: u64,
  #[serde(default)]
  pub unique_organizations: u64,
  #[serde(default)]
  pub sample_locations: Vec<String>,
  #[serde(default)]
  pub sample_skills: Vec<String>,
  #[serde(default)]
  pub sample_education_levels: Vec<String>,
  #[serde(default)]
  pub api_version: Option<String>,
  /// Set instead of the counters when the service has no catalog loaded
  #[serde(default)]
  pub message: Option<String>,
}

/// Full catalog listing from `GET /api/internships`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternshipCatalog {
  #[serde(default)]
  pub count: u64,
  #[serde(default, deserialize_with = "null_as_default")]
  pub internships: Vec<Recommendation>,
}

/// Embedding coverage from `GET /api/embeddings/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsStatus {
  #[serde(default)]
  pub total_internships: u64,
  #[serde(default)]
  pub total_embeddings: u64,
  #[serde(default)]
  pub internships_with_embeddings: u64,
  #[serde(default)]
  pub coverage_percentage: f64,
  #[serde(default)]
  pub embeddings_file_exists: bool,
  #[serde(default)]
  pub internships_file_exists: bool,
}

/// Result of `POST /api/embeddings/recompute`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecomputeSummary {
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub total_internships: u64,
  #[serde(default)]
  pub total_embeddings: u64,
}

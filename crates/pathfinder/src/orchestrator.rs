//! Search lifecycle
//!
//! Owns the single request state. Every submission bumps an epoch; an outcome
//! is applied only if it carries the latest epoch, so a late response from a
//! superseded search can never overwrite a newer one.

use serde::Serialize;

use crate::client::{ApiError, RecommenderApi};
use crate::model::{Recommendation, RecommendResponse, ResponseMetadata};
use crate::profile::Profile;

/// User-facing failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
  /// No response was obtained
  Connectivity,
  /// The service rejected the skills field (e.g., left empty)
  Validation,
  /// HTTP 503
  ServiceUnavailable,
  /// Any other failure
  Generic,
}

const SKILLS_REJECTION_MARKERS: &[&str] =
  &["empty", "required", "missing", "blank", "at least one", "invalid", "must not"];

impl ErrorCategory {
  /// Category from the status code plus the parsed `detail`. The service
  /// reports a skills rejection with 4xx or 500 depending on where it was
  /// caught, so only the detail decides Validation.
  pub fn of(error: &ApiError) -> Self {
    match error {
      ApiError::Connectivity { .. } | ApiError::Timeout { .. } => ErrorCategory::Connectivity,
      ApiError::Status { status: 503, .. } => ErrorCategory::ServiceUnavailable,
      ApiError::Status { detail: Some(detail), .. } if is_skills_rejection(detail) => {
        ErrorCategory::Validation
      }
      ApiError::Status { .. } | ApiError::Decode { .. } => ErrorCategory::Generic,
    }
  }
}

/// Whether a failure detail says the skills field was empty or invalid
pub fn is_skills_rejection(detail: &str) -> bool {
  let detail = detail.to_lowercase();
  detail.contains("skill") && SKILLS_REJECTION_MARKERS.iter().any(|marker| detail.contains(marker))
}

/// Health probe result used to tailor connectivity messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendProbe {
  Reachable,
  Unreachable,
  NotChecked,
}

/// Render the message shown for a failed search
pub fn user_message(
  category: ErrorCategory,
  error: &ApiError,
  base_url: &str,
  probe: BackendProbe,
) -> String {
  match category {
    ErrorCategory::Connectivity => {
      let hint = match probe {
        BackendProbe::Unreachable => {
          format!("Make sure the backend server is running at {base_url} and try again.")
        }
        BackendProbe::Reachable => {
          "The backend answered a health check, so the request may have timed out. Please try again."
            .to_string()
        }
        BackendProbe::NotChecked => "Check your network connection and try again.".to_string(),
      };
      format!("Unable to connect to the recommendation service. {hint}")
    }
    ErrorCategory::Validation => {
      "Please enter at least one skill so we can find internships that match your profile."
        .to_string()
    }
    ErrorCategory::ServiceUnavailable => {
      "The recommendation service is temporarily unavailable. Please try again in a few moments."
        .to_string()
    }
    ErrorCategory::Generic => format!("Failed to get recommendations: {error}"),
  }
}

/// Request lifecycle; exactly one variant is active
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
  Idle,
  Loading { query: Profile },
  Success { results: Vec<Recommendation>, query: Profile, stats: Option<ResponseMetadata> },
  Error { category: ErrorCategory, error: ApiError, query: Profile },
}

impl RequestState {
  pub fn is_loading(&self) -> bool {
    matches!(self, RequestState::Loading { .. })
  }

  /// The profile whose results (or failure) are currently shown
  pub fn query(&self) -> Option<&Profile> {
    match self {
      RequestState::Idle => None,
      RequestState::Loading { query }
      | RequestState::Success { query, .. }
      | RequestState::Error { query, .. } => Some(query),
    }
  }
}

/// Identifies one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
  epoch: u64,
}

#[derive(Debug)]
pub struct Orchestrator {
  state: RequestState,
  epoch: u64,
}

impl Default for Orchestrator {
  fn default() -> Self {
    Self::new()
  }
}

impl Orchestrator {
  pub fn new() -> Self {
    Self { state: RequestState::Idle, epoch: 0 }
  }

  pub fn state(&self) -> &RequestState {
    &self.state
  }

  /// Start a new cycle, discarding whatever was displayed before
  pub fn begin(&mut self, profile: Profile) -> SearchTicket {
    self.epoch += 1;
    self.state = RequestState::Loading { query: profile };
    SearchTicket { epoch: self.epoch }
  }

  pub fn is_current(&self, ticket: SearchTicket) -> bool {
    ticket.epoch == self.epoch && self.state.is_loading()
  }

  /// Apply an outcome. Returns false when the ticket was superseded.
  pub fn complete(
    &mut self,
    ticket: SearchTicket,
    outcome: Result<RecommendResponse, ApiError>,
  ) -> bool {
    if !self.is_current(ticket) {
      tracing::debug!(ticket = ticket.epoch, current = self.epoch, "discarding stale response");
      return false;
    }

    let query = match std::mem::replace(&mut self.state, RequestState::Idle) {
      RequestState::Loading { query } => query,
      // is_current guarantees Loading
      other => {
        self.state = other;
        return false;
      }
    };

    self.state = match outcome {
      Ok(response) => {
        tracing::info!(
          education = %query.education,
          skills = %query.skills,
          location = %query.location,
          results = response.recommendations.len(),
          algorithm_version = response
            .metadata
            .as_ref()
            .and_then(|m| m.algorithm_version.as_deref())
            .unwrap_or("unknown"),
          "recommendations received"
        );
        RequestState::Success { results: response.recommendations, query, stats: response.metadata }
      }
      Err(error) => {
        let category = ErrorCategory::of(&error);
        tracing::warn!(?category, %error, "recommendation request failed");
        RequestState::Error { category, error, query }
      }
    };
    true
  }

  /// One full cycle: begin, a single `recommend` call, complete
  pub async fn run_search<A>(&mut self, api: &A, profile: Profile) -> &RequestState
  where
    A: RecommenderApi + ?Sized,
  {
    let ticket = self.begin(profile.clone());
    let outcome = api.recommend(&profile).await;
    self.complete(ticket, outcome);
    &self.state
  }
}

/// Probe the backend only when the failure was a connectivity one
pub async fn probe_for<A>(api: &A, category: ErrorCategory) -> BackendProbe
where
  A: RecommenderApi + ?Sized,
{
  if category != ErrorCategory::Connectivity {
    return BackendProbe::NotChecked;
  }

  match api.health().await {
    Ok(_) => BackendProbe::Reachable,
    Err(_) => BackendProbe::Unreachable,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::profile::{build_profile, ProfileInput};

  fn profile(skills: &str) -> Profile {
    build_profile(ProfileInput { skills: Some(skills.to_string()), ..Default::default() })
  }

  fn response_with(titles: &[&str]) -> RecommendResponse {
    RecommendResponse {
      recommendations: titles
        .iter()
        .map(|title| Recommendation { title: title.to_string(), ..Default::default() })
        .collect(),
      ..Default::default()
    }
  }

  #[test]
  fn test_error_categories() {
    assert_eq!(ErrorCategory::of(&ApiError::connectivity("refused")), ErrorCategory::Connectivity);
    assert_eq!(ErrorCategory::of(&ApiError::Timeout { secs: 1 }), ErrorCategory::Connectivity);
    assert_eq!(ErrorCategory::of(&ApiError::status(503, None)), ErrorCategory::ServiceUnavailable);
    assert_eq!(ErrorCategory::of(&ApiError::status(422, None)), ErrorCategory::Generic);
    assert_eq!(ErrorCategory::of(&ApiError::status(500, None)), ErrorCategory::Generic);
    assert_eq!(ErrorCategory::of(&ApiError::decode("eof")), ErrorCategory::Generic);
  }

  #[test]
  fn test_skills_rejection_is_validation_whatever_the_status() {
    let from_handler = ApiError::status(500, Some("Skills cannot be empty".to_string()));
    assert_eq!(ErrorCategory::of(&from_handler), ErrorCategory::Validation);

    let from_schema = ApiError::status(422, Some("body.skills: field required".to_string()));
    assert_eq!(ErrorCategory::of(&from_schema), ErrorCategory::Validation);
  }

  #[test]
  fn test_rejection_of_other_fields_is_generic() {
    let detail = "body.education: value is not a valid enumeration member";
    let error = ApiError::status(422, Some(detail.to_string()));
    assert_eq!(ErrorCategory::of(&error), ErrorCategory::Generic);

    let message = user_message(ErrorCategory::Generic, &error, "http://x", BackendProbe::NotChecked);
    assert_eq!(message, format!("Failed to get recommendations: {detail}"));
    assert!(!message.contains("at least one skill"));
  }

  #[test]
  fn test_skills_mentioned_without_rejection_is_generic() {
    let error = ApiError::status(500, Some("'NoneType' object has no attribute 'skills'".to_string()));
    assert_eq!(ErrorCategory::of(&error), ErrorCategory::Generic);
  }

  #[test]
  fn test_generic_message_appends_raw_error() {
    let error = ApiError::status(500, Some("Embeddings not available".to_string()));
    let message = user_message(ErrorCategory::Generic, &error, "http://x", BackendProbe::NotChecked);
    assert_eq!(message, "Failed to get recommendations: Embeddings not available");

    let error = ApiError::status(502, None);
    let message = user_message(ErrorCategory::Generic, &error, "http://x", BackendProbe::NotChecked);
    assert_eq!(message, "Failed to get recommendations: Server error: 502");
  }

  #[test]
  fn test_connectivity_message_suggests_starting_backend() {
    let error = ApiError::connectivity("refused");
    let message =
      user_message(ErrorCategory::Connectivity, &error, "http://localhost:8000", BackendProbe::Unreachable);
    assert!(message.contains("backend server is running at http://localhost:8000"));
  }

  #[test]
  fn test_stale_response_is_discarded() {
    let mut orchestrator = Orchestrator::new();
    let first = orchestrator.begin(profile("python"));
    let second = orchestrator.begin(profile("rust"));

    assert!(!orchestrator.complete(first, Ok(response_with(&["Stale"]))));
    assert!(orchestrator.state().is_loading());

    assert!(orchestrator.complete(second, Ok(response_with(&["Fresh"]))));
    match orchestrator.state() {
      RequestState::Success { results, query, .. } => {
        assert_eq!(results[0].title, "Fresh");
        assert_eq!(query.skills, "rust");
      }
      other => panic!("unexpected state: {other:?}"),
    }
  }

  #[test]
  fn test_late_response_after_completion_is_discarded() {
    let mut orchestrator = Orchestrator::new();
    let ticket = orchestrator.begin(profile("python"));
    assert!(orchestrator.complete(ticket, Err(ApiError::status(503, None))));
    assert!(!orchestrator.complete(ticket, Ok(response_with(&["Late"]))));

    assert!(matches!(
      orchestrator.state(),
      RequestState::Error { category: ErrorCategory::ServiceUnavailable, .. }
    ));
  }

  #[test]
  fn test_resubmission_clears_previous_results() {
    let mut orchestrator = Orchestrator::new();
    let ticket = orchestrator.begin(profile("python"));
    orchestrator.complete(ticket, Ok(response_with(&["Old"])));

    orchestrator.begin(profile("sql"));
    assert_eq!(orchestrator.state(), &RequestState::Loading { query: profile("sql") });
  }
}

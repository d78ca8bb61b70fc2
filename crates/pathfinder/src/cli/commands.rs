use anyhow::{anyhow, Context, Result};
use colored::*;
use serde_json::json;

use crate::classifier::classify;
use crate::cli::OutputFormat;
use crate::client::{RecommenderApi, RecommenderClient};
use crate::config::Settings;
use crate::logging;
use crate::orchestrator::{probe_for, user_message, Orchestrator, RequestState};
use crate::presenter;
use crate::profile::{Profile, ProfileCollector, ProfileInput};

/// Build the HTTP client from validated settings
pub fn client_from(settings: &Settings) -> Result<RecommenderClient> {
  settings.validate()?;
  RecommenderClient::new(settings.client_config()).context("Failed to create HTTP client")
}

/// Submit a profile and print the classified results
pub async fn search<A>(api: &A, input: ProfileInput, format: OutputFormat) -> Result<()>
where
  A: RecommenderApi + ?Sized,
{
  let mut collector = ProfileCollector::new(|profile: &Profile| {
    tracing::debug!(?profile, "profile submitted");
  });
  let profile = collector.submit(input);

  if format == OutputFormat::Pretty {
    logging::info(&format!("Searching internships for: {}", presenter::render_query(&profile)));
  }

  let mut orchestrator = Orchestrator::new();
  match orchestrator.run_search(api, profile).await {
    RequestState::Success { results, query, stats } => {
      match format {
        OutputFormat::Pretty => println!("{}", presenter::render_results(results, query)),
        OutputFormat::Json => {
          let classification = (!results.is_empty()).then(|| classify(results, &query.location));
          let body = json!({
            "query": query,
            "recommendations": results,
            "classification": classification,
            "metadata": stats,
          });
          println!("{}", serde_json::to_string_pretty(&body)?);
        }
      }
      Ok(())
    }
    RequestState::Error { category, error, .. } => {
      let (category, error) = (*category, error.clone());
      let probe = probe_for(api, category).await;
      Err(anyhow!(user_message(category, &error, api.base_url(), probe)))
    }
    RequestState::Idle | RequestState::Loading { .. } => {
      Err(anyhow!("Search finished without a result"))
    }
  }
}

/// Report whether the service is up
pub async fn health<A>(api: &A) -> Result<()>
where
  A: RecommenderApi + ?Sized,
{
  let status = api
    .health()
    .await
    .map_err(|e| anyhow!("{e}. Start the backend server at {} and try again.", api.base_url()))?;

  if status.is_healthy() {
    logging::success(&format!("{} ({})", status.message, api.base_url()));
  } else {
    logging::warn(&format!("Service reported status '{}': {}", status.status, status.message));
  }
  println!("{} {}", "Internships loaded:".dimmed(), status.internships_loaded);
  if let Some(version) = status.version {
    println!("{} {}", "API version:".dimmed(), version);
  }
  Ok(())
}

pub async fn stats(client: &RecommenderClient, format: OutputFormat) -> Result<()> {
  let stats = client.stats().await.context("Failed to fetch catalog statistics")?;
  match format {
    OutputFormat::Pretty => println!("{}", presenter::render_stats(&stats)),
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
  }
  Ok(())
}

pub async fn internships(client: &RecommenderClient, format: OutputFormat) -> Result<()> {
  let catalog = client.internships().await.context("Failed to fetch internship catalog")?;
  match format {
    OutputFormat::Pretty => println!("{}", presenter::render_catalog(&catalog)),
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
  }
  Ok(())
}

pub async fn embeddings_status(client: &RecommenderClient, format: OutputFormat) -> Result<()> {
  let status = client.embeddings_status().await.context("Failed to fetch embedding status")?;
  match format {
    OutputFormat::Pretty => println!("{}", presenter::render_embeddings_status(&status)),
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
  }
  Ok(())
}

pub async fn recompute_embeddings(client: &RecommenderClient) -> Result<()> {
  logging::info("Recomputing embeddings, this may take a while...");
  let summary = client.recompute_embeddings().await.context("Failed to recompute embeddings")?;
  logging::success(&format!(
    "{} ({} embeddings for {} internships)",
    summary.message, summary.total_embeddings, summary.total_internships
  ));
  Ok(())
}

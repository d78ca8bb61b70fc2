//! Pathfinder - Internship Recommendation Client
//!
//! Collects a candidate profile, asks the remote recommendation service for
//! matching internships, and explains each match: location fit, match quality
//! badges and a short justification. Ranking happens entirely on the service;
//! this crate only annotates and displays what comes back.

pub mod classifier;
pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod presenter;
pub mod profile;

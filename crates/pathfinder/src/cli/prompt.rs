//! Interactive profile form

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::profile::{Education, ProfileInput, DEFAULT_LOCATION};

/// Ask for one value; an empty answer leaves the field unset
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<Option<String>> {
  write!(output, "{question}: ")?;
  output.flush()?;

  let mut line = String::new();
  input.read_line(&mut line).context("Failed to read answer")?;
  let answer = line.trim_end_matches(['\r', '\n']);

  Ok(if answer.trim().is_empty() { None } else { Some(answer.to_string()) })
}

/// Fill in every field the command line left out
pub fn complete_profile<R: BufRead, W: Write>(
  mut given: ProfileInput,
  input: &mut R,
  output: &mut W,
) -> Result<ProfileInput> {
  if given.education.is_none() {
    let levels: Vec<&str> = Education::ALL.iter().map(|level| level.as_str()).collect();
    let question = format!("Education [{}] (default {})", levels.join("/"), Education::default());
    given.education = ask(input, output, &question)?;
  }
  if given.skills.is_none() {
    given.skills = ask(input, output, "Skills (comma separated)")?;
  }
  if given.location.is_none() {
    let question = format!("Preferred location (default {DEFAULT_LOCATION})");
    given.location = ask(input, output, &question)?;
  }
  Ok(given)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Cursor;

  #[test]
  fn test_prompts_only_for_missing_fields() {
    let given = ProfileInput { education: Some("PG".to_string()), ..Default::default() };
    let mut input = Cursor::new("python, sql\n\n");
    let mut output = Vec::new();

    let filled = complete_profile(given, &mut input, &mut output).unwrap();
    assert_eq!(filled.education.as_deref(), Some("PG"));
    assert_eq!(filled.skills.as_deref(), Some("python, sql"));
    assert_eq!(filled.location, None);

    let asked = String::from_utf8(output).unwrap();
    assert!(!asked.contains("Education"));
    assert!(asked.contains("Skills"));
    assert!(asked.contains("Preferred location"));
  }
}

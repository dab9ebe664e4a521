//! Candidate repositories.

use super::CandidateError;
use crate::github::RepositoryInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository that contains a qualifying CLAUDE.md and is not yet curated.
///
/// Only constructed through [`Candidate::try_from`], so every instance has the
/// required fields and a GitHub URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub full_name: String,
    pub name: String,
    pub owner: String,
    pub organization: Option<String>,
    pub description: String,
    pub stars: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    /// Path of the marker file inside the repository.
    pub marker_file_path: String,
}

/// Loosely typed candidate record, as found in JSON or assembled from API data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCandidate {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub owner: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub stars: Option<serde_json::Value>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    pub html_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(alias = "claude_file_path")]
    pub marker_file_path: Option<String>,
}

impl RawCandidate {
    /// Builds a record from repository metadata and the accepted marker path.
    pub fn from_repository(info: RepositoryInfo, marker_file_path: impl Into<String>) -> Self {
        Self {
            full_name: Some(info.full_name),
            name: Some(info.name),
            owner: Some(info.owner),
            organization: info.organization,
            description: info.description,
            stars: Some(serde_json::Value::from(info.stars)),
            language: info.language,
            topics: Some(info.topics),
            html_url: Some(info.html_url),
            created_at: info.created_at,
            updated_at: info.updated_at,
            marker_file_path: Some(marker_file_path.into()),
        }
    }
}

impl TryFrom<RawCandidate> for Candidate {
    type Error = CandidateError;

    fn try_from(raw: RawCandidate) -> Result<Self, Self::Error> {
        let full_name = required(raw.full_name, "full_name")?;
        let name = required(raw.name, "name")?;
        let owner = required(raw.owner, "owner")?;
        let stars = parse_stars(raw.stars)?;
        let html_url = required(raw.html_url, "html_url")?;
        let marker_file_path = required(raw.marker_file_path, "marker_file_path")?;

        if !(html_url.starts_with("https://github.com/") || html_url.starts_with("http://github.com/"))
        {
            return Err(CandidateError::InvalidUrl { url: html_url });
        }

        Ok(Self {
            full_name,
            name,
            owner,
            organization: raw.organization,
            description: raw.description.unwrap_or_default(),
            stars,
            language: raw.language,
            topics: raw.topics.unwrap_or_default(),
            html_url,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            marker_file_path,
        })
    }
}

impl Candidate {
    /// Parses and validates a JSON record.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError`] if the JSON is malformed or the record is invalid.
    pub fn from_json(json: &str) -> Result<Self, CandidateError> {
        let raw: RawCandidate = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Browser URL of the marker file.
    #[must_use]
    pub fn marker_file_url(&self) -> String {
        format!("{}/blob/HEAD/{}", self.html_url, self.marker_file_path)
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, CandidateError> {
    value.ok_or(CandidateError::MissingField { field })
}

fn parse_stars(value: Option<serde_json::Value>) -> Result<u64, CandidateError> {
    let value = value.ok_or(CandidateError::MissingField { field: "stars" })?;
    value.as_u64().ok_or_else(|| CandidateError::InvalidStars {
        value: value.to_string(),
    })
}

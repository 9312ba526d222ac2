//! HTTP client for the ETL backend.
//!
//! The backend exposes a single relevant endpoint: `POST {base_url}/search`
//! with body `{"search_term": ...}`. A successful run answers with an
//! optional opaque `search_id` and a list of `{skill, count}` entries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BackendConfig;
use crate::error::{PulseError, Result};

/// One extracted skill keyword and how often it appeared.
///
/// Labels are not deduplicated here; if the backend sends the same skill
/// twice, both entries survive as separate rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: u64,
}

/// Parsed payload of a successful search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub search_id: Option<String>,
    pub skills: Vec<SkillCount>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    search_term: &'a str,
}

/// Lenient wire shape: both fields are optional and default when absent.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search_id: Option<Value>,
    #[serde(default)]
    skills: Vec<SkillCount>,
}

impl SearchResponse {
    fn into_outcome(self) -> SearchOutcome {
        SearchOutcome {
            search_id: self.search_id.as_ref().map(display_scalar),
            skills: self.skills,
        }
    }
}

/// Renders the opaque identifier the way the original UI did: strings
/// verbatim, anything else through its JSON form.
fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Client for the skill-extraction backend.
#[derive(Debug, Clone)]
pub struct EtlClient {
    http: reqwest::Client,
    base_url: String,
}

impl EtlClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = config.base_url.trim();
        if base_url.is_empty() {
            return Err(PulseError::MissingConfig(
                "backend base URL is empty; set [backend].base_url or SKILLPULSE_API_BASE"
                    .to_string(),
            ));
        }

        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PulseError::Config(format!("http client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one extraction job for `term` and return its parsed payload.
    ///
    /// Non-success statuses become [`PulseError::Backend`] with the body
    /// text kept verbatim; failures to reach the backend at all become
    /// [`PulseError::Transport`].
    pub async fn search(&self, term: &str) -> Result<SearchOutcome> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, term, "submitting search");

        let response = self
            .http
            .post(&url)
            .json(&SearchRequest { search_term: term })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PulseError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|err| PulseError::Transport(format!("unparseable response: {err}")))?;

        let outcome = parsed.into_outcome();
        tracing::debug!(
            search_id = outcome.search_id.as_deref(),
            skills = outcome.skills.len(),
            "search completed"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> SearchOutcome {
        let response: SearchResponse = serde_json::from_value(value).unwrap();
        response.into_outcome()
    }

    #[test]
    fn full_payload_parses() {
        let outcome = parse(json!({
            "search_id": "abc123",
            "skills": [
                {"skill": "SQL", "count": 10},
                {"skill": "Python", "count": 15}
            ]
        }));
        assert_eq!(outcome.search_id.as_deref(), Some("abc123"));
        assert_eq!(outcome.skills.len(), 2);
        assert_eq!(outcome.skills[0].skill, "SQL");
        assert_eq!(outcome.skills[1].count, 15);
    }

    #[test]
    fn missing_skills_defaults_to_empty() {
        let outcome = parse(json!({"search_id": 42}));
        assert!(outcome.skills.is_empty());
    }

    #[test]
    fn missing_search_id_is_none() {
        let outcome = parse(json!({"skills": []}));
        assert!(outcome.search_id.is_none());
    }

    #[test]
    fn empty_object_is_a_valid_success() {
        let outcome = parse(json!({}));
        assert!(outcome.search_id.is_none());
        assert!(outcome.skills.is_empty());
    }

    #[test]
    fn numeric_search_id_is_stringified() {
        let outcome = parse(json!({"search_id": 17}));
        assert_eq!(outcome.search_id.as_deref(), Some("17"));
    }

    #[test]
    fn string_search_id_is_kept_verbatim() {
        // No surrounding JSON quotes in the display form.
        let outcome = parse(json!({"search_id": "run-9"}));
        assert_eq!(outcome.search_id.as_deref(), Some("run-9"));
    }

    #[test]
    fn null_search_id_is_absent() {
        let outcome = parse(json!({"search_id": null, "skills": []}));
        assert!(outcome.search_id.is_none());
    }

    #[test]
    fn client_rejects_blank_base_url() {
        let config = BackendConfig {
            base_url: "   ".to_string(),
            timeout_secs: 30,
        };
        let err = EtlClient::new(&config).unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn client_strips_trailing_slash() {
        let config = BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_secs: 30,
        };
        let client = EtlClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}

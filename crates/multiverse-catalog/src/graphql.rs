//! GraphQL catalog source (rickandmortyapi.com)
//!
//! Sends the `Characters` and `Character` queries over HTTP. Transient
//! failures are retried with exponential back-off; anything else surfaces as
//! a catalog error for the caller to present.

use crate::source::{CatalogSource, CharacterPage};
use multiverse_core::{Character, CharacterId, MultiverseError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_RETRIES: usize = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

const CHARACTERS_QUERY: &str = r#"
query Characters($page: Int) {
  characters(page: $page) {
    info { count pages next prev }
    results {
      id name status species type gender image
      origin { name } location { name }
      episode { id }
    }
  }
}"#;

const CHARACTER_QUERY: &str = r#"
query Character($id: ID!) {
  character(id: $id) {
    id name status species type gender image
    origin { name } location { name }
    episode { id }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CharactersData {
    characters: Option<CharacterPage>,
}

#[derive(Debug, Deserialize)]
struct CharacterData {
    character: Option<Character>,
}

/// Catalog source backed by the public GraphQL endpoint.
///
/// Holds one HTTP agent for its lifetime so connections are pooled across
/// the pages of a roster fetch.
pub struct GraphQlCatalog {
    endpoint: String,
    agent: ureq::Agent,
}

impl GraphQlCatalog {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .build()
            .into();
        Self::with_agent(endpoint, agent)
    }

    /// Use a caller-configured agent (proxies, custom timeouts)
    pub fn with_agent(endpoint: impl Into<String>, agent: ureq::Agent) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphQlResponse<T>> {
        let payload = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        for attempt in 0..MAX_RETRIES {
            let response = self
                .agent
                .post(&self.endpoint)
                .header("Content-Type", "application/json")
                .send_json(&payload);

            match response {
                Ok(mut ok) => {
                    return ok.body_mut().read_json().map_err(|e| {
                        MultiverseError::CatalogUnavailable(format!(
                            "Failed to parse catalog response: {}",
                            e
                        ))
                    });
                }
                Err(e) => {
                    if attempt + 1 < MAX_RETRIES && is_transient(&e) {
                        let delay = backoff_delay(attempt);
                        tracing::debug!(attempt, ?delay, error = %e, "retrying catalog request");
                        std::thread::sleep(delay);
                        continue;
                    }
                    return Err(MultiverseError::CatalogUnavailable(format!(
                        "Catalog request failed: {}",
                        e
                    )));
                }
            }
        }

        Err(MultiverseError::CatalogUnavailable(
            "Catalog request failed after retries".to_string(),
        ))
    }
}

impl Default for GraphQlCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Network hiccups, rate limiting and server-side failures are worth another try
fn is_transient(e: &ureq::Error) -> bool {
    match e {
        ureq::Error::StatusCode(code) => *code == 429 || (500..600).contains(code),
        ureq::Error::Timeout(_)
        | ureq::Error::Io(_)
        | ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound => true,
        _ => false,
    }
}

/// Doubling delay: 500 ms, 1 s, 2 s, ...
fn backoff_delay(attempt: usize) -> Duration {
    let factor = 1u64.checked_shl(attempt as u32).unwrap_or(u64::MAX);
    Duration::from_millis(RETRY_BASE_DELAY_MS.saturating_mul(factor))
}

fn joined_errors(errors: &[GraphQlErrorMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn page_from_response(response: GraphQlResponse<CharactersData>, page: u32) -> Result<CharacterPage> {
    match response.data.and_then(|d| d.characters) {
        Some(characters) => Ok(characters),
        None if !response.errors.is_empty() => {
            Err(MultiverseError::GraphQl(joined_errors(&response.errors)))
        }
        None => Err(MultiverseError::GraphQl(format!(
            "Catalog returned no listing for page {}",
            page
        ))),
    }
}

/// A null character is a miss, even when the server also reports an error
/// for it; errors without any data are failures.
fn character_from_response(response: GraphQlResponse<CharacterData>) -> Result<Option<Character>> {
    match response.data {
        Some(data) => Ok(data.character),
        None if !response.errors.is_empty() => {
            Err(MultiverseError::GraphQl(joined_errors(&response.errors)))
        }
        None => Ok(None),
    }
}

impl CatalogSource for GraphQlCatalog {
    fn name(&self) -> &str {
        "graphql"
    }

    fn fetch_page(&self, page: u32) -> Result<CharacterPage> {
        let response = self.query(CHARACTERS_QUERY, serde_json::json!({ "page": page }))?;
        page_from_response(response, page)
    }

    fn fetch_character(&self, id: &CharacterId) -> Result<Option<Character>> {
        let response = self.query(CHARACTER_QUERY, serde_json::json!({ "id": id.as_str() }))?;
        character_from_response(response)
    }
}

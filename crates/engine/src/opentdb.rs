//! Question source backed by the Open Trivia Database HTTP API.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use trivia_core::model::{Question, QuestionBatch};

use crate::error::FetchError;
use crate::source::{FetchRequest, QuestionSource};

const DEFAULT_BASE_URL: &str = "https://opentdb.com/api.php";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the Open Trivia DB source.
#[derive(Clone, Debug)]
pub struct OpenTdbConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenTdbConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// `TRIVIA_API_URL` overrides the endpoint and
    /// `TRIVIA_API_TIMEOUT_SECS` the per-request timeout.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("TRIVIA_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let timeout = env::var("TRIVIA_API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
        Self { base_url, timeout }
    }
}

impl Default for OpenTdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// `QuestionSource` implementation over the public Open Trivia DB API.
///
/// One GET per fetch, no retries. The request timeout surfaces as
/// `FetchError::NetworkFailure`, like any other transport problem.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    config: OpenTdbConfig,
}

impl OpenTdbSource {
    #[must_use]
    pub fn new(config: OpenTdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Source configured from the environment (see `OpenTdbConfig::from_env`).
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(OpenTdbConfig::from_env())
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<QuestionBatch, FetchError> {
        debug!(
            amount = request.amount(),
            category = ?request.category(),
            difficulty = ?request.difficulty(),
            "fetching trivia batch"
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&query_params(request))
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error = if status.is_client_error() {
                FetchError::InvalidRequest(format!("HTTP {status}"))
            } else {
                FetchError::NetworkFailure(format!("HTTP {status}"))
            };
            return Err(error);
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| FetchError::DecodeFailure(e.to_string()))?;

        if let Some(code) = body.response_code {
            if code != 0 {
                warn!(code, "provider reported a non-zero response code");
            }
        }

        Ok(body
            .results
            .into_iter()
            .map(QuestionRecord::into_question)
            .collect())
    }
}

fn query_params(request: &FetchRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("amount", request.amount().to_string()),
        ("type", "multiple".to_string()),
    ];
    if let Some(category) = request.category() {
        params.push(("category", category.to_string()));
    }
    if let Some(difficulty) = request.difficulty() {
        params.push(("difficulty", difficulty.as_str().to_string()));
    }
    params
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_builder() {
        FetchError::InvalidRequest(error.to_string())
    } else {
        FetchError::NetworkFailure(error.to_string())
    }
}

//
// ─── WIRE FORMAT ───────────────────────────────────────────────────────────────
//

/// Top-level provider payload. A missing or malformed `results` array is
/// tolerated as an empty batch rather than a decode failure.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    response_code: Option<u8>,
    #[serde(default, deserialize_with = "lenient_results")]
    results: Vec<QuestionRecord>,
}

fn lenient_results<'de, D>(deserializer: D) -> Result<Vec<QuestionRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Persisted wire shape for one question, mirroring the domain `Question`
/// so the provider schema never leaks past this module.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    #[serde(default)]
    category: String,
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

impl QuestionRecord {
    fn into_question(self) -> Question {
        Question::new(
            self.category,
            self.question,
            self.correct_answer,
            self.incorrect_answers,
        )
    }
}

//! Hosted-model inference client.
//!
//! Wraps the Hugging Face inference endpoint with the retry policy the
//! assistant relies on: up to three attempts with exponential backoff,
//! retrying transport errors, 429 and 5xx responses and failing fast on
//! everything else. Calls are blocking and are expected to run on a worker
//! thread or inside a CLI command, never on the UI loop.

use crate::config::InferenceConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Attempts made before a call is given up on.
const MAX_ATTEMPTS: u32 = 3;
/// Backoff ceiling between attempts.
const MAX_RETRY_DELAY_MS: u64 = 10_000;
/// Request timeout; hosted models can hold a request while they warm up.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const GENERATION_MAX_NEW_TOKENS: u32 = 100;
const GENERATION_TEMPERATURE: f64 = 0.7;
const GENERATION_TOP_P: f64 = 0.95;
const GENERATION_REPETITION_PENALTY: f64 = 1.2;

/// Label set for zero-shot CV classification.
pub const CANDIDATE_LABELS: [&str; 5] = [
    "technical skills",
    "soft skills",
    "work experience",
    "education",
    "achievements",
];

/// Failure modes of an inference call.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No API key in the config file or environment.
    #[error("Hugging Face API key is not configured")]
    MissingKey,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the inference endpoint.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The model replied with an empty result set.
    #[error("model returned no output")]
    EmptyResponse,
}

impl InferenceError {
    /// Whether another attempt could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::MissingKey | Self::Parse(_) | Self::EmptyResponse => false,
        }
    }
}

/// Maps a failure to the fixed advisory string shown in the chat.
#[must_use]
pub fn advisory(error: &InferenceError) -> &'static str {
    match error {
        InferenceError::MissingKey => {
            "Configuration error: Hugging Face API key is missing. \
             Please check your environment variables."
        }
        InferenceError::Http(_) => {
            "Network error: Unable to reach the AI service. \
             Please check your internet connection."
        }
        InferenceError::Api { status: 401, .. } => {
            "Authentication error: Invalid API key. \
             Please contact support to verify your credentials."
        }
        InferenceError::Api { status: 404, .. } => {
            "Service error: The AI model is currently unavailable. \
             We are working on resolving this issue."
        }
        InferenceError::Api { status: 429, .. } => {
            "Service busy: Too many requests. Please try again in a few moments."
        }
        InferenceError::Api { status, .. } if *status >= 500 => {
            "Service error: The AI service is experiencing technical difficulties. \
             Please try again later."
        }
        _ => {
            "I apologize, but I was unable to process your message. \
             Please try again with different phrasing."
        }
    }
}

/// Delay before the attempt after `failed_attempt` (0-based), capped.
#[must_use]
pub fn retry_delay(failed_attempt: u32) -> Duration {
    let exp = 1000_u64.saturating_mul(1_u64 << failed_attempt.min(32));
    Duration::from_millis(exp.min(MAX_RETRY_DELAY_MS))
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f64,
    top_p: f64,
    repetition_penalty: f64,
    do_sample: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: GENERATION_MAX_NEW_TOKENS,
            temperature: GENERATION_TEMPERATURE,
            top_p: GENERATION_TOP_P,
            repetition_penalty: GENERATION_REPETITION_PENALTY,
            do_sample: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Serialize)]
struct ClassificationRequest<'a> {
    inputs: &'a str,
    parameters: ClassificationParameters,
}

#[derive(Debug, Serialize)]
struct ClassificationParameters {
    candidate_labels: Vec<&'static str>,
}

/// Zero-shot classification result: labels ranked by score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    /// The classified input, echoed back
    pub sequence: String,
    /// Labels in descending score order
    pub labels: Vec<String>,
    /// Scores aligned with `labels`
    pub scores: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    inputs: &'a str,
}

/// One label/score pair from the sentiment model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelScore {
    /// Class label, e.g. "POSITIVE"
    pub label: String,
    /// Confidence in [0, 1]
    pub score: f64,
}

/// Blocking client for the hosted inference endpoint.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    generation_model: String,
    classification_model: String,
    sentiment_model: String,
}

impl InferenceClient {
    /// Builds a client from the inference config, resolving the API key
    /// from the config file or environment.
    pub fn from_config(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let api_key = config.resolve_api_key().ok_or(InferenceError::MissingKey)?;
        Self::new(api_key, config)
    }

    /// Builds a client with an already-resolved API key.
    pub fn new(api_key: String, config: &InferenceConfig) -> Result<Self, InferenceError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            generation_model: config.generation_model.clone(),
            classification_model: config.classification_model.clone(),
            sentiment_model: config.sentiment_model.clone(),
        })
    }

    /// Free-form continuation of `input`. The caller bounds the input; the
    /// chat clamps it to 250 characters before it gets here.
    pub fn generate(&self, input: &str) -> Result<String, InferenceError> {
        let body = GenerationRequest {
            inputs: input,
            parameters: GenerationParameters::default(),
        };
        let results: Vec<GeneratedText> =
            self.request_with_retry(&self.generation_model, &body)?;
        results
            .into_iter()
            .next()
            .map(|r| r.generated_text)
            .ok_or(InferenceError::EmptyResponse)
    }

    /// Zero-shot classification of CV text against the fixed label set.
    pub fn classify(&self, text: &str) -> Result<Classification, InferenceError> {
        let body = ClassificationRequest {
            inputs: text,
            parameters: ClassificationParameters {
                candidate_labels: CANDIDATE_LABELS.to_vec(),
            },
        };
        self.request_with_retry(&self.classification_model, &body)
    }

    /// Sentiment of `text` as ranked label/score pairs.
    pub fn sentiment(&self, text: &str) -> Result<Vec<LabelScore>, InferenceError> {
        let body = SentimentRequest { inputs: text };
        let rows: Vec<Vec<LabelScore>> =
            self.request_with_retry(&self.sentiment_model, &body)?;
        rows.into_iter().next().ok_or(InferenceError::EmptyResponse)
    }

    /// Issues the request, retrying retryable failures with backoff.
    fn request_with_retry<B: Serialize, T: DeserializeOwned>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<T, InferenceError> {
        let mut attempt = 0;
        loop {
            match self.request(model, body) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt + 1 < MAX_ATTEMPTS => {
                    let delay = retry_delay(attempt);
                    tracing::warn!(
                        model,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "inference call failed, retrying"
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        model: &str,
        body: &B,
    ) -> Result<T, InferenceError> {
        let url = format!("{}/{}", self.base_url, model);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

//! The HTTP client for the generative-text service.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The model used to answer questions about the data.
const GEMINI_MODEL: &str = "gemini-2.5-flash";

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The message shown when the service cannot be reached or returns an error.
pub(crate) const SERVICE_ERROR_MESSAGE: &str =
    "An error occurred while communicating with the AI service.";

/// The message shown when the service responds without any text.
pub(crate) const EMPTY_RESPONSE_MESSAGE: &str = "I couldn't generate an insight at this time.";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// A client for the Gemini generate-content API.
///
/// [InsightsClient::ask] always produces displayable text: transport and API
/// failures are logged and collapse to a fixed error message rather than
/// surfacing as errors to the handler.
pub struct InsightsClient {
    http: reqwest::Client,
    api_key: String,
    model: &'static str,
}

impl InsightsClient {
    /// Create a client that authenticates with `api_key`.
    pub fn new(api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            api_key,
            model: GEMINI_MODEL,
        }
    }

    /// Send `prompt` to the service and return the text to display.
    pub async fn ask(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_RESPONSE_MESSAGE.to_owned(),
            Err(error) => {
                tracing::error!("generate content request failed: {error}");
                SERVICE_ERROR_MESSAGE.to_owned()
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!("{API_BASE_URL}/{}:generateContent", self.model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response: GenerateContentResponse = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.trim().is_empty());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::GenerateContentResponse;

    #[test]
    fn parses_generate_content_response() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [{"text": "Revenue is up."}],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].content.parts[0].text, "Revenue is up.");
    }

    #[test]
    fn tolerates_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();

        assert!(response.candidates.is_empty());
    }
}

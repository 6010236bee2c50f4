//! Gemini `generateContent` provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::HeaderName};
use serde::{Deserialize, Serialize};

use crate::{CompletionGateway, ResultGateway, SamplingParams, endpoint, http_client, non_empty, read_reply};

static API_KEY_HEADER: HeaderName = HeaderName::from_static("x-goog-api-key");

#[derive(Clone, Debug)]
pub struct Gemini {
    client: Client,
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
        Some(text)
    }
}

impl Gemini {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> ResultGateway<Self> {
        let client = http_client(API_KEY_HEADER.clone(), api_key, timeout)?;
        Ok(Self {
            client,
            url: endpoint(base_url, &format!("v1beta/models/{model}:generateContent")),
        })
    }
}

#[async_trait]
impl CompletionGateway for Gemini {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: SamplingParams,
    ) -> ResultGateway<String> {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: [Part { text: system }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: user }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
            },
        };

        tracing::debug!(url = %self.url, prompt_chars = user.len(), "sending gemini generateContent");

        let resp = self.client.post(&self.url).json(&body).send().await?;
        let reply: GenerateResponse = read_reply(resp).await?;
        non_empty(reply.into_text())
    }
}

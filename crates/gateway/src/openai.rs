//! OpenAI chat completions provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};

use crate::{CompletionGateway, ResultGateway, SamplingParams, endpoint, http_client, non_empty, read_reply};

#[derive(Clone, Debug)]
pub struct OpenAi {
    client: Client,
    url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

impl OpenAi {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> ResultGateway<Self> {
        let client = http_client(header::AUTHORIZATION, &format!("Bearer {api_key}"), timeout)?;
        Ok(Self {
            client,
            url: endpoint(base_url, "v1/chat/completions"),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl CompletionGateway for OpenAi {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: SamplingParams,
    ) -> ResultGateway<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = user.len(),
            "sending openai chat completion"
        );

        let resp = self.client.post(&self.url).json(&body).send().await?;
        let reply: ChatResponse = read_reply(resp).await?;
        non_empty(reply.into_text())
    }
}

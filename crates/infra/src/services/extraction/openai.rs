use super::{ExtractionError, IExtractionService, ImagePayload};
use crate::{config::OpenAIConfig, services::create_http_client};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_TOKENS: u32 = 300;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn to_data_url(image: &ImagePayload) -> String {
    format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.bytes))
}

/// Vision model behind an OpenAI compatible chat completions endpoint
pub struct OpenAIExtractionService {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIExtractionService {
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            client: create_http_client(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl IExtractionService for OpenAIExtractionService {
    async fn extract(
        &self,
        image: &ImagePayload,
        instruction: &str,
    ) -> Result<String, ExtractionError> {
        let url = to_data_url(image);
        debug!("Base64 image length: {}", url.len());

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: instruction },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url },
                    },
                ],
            }],
            max_tokens: MAX_TOKENS,
        };

        let res = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ExtractionError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let res: ChatCompletionResponse = res.json().await?;
        let content = res
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ExtractionError::EmptyResponse)?;
        debug!("Extraction service response: {}", content);

        Ok(content)
    }
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::{fmt::Display, time};

use crate::{
    config::{
        constants::{
            API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, IMAGE_PROMPT, MISSING_KEY_MESSAGE,
            SYSTEM_INSTRUCTION, TEMPERATURE,
        },
        BackendConfig, user_agent,
    },
    models::{ArcEventTx, CompletionDelta, Event, Role, Turn, TutorPrompt},
};
use async_trait::async_trait;
use eyre::{Context, Result};
use futures::stream::TryStreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::backend::Backend;

pub struct Gemini {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    timeout: Option<time::Duration>,
}

impl Gemini {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl Backend for Gemini {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn get_completion(&self, prompt: TutorPrompt, event_tx: ArcEventTx) -> Result<()> {
        let message_id = uuid::Uuid::new_v4().to_string();

        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                // Degrades to an in-band message so the UI renders it as
                // ordinary model output.
                let msg = CompletionDelta {
                    id: message_id,
                    text: MISSING_KEY_MESSAGE.to_string(),
                    done: true,
                };
                event_tx.send(Event::ChatCompletionResponse(msg)).await?;
                return Ok(());
            }
        };

        let mut contents = prompt
            .history()
            .iter()
            .map(Content::from)
            .collect::<Vec<_>>();

        let text = if prompt.text().trim().is_empty() {
            IMAGE_PROMPT
        } else {
            prompt.text()
        };

        let mut parts = vec![ContentPart::Text(text.to_string())];
        if let Some(attachment) = prompt.attachment() {
            parts.push(ContentPart::InlineData(InlineBlob {
                mime_type: attachment.mime_type().to_string(),
                data: attachment.data().to_string(),
            }));
        }
        contents.push(Content {
            role: "user".to_string(),
            parts,
        });

        let completion_req = CompletionRequest {
            contents,
            system_instruction: SystemInstruction {
                parts: vec![ContentPart::Text(SYSTEM_INSTRUCTION.trim().to_string())],
            },
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let url = reqwest::Url::parse_with_params(
            &format!(
                "{}/models/{}:streamGenerateContent",
                self.endpoint, self.model
            ),
            &[("key", api_key.as_str())],
        )
        .wrap_err("parsing url")?;

        let mut builder = reqwest::Client::new()
            .post(url)
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        log::trace!("Sending completion request: {:?}", completion_req);

        let resp = builder
            .json(&completion_req)
            .send()
            .await
            .wrap_err("sending completion request")?;

        if !resp.status().is_success() {
            let http_code = resp.status().as_u16();
            let err: ErrorResponse = resp.json().await.wrap_err("parsing error response")?;
            let mut err = err.error;
            err.http_code = http_code;
            return Err(err.into());
        }

        let stream = resp.bytes_stream().map_err(|e| {
            let err_msg = e.to_string();
            std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg)
        });

        let mut lines_reader = StreamReader::new(stream).lines();

        let mut line_buf: Vec<String> = Vec::new();
        let mut finished = false;
        while !finished {
            let line = match lines_reader
                .next_line()
                .await
                .wrap_err("reading response stream")?
            {
                Some(line) => line,
                None => break,
            };

            let cleaned_line = line.trim().to_string();
            log::trace!("Received line: {}", cleaned_line);
            // Chunks of the streamed array are separated by a line holding
            // a single comma.
            if cleaned_line != "," {
                line_buf.push(cleaned_line);
                continue;
            }

            if let Some(chunk) = parse_chunk(&line_buf)? {
                finished = forward_chunk(chunk, &message_id, &event_tx).await?;
            }
            line_buf.clear();
        }

        // Whatever is left in the buffer is the final array element plus
        // the closing bracket.
        if !finished {
            if let Some(chunk) = parse_chunk(&line_buf)? {
                forward_chunk(chunk, &message_id, &event_tx).await?;
            }
        }

        let msg = CompletionDelta {
            id: message_id,
            text: String::new(),
            done: true,
        };
        event_tx.send(Event::ChatCompletionResponse(msg)).await?;
        Ok(())
    }
}

/// Sends the chunk's text as one delta. Returns true when the chunk
/// carries a finish reason, i.e. no further content will follow.
async fn forward_chunk(
    chunk: GenerateContentResponse,
    message_id: &str,
    event_tx: &ArcEventTx,
) -> Result<bool> {
    let Some(candidate) = chunk.candidates.into_iter().next() else {
        return Ok(true);
    };

    let text = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|part| match part {
            ContentPart::Text(text) => Some(text),
            ContentPart::InlineData(blob) => {
                log::warn!("Received inline data: {:?}", blob);
                None
            }
        })
        .collect::<String>();

    if !text.is_empty() {
        let msg = CompletionDelta {
            id: message_id.to_string(),
            text,
            done: false,
        };
        event_tx.send(Event::ChatCompletionResponse(msg)).await?;
    }

    Ok(candidate.finish_reason.is_some())
}

fn parse_chunk(lines: &[String]) -> Result<Option<GenerateContentResponse>> {
    let json_raw = lines.join("");
    let json_raw = json_raw.trim();
    let json_raw = json_raw.strip_prefix('[').unwrap_or(json_raw).trim();
    let json_raw = json_raw.strip_suffix(']').unwrap_or(json_raw).trim();
    let json_raw = json_raw.strip_suffix(',').unwrap_or(json_raw).trim();

    if json_raw.is_empty() {
        return Ok(None);
    }

    let resp: GenerateContentResponse =
        serde_json::from_str(json_raw).wrap_err("unmarshalling response chunk")?;
    Ok(Some(resp))
}

impl Default for Gemini {
    fn default() -> Self {
        Gemini {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl From<&BackendConfig> for Gemini {
    fn from(value: &BackendConfig) -> Self {
        let mut backend = Gemini::default();

        backend.endpoint = value.endpoint.clone();
        backend.model = value.model.clone();
        backend.api_key = value
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok());

        if let Some(secs) = value.timeout_secs {
            backend.timeout = Some(time::Duration::from_secs(secs as u64));
        }

        backend
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineBlob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ContentPart {
    Text(String),
    InlineData(InlineBlob),
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SystemInstruction {
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GenerateCandidate>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateCandidate {
    #[serde(default)]
    content: Content,
    finish_reason: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: GeminiError,
}

#[derive(Default, Error, Debug, Serialize, Deserialize)]
pub struct GeminiError {
    #[serde(skip)]
    pub http_code: u16,
    pub message: String,
    pub code: Option<u16>,
    pub status: Option<String>,
}

impl Display for GeminiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gemini error ({}): {}", self.http_code, self.message)
    }
}

impl From<&Turn> for Content {
    fn from(value: &Turn) -> Self {
        let role = match value.role() {
            Role::Model => "model",
            Role::User => "user",
        };
        Content {
            role: role.to_string(),
            parts: vec![ContentPart::Text(value.text().to_string())],
        }
    }
}

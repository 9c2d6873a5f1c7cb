use crate::error::Result;
use crate::types::config::RelaySettings;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One request, one response. `Err` means the request never completed.
pub trait ChatUpstream {
    fn complete(&self, credential: &str, payload: &ChatPayload) -> Result<UpstreamReply>;
}

pub struct HttpUpstream {
    endpoint: String,
    client: Client,
}

impl HttpUpstream {
    pub fn new(settings: &RelaySettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            client: Client::new(),
        }
    }
}

impl ChatUpstream for HttpUpstream {
    fn complete(&self, credential: &str, payload: &ChatPayload) -> Result<UpstreamReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential)
            .json(payload)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(UpstreamReply { status, body })
    }
}

#[derive(Deserialize)]
struct CompletionBody {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Pulls `choices[0].message.content` out of a chat-completions body.
pub fn extract_reply(body: &str) -> Option<String> {
    let parsed: CompletionBody = serde_json::from_str(body).ok()?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_reply_reads_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Ship it."}},{"message":{"content":"no"}}]}"#;
        assert_eq!(extract_reply(body).as_deref(), Some("Ship it."));
    }

    #[test]
    fn extract_reply_handles_missing_content() {
        assert!(extract_reply(r#"{"choices":[]}"#).is_none());
        assert!(extract_reply(r#"{"choices":[{"message":{}}]}"#).is_none());
        assert!(extract_reply("not json").is_none());
    }
}

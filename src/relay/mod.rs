pub mod upstream;

use crate::error::RadarError;
use crate::types::catalog::CatalogRecord;
use crate::types::config::RelaySettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use upstream::{extract_reply, ChatMessage, ChatPayload, ChatUpstream};

pub const SUBMIT_METHOD: &str = "POST";
pub const EMPTY_REPLY: &str = "Sorry, no response returned.";

#[derive(Debug, Clone, PartialEq)]
pub struct RelayRequest {
    pub method: String,
    pub body: Option<String>,
}

impl RelayRequest {
    pub fn submit(message: &str) -> Self {
        Self {
            method: SUBMIT_METHOD.to_string(),
            body: Some(serde_json::json!({ "message": message }).to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelayBody {
    Reply {
        reply: String,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Input,
    Config,
    Upstream,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: RelayBody,
    pub failure: Option<FailureKind>,
}

impl RelayResponse {
    fn reply(reply: String) -> Self {
        Self {
            status: 200,
            body: RelayBody::Reply { reply },
            failure: None,
        }
    }

    fn fail(status: u16, kind: FailureKind, message: &str, detail: Option<String>) -> Self {
        Self {
            status,
            body: RelayBody::Error {
                error: message.to_string(),
                detail,
            },
            failure: Some(kind),
        }
    }

    pub fn into_result(self) -> Result<String, RadarError> {
        match (self.body, self.failure) {
            (RelayBody::Reply { reply }, _) => Ok(reply),
            (RelayBody::Error { error, detail }, kind) => {
                let message = match detail {
                    Some(detail) => format!("{error}: {detail}"),
                    None => error,
                };
                Err(match kind {
                    Some(FailureKind::Input) => RadarError::Validation(message),
                    Some(FailureKind::Config) => RadarError::Config(message),
                    _ => RadarError::Upstream {
                        status: self.status,
                        detail: message,
                    },
                })
            }
        }
    }
}

pub struct RelayContext<'a> {
    pub settings: &'a RelaySettings,
    pub credential: Option<String>,
    pub catalog: &'a [CatalogRecord],
}

pub fn credential_from_env(settings: &RelaySettings) -> Option<String> {
    std::env::var(&settings.api_key_env)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn system_prompt(catalog: &[CatalogRecord], limit: usize) -> String {
    let snippet = catalog
        .iter()
        .take(limit)
        .map(|record| {
            format!(
                "- {}: {} (cost: {})",
                record.name,
                record.categories.join(", "),
                record.cost
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are a concise, practical startup advisor. Provide actionable, step-by-step startup tips (1-3 steps) and recommend low-cost tools if relevant.\n\
         Context (sample tools):\n{snippet}\n\
         If the user asks for tools, prefer low-complexity or freemium options for early-stage startups."
    )
}

/// Single best-effort relay of one user message. No retries.
pub fn handle(
    request: &RelayRequest,
    context: &RelayContext<'_>,
    upstream: &dyn ChatUpstream,
) -> RelayResponse {
    if !request.method.eq_ignore_ascii_case(SUBMIT_METHOD) {
        return RelayResponse::fail(405, FailureKind::Input, "Method not allowed", None);
    }

    let body: MessageBody = request
        .body
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();
    let message = body.message.trim();
    if message.is_empty() {
        return RelayResponse::fail(400, FailureKind::Input, "No message provided", None);
    }

    let Some(credential) = context.credential.as_deref() else {
        return RelayResponse::fail(
            500,
            FailureKind::Config,
            "API key not configured on server",
            None,
        );
    };

    let payload = ChatPayload {
        model: context.settings.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt(context.catalog, context.settings.context_tools),
            },
            ChatMessage {
                role: "user".to_string(),
                content: message.to_string(),
            },
        ],
        max_tokens: context.settings.max_tokens,
        temperature: context.settings.temperature,
    };

    debug!(model = %payload.model, "relaying chat message");
    match upstream.complete(credential, &payload) {
        Ok(reply) if reply.is_success() => RelayResponse::reply(
            extract_reply(&reply.body).unwrap_or_else(|| EMPTY_REPLY.to_string()),
        ),
        Ok(reply) => {
            error!(status = reply.status, "model returned an error");
            RelayResponse::fail(502, FailureKind::Upstream, "Model error", Some(reply.body))
        }
        Err(err) => {
            error!(error = %err, "chat relay failed");
            RelayResponse::fail(
                500,
                FailureKind::Upstream,
                "Server error",
                Some(err.to_string()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::upstream::UpstreamReply;
    use super::*;
    use crate::catalog::fallback_catalog;
    use crate::error::Result;
    use std::cell::RefCell;

    struct StubUpstream {
        reply: std::result::Result<UpstreamReply, String>,
        seen: RefCell<Vec<(String, ChatPayload)>>,
    }

    impl StubUpstream {
        fn answering(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(UpstreamReply {
                    status,
                    body: body.to_string(),
                }),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ChatUpstream for StubUpstream {
        fn complete(&self, credential: &str, payload: &ChatPayload) -> Result<UpstreamReply> {
            self.seen
                .borrow_mut()
                .push((credential.to_string(), payload.clone()));
            self.reply.clone().map_err(|detail| RadarError::Upstream {
                status: 0,
                detail,
            })
        }
    }

    fn run(request: RelayRequest, credential: Option<&str>, upstream: &StubUpstream) -> RelayResponse {
        let settings = RelaySettings::default();
        let catalog = fallback_catalog();
        let context = RelayContext {
            settings: &settings,
            credential: credential.map(ToString::to_string),
            catalog: &catalog,
        };
        handle(&request, &context, upstream)
    }

    #[test]
    fn non_submit_method_is_405() {
        let upstream = StubUpstream::answering(200, "{}");
        let request = RelayRequest {
            method: "GET".to_string(),
            body: None,
        };
        let response = run(request, Some("key"), &upstream);
        assert_eq!(response.status, 405);
        assert!(upstream.seen.borrow().is_empty());
    }

    #[test]
    fn blank_or_unparseable_message_is_400() {
        let upstream = StubUpstream::answering(200, "{}");
        assert_eq!(run(RelayRequest::submit("   "), Some("key"), &upstream).status, 400);
        let garbage = RelayRequest {
            method: "POST".to_string(),
            body: Some("not json".to_string()),
        };
        assert_eq!(run(garbage, Some("key"), &upstream).status, 400);
    }

    #[test]
    fn missing_credential_is_500_config_error() {
        let upstream = StubUpstream::answering(200, "{}");
        let response = run(RelayRequest::submit("hi"), None, &upstream);
        assert_eq!(response.status, 500);
        assert_eq!(response.failure, Some(FailureKind::Config));
        assert!(matches!(response.into_result(), Err(RadarError::Config(_))));
    }

    #[test]
    fn upstream_non_success_is_502_with_detail() {
        let upstream = StubUpstream::answering(429, "rate limited");
        let response = run(RelayRequest::submit("hi"), Some("key"), &upstream);
        assert_eq!(response.status, 502);
        assert_eq!(
            response.body,
            RelayBody::Error {
                error: "Model error".to_string(),
                detail: Some("rate limited".to_string()),
            }
        );
    }

    #[test]
    fn transport_failure_is_reported_not_retried() {
        let upstream = StubUpstream::failing("connection refused");
        let response = run(RelayRequest::submit("hi"), Some("key"), &upstream);
        assert_eq!(response.status, 500);
        assert_eq!(upstream.seen.borrow().len(), 1);
        assert!(matches!(
            response.into_result(),
            Err(RadarError::Upstream { status: 500, .. })
        ));
    }

    #[test]
    fn success_relays_reply_and_builds_payload() {
        let upstream = StubUpstream::answering(
            200,
            r#"{"choices":[{"message":{"content":"Start with Notion."}}]}"#,
        );
        let response = run(RelayRequest::submit("  which tool?  "), Some("sk-test"), &upstream);
        assert_eq!(response.status, 200);
        assert_eq!(
            response.into_result().expect("reply should relay"),
            "Start with Notion."
        );

        let seen = upstream.seen.borrow();
        let (credential, payload) = &seen[0];
        assert_eq!(credential, "sk-test");
        assert_eq!(payload.model, "gpt-4o-mini");
        assert_eq!(payload.max_tokens, 350);
        assert_eq!(payload.messages[1].content, "which tool?");
        assert!(payload.messages[0]
            .content
            .contains("- HubSpot: Marketing, Sales (cost: subscription)"));
    }

    #[test]
    fn success_without_content_uses_placeholder_reply() {
        let upstream = StubUpstream::answering(200, r#"{"choices":[]}"#);
        let response = run(RelayRequest::submit("hi"), Some("key"), &upstream);
        assert_eq!(
            response.body,
            RelayBody::Reply {
                reply: EMPTY_REPLY.to_string()
            }
        );
    }

    #[test]
    fn error_body_serializes_without_empty_detail() {
        let body = RelayBody::Error {
            error: "No message provided".to_string(),
            detail: None,
        };
        assert_eq!(
            serde_json::to_string(&body).expect("body should serialize"),
            r#"{"error":"No message provided"}"#
        );
    }
}

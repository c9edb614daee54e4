//! Client for the itinerary agent's `/chat` endpoint.

use crate::config::BackendSettings;
use crate::models::{ChatReply, ChatRequest};
use async_trait::async_trait;
use planner_core::observability::TracedClientExt;
use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend timed out")]
    Timeout,

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed backend response: {0}")]
    Decode(String),
}

/// The remote agent as seen by the orchestrator: one message in, one reply out.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, message: &str) -> Result<ChatReply, ChatClientError>;
}

pub struct HttpChatClient {
    client: Client,
    settings: BackendSettings,
}

impl HttpChatClient {
    pub fn new(settings: BackendSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn chat_url(&self) -> String {
        self.settings.chat_url()
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn chat(&self, message: &str) -> Result<ChatReply, ChatClientError> {
        let url = self.chat_url();

        tracing::debug!(url = %url, message_len = message.len(), "Sending plan request to backend");

        let response = self
            .client
            .traced_post(&url)
            .json(&ChatRequest { message })
            .timeout(self.settings.timeout())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatClientError::Timeout
                } else {
                    ChatClientError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpChatClient {
        HttpChatClient::new(BackendSettings {
            url: server.uri(),
            timeout_seconds: None,
        })
    }

    #[tokio::test]
    async fn posts_message_and_parses_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(serde_json::json!({ "message": "plan Austin" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reply": "Day 1: ...",
                "details": { "weather": "sunny", "attractions": null }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).chat("plan Austin").await.unwrap();

        assert_eq!(reply.reply, "Day 1: ...");
        let details = reply.details.unwrap();
        assert_eq!(details.weather.as_deref(), Some("sunny"));
        assert!(details.attractions.is_none());
    }

    #[tokio::test]
    async fn server_error_is_reported_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("graph exploded"))
            .mount(&server)
            .await;

        let err = client_for(&server).chat("hi").await.unwrap_err();

        match err {
            ChatClientError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "graph exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).chat("hi").await.unwrap_err();
        assert!(matches!(err, ChatClientError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let client = HttpChatClient::new(BackendSettings {
            url: "http://127.0.0.1:1".to_string(),
            timeout_seconds: None,
        });

        let err = client.chat("hi").await.unwrap_err();
        assert!(matches!(err, ChatClientError::Network(_)));
    }

    #[tokio::test]
    async fn configured_timeout_is_enforced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "reply": "late" }))
                    .set_delay(std::time::Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = HttpChatClient::new(BackendSettings {
            url: server.uri(),
            timeout_seconds: Some(1),
        });

        let err = client.chat("hi").await.unwrap_err();
        assert!(matches!(err, ChatClientError::Timeout));
    }
}

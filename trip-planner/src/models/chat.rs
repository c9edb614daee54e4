use super::DebugTrace;
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Successful `/chat` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub details: Option<DebugTrace>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_message_field() {
        let body = serde_json::to_value(ChatRequest { message: "hello" }).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "hello" }));
    }

    #[test]
    fn reply_without_details() {
        let reply: ChatReply = serde_json::from_str(r#"{"reply":"Day 1: ..."}"#).unwrap();
        assert_eq!(reply.reply, "Day 1: ...");
        assert!(reply.details.is_none());
    }

    #[test]
    fn reply_with_null_details() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"reply":"Day 1: ...","details":null}"#).unwrap();
        assert!(reply.details.is_none());
    }

    #[test]
    fn reply_is_required() {
        assert!(serde_json::from_str::<ChatReply>(r#"{"details":{}}"#).is_err());
    }
}

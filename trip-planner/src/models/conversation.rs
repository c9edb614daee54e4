use serde::Serialize;

/// Opening assistant turn of every new planner session.
pub const GREETING: &str =
    "👋 Hi! Pick your destination and travel dates, and I'll plan the trip for you.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One transcript message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    role: Role,
    content: String,
}

impl ChatTurn {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only, chronologically ordered transcript.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationLog {
    turns: Vec<ChatTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting() -> Self {
        let mut log = Self::new();
        log.push_assistant(GREETING);
        log
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content.into());
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content.into());
    }

    fn push(&mut self, role: Role, content: String) {
        self.turns.push(ChatTurn { role, content });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_append_order() {
        let mut log = ConversationLog::new();
        log.push_user("first");
        log.push_assistant("second");
        log.push_user("third");

        let roles: Vec<Role> = log.turns().iter().map(ChatTurn::role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(log.last().unwrap().content(), "third");
    }

    #[test]
    fn greeting_log_has_single_assistant_turn() {
        let log = ConversationLog::with_greeting();
        assert_eq!(log.len(), 1);
        assert_eq!(log.turns()[0].role(), Role::Assistant);
        assert_eq!(log.turns()[0].content(), GREETING);
    }
}

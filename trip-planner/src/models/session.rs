use super::{ConversationLog, DebugTrace, Selection};

/// Whether a plan request is in flight for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestPhase {
    #[default]
    Idle,
    Pending,
}

/// All state behind one browser session.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    pub selection: Selection,
    pub log: ConversationLog,
    pub debug: Option<DebugTrace>,
    /// Trace hidden while a request is pending; restored if that request fails.
    pub previous_debug: Option<DebugTrace>,
    pub phase: RequestPhase,
}

impl PlannerSession {
    /// A fresh session: empty selection, greeting-only transcript, no trace.
    pub fn new() -> Self {
        Self {
            selection: Selection::new(),
            log: ConversationLog::with_greeting(),
            debug: None,
            previous_debug: None,
            phase: RequestPhase::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RequestPhase::Pending
    }
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new()
    }
}

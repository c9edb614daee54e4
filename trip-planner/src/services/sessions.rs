use crate::models::PlannerSession;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

pub type SharedSession = Arc<Mutex<PlannerSession>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Planner state for every live browser session, keyed by the id kept in the cookie session.
pub struct PlannerSessions {
    sessions: DashMap<Uuid, Entry>,
    idle_timeout: Duration,
}

impl PlannerSessions {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    /// Start a fresh planner session. Idle sessions are swept first.
    pub fn create(&self) -> (Uuid, SharedSession) {
        let evicted = self.evict_idle();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle planner sessions");
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(PlannerSession::new()));
        self.sessions.insert(
            id,
            Entry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::info!(planner_id = %id, "Planner session started");
        (id, session)
    }

    /// Look up a session and mark it as active.
    pub fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get_mut(id).map(|mut entry| {
            entry.last_seen = Instant::now();
            entry.session.clone()
        })
    }

    /// End a session. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::info!(planner_id = %id, "Planner session ended");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn evict_idle(&self) -> usize {
        let before = self.sessions.len();
        let timeout = self.idle_timeout;
        self.sessions
            .retain(|_, entry| entry.last_seen.elapsed() < timeout);
        before.saturating_sub(self.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::conversation::GREETING;

    #[tokio::test]
    async fn new_session_starts_with_greeting_only() {
        let sessions = PlannerSessions::new(Duration::from_secs(60));
        let (id, session) = sessions.create();

        let guard = session.lock().await;
        assert_eq!(guard.log.len(), 1);
        assert_eq!(guard.log.turns()[0].content(), GREETING);
        assert!(guard.selection.country().is_none());
        assert!(guard.debug.is_none());
        assert!(sessions.get(&id).is_some());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let sessions = PlannerSessions::new(Duration::from_secs(60));
        let (_, first) = sessions.create();
        let (_, second) = sessions.create();

        first.lock().await.selection.set_interests("museums");

        assert_eq!(second.lock().await.selection.interests(), "");
    }

    #[test]
    fn remove_ends_session() {
        let sessions = PlannerSessions::new(Duration::from_secs(60));
        let (id, _) = sessions.create();

        assert!(sessions.remove(&id));
        assert!(sessions.get(&id).is_none());
        assert!(!sessions.remove(&id));
        assert!(sessions.is_empty());
    }

    #[test]
    fn idle_sessions_are_evicted_on_create() {
        let sessions = PlannerSessions::new(Duration::ZERO);
        let (stale, _) = sessions.create();

        let (fresh, _) = sessions.create();

        assert!(sessions.get(&stale).is_none());
        assert!(sessions.get(&fresh).is_some());
        assert_eq!(sessions.len(), 1);
    }
}

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::ChatTurn;
use crate::services::concierge::GREETING;

/// Переписка одного открытого окна чата.
#[derive(Debug)]
pub struct ChatSession {
    pub turns: Vec<ChatTurn>,
    last_active: Instant,
}

impl ChatSession {
    fn new() -> Self {
        Self {
            turns: vec![ChatTurn::assistant(GREETING)],
            last_active: Instant::now(),
        }
    }

    /// Дописать обмен репликами: сообщение пользователя и ответ.
    pub fn push_exchange(&mut self, user: ChatTurn, reply: ChatTurn) {
        self.turns.push(user);
        self.turns.push(reply);
        self.last_active = Instant::now();
    }
}

pub type SessionHandle = Arc<Mutex<ChatSession>>;

/// Сессии чата в памяти. Каждая сессия под своим мьютексом, поэтому в одной
/// сессии сообщения обрабатываются строго по одному.
#[derive(Clone, Default)]
pub struct ChatSessions {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl ChatSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Открыть окно чата: новая сессия с приветствием.
    pub fn open(&self) -> (Uuid, Vec<ChatTurn>) {
        let id = Uuid::new_v4();
        let session = ChatSession::new();
        let turns = session.turns.clone();
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(session)));
        debug!("Chat session {} opened", id);
        (id, turns)
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Закрыть окно чата. Ответ, который ещё в пути, просто никуда не попадёт.
    pub fn close(&self, id: &Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            debug!("Chat session {} closed", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Удалить сессии, в которых ничего не происходило дольше `idle`.
    /// Занятые сессии (идёт запрос к бэкенду) не трогаем.
    pub fn remove_idle(&self, idle: Duration) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(s) => s.last_active.elapsed() < idle,
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            info!("Removed {} idle chat sessions", removed);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_starts_with_greeting() {
        let sessions = ChatSessions::new();
        let (id, turns) = sessions.open();
        assert_eq!(turns, vec![ChatTurn::assistant(GREETING)]);
        assert!(sessions.get(&id).is_some());
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_close_forgets_session() {
        let sessions = ChatSessions::new();
        let (id, _) = sessions.open();
        assert!(sessions.close(&id));
        assert!(!sessions.close(&id));
        assert!(sessions.get(&id).is_none());
        assert!(sessions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_idle_keeps_recent_and_busy_sessions() {
        let sessions = ChatSessions::new();
        let (stale, _) = sessions.open();
        let (busy, _) = sessions.open();

        tokio::time::advance(Duration::from_secs(3600)).await;
        let (fresh, _) = sessions.open();

        let busy_handle = sessions.get(&busy).unwrap();
        let _guard = busy_handle.lock().await;

        assert_eq!(sessions.remove_idle(Duration::from_secs(1800)), 1);
        assert!(sessions.get(&stale).is_none());
        assert!(sessions.get(&busy).is_some());
        assert!(sessions.get(&fresh).is_some());
    }

    #[tokio::test]
    async fn test_push_exchange_appends_in_order() {
        let sessions = ChatSessions::new();
        let (id, _) = sessions.open();
        let handle = sessions.get(&id).unwrap();

        let mut session = handle.lock().await;
        session.push_exchange(ChatTurn::user("Hello"), ChatTurn::assistant("Sannu!"));
        assert_eq!(session.turns.len(), 3);
        assert_eq!(session.turns[1].text, "Hello");
        assert_eq!(session.turns[2].text, "Sannu!");
    }
}

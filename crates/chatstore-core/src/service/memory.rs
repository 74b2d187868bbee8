//! In-memory repository used by service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chatstore_types::error::RepositoryError;
use chatstore_types::message::Message;
use chatstore_types::session::{Session, SessionFilter};
use uuid::Uuid;

use crate::repository::message::MessageRepository;
use crate::repository::session::SessionRepository;

#[derive(Default)]
struct Tables {
    sessions: HashMap<Uuid, Session>,
    messages: Vec<Message>,
}

/// Shared in-memory tables implementing both repository traits.
///
/// Clones share state, so a session service and a message service built from
/// clones of one store see each other's writes.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub fn message_count(&self) -> usize {
        self.tables.lock().unwrap().messages.len()
    }
}

impl SessionRepository for InMemoryStore {
    async fn create(&self, session: &Session) -> Result<Session, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        tables.sessions.insert(session.id, session.clone());
        Ok(session.clone())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Session>, RepositoryError> {
        Ok(self.tables.lock().unwrap().sessions.get(id).cloned())
    }

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut sessions: Vec<Session> = tables
            .sessions
            .values()
            .filter(|s| s.owner_id == filter.owner_id)
            .filter(|s| filter.is_favorite.is_none_or(|fav| s.is_favorite == fav))
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(sessions)
    }

    async fn update(&self, session: &Session) -> Result<Session, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.sessions.get_mut(&session.id) {
            Some(existing) => {
                *existing = session.clone();
                Ok(session.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.sessions.remove(id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        tables.messages.retain(|m| m.session_id != *id);
        Ok(())
    }
}

impl MessageRepository for InMemoryStore {
    async fn append(&self, message: &Message) -> Result<Message, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let session = tables
            .sessions
            .get_mut(&message.session_id)
            .ok_or(RepositoryError::NotFound)?;
        session.updated_at = message.created_at;
        tables.messages.push(message.clone());
        Ok(message.clone())
    }

    async fn list_by_session(
        &self,
        session_id: &Uuid,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Message>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .messages
            .iter()
            .filter(|m| m.session_id == *session_id)
            .skip(skip as usize)
            .take(take as usize)
            .cloned()
            .collect())
    }

    async fn count_by_session(&self, session_id: &Uuid) -> Result<u64, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .messages
            .iter()
            .filter(|m| m.session_id == *session_id)
            .count() as u64)
    }
}

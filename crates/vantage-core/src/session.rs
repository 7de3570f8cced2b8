//! In-memory session registry.
//!
//! Sessions live for the process lifetime only; nothing is persisted.
//! Message history is strictly append-only: turns and persona-switch notices
//! are added at the end, and no operation edits or removes an earlier
//! message. Reads hand out cloned snapshots.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use vantage_types::chat::{ChatMessage, Session};
use vantage_types::error::SessionError;
use vantage_types::persona::Persona;

/// Concurrent map of live sessions keyed by session id.
///
/// Cheap to clone (`Arc` inside); clones share the same underlying map.
/// Methods take `&self` and hold map guards only for the duration of the
/// call -- never across an await point.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Create a session for a persona, seeded with its welcome message.
    ///
    /// The welcome is an assistant message; it is not a conversation turn.
    pub fn create(&self, persona: &Persona) -> Session {
        let mut session = Session::new(persona.id);
        session
            .messages
            .push(ChatMessage::assistant(welcome_message(persona), None));
        self.inner.insert(session.id, session.clone());
        session
    }

    /// Snapshot a session by id.
    pub fn get(&self, id: &Uuid) -> Result<Session, SessionError> {
        self.inner
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::NotFound)
    }

    /// Append one completed turn: the user message followed by the
    /// assistant reply. Returns the updated snapshot.
    ///
    /// Callers only reach this after the upstream call succeeded, so a
    /// failed turn leaves the history untouched.
    pub fn append_turn(
        &self,
        id: &Uuid,
        user: ChatMessage,
        assistant: ChatMessage,
    ) -> Result<Session, SessionError> {
        let mut entry = self.inner.get_mut(id).ok_or(SessionError::NotFound)?;
        let session = entry.value_mut();
        session.messages.push(user);
        session.messages.push(assistant);
        session.last_active_at = Utc::now();
        Ok(session.clone())
    }

    /// Point a session at a different persona.
    ///
    /// Prior messages are left exactly as they were; the only history
    /// change is an appended switch notice. Returns the updated snapshot.
    pub fn switch_persona(&self, id: &Uuid, persona: &Persona) -> Result<Session, SessionError> {
        let mut entry = self.inner.get_mut(id).ok_or(SessionError::NotFound)?;
        let session = entry.value_mut();
        session.persona = persona.id;
        session
            .messages
            .push(ChatMessage::assistant(switch_notice(persona), None));
        session.last_active_at = Utc::now();
        Ok(session.clone())
    }

    /// Drop a session, returning its final state.
    pub fn remove(&self, id: &Uuid) -> Result<Session, SessionError> {
        self.inner
            .remove(id)
            .map(|(_, session)| session)
            .ok_or(SessionError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Greeting seeded into every new session.
fn welcome_message(persona: &Persona) -> String {
    let lead_focus = persona
        .focus_areas
        .first()
        .map(String::as_str)
        .unwrap_or("your goals");
    format!(
        "Welcome! I'm your {}. Ask me about {} or request an analysis.",
        persona.name, lead_focus
    )
}

/// Notice appended when a session changes persona.
fn switch_notice(persona: &Persona) -> String {
    format!(
        "🔄 **Switched to {} {} Mode**\n\n*{}*\n\n**Focus areas:** {}",
        persona.icon,
        persona.name,
        persona.description,
        persona.focus_areas.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PersonaCatalog;
    use vantage_types::chat::MessageRole;
    use vantage_types::persona::PersonaId;

    fn catalog() -> PersonaCatalog {
        PersonaCatalog::new()
    }

    #[test]
    fn create_seeds_welcome_message() {
        let catalog = catalog();
        let store = SessionStore::new();

        let session = store.create(catalog.by_id(PersonaId::Sales));

        assert_eq!(session.persona, PersonaId::Sales);
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, MessageRole::Assistant);
        assert!(session.messages[0].content.contains("Sales Executive"));
        assert!(session.messages[0].content.contains("revenue growth"));
    }

    #[test]
    fn get_returns_snapshot_not_live_view() {
        let catalog = catalog();
        let store = SessionStore::new();
        let session = store.create(catalog.by_id(PersonaId::Finance));

        let mut snapshot = store.get(&session.id).unwrap();
        snapshot.messages.clear();

        let fresh = store.get(&session.id).unwrap();
        assert_eq!(fresh.messages.len(), 1);
    }

    #[test]
    fn get_unknown_session_fails() {
        let store = SessionStore::new();
        let err = store.get(&Uuid::now_v7()).unwrap_err();
        assert!(matches!(err, SessionError::NotFound));
    }

    #[test]
    fn append_turn_adds_user_then_assistant() {
        let catalog = catalog();
        let store = SessionStore::new();
        let session = store.create(catalog.by_id(PersonaId::Research));

        let updated = store
            .append_turn(
                &session.id,
                ChatMessage::user("How big is the market?"),
                ChatMessage::assistant("The market is roughly $15B.", None),
            )
            .unwrap();

        assert_eq!(updated.messages.len(), 3);
        assert_eq!(updated.messages[1].role, MessageRole::User);
        assert_eq!(updated.messages[1].content, "How big is the market?");
        assert_eq!(updated.messages[2].role, MessageRole::Assistant);
    }

    #[test]
    fn append_turn_refreshes_last_active() {
        let catalog = catalog();
        let store = SessionStore::new();
        let session = store.create(catalog.by_id(PersonaId::Sales));

        let updated = store
            .append_turn(
                &session.id,
                ChatMessage::user("hi"),
                ChatMessage::assistant("hello", None),
            )
            .unwrap();

        assert!(updated.last_active_at >= updated.started_at);
    }

    #[test]
    fn append_turn_unknown_session_fails() {
        let store = SessionStore::new();
        let result = store.append_turn(
            &Uuid::now_v7(),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello", None),
        );
        assert!(matches!(result, Err(SessionError::NotFound)));
    }

    #[test]
    fn switch_persona_appends_notice_and_keeps_history() {
        let catalog = catalog();
        let store = SessionStore::new();
        let session = store.create(catalog.by_id(PersonaId::Sales));
        store
            .append_turn(
                &session.id,
                ChatMessage::user("What's our pipeline value?"),
                ChatMessage::assistant("Pipeline sits at $2.5M.", None),
            )
            .unwrap();
        let before = store.get(&session.id).unwrap();

        let after = store
            .switch_persona(&session.id, catalog.by_id(PersonaId::Finance))
            .unwrap();

        assert_eq!(after.persona, PersonaId::Finance);
        assert_eq!(after.messages.len(), before.messages.len() + 1);
        for (prior, kept) in before.messages.iter().zip(after.messages.iter()) {
            assert_eq!(prior.id, kept.id);
            assert_eq!(prior.content, kept.content);
        }
        let notice = after.messages.last().unwrap();
        assert_eq!(notice.role, MessageRole::Assistant);
        assert!(notice.content.contains("Switched to"));
        assert!(notice.content.contains("Financial Analyst"));
    }

    #[test]
    fn switch_persona_unknown_session_fails() {
        let catalog = catalog();
        let store = SessionStore::new();
        let result = store.switch_persona(&Uuid::now_v7(), catalog.by_id(PersonaId::Product));
        assert!(matches!(result, Err(SessionError::NotFound)));
    }

    #[test]
    fn remove_returns_final_state() {
        let catalog = catalog();
        let store = SessionStore::new();
        let session = store.create(catalog.by_id(PersonaId::Strategy));

        let removed = store.remove(&session.id).unwrap();
        assert_eq!(removed.id, session.id);
        assert!(store.get(&session.id).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_unknown_session_fails() {
        let store = SessionStore::new();
        assert!(matches!(
            store.remove(&Uuid::now_v7()),
            Err(SessionError::NotFound)
        ));
    }

    #[test]
    fn clones_share_the_same_sessions() {
        let catalog = catalog();
        let store = SessionStore::new();
        let handle = store.clone();

        let session = handle.create(catalog.by_id(PersonaId::Product));

        assert_eq!(store.len(), 1);
        assert!(store.get(&session.id).is_ok());
    }
}

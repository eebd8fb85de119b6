//! Session persistence.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use triage_core::models::saved::SavedAssessment;
use triage_core::models::session::DialogueSession;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A live session. One turn holds the lock for its whole duration.
pub type SessionHandle = Arc<Mutex<DialogueSession>>;

/// Where sessions and saved assessments live.
///
/// Methods return boxed futures for dyn compatibility.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: DialogueSession) -> BoxFuture<'_, SessionHandle>;

    fn get(&self, id: Uuid) -> BoxFuture<'_, Option<SessionHandle>>;

    fn save_assessment(&self, assessment: SavedAssessment) -> BoxFuture<'_, ()>;

    fn saved_assessment(&self, id: Uuid) -> BoxFuture<'_, Option<SavedAssessment>>;
}

/// Process-local store. Sessions are lost on restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    saved: RwLock<HashMap<Uuid, SavedAssessment>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl SessionStore for MemorySessionStore {
    fn insert(&self, session: DialogueSession) -> BoxFuture<'_, SessionHandle> {
        Box::pin(async move {
            let id = session.id;
            let handle = Arc::new(Mutex::new(session));
            self.sessions.write().await.insert(id, Arc::clone(&handle));
            handle
        })
    }

    fn get(&self, id: Uuid) -> BoxFuture<'_, Option<SessionHandle>> {
        Box::pin(async move { self.sessions.read().await.get(&id).cloned() })
    }

    fn save_assessment(&self, assessment: SavedAssessment) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.saved.write().await.insert(assessment.id, assessment);
        })
    }

    fn saved_assessment(&self, id: Uuid) -> BoxFuture<'_, Option<SavedAssessment>> {
        Box::pin(async move { self.saved.read().await.get(&id).cloned() })
    }
}

//! Opaque server-side sessions keyed by a `session_id` cookie.

use std::{collections::HashMap, sync::Arc};

use axum::http::{HeaderMap, header};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session_id";

/// In-memory session map shared across request handlers. Sessions don't
/// survive a restart; clients just log in again.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Uuid>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, user_id: Uuid) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.inner
            .write()
            .await
            .insert(session_id.clone(), user_id);
        tracing::debug!(%user_id, "session created");
        session_id
    }

    pub async fn get(&self, session_id: &str) -> Option<Uuid> {
        self.inner.read().await.get(session_id).copied()
    }

    pub async fn remove(&self, session_id: &str) -> bool {
        self.inner.write().await.remove(session_id).is_some()
    }
}

/// Pull the session id out of the Cookie header, if any.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                cookie
                    .trim()
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(str::to_string)
            })
        })
}

pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

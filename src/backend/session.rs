//! Opaque auth session holder
//!
//! Authentication itself lives outside this library. The UI shell obtains a
//! session from its auth provider and deposits it here; the table client
//! reads it for the bearer token. Sign-out clears the slot.

use std::sync::RwLock;

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Backend user id, stamped onto owned rows at insert time
    pub user_id: String,
    /// Bearer token for table requests
    pub access_token: String,
}

/// Thread-safe slot for the current session
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current session, if signed in
    pub fn current_session(&self) -> Option<Session> {
        self.inner.read().expect("session lock poisoned").clone()
    }

    /// Replace the current session
    pub fn set_session(&self, session: Session) {
        *self.inner.write().expect("session lock poisoned") = Some(session);
    }

    /// Sign out
    pub fn sign_out(&self) {
        *self.inner.write().expect("session lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let store = SessionStore::new();
        assert!(store.current_session().is_none());

        store.set_session(Session {
            user_id: "u1".to_string(),
            access_token: "token".to_string(),
        });
        assert_eq!(store.current_session().unwrap().user_id, "u1");

        store.sign_out();
        assert!(store.current_session().is_none());
    }
}

//! Authentication half of the session: token + user, hydrated from the store.

use asp_core::{Exam, SessionState, UserSummary};

use crate::error::{SessionError, StoreError};
use crate::store::{KeyValueStore, keys};

/// The single authoritative client session.
///
/// Owns the store it persists to; callers receive it by injection rather than
/// through a global. `token` and `user` are always set and cleared together.
#[derive(Debug)]
pub struct Session<S> {
    pub(crate) store: S,
    pub(crate) state: SessionState,
    pub(crate) token: Option<String>,
    pub(crate) user: Option<UserSummary>,
    pub(crate) current_exam: Option<Exam>,
}

impl<S: KeyValueStore> Session<S> {
    /// Create an uninitialized session. Call [`Self::hydrate`] before use.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::Uninitialized,
            token: None,
            user: None,
            current_exam: None,
        }
    }

    /// Create and hydrate in one step.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store cannot be read.
    pub fn open(store: S) -> Result<Self, SessionError> {
        let mut session = Self::new(store);
        session.hydrate()?;
        Ok(session)
    }

    /// Load `token` and `user` from the store and settle.
    ///
    /// Corrupt user JSON, or a token without a user (or the reverse), wipes
    /// the session keys and settles into `Anonymous` rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] if the store cannot be read; the
    /// session is left `Anonymous` in that case.
    pub fn hydrate(&mut self) -> Result<SessionState, SessionError> {
        self.transition(SessionState::Hydrating)?;
        self.discard_legacy_onboarding();

        let stored = match self.read_stored() {
            Ok(stored) => stored,
            Err(error) => {
                self.clear_memory();
                self.transition(SessionState::Anonymous)?;
                return Err(error.into());
            }
        };

        match stored {
            Some((token, user)) => {
                self.token = Some(token);
                self.user = Some(user);
                self.transition(SessionState::Authenticated)?;
            }
            None => {
                self.clear_memory();
                self.transition(SessionState::Anonymous)?;
            }
        }

        if let Err(error) = self.refresh_exam() {
            tracing::warn!(%error, "failed to persist derived exam selection");
        }

        tracing::debug!(state = %self.state, "session hydrated");
        Ok(self.state)
    }

    /// Record a successful login and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persist`] if the store rejects a write. The
    /// in-memory session is already `Authenticated` at that point.
    pub fn login(&mut self, user: UserSummary, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        let user_json = serde_json::to_string(&user)?;

        self.transition(SessionState::Authenticated)?;
        self.token = Some(token.clone());
        self.user = Some(user);

        self.store
            .set(keys::TOKEN, &token)
            .and_then(|()| self.store.set(keys::USER, &user_json))
            .map_err(SessionError::Persist)?;

        self.refresh_exam()
    }

    /// Clear the session in memory and in the store. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Persist`] with the first failed removal; every
    /// key is still attempted.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.transition(SessionState::Anonymous)?;
        self.clear_memory();
        self.wipe_keys().map_err(SessionError::Persist)
    }

    /// Replace the signed-in user (after a profile edit or settings save).
    ///
    /// Does not check that the token is still accepted by the server.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] outside `Authenticated`, or
    /// [`SessionError::Persist`] if the store rejects the write.
    pub fn update_user(&mut self, user: UserSummary) -> Result<(), SessionError> {
        if !self.is_authenticated() || self.state != SessionState::Authenticated {
            return Err(SessionError::NotAuthenticated);
        }
        let user_json = serde_json::to_string(&user)?;
        self.user = Some(user);
        self.store
            .set(keys::USER, &user_json)
            .map_err(SessionError::Persist)?;
        self.refresh_exam()
    }

    /// `true` when both a token and a user are present. No expiry check.
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// `Authorization` header value for the current token.
    pub fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Still settling; guards should wait.
    pub const fn loading(&self) -> bool {
        self.state.is_loading()
    }

    pub const fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn transition(&mut self, next: SessionState) -> Result<(), SessionError> {
        if !self.state.can_transition_to(next) {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    fn clear_memory(&mut self) {
        self.token = None;
        self.user = None;
        self.current_exam = None;
    }

    fn wipe_keys(&self) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in keys::SESSION_KEYS {
            if let Err(error) = self.store.remove(key) {
                tracing::warn!(key, %error, "failed to remove session key");
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Both values present and parseable, or `None` after wiping whatever was there.
    fn read_stored(&self) -> Result<Option<(String, UserSummary)>, StoreError> {
        let token = self.store.get(keys::TOKEN)?;
        let raw_user = self.store.get(keys::USER)?;

        match (token, raw_user) {
            (None, None) => Ok(None),
            (Some(token), Some(raw_user)) => match serde_json::from_str(&raw_user) {
                Ok(user) => Ok(Some((token, user))),
                Err(error) => {
                    tracing::warn!(%error, "stored user is not valid JSON; clearing session");
                    self.wipe_keys()?;
                    Ok(None)
                }
            },
            (token, _) => {
                tracing::warn!(
                    has_token = token.is_some(),
                    "stored session is half-written; clearing session"
                );
                self.wipe_keys()?;
                Ok(None)
            }
        }
    }

    fn discard_legacy_onboarding(&self) {
        match self.store.get(keys::LEGACY_ONBOARDING_USER) {
            Ok(Some(_)) => {
                tracing::info!("discarding legacy onboarding record");
                if let Err(error) = self.store.remove(keys::LEGACY_ONBOARDING_USER) {
                    tracing::warn!(%error, "failed to remove legacy onboarding record");
                }
            }
            Ok(None) => {}
            Err(error) => tracing::warn!(%error, "failed to read legacy onboarding record"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use asp_core::Exam;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::MemoryStore;

    fn user(primary: Exam, secondary: Option<Exam>) -> UserSummary {
        UserSummary {
            id: "u1".into(),
            name: "Asha".into(),
            username: "asha".into(),
            primary_exam: primary,
            secondary_exam: secondary,
            level: "beginner".into(),
            attempt_year: Some(2027),
            credibility_score: 0,
            badges: Vec::new(),
        }
    }

    #[test]
    fn new_session_is_loading_and_anonymous() {
        let session = Session::new(MemoryStore::new());
        assert!(session.loading());
        assert!(!session.is_authenticated());
        assert!(session.auth_header().is_none());
    }

    #[test]
    fn empty_store_hydrates_anonymous() {
        let mut session = Session::new(MemoryStore::new());
        assert_eq!(session.hydrate().unwrap(), SessionState::Anonymous);
        assert!(!session.loading());
    }

    #[test]
    fn login_sets_header_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::open(Arc::clone(&store)).unwrap();
        session.login(user(Exam::Jee, None), "tok123").unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.auth_header().as_deref(), Some("Bearer tok123"));
        assert_eq!(store.get(keys::TOKEN).unwrap().as_deref(), Some("tok123"));
        assert!(store.get(keys::USER).unwrap().is_some());
    }

    #[test]
    fn login_write_failure_leaves_memory_authenticated() {
        let store = Arc::new(MemoryStore::with_quota(12));
        let mut session = Session::open(Arc::clone(&store)).unwrap();

        let err = session
            .login(user(Exam::Jee, None), "tok")
            .expect_err("user JSON exceeds quota");
        assert!(matches!(err, SessionError::Persist(StoreError::QuotaExceeded { .. })));
        assert!(session.is_authenticated());
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[test]
    fn logout_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::open(Arc::clone(&store)).unwrap();
        session.login(user(Exam::Cat, None), "tok").unwrap();

        session.logout().unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(store.is_empty());
    }

    #[test]
    fn update_user_requires_authentication() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let err = session
            .update_user(user(Exam::Jee, None))
            .expect_err("anonymous");
        assert!(matches!(err, SessionError::NotAuthenticated));
    }

    #[test]
    fn update_user_replaces_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::open(Arc::clone(&store)).unwrap();
        session.login(user(Exam::Jee, None), "tok").unwrap();

        let mut edited = user(Exam::Jee, None);
        edited.name = "Asha R".into();
        session.update_user(edited).unwrap();

        let raw = store.get(keys::USER).unwrap().unwrap();
        let persisted: UserSummary = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.name, "Asha R");
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn orphan_token_is_cleared_on_hydrate() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::TOKEN, "tok").unwrap();

        let session = Session::open(Arc::clone(&store)).unwrap();
        assert!(!session.is_authenticated());
        assert!(store.get(keys::TOKEN).unwrap().is_none());
    }

    #[test]
    fn legacy_onboarding_key_is_discarded() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(keys::LEGACY_ONBOARDING_USER, r#"{"exam":"NEET"}"#)
            .unwrap();

        let _session = Session::open(Arc::clone(&store)).unwrap();
        assert!(store.get(keys::LEGACY_ONBOARDING_USER).unwrap().is_none());
    }

    /// Reads fail; writes and removals succeed.
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Keyring("locked".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }

        fn backend_name(&self) -> &'static str {
            "unreadable"
        }
    }

    #[test]
    fn unreadable_store_settles_anonymous_and_reports() {
        let mut session = Session::new(UnreadableStore);

        let err = session.hydrate().expect_err("store cannot be read");
        assert!(matches!(err, SessionError::Store(StoreError::Keyring(_))));
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(!session.loading());
        assert!(!session.is_authenticated());
        assert!(session.current_exam().is_none());
    }

    #[test]
    fn rehydrating_a_settled_session_is_allowed() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        assert_eq!(session.hydrate().unwrap(), SessionState::Anonymous);
    }
}

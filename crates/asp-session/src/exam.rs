//! Exam selection derived from the signed-in user.

use asp_core::Exam;

use crate::error::SessionError;
use crate::session::Session;
use crate::store::{KeyValueStore, keys};

impl<S: KeyValueStore> Session<S> {
    /// The exam whose content the feed shows.
    pub const fn current_exam(&self) -> Option<Exam> {
        self.current_exam
    }

    /// Exams the user may switch between, primary first. Empty when anonymous.
    pub fn available_exams(&self) -> Vec<Exam> {
        self.user
            .as_ref()
            .map(asp_core::UserSummary::available_exams)
            .unwrap_or_default()
    }

    /// `true` iff the user has a secondary exam configured.
    pub fn can_switch_exam(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.secondary_exam.is_some())
    }

    /// Select `target` and persist the choice.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotAuthenticated`] with no user.
    /// - [`SessionError::InvalidExamSelection`] if `target` is neither the
    ///   primary nor the configured secondary exam. `current_exam` is unchanged.
    /// - [`SessionError::Persist`] if the store rejects the write; the new
    ///   selection is already active in memory.
    pub fn switch_exam(&mut self, target: Exam) -> Result<Exam, SessionError> {
        let user = self.user.as_ref().ok_or(SessionError::NotAuthenticated)?;

        let is_primary = target == user.primary_exam;
        let is_secondary = user.secondary_exam == Some(target);
        if !is_primary && !is_secondary {
            return Err(SessionError::InvalidExamSelection { requested: target });
        }

        self.current_exam = Some(target);
        self.store
            .set(keys::CURRENT_EXAM, target.as_str())
            .map_err(SessionError::Persist)?;
        tracing::debug!(exam = %target, "switched exam");
        Ok(target)
    }

    /// Recompute the selection after `user` changed.
    ///
    /// A stored exam survives only if it equals the user's secondary exam;
    /// anything else falls back to the primary exam, which is then persisted.
    pub(crate) fn refresh_exam(&mut self) -> Result<(), SessionError> {
        let Some(user) = self.user.as_ref() else {
            self.current_exam = None;
            return Ok(());
        };

        let stored = match self.store.get(keys::CURRENT_EXAM) {
            Ok(raw) => raw.and_then(|raw| raw.parse::<Exam>().ok()),
            Err(error) => {
                tracing::warn!(%error, "failed to read stored exam; using primary");
                None
            }
        };

        if stored.is_some() && stored == user.secondary_exam {
            self.current_exam = stored;
            return Ok(());
        }

        let primary = user.primary_exam;
        self.current_exam = Some(primary);
        self.store
            .set(keys::CURRENT_EXAM, primary.as_str())
            .map_err(SessionError::Persist)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use asp_core::UserSummary;
    use rstest::rstest;

    use super::*;
    use crate::store::MemoryStore;

    fn user(primary: Exam, secondary: Option<Exam>) -> UserSummary {
        UserSummary {
            id: "u1".into(),
            name: "Ravi".into(),
            username: "ravi".into(),
            primary_exam: primary,
            secondary_exam: secondary,
            level: String::new(),
            attempt_year: None,
            credibility_score: 0,
            badges: Vec::new(),
        }
    }

    fn signed_in(primary: Exam, secondary: Option<Exam>) -> (Arc<MemoryStore>, Session<Arc<MemoryStore>>) {
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::open(Arc::clone(&store)).unwrap();
        session.login(user(primary, secondary), "tok").unwrap();
        (store, session)
    }

    #[test]
    fn login_defaults_to_primary_and_persists_it() {
        let (store, session) = signed_in(Exam::Jee, Some(Exam::Neet));
        assert_eq!(session.current_exam(), Some(Exam::Jee));
        assert_eq!(store.get(keys::CURRENT_EXAM).unwrap().as_deref(), Some("JEE"));
    }

    #[test]
    fn stored_secondary_survives_login() {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CURRENT_EXAM, "NEET").unwrap();
        let mut session = Session::open(Arc::clone(&store)).unwrap();
        session.login(user(Exam::Jee, Some(Exam::Neet)), "tok").unwrap();
        assert_eq!(session.current_exam(), Some(Exam::Neet));
    }

    #[rstest]
    #[case("UPSC")]
    #[case("not-an-exam")]
    #[case("JEE")]
    fn any_other_stored_value_falls_back_to_primary(#[case] stored: &str) {
        let store = Arc::new(MemoryStore::new());
        store.set(keys::CURRENT_EXAM, stored).unwrap();
        let mut session = Session::open(Arc::clone(&store)).unwrap();
        session.login(user(Exam::Jee, Some(Exam::Neet)), "tok").unwrap();

        assert_eq!(session.current_exam(), Some(Exam::Jee));
        assert_eq!(store.get(keys::CURRENT_EXAM).unwrap().as_deref(), Some("JEE"));
    }

    #[test]
    fn switch_to_secondary_and_back() {
        let (store, mut session) = signed_in(Exam::Cat, Some(Exam::Upsc));
        assert!(session.can_switch_exam());
        assert_eq!(session.available_exams(), vec![Exam::Cat, Exam::Upsc]);

        session.switch_exam(Exam::Upsc).unwrap();
        assert_eq!(session.current_exam(), Some(Exam::Upsc));
        assert_eq!(store.get(keys::CURRENT_EXAM).unwrap().as_deref(), Some("UPSC"));

        session.switch_exam(Exam::Cat).unwrap();
        assert_eq!(session.current_exam(), Some(Exam::Cat));
    }

    #[test]
    fn switch_to_unrelated_exam_is_rejected_and_keeps_selection() {
        let (_store, mut session) = signed_in(Exam::Cat, Some(Exam::Upsc));
        session.switch_exam(Exam::Upsc).unwrap();

        let err = session.switch_exam(Exam::Neet).expect_err("not configured");
        assert!(matches!(
            err,
            SessionError::InvalidExamSelection {
                requested: Exam::Neet
            }
        ));
        assert_eq!(session.current_exam(), Some(Exam::Upsc));
    }

    #[test]
    fn single_exam_user_cannot_switch() {
        let (_store, mut session) = signed_in(Exam::Jee, None);
        assert!(!session.can_switch_exam());

        let err = session.switch_exam(Exam::Neet).expect_err("no secondary");
        assert_eq!(err.to_string(), "Invalid exam selection.");
        assert_eq!(session.current_exam(), Some(Exam::Jee));
    }

    #[test]
    fn switch_without_user_fails() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let err = session.switch_exam(Exam::Jee).expect_err("anonymous");
        assert!(matches!(err, SessionError::NotAuthenticated));
        assert!(session.available_exams().is_empty());
        assert!(session.current_exam().is_none());
    }

    #[test]
    fn update_user_dropping_secondary_resets_selection() {
        let (_store, mut session) = signed_in(Exam::Jee, Some(Exam::Neet));
        session.switch_exam(Exam::Neet).unwrap();

        session.update_user(user(Exam::Jee, None)).unwrap();
        assert_eq!(session.current_exam(), Some(Exam::Jee));
    }
}

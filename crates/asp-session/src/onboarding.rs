//! First-run profile setup.
//!
//! Onboarding writes into the same session as login. The profile is checked
//! locally, sent to the backend by the caller, and the user the backend
//! returns replaces the session user.

use asp_core::{Exam, ProfileUpdate, UserSummary};
use chrono::Datelike;

use crate::error::SessionError;
use crate::session::Session;
use crate::store::KeyValueStore;

/// How far ahead an attempt year may be.
const MAX_YEARS_AHEAD: i32 = 10;

pub const LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingProfile {
    pub primary_exam: Exam,
    pub secondary_exam: Option<Exam>,
    pub level: String,
    pub attempt_year: u16,
}

impl OnboardingProfile {
    /// Validate against the current calendar year.
    ///
    /// # Errors
    ///
    /// See [`Self::validate_for_year`].
    pub fn validate(&self) -> Result<(), SessionError> {
        self.validate_for_year(chrono::Utc::now().year())
    }

    /// # Errors
    ///
    /// Returns [`SessionError::Onboarding`] when the secondary exam repeats
    /// the primary, the level is unknown, or the attempt year is in the past
    /// or more than ten years out.
    pub fn validate_for_year(&self, current_year: i32) -> Result<(), SessionError> {
        if self.secondary_exam == Some(self.primary_exam) {
            return Err(SessionError::Onboarding(format!(
                "secondary exam must differ from primary exam ({})",
                self.primary_exam
            )));
        }
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(SessionError::Onboarding(format!(
                "unknown level '{}', expected one of: {}",
                self.level,
                LEVELS.join(", ")
            )));
        }
        let year = i32::from(self.attempt_year);
        if year < current_year || year > current_year + MAX_YEARS_AHEAD {
            return Err(SessionError::Onboarding(format!(
                "attempt year {year} must be between {current_year} and {}",
                current_year + MAX_YEARS_AHEAD
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_profile_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: None,
            level: Some(self.level.clone()),
            attempt_year: Some(self.attempt_year),
            primary_exam: Some(self.primary_exam),
            secondary_exam: self.secondary_exam,
        }
    }

    /// Fold the profile into `user` for when the backend echoes nothing back.
    #[must_use]
    pub fn apply_to(&self, user: &UserSummary) -> UserSummary {
        UserSummary {
            primary_exam: self.primary_exam,
            secondary_exam: self.secondary_exam,
            level: self.level.clone(),
            attempt_year: Some(self.attempt_year),
            ..user.clone()
        }
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Apply a completed onboarding.
    ///
    /// `server_user` is the user the backend returned; when absent the
    /// profile is folded into the current user locally.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] without a user,
    /// [`SessionError::Onboarding`] if the profile is invalid, or a persist
    /// error from [`Self::update_user`].
    pub fn complete_onboarding(
        &mut self,
        profile: &OnboardingProfile,
        server_user: Option<UserSummary>,
    ) -> Result<(), SessionError> {
        let current = self.user().ok_or(SessionError::NotAuthenticated)?;
        profile.validate()?;
        let next = server_user.unwrap_or_else(|| profile.apply_to(current));
        tracing::info!(primary = %next.primary_exam, "onboarding complete");
        self.update_user(next)
    }
}

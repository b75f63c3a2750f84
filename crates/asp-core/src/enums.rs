//! Exams, session states, and vote directions.
//!
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Exam
// ---------------------------------------------------------------------------

/// A standardized exam a user is preparing for.
///
/// Serialized upper-case (`"JEE"`), parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exam {
    Cat,
    Jee,
    Neet,
    Upsc,
}

impl Exam {
    pub const ALL: [Self; 4] = [Self::Cat, Self::Jee, Self::Neet, Self::Upsc];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cat => "CAT",
            Self::Jee => "JEE",
            Self::Neet => "NEET",
            Self::Upsc => "UPSC",
        }
    }
}

impl fmt::Display for Exam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exam {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|exam| exam.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::Validation(format!("unknown exam '{trimmed}'")))
    }
}

impl<'de> Deserialize<'de> for Exam {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Lifecycle of the client session.
///
/// ```text
/// uninitialized → hydrating → authenticated
///                           → anonymous
/// authenticated ⇄ anonymous   (login / logout)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    Hydrating,
    Authenticated,
    Anonymous,
}

impl SessionState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Uninitialized => &[Self::Hydrating, Self::Authenticated, Self::Anonymous],
            Self::Hydrating => &[Self::Authenticated, Self::Anonymous],
            Self::Authenticated => &[Self::Authenticated, Self::Anonymous, Self::Hydrating],
            Self::Anonymous => &[Self::Authenticated, Self::Anonymous, Self::Hydrating],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Still settling: guards should neither allow nor redirect.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Uninitialized | Self::Hydrating)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Hydrating => "hydrating",
            Self::Authenticated => "authenticated",
            Self::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VoteDirection
// ---------------------------------------------------------------------------

/// Direction of a vote on a question. Wire values are `upvote` / `downvote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteDirection {
    #[serde(rename = "upvote", alias = "up")]
    Up,
    #[serde(rename = "downvote", alias = "down")]
    Down,
}

impl VoteDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "upvote",
            Self::Down => "downvote",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("JEE", Exam::Jee)]
    #[case("neet", Exam::Neet)]
    #[case(" Cat ", Exam::Cat)]
    #[case("upsc", Exam::Upsc)]
    fn exam_parses_case_insensitively(#[case] raw: &str, #[case] expected: Exam) {
        assert_eq!(raw.parse::<Exam>().expect("should parse"), expected);
    }

    #[test]
    fn exam_rejects_unknown_values() {
        let err = "GMAT".parse::<Exam>().expect_err("should fail");
        assert_eq!(err, CoreError::Validation("unknown exam 'GMAT'".into()));
        assert!(err.to_string().contains("unknown exam 'GMAT'"));
    }

    #[test]
    fn exam_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Exam::Neet).unwrap(), "\"NEET\"");
    }

    #[test]
    fn hydrating_settles_into_authenticated_or_anonymous() {
        assert!(SessionState::Hydrating.can_transition_to(SessionState::Authenticated));
        assert!(SessionState::Hydrating.can_transition_to(SessionState::Anonymous));
        assert!(!SessionState::Hydrating.can_transition_to(SessionState::Uninitialized));
    }

    #[test]
    fn nothing_returns_to_uninitialized() {
        for state in [
            SessionState::Uninitialized,
            SessionState::Hydrating,
            SessionState::Authenticated,
            SessionState::Anonymous,
        ] {
            assert!(!state.can_transition_to(SessionState::Uninitialized));
        }
    }

    #[test]
    fn loading_only_before_settling() {
        assert!(SessionState::Uninitialized.is_loading());
        assert!(SessionState::Hydrating.is_loading());
        assert!(!SessionState::Authenticated.is_loading());
        assert!(!SessionState::Anonymous.is_loading());
    }

    #[test]
    fn vote_direction_accepts_short_aliases() {
        let dir: VoteDirection = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(dir, VoteDirection::Up);
        assert_eq!(
            serde_json::to_string(&VoteDirection::Down).unwrap(),
            "\"downvote\""
        );
    }
}

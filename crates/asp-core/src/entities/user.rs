use serde::{Deserialize, Serialize};

use super::deserialize_optional_exam;
use crate::enums::Exam;

/// The signed-in user as held by the session and persisted under `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    pub primary_exam: Exam,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_exam",
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary_exam: Option<Exam>,
    #[serde(default)]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_year: Option<u16>,
    #[serde(default)]
    pub credibility_score: i64,
    #[serde(default)]
    pub badges: Vec<String>,
}

impl UserSummary {
    /// Exams this user may view: primary first, then secondary if configured.
    #[must_use]
    pub fn available_exams(&self) -> Vec<Exam> {
        std::iter::once(self.primary_exam)
            .chain(self.secondary_exam)
            .collect()
    }

    #[must_use]
    pub fn prepares_for(&self, exam: Exam) -> bool {
        self.primary_exam == exam || self.secondary_exam == Some(exam)
    }
}

/// Partial profile edit sent to `PUT /api/users/profile`. `None` fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_exam: Option<Exam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_exam: Option<Exam>,
}

impl ProfileUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.level.is_none()
            && self.attempt_year.is_none()
            && self.primary_exam.is_none()
            && self.secondary_exam.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_backend_payload_with_mongo_id() {
        let json = r#"{
            "_id": "65f1c0",
            "name": "Asha Rao",
            "username": "asha",
            "primaryExam": "JEE",
            "secondaryExam": "NEET",
            "level": "intermediate",
            "attemptYear": 2026,
            "credibilityScore": 42,
            "badges": ["first-answer"]
        }"#;
        let user: UserSummary = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "65f1c0");
        assert_eq!(user.secondary_exam, Some(Exam::Neet));
        assert_eq!(user.available_exams(), vec![Exam::Jee, Exam::Neet]);
    }

    #[test]
    fn empty_secondary_exam_means_none() {
        let json = r#"{"id":"u1","name":"A","username":"a","primaryExam":"CAT","secondaryExam":""}"#;
        let user: UserSummary = serde_json::from_str(json).unwrap();
        assert!(user.secondary_exam.is_none());
        assert_eq!(user.available_exams(), vec![Exam::Cat]);
        assert!(!user.prepares_for(Exam::Jee));
    }

    #[test]
    fn serialized_user_omits_missing_secondary() {
        let json = r#"{"id":"u1","name":"A","username":"a","primaryExam":"UPSC"}"#;
        let user: UserSummary = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&user).unwrap();
        assert!(out.get("secondaryExam").is_none());
        assert_eq!(out["primaryExam"], "UPSC");
    }

    #[test]
    fn profile_update_serializes_only_set_fields() {
        let patch = ProfileUpdate {
            level: Some("advanced".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"level":"advanced"}"#
        );
    }
}

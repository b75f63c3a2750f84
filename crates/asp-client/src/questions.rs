//! `/api/questions*` endpoints.

use asp_core::{Exam, PageRequest, Question, VoteDirection};
use reqwest::Method;
use serde::Serialize;

use crate::{ApiClient, Paged, error::ClientError, http::unwrap_entity, segment};

#[derive(Debug, Clone, Serialize)]
pub struct NewQuestion {
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    pub exam: Exam,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoteBody {
    vote_type: VoteDirection,
}

/// Query string for the feed list endpoints.
pub(crate) fn feed_query(exam: Option<Exam>, page: PageRequest) -> String {
    match exam {
        Some(exam) => format!("exam={}&{}", exam.as_str(), page.to_query()),
        None => page.to_query(),
    }
}

impl ApiClient {
    /// `GET /api/questions?exam&page&limit`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn list_questions(
        &self,
        exam: Option<Exam>,
        page: PageRequest,
    ) -> Result<Paged<Question>, ClientError> {
        let path = format!("/api/questions?{}", feed_query(exam, page));
        let paged: Paged<Question> = self.send_json(self.request(Method::GET, &path)).await?;
        Ok(paged.with_fallback(page))
    }

    /// `GET /api/questions/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 404 for an unknown id.
    pub async fn get_question(&self, id: &str) -> Result<Question, ClientError> {
        let path = format!("/api/questions/{}", segment(id));
        let value = self.send_json(self.request(Method::GET, &path)).await?;
        unwrap_entity(value, "question")
    }

    /// `POST /api/questions`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for an empty title, otherwise
    /// [`ClientError`] on transport failure or a non-2xx status.
    pub async fn ask_question(&self, question: &NewQuestion) -> Result<Question, ClientError> {
        if question.title.trim().is_empty() {
            return Err(ClientError::InvalidArgument("question title is empty".into()));
        }
        let builder = self.request(Method::POST, "/api/questions").json(question);
        let value = self.send_json(builder).await?;
        unwrap_entity(value, "question")
    }

    /// `POST /api/questions/{id}/vote` with `{voteType}`; returns the updated question.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn vote_question(
        &self,
        id: &str,
        direction: VoteDirection,
    ) -> Result<Question, ClientError> {
        let path = format!("/api/questions/{}/vote", segment(id));
        let builder = self
            .request(Method::POST, &path)
            .json(&VoteBody { vote_type: direction });
        let value = self.send_json(builder).await?;
        unwrap_entity(value, "question")
    }

    /// `PATCH /api/questions/{id}/solve`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status
    /// (403 when the caller is not the author).
    pub async fn mark_solved(&self, id: &str) -> Result<Question, ClientError> {
        let path = format!("/api/questions/{}/solve", segment(id));
        let value = self.send_json(self.request(Method::PATCH, &path)).await?;
        unwrap_entity(value, "question")
    }

    /// `POST` (save) or `DELETE` (unsave) `/api/questions/{id}/save`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn set_question_saved(&self, id: &str, saved: bool) -> Result<(), ClientError> {
        let path = format!("/api/questions/{}/save", segment(id));
        self.send_unit(self.request(save_method(saved), &path)).await
    }
}

pub(crate) fn save_method(saved: bool) -> Method {
    if saved { Method::POST } else { Method::DELETE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_query_includes_exam_when_set() {
        assert_eq!(
            feed_query(Some(Exam::Neet), PageRequest::new(2, 5)),
            "exam=NEET&page=2&limit=5"
        );
        assert_eq!(feed_query(None, PageRequest::default()), "page=1&limit=10");
    }

    #[test]
    fn vote_body_uses_wire_names() {
        let body = serde_json::to_value(VoteBody {
            vote_type: VoteDirection::Down,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"voteType": "downvote"}));
    }

    #[test]
    fn new_question_sends_content() {
        let q = NewQuestion {
            title: "Is NCERT enough?".into(),
            body: "For biology".into(),
            exam: Exam::Neet,
            tags: Vec::new(),
        };
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["content"], "For biology");
        assert!(value.get("tags").is_none());
    }
}

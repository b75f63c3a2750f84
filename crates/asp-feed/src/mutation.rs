//! Mutations as command objects.
//!
//! Applying a mutation to [`LocalState`] returns a [`Compensation`] that
//! undoes exactly what it changed. Feed items are fenced per key, so a
//! snapshot of the item is enough. Read markers are shared between
//! `activity:<id>` and `activity:*`, so their undo is relative: it flips back
//! only the activities this mutation flipped.

use asp_client::{ApiClient, ClientError};
use asp_core::{Activity, FeedItem, FeedKind, Question, Resource, VoteDirection};

use crate::error::FeedError;
use crate::state::{FeedState, LocalState};

pub const ALL_ACTIVITIES_KEY: &str = "activity:*";

/// Fencing key for a single activity's read marker.
pub fn activity_key(id: &str) -> String {
    format!("activity:{id}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Voting again in the same direction withdraws the vote.
    Vote { id: String, direction: VoteDirection },
    MarkSolved { id: String },
    SetSaved { kind: FeedKind, id: String, saved: bool },
    /// Rating in `1..=5`; re-rating replaces the user's earlier rating.
    Rate { id: String, rating: u8 },
    MarkRead { id: String },
    MarkAllRead,
}

/// What the server sent back for a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerAck {
    /// Authoritative copy of the mutated item.
    Item(FeedItem),
    Activity(Activity),
    /// Success with no entity; local state is derived from the mutation.
    Done,
}

/// Undo record returned by [`Mutation::apply`].
#[derive(Debug, Clone)]
pub enum Compensation {
    /// The item as it was before the mutation.
    Item(FeedItem),
    /// Activities the mutation flipped to read, plus unread activities it
    /// cleared from the counter without holding them locally.
    Unread { ids: Vec<String>, unheld: u32 },
}

impl Compensation {
    /// Keep only the read markers `keep` accepts. Item snapshots are untouched.
    #[must_use]
    pub fn retain_markers(self, mut keep: impl FnMut(&str) -> bool) -> Self {
        match self {
            Self::Unread { ids, unheld } => Self::Unread {
                ids: ids.into_iter().filter(|id| keep(id.as_str())).collect(),
                unheld,
            },
            item @ Self::Item(_) => item,
        }
    }

    pub fn restore(self, state: &mut LocalState) {
        match self {
            Self::Item(item) => state.feed.upsert(item),
            Self::Unread { ids, unheld } => {
                for id in &ids {
                    state.activity.mark_unread(id);
                }
                state.activity.add_unread(unheld);
            }
        }
    }
}

impl Mutation {
    /// Fencing key: mutations sharing a key race each other.
    pub fn resource_key(&self) -> String {
        match self {
            Self::Vote { id, .. } | Self::MarkSolved { id } => FeedState::key(FeedKind::Question, id),
            Self::Rate { id, .. } => FeedState::key(FeedKind::Resource, id),
            Self::SetSaved { kind, id, .. } => FeedState::key(*kind, id),
            Self::MarkRead { id } => activity_key(id),
            Self::MarkAllRead => ALL_ACTIVITIES_KEY.to_string(),
        }
    }

    pub const fn action(&self) -> &'static str {
        match self {
            Self::Vote { .. } => "vote on",
            Self::MarkSolved { .. } => "mark solved",
            Self::SetSaved { saved: true, .. } => "save",
            Self::SetSaved { saved: false, .. } => "unsave",
            Self::Rate { .. } => "rate",
            Self::MarkRead { .. } => "mark read",
            Self::MarkAllRead => "mark all read",
        }
    }

    /// Reject malformed mutations before anything is applied or sent.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidRating`] for a rating outside `1..=5`.
    pub fn validate(&self) -> Result<(), FeedError> {
        if let Self::Rate { rating, .. } = self {
            if *rating < 1 || *rating > 5 {
                return Err(FeedError::InvalidRating(*rating));
            }
        }
        Ok(())
    }

    /// Whether local state holds what this mutation would change.
    pub fn is_loaded(&self, state: &LocalState) -> bool {
        match self {
            Self::MarkAllRead => true,
            Self::MarkRead { id } => state.activity.get(id).is_some(),
            _ => state.feed.contains(&self.resource_key()),
        }
    }

    /// Apply to local state and return the undo record.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NotLoaded`] if the target is not held locally,
    /// or [`FeedError::Unsupported`] for a kind mismatch.
    pub fn apply(&self, state: &mut LocalState) -> Result<Compensation, FeedError> {
        self.validate()?;
        match self {
            Self::MarkAllRead => {
                let (ids, unheld) = state.activity.mark_all_read();
                Ok(Compensation::Unread { ids, unheld })
            }
            Self::MarkRead { id } => {
                let flipped = state.activity.mark_read(id).ok_or_else(|| self.not_loaded())?;
                let ids = if flipped { vec![id.clone()] } else { Vec::new() };
                Ok(Compensation::Unread { ids, unheld: 0 })
            }
            _ => {
                let key = self.resource_key();
                let item = state.feed.get_mut(&key).ok_or_else(|| self.not_loaded())?;
                let previous = item.clone();
                self.apply_to_item(item)?;
                Ok(Compensation::Item(previous))
            }
        }
    }

    fn apply_to_item(&self, item: &mut FeedItem) -> Result<(), FeedError> {
        match (self, item) {
            (Self::Vote { direction, .. }, FeedItem::Question(q)) => {
                apply_vote(q, *direction);
                Ok(())
            }
            (Self::MarkSolved { .. }, FeedItem::Question(q)) => {
                q.is_solved = true;
                Ok(())
            }
            (Self::Rate { rating, .. }, FeedItem::Resource(r)) => {
                apply_rating(r, *rating);
                Ok(())
            }
            (Self::SetSaved { saved, .. }, item) => {
                set_saved(item, *saved);
                Ok(())
            }
            (_, item) => Err(FeedError::Unsupported {
                action: self.action(),
                key: item.key(),
            }),
        }
    }

    fn not_loaded(&self) -> FeedError {
        FeedError::NotLoaded {
            key: self.resource_key(),
        }
    }

    /// Issue the matching backend request.
    ///
    /// # Errors
    ///
    /// Returns the client's error unchanged.
    pub async fn send(&self, client: &ApiClient) -> Result<ServerAck, ClientError> {
        match self {
            Self::Vote { id, direction } => client
                .vote_question(id, *direction)
                .await
                .map(|q| ServerAck::Item(FeedItem::Question(q))),
            Self::MarkSolved { id } => client
                .mark_solved(id)
                .await
                .map(|q| ServerAck::Item(FeedItem::Question(q))),
            Self::Rate { id, rating } => client
                .rate_resource(id, *rating)
                .await
                .map(|r| ServerAck::Item(FeedItem::Resource(r))),
            Self::SetSaved { kind, id, saved } => {
                match kind {
                    FeedKind::Question => client.set_question_saved(id, *saved).await?,
                    FeedKind::Resource => client.set_resource_saved(id, *saved).await?,
                    FeedKind::Story => client.set_story_saved(id, *saved).await?,
                }
                Ok(ServerAck::Done)
            }
            Self::MarkRead { id } => client.mark_activity_read(id).await.map(ServerAck::Activity),
            Self::MarkAllRead => {
                client.mark_all_activities_read().await?;
                Ok(ServerAck::Done)
            }
        }
    }
}

fn apply_vote(question: &mut Question, direction: VoteDirection) {
    match question.user_vote {
        Some(current) if current == direction => {
            bump(question, direction, false);
            question.user_vote = None;
        }
        Some(current) => {
            bump(question, current, false);
            bump(question, direction, true);
            question.user_vote = Some(direction);
        }
        None => {
            bump(question, direction, true);
            question.user_vote = Some(direction);
        }
    }
}

fn bump(question: &mut Question, direction: VoteDirection, up: bool) {
    let counter = match direction {
        VoteDirection::Up => &mut question.upvotes,
        VoteDirection::Down => &mut question.downvotes,
    };
    *counter = if up {
        counter.saturating_add(1)
    } else {
        counter.saturating_sub(1)
    };
}

fn apply_rating(resource: &mut Resource, rating: u8) {
    let count = f64::from(resource.rating_count);
    let total = resource.average_rating * count;
    let (total, count) = match resource.user_rating {
        Some(previous) => (total - f64::from(previous) + f64::from(rating), count),
        None => {
            resource.rating_count = resource.rating_count.saturating_add(1);
            (total + f64::from(rating), count + 1.0)
        }
    };
    resource.average_rating = if count > 0.0 { total / count } else { 0.0 };
    resource.user_rating = Some(rating);
}

fn set_saved(item: &mut FeedItem, saved: bool) {
    let (is_saved, saves) = match item {
        FeedItem::Question(q) => (&mut q.is_saved, None),
        FeedItem::Resource(r) => (&mut r.is_saved, Some(&mut r.saves)),
        FeedItem::Story(s) => (&mut s.is_saved, Some(&mut s.saves)),
    };
    if *is_saved == saved {
        return;
    }
    *is_saved = saved;
    if let Some(saves) = saves {
        *saves = if saved {
            saves.saturating_add(1)
        } else {
            saves.saturating_sub(1)
        };
    }
}

#[cfg(test)]
mod tests {
    use asp_core::{ActivityPage, Story};

    use crate::state::ActivityLog;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn question(upvotes: u32, downvotes: u32, user_vote: Option<VoteDirection>) -> FeedItem {
        FeedItem::Question(Question {
            id: "q1".into(),
            title: "Integration by parts shortcut?".into(),
            body: String::new(),
            exam: None,
            author: None,
            tags: Vec::new(),
            upvotes,
            downvotes,
            user_vote,
            answer_count: 0,
            is_solved: false,
            is_saved: false,
            created_at: None,
        })
    }

    fn state_with(item: FeedItem) -> LocalState {
        let mut state = LocalState::default();
        state.feed.upsert(item);
        state
    }

    fn vote(direction: VoteDirection) -> Mutation {
        Mutation::Vote {
            id: "q1".into(),
            direction,
        }
    }

    fn q(state: &LocalState) -> &Question {
        match state.feed.get(FeedKind::Question, "q1") {
            Some(FeedItem::Question(q)) => q,
            other => panic!("expected question, got {other:?}"),
        }
    }

    #[rstest]
    #[case(None, VoteDirection::Up, (6, 2), Some(VoteDirection::Up))]
    #[case(Some(VoteDirection::Up), VoteDirection::Up, (4, 2), None)]
    #[case(Some(VoteDirection::Up), VoteDirection::Down, (4, 3), Some(VoteDirection::Down))]
    #[case(Some(VoteDirection::Down), VoteDirection::Down, (5, 1), None)]
    fn vote_transitions(
        #[case] before: Option<VoteDirection>,
        #[case] direction: VoteDirection,
        #[case] counts: (u32, u32),
        #[case] after: Option<VoteDirection>,
    ) {
        let mut state = state_with(question(5, 2, before));
        vote(direction).apply(&mut state).unwrap();

        let q = q(&state);
        assert_eq!((q.upvotes, q.downvotes), counts);
        assert_eq!(q.user_vote, after);
    }

    #[test]
    fn compensation_restores_previous_item() {
        let original = question(5, 2, None);
        let mut state = state_with(original.clone());

        let undo = vote(VoteDirection::Up).apply(&mut state).unwrap();
        assert_eq!(q(&state).upvotes, 6);

        undo.restore(&mut state);
        assert_eq!(state.feed.get(FeedKind::Question, "q1"), Some(&original));
    }

    #[test]
    fn rating_updates_average() {
        let resource: FeedItem = serde_json::from_str(
            r#"{"postType":"resource","_id":"r1","title":"Polity notes","averageRating":4.0,"ratingCount":2}"#,
        )
        .unwrap();
        let mut state = state_with(resource);

        let rate = |rating| Mutation::Rate {
            id: "r1".into(),
            rating,
        };
        rate(1).apply(&mut state).unwrap();
        let Some(FeedItem::Resource(r)) = state.feed.get(FeedKind::Resource, "r1") else {
            panic!("resource missing");
        };
        assert_eq!(r.rating_count, 3);
        assert!((r.average_rating - 3.0).abs() < f64::EPSILON);

        // Re-rating replaces the user's rating rather than adding another.
        rate(4).apply(&mut state).unwrap();
        let Some(FeedItem::Resource(r)) = state.feed.get(FeedKind::Resource, "r1") else {
            panic!("resource missing");
        };
        assert_eq!(r.rating_count, 3);
        assert!((r.average_rating - 4.0).abs() < f64::EPSILON);
        assert_eq!(r.user_rating, Some(4));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn out_of_range_rating_is_rejected(#[case] rating: u8) {
        let err = Mutation::Rate {
            id: "r1".into(),
            rating,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, FeedError::InvalidRating(r) if r == rating));
    }

    #[test]
    fn save_toggles_flag_and_counter_once() {
        let story = FeedItem::Story(Story {
            id: "s1".into(),
            title: "Six months to NEET".into(),
            body: String::new(),
            exam: None,
            author: None,
            likes: 0,
            is_saved: false,
            saves: 9,
            created_at: None,
        });
        let mut state = state_with(story);
        let save = Mutation::SetSaved {
            kind: FeedKind::Story,
            id: "s1".into(),
            saved: true,
        };

        save.apply(&mut state).unwrap();
        save.apply(&mut state).unwrap();
        let Some(FeedItem::Story(s)) = state.feed.get(FeedKind::Story, "s1") else {
            panic!("story missing");
        };
        assert!(s.is_saved);
        assert_eq!(s.saves, 10);
    }

    #[test]
    fn mark_all_read_clears_five_unread() {
        let activities = (1..=5)
            .map(|n| Activity {
                id: format!("a{n}"),
                kind: "vote".into(),
                message: String::new(),
                is_read: false,
                related_id: None,
                created_at: None,
            })
            .collect();
        let mut state = LocalState::default();
        state.activity = ActivityLog::from_page(ActivityPage {
            activities,
            unread_count: 5,
            ..ActivityPage::default()
        });

        let undo = Mutation::MarkAllRead.apply(&mut state).unwrap();
        assert_eq!(state.activity.unread_count(), 0);
        assert!(state.activity.activities().iter().all(|a| a.is_read));

        undo.restore(&mut state);
        assert_eq!(state.activity.unread_count(), 5);
    }

    #[test]
    fn mark_read_decrements_once() {
        let mut state = LocalState::default();
        state.activity = ActivityLog::from_page(ActivityPage {
            activities: vec![Activity {
                id: "a1".into(),
                kind: "answer".into(),
                message: String::new(),
                is_read: false,
                related_id: None,
                created_at: None,
            }],
            unread_count: 3,
            ..ActivityPage::default()
        });
        let mark = Mutation::MarkRead { id: "a1".into() };

        let undo = mark.apply(&mut state).unwrap();
        mark.apply(&mut state).unwrap();
        assert_eq!(state.activity.unread_count(), 2);

        undo.restore(&mut state);
        assert_eq!(state.activity.unread_count(), 3);
        assert!(!state.activity.get("a1").unwrap().is_read);
    }

    #[test]
    fn retained_markers_only_are_restored() {
        let activities = ["a1", "a2"]
            .into_iter()
            .map(|id| Activity {
                id: id.into(),
                kind: "answer".into(),
                message: String::new(),
                is_read: false,
                related_id: None,
                created_at: None,
            })
            .collect();
        let mut state = LocalState::default();
        state.activity = ActivityLog::from_page(ActivityPage {
            activities,
            unread_count: 4,
            ..ActivityPage::default()
        });

        let undo = Mutation::MarkAllRead.apply(&mut state).unwrap();
        undo.retain_markers(|id| id != "a1").restore(&mut state);

        assert!(state.activity.get("a1").unwrap().is_read);
        assert!(!state.activity.get("a2").unwrap().is_read);
        assert_eq!(state.activity.unread_count(), 3);
    }

    #[test]
    fn missing_target_is_not_loaded() {
        let err = vote(VoteDirection::Up)
            .apply(&mut LocalState::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "question:q1 is not loaded");
    }

    #[test]
    fn rating_a_question_id_finds_no_resource() {
        let mut state = state_with(question(0, 0, None));
        let err = Mutation::Rate {
            id: "q1".into(),
            rating: 3,
        }
        .apply(&mut state)
        .unwrap_err();
        assert!(matches!(err, FeedError::NotLoaded { .. }));
    }
}

//! Local copies of feed items and the activity stream.

use std::collections::HashMap;

use asp_core::{Activity, ActivityPage, FeedItem, FeedKind};

/// Feed items held locally, keyed by [`FeedItem::key`].
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    items: HashMap<String, FeedItem>,
}

impl FeedState {
    pub fn key(kind: FeedKind, id: &str) -> String {
        format!("{}:{id}", kind.as_str())
    }

    /// Insert or replace by key.
    pub fn upsert(&mut self, item: FeedItem) {
        self.items.insert(item.key(), item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = FeedItem>) {
        for item in items {
            self.upsert(item);
        }
    }

    pub fn get(&self, kind: FeedKind, id: &str) -> Option<&FeedItem> {
        self.items.get(&Self::key(kind, id))
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut FeedItem> {
        self.items.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The user's activity stream with its unread counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    activities: Vec<Activity>,
    unread_count: u32,
}

impl ActivityLog {
    pub fn from_page(page: ActivityPage) -> Self {
        Self {
            activities: page.activities,
            unread_count: page.unread_count,
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub const fn unread_count(&self) -> u32 {
        self.unread_count
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Replace one activity with the server's copy, keeping the counter in step.
    pub fn replace(&mut self, activity: Activity) {
        let Some(slot) = self.activities.iter_mut().find(|a| a.id == activity.id) else {
            if !activity.is_read {
                self.unread_count = self.unread_count.saturating_add(1);
            }
            self.activities.push(activity);
            return;
        };
        match (slot.is_read, activity.is_read) {
            (false, true) => self.unread_count = self.unread_count.saturating_sub(1),
            (true, false) => self.unread_count = self.unread_count.saturating_add(1),
            _ => {}
        }
        *slot = activity;
    }

    /// Flip one activity to read. `None` if it is not held, `Some(false)`
    /// if it already was read.
    pub(crate) fn mark_read(&mut self, id: &str) -> Option<bool> {
        self.set_read(id, true)
    }

    /// Flip one activity back to unread. `false` if it is missing or unread.
    pub(crate) fn mark_unread(&mut self, id: &str) -> bool {
        self.set_read(id, false).unwrap_or(false)
    }

    fn set_read(&mut self, id: &str, is_read: bool) -> Option<bool> {
        let activity = self.activities.iter_mut().find(|a| a.id == id)?;
        if activity.is_read == is_read {
            return Some(false);
        }
        activity.is_read = is_read;
        self.unread_count = if is_read {
            self.unread_count.saturating_sub(1)
        } else {
            self.unread_count.saturating_add(1)
        };
        Some(true)
    }

    /// Mark every held activity read and zero the counter.
    ///
    /// Returns the ids that flipped and how much of the counter belonged to
    /// unread activities not held locally.
    pub(crate) fn mark_all_read(&mut self) -> (Vec<String>, u32) {
        let flipped: Vec<String> = self
            .activities
            .iter_mut()
            .filter(|a| !a.is_read)
            .map(|a| {
                a.is_read = true;
                a.id.clone()
            })
            .collect();
        let held = u32::try_from(flipped.len()).unwrap_or(u32::MAX);
        let unheld = self.unread_count.saturating_sub(held);
        self.unread_count = 0;
        (flipped, unheld)
    }

    pub(crate) const fn add_unread(&mut self, count: u32) {
        self.unread_count = self.unread_count.saturating_add(count);
    }
}

/// Everything an optimistic mutation may touch.
#[derive(Debug, Clone, Default)]
pub struct LocalState {
    pub feed: FeedState,
    pub activity: ActivityLog,
}

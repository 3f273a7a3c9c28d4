//! Multi-select state for bulk scheduling.
//!
//! An insertion-ordered id list, gated by post status: only `approved`
//! posts are selectable. The selection is revalidated whenever the post
//! collection is replaced, and again at request-build time, so a request
//! the client builds never carries non-approved ids.

use crate::models::Post;

/// Selected post ids, in the order the operator picked them.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    ids: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a post in or out of the selection. Returns `false` (and does
    /// nothing) for posts that are not selectable.
    pub fn toggle(&mut self, post: &Post) -> bool {
        if !post.status.is_selectable() {
            return false;
        }
        if let Some(idx) = self.ids.iter().position(|id| *id == post.id) {
            self.ids.remove(idx);
        } else {
            self.ids.push(post.id.clone());
        }
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids whose post vanished or left `approved`. Called whenever the
    /// post collection is replaced.
    pub fn retain_approved(&mut self, posts: &[Post]) {
        self.ids.retain(|id| {
            posts
                .iter()
                .any(|p| p.id == *id && p.status.is_selectable())
        });
    }

    /// Ids to put in a bulk-schedule request, revalidated against the
    /// current collection.
    pub fn ids_for_request(&self, posts: &[Post]) -> Vec<String> {
        self.ids
            .iter()
            .filter(|id| {
                posts
                    .iter()
                    .any(|p| p.id == **id && p.status.is_selectable())
            })
            .cloned()
            .collect()
    }
}

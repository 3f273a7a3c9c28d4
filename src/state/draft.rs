//! Draft lifecycle for the generation/edit workflow.
//!
//! The stage is an explicit tagged enum so illegal combinations (editing
//! while nothing is previewed, committing while a persist is outstanding)
//! are unrepresentable or gated. Generation in-flight topics are tracked as
//! a set so concurrent generations for different topics don't interfere and
//! the UI can disable only the matching trigger.

use std::collections::BTreeSet;

/// A draft between generation and commit/discard.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// Backend id of the generated post.
    pub id: String,
    /// Working copy being edited.
    pub content: String,
    /// Resolved absolute URL of the post visual.
    pub image_url: String,
    /// Baseline for dirty comparison; reset on successful persist.
    original_content: String,
}

impl Draft {
    pub fn new(id: String, content: String, image_url: String) -> Self {
        let original_content = content.clone();
        Self {
            id,
            content,
            image_url,
            original_content,
        }
    }

    /// Dirty iff the working copy differs from the last persisted content.
    pub fn is_dirty(&self) -> bool {
        self.content != self.original_content
    }

    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    /// After a successful content update the working copy becomes the new
    /// baseline.
    pub fn commit_baseline(&mut self) {
        self.original_content = self.content.clone();
    }

    /// Abandon edits, restoring the working copy to the baseline.
    pub fn revert(&mut self) {
        self.content = self.original_content.clone();
    }
}

/// Where the one visible draft sits in its lifecycle. `Committed` and
/// `Discarded` are terminal and collapse back to `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DraftStage {
    #[default]
    Idle,
    /// At least one generation outstanding, nothing to preview yet.
    Generating,
    Previewing(Draft),
    Editing(Draft),
}

/// The generation/edit workflow: stage, in-flight topics, and a busy flag
/// that makes update/delete a critical section of one.
#[derive(Debug, Clone, Default)]
pub struct DraftWorkflow {
    stage: DraftStage,
    in_flight: BTreeSet<String>,
    busy: bool,
}

impl DraftWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &DraftStage {
        &self.stage
    }

    /// The draft on screen, in either preview or edit stage.
    pub fn draft(&self) -> Option<&Draft> {
        match &self.stage {
            DraftStage::Previewing(d) | DraftStage::Editing(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.stage, DraftStage::Editing(_))
    }

    /// True while an update/delete is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Is generation outstanding for this specific topic?
    pub fn is_generating(&self, topic: &str) -> bool {
        self.in_flight.contains(topic)
    }

    pub fn generating_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Start generating for a topic. Returns `false` if that topic is
    /// already in flight. Other topics' generations are unaffected.
    pub fn begin_generation(&mut self, topic: &str) -> bool {
        if !self.in_flight.insert(topic.to_string()) {
            return false;
        }
        if matches!(self.stage, DraftStage::Idle) {
            self.stage = DraftStage::Generating;
        }
        true
    }

    /// A generation finished: the returned draft becomes the preview and
    /// the new dirty baseline. If another draft was on screen, the latest
    /// completion wins.
    pub fn complete_generation(&mut self, topic: &str, draft: Draft) {
        self.in_flight.remove(topic);
        self.stage = DraftStage::Previewing(draft);
    }

    /// A generation failed: fall back to the prior stable stage.
    pub fn fail_generation(&mut self, topic: &str) {
        self.in_flight.remove(topic);
        if matches!(self.stage, DraftStage::Generating) && self.in_flight.is_empty() {
            self.stage = DraftStage::Idle;
        }
    }

    /// Preview → edit. No-op in any other stage.
    pub fn start_editing(&mut self) -> bool {
        if let DraftStage::Previewing(draft) = std::mem::take(&mut self.stage) {
            self.stage = DraftStage::Editing(draft);
            true
        } else {
            false
        }
    }

    /// Edit → preview, keeping the working copy (dirty state persists until
    /// an explicit update or revert).
    pub fn finish_editing(&mut self) {
        if let DraftStage::Editing(draft) = std::mem::take(&mut self.stage) {
            self.stage = DraftStage::Previewing(draft);
        }
    }

    /// Update the working content from the editor. Only meaningful while
    /// editing.
    pub fn set_content(&mut self, content: &str) {
        if let DraftStage::Editing(draft) = &mut self.stage {
            if draft.content != content {
                draft.content = content.to_string();
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft().map(Draft::is_dirty).unwrap_or(false)
    }

    /// After a successful persist: reset the baseline, drop the busy flag.
    pub fn content_persisted(&mut self) {
        match &mut self.stage {
            DraftStage::Previewing(d) | DraftStage::Editing(d) => d.commit_baseline(),
            _ => {}
        }
        self.busy = false;
    }

    /// Commit the draft into the queue: clears the preview without further
    /// mutation and hands back its id. Approval/scheduling happen through
    /// separate actions.
    pub fn commit_to_queue(&mut self) -> Option<String> {
        match std::mem::take(&mut self.stage) {
            DraftStage::Previewing(d) => Some(d.id),
            other => {
                self.stage = other;
                None
            }
        }
    }

    /// Id to delete for a discard. The stage is kept until [`discarded`]
    /// so a failed delete leaves the preview intact.
    ///
    /// [`discarded`]: DraftWorkflow::discarded
    pub fn discard_target(&self) -> Option<&str> {
        self.draft().map(|d| d.id.as_str())
    }

    /// The backend confirmed the delete; clear the preview.
    pub fn discarded(&mut self) {
        if self.draft().is_some() {
            self.stage = DraftStage::Idle;
        }
        self.busy = false;
    }

    /// Full reset (logout).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

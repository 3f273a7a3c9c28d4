//! View state derived from the fetched collections.
//!
//! Everything in here is plain data plus pure-ish mutation methods; no IO.
//! The [`crate::app::App`] owns one of each and resets them when their
//! governing collection changes.

mod draft;
mod queue;
mod selection;
mod trends;

pub use draft::{Draft, DraftStage, DraftWorkflow};
pub use queue::{QueueFilter, QueueState, INITIAL_WINDOW, WINDOW_INCREMENT};
pub use selection::SelectionState;
pub use trends::{TrendsState, INDUSTRIES, TRENDS_PAGE_SIZE};

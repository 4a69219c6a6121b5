#![forbid(unsafe_code)]

//! Single terminal item-move notification per gesture.
//!
//! Hover updates only touch the staged [`MovedItemState`]; nothing leaves
//! the emitter until the record is finalized, and [`MoveEmitter::take_terminal`]
//! hands it out at most once.

use kanban_core::UniqueId;

use crate::event::MovedItemState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveEmitter {
    staged: Option<MovedItemState>,
}

impl MoveEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking an item drag from `source`.
    pub fn begin(&mut self, item_id: UniqueId, source: UniqueId) {
        self.staged = Some(MovedItemState {
            item_id,
            new_index: 0,
            source_column_id: source,
            target_column_id: None,
            has_ended: false,
        });
    }

    /// Record an intermediate cross-column placement.
    pub fn stage(&mut self, target: UniqueId, index: usize) {
        if let Some(state) = self.staged.as_mut() {
            state.target_column_id = Some(target);
            state.new_index = index;
        }
    }

    /// Finalize at an explicit position.
    pub fn finalize(&mut self, target: UniqueId, index: usize) {
        if let Some(state) = self.staged.as_mut() {
            state.target_column_id = Some(target);
            state.new_index = index;
            state.has_ended = true;
        }
    }

    /// Finalize without moving. Keeps a staged placement if there is one,
    /// otherwise records `target`/`index` as the item's resting place.
    pub fn finalize_in_place(&mut self, target: UniqueId, index: usize) {
        if let Some(state) = self.staged.as_mut() {
            if state.target_column_id.is_none() {
                state.target_column_id = Some(target);
                state.new_index = index;
            }
            state.has_ended = true;
        }
    }

    /// Current record, finalized or not.
    #[must_use]
    pub fn current(&self) -> Option<&MovedItemState> {
        self.staged.as_ref()
    }

    /// Remove and return the record if it was finalized. An unfinished
    /// record stays staged.
    pub fn take_terminal(&mut self) -> Option<MovedItemState> {
        if self.staged.as_ref().is_some_and(|state| state.has_ended) {
            return self.staged.take();
        }
        None
    }

    /// Drop the record without publishing.
    pub fn discard(&mut self) {
        self.staged = None;
    }
}

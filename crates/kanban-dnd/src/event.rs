#![forbid(unsafe_code)]

//! Caller-facing notifications.
//!
//! A completed gesture produces at most one [`BoardEvent`]. Events are
//! delivered synchronously to a [`BoardEventSink`] owned by the engine.

use kanban_core::{Item, UniqueId};
use serde::{Deserialize, Serialize};

/// Net relocation of one item across a gesture.
///
/// Created at drag start, updated by cross-column hover, and finalized
/// (`has_ended = true`) at drop. Only finalized records are published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedItemState {
    pub item_id: UniqueId,
    /// Index reported to the caller. A drop on a column shell reports
    /// `len + 1` of the column before insertion.
    pub new_index: usize,
    pub source_column_id: UniqueId,
    /// `None` until the item has hovered or dropped on a column.
    pub target_column_id: Option<UniqueId>,
    pub has_ended: bool,
}

/// Completed column reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMove {
    pub new_index: usize,
    pub column_id: UniqueId,
}

/// Item dropped on the trash target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoveRequest {
    pub item_id: UniqueId,
    pub from_column: UniqueId,
}

/// Request for a new column. The caller allocates its id.
///
/// `item` is the seed when an item was dropped on the placeholder; both
/// fields are `None` for a plain click on the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddColumnRequest {
    pub item: Option<Item>,
    pub from_column: Option<UniqueId>,
}

/// Notification published to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    ItemMoved(MovedItemState),
    ColumnMoved(ColumnMove),
    ItemRemoveRequested(ItemRemoveRequest),
    AddColumnRequested(AddColumnRequest),
}

/// Receiver of [`BoardEvent`]s.
pub trait BoardEventSink {
    fn on_event(&mut self, event: BoardEvent);
}

impl BoardEventSink for Vec<BoardEvent> {
    fn on_event(&mut self, event: BoardEvent) {
        self.push(event);
    }
}

impl<S: BoardEventSink + ?Sized> BoardEventSink for &mut S {
    fn on_event(&mut self, event: BoardEvent) {
        (**self).on_event(event);
    }
}

impl<S: BoardEventSink + ?Sized> BoardEventSink for Box<S> {
    fn on_event(&mut self, event: BoardEvent) {
        (**self).on_event(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl BoardEventSink for NullSink {
    fn on_event(&mut self, _event: BoardEvent) {}
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(BoardEvent)> BoardEventSink for FnSink<F> {
    fn on_event(&mut self, event: BoardEvent) {
        (self.0)(event);
    }
}

impl<F> std::fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

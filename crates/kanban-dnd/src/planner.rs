#![forbid(unsafe_code)]

//! Cross-column insertion planning.
//!
//! A plan is produced only when the hovered target lives in a different
//! column than the dragged item. Hovering a column shell plans index
//! `len + 1` of the target column; hovering an item plans its index, plus
//! one when the dragged element's top edge is below that item's bottom
//! edge. [`InsertionPlan::apply`] clamps the index on insertion, so the
//! shell case appends.

use kanban_core::mutate::relocate_item;
use kanban_core::{Board, Rect, UniqueId};
use serde::{Deserialize, Serialize};

/// Where a dragged item should land in another column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionPlan {
    pub item_id: UniqueId,
    pub source_column: UniqueId,
    pub target_column: UniqueId,
    /// Index as reported to the caller, before clamping.
    pub index: usize,
}

impl InsertionPlan {
    /// Splice the item out of its source and into the target in one step.
    #[must_use]
    pub fn apply(&self, board: &Board) -> Board {
        relocate_item(
            board,
            &self.item_id,
            &self.source_column,
            &self.target_column,
            self.index,
        )
    }
}

/// Plan moving `active` next to `over`.
///
/// Returns `None` when either id has no column, or when both already share
/// one. `active_rect` is the dragged element's translated rectangle and
/// `over_rect` the hovered target's bounds; either may be missing.
#[must_use]
pub fn plan_insertion(
    board: &Board,
    active: &UniqueId,
    over: &UniqueId,
    active_rect: Option<Rect>,
    over_rect: Option<Rect>,
) -> Option<InsertionPlan> {
    let source = board.container_of(active)?;
    let target = board.container_of(over)?;
    if source == target {
        return None;
    }
    let target_column = board.column(target)?;

    let index = if board.is_column(over) {
        target_column.len() + 1
    } else {
        match target_column.item_index(over) {
            Some(over_index) => {
                let below = matches!(
                    (active_rect, over_rect),
                    (Some(dragged), Some(hovered)) if dragged.top() > hovered.bottom()
                );
                over_index + usize::from(below)
            }
            None => target_column.len() + 1,
        }
    };

    Some(InsertionPlan {
        item_id: active.clone(),
        source_column: source.clone(),
        target_column: target.clone(),
        index,
    })
}

#![forbid(unsafe_code)]

//! Target resolution with sticky memory.
//!
//! [`CollisionResolver`] turns one [`CollisionFrame`] into at most one
//! target id:
//!
//! 1. A dragged column only collides with columns, by nearest center.
//! 2. Otherwise pointer containment wins; without a pointer hit, rectangle
//!    overlap over all candidates is used.
//! 3. The trash target is returned as-is. A non-empty column is refined to
//!    its nearest item.
//! 4. With no hit, the last resolved id is reused. Right after a
//!    cross-column jump the dragged item itself is reused instead.
//!
//! # Invariants
//!
//! * Given the same frame, board, config and memory, the result is the same.
//! * Disabled sentinels and invalid rectangles never resolve.
//! * Memory is per instance; [`CollisionResolver::reset`] clears it between
//!   gestures.

use kanban_core::{Board, UniqueId};
use tracing::trace;

use crate::config::DndConfig;
use crate::detect::{CollisionFrame, Droppable, closest_center, pointer_within, rect_intersection};

/// Collision resolution state for one board instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionResolver {
    last_over: Option<UniqueId>,
    recently_moved: bool,
}

impl CollisionResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last id returned from a successful (non-trash) resolution.
    #[must_use]
    pub fn last_over(&self) -> Option<&UniqueId> {
        self.last_over.as_ref()
    }

    /// Whether an item changed column since the last frame.
    #[must_use]
    pub const fn recently_moved(&self) -> bool {
        self.recently_moved
    }

    /// Record that the board was just updated by a cross-column move.
    pub fn mark_moved(&mut self) {
        self.recently_moved = true;
    }

    /// Layout has settled after a move.
    pub fn settle(&mut self) {
        self.recently_moved = false;
    }

    /// Forget everything; called at gesture boundaries.
    pub fn reset(&mut self) {
        self.last_over = None;
        self.recently_moved = false;
    }

    /// Resolve the current target of `active`.
    pub fn resolve(
        &mut self,
        active: &UniqueId,
        board: &Board,
        frame: &CollisionFrame,
        config: &DndConfig,
    ) -> Option<UniqueId> {
        if board.is_column(active) {
            let over = closest_center(
                frame.active_rect,
                frame
                    .droppables
                    .iter()
                    .filter(|droppable| board.is_column(&droppable.id)),
            )
            .into_iter()
            .next()
            .map(|collision| collision.id);
            trace!(target: "kanban_dnd::collision", active = %active, over = ?over, "column resolved");
            return over;
        }

        let candidates: Vec<&Droppable> = frame
            .droppables
            .iter()
            .filter(|droppable| config.accepts_target(&droppable.id))
            .collect();

        let mut hits = pointer_within(frame.pointer, candidates.iter().copied());
        if hits.is_empty() {
            hits = rect_intersection(frame.active_rect, candidates.iter().copied());
        }

        if let Some(first) = hits.into_iter().next() {
            let mut over = first.id;
            if config.is_trash(&over) {
                trace!(target: "kanban_dnd::collision", active = %active, "trash resolved");
                return Some(over);
            }
            if let Some(column) = board.column(&over)
                && !column.is_empty()
            {
                let refined = closest_center(
                    frame.active_rect,
                    candidates.iter().copied().filter(|droppable| {
                        droppable.id != column.id && column.contains_item(&droppable.id)
                    }),
                )
                .into_iter()
                .next();
                if let Some(refined) = refined {
                    over = refined.id;
                }
            }
            trace!(target: "kanban_dnd::collision", active = %active, over = %over, "resolved");
            self.last_over = Some(over.clone());
            return Some(over);
        }

        if self.recently_moved {
            self.last_over = Some(active.clone());
        }
        trace!(
            target: "kanban_dnd::collision",
            active = %active,
            fallback = ?self.last_over,
            recently_moved = self.recently_moved,
            "no collision, using sticky target"
        );
        self.last_over.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::DroppableKind;
    use kanban_core::{Column, Item, Point, Rect};

    fn board() -> Board {
        Board::new([
            Column::new("x", "X").with_items([Item::new("i1", "one"), Item::new("i2", "two")]),
            Column::new("y", "Y"),
        ])
    }

    fn frame(pointer: Point, active_rect: Rect) -> CollisionFrame {
        CollisionFrame::new()
            .with_pointer(pointer)
            .with_active_rect(active_rect)
            .with_droppable("x", DroppableKind::Column, Rect::new(0.0, 0.0, 100.0, 300.0))
            .with_droppable("i1", DroppableKind::Item, Rect::new(10.0, 10.0, 80.0, 40.0))
            .with_droppable("i2", DroppableKind::Item, Rect::new(10.0, 60.0, 80.0, 40.0))
            .with_droppable("y", DroppableKind::Column, Rect::new(120.0, 0.0, 100.0, 300.0))
            .with_droppable("void", DroppableKind::Trash, Rect::new(0.0, 400.0, 220.0, 50.0))
    }

    #[test]
    fn pointer_in_column_gap_refines_to_nearest_item() {
        let mut resolver = CollisionResolver::new();
        let f = frame(Point::new(50.0, 200.0), Rect::new(10.0, 70.0, 80.0, 40.0));
        let over = resolver.resolve(&"i1".into(), &board(), &f, &DndConfig::default());
        assert_eq!(over, Some("i2".into()));
        assert_eq!(resolver.last_over(), Some(&"i2".into()));
    }

    #[test]
    fn empty_column_resolves_to_shell() {
        let mut resolver = CollisionResolver::new();
        let f = frame(Point::new(150.0, 20.0), Rect::new(130.0, 10.0, 80.0, 40.0));
        let over = resolver.resolve(&"i1".into(), &board(), &f, &DndConfig::default());
        assert_eq!(over, Some("y".into()));
    }

    #[test]
    fn trash_only_when_enabled_and_not_sticky() {
        let f = frame(Point::new(50.0, 420.0), Rect::new(10.0, 400.0, 80.0, 40.0));
        let mut resolver = CollisionResolver::new();
        let enabled = DndConfig::default().trashable(true);
        assert_eq!(
            resolver.resolve(&"i1".into(), &board(), &f, &enabled),
            Some("void".into())
        );
        assert_eq!(resolver.last_over(), None);

        let mut resolver = CollisionResolver::new();
        assert_eq!(
            resolver.resolve(&"i1".into(), &board(), &f, &DndConfig::default()),
            None
        );
    }

    #[test]
    fn empty_space_reuses_sticky_target() {
        let mut resolver = CollisionResolver::new();
        let config = DndConfig::default();
        let hit = frame(Point::new(150.0, 20.0), Rect::new(130.0, 10.0, 80.0, 40.0));
        resolver.resolve(&"i1".into(), &board(), &hit, &config);

        let miss = CollisionFrame::new()
            .with_pointer(Point::new(900.0, 900.0))
            .with_active_rect(Rect::new(900.0, 900.0, 10.0, 10.0))
            .with_droppable("y", DroppableKind::Column, Rect::new(120.0, 0.0, 100.0, 300.0));
        assert_eq!(resolver.resolve(&"i1".into(), &board(), &miss, &config), Some("y".into()));

        resolver.mark_moved();
        assert_eq!(resolver.resolve(&"i1".into(), &board(), &miss, &config), Some("i1".into()));
        assert_eq!(resolver.resolve(&"i1".into(), &board(), &miss, &config), Some("i1".into()));
    }

    #[test]
    fn column_drag_only_sees_columns() {
        let mut resolver = CollisionResolver::new();
        let f = frame(Point::new(50.0, 30.0), Rect::new(110.0, 0.0, 100.0, 300.0));
        let over = resolver.resolve(&"x".into(), &board(), &f, &DndConfig::default());
        assert_eq!(over, Some("y".into()));
        assert_eq!(resolver.last_over(), None);
    }

    #[test]
    fn nothing_resolves_without_history() {
        let mut resolver = CollisionResolver::new();
        let over = resolver.resolve(&"i1".into(), &board(), &CollisionFrame::new(), &DndConfig::default());
        assert_eq!(over, None);
    }
}

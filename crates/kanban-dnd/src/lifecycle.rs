#![forbid(unsafe_code)]

//! Drag lifecycle state machine.
//!
//! ```text
//! Idle -> DraggingItem   -> Idle   (end | cancel)
//!     \-> DraggingColumn -> Idle   (end | cancel)
//! ```
//!
//! [`DragEngine`] owns the board for the duration of a gesture. Start takes
//! a snapshot; hover may splice the dragged item into another column; end
//! classifies the drop and publishes at most one [`BoardEvent`]; cancel
//! restores the snapshot.
//!
//! # Invariants
//!
//! 1. At most one gesture is active. A second start is a no-op.
//! 2. After cancel the board equals the snapshot taken at start.
//! 3. Every planner step moves the item out of its source and into its
//!    target in one board update.
//! 4. Item moves are published once, at drop, and never for aborted or
//!    cancelled gestures. Column moves are published immediately at drop.
//!
//! # Failure Modes
//!
//! Events that do not fit the current phase (hover while idle, end for a
//! different active id, start on an unknown id) leave everything unchanged
//! and return [`DragEffect::Noop`] with a [`DragNoopReason`].

use std::fmt;

use kanban_core::mutate::{move_column, move_item_within, remove_column_item};
use kanban_core::{Board, Column, Item, UniqueId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::collision::CollisionResolver;
use crate::config::DndConfig;
use crate::detect::CollisionFrame;
use crate::emitter::MoveEmitter;
use crate::event::{
    AddColumnRequest, BoardEvent, BoardEventSink, ColumnMove, ItemRemoveRequest, MovedItemState,
};
use crate::planner::{InsertionPlan, plan_insertion};

/// Veto hook evaluated before a drop is committed. Receives the active id
/// and the drop target; returning `true` turns the drop into a cancel.
pub type CancelDrop = Box<dyn FnMut(&UniqueId, Option<&UniqueId>) -> bool>;

/// Current lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    Idle,
    DraggingItem,
    DraggingColumn,
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    DragAlreadyInProgress,
    UnknownActive,
    ActiveMismatch,
}

/// How a drop was classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DropOutcome {
    ColumnReorder {
        column_id: UniqueId,
        new_index: usize,
    },
    ItemDelete {
        item_id: UniqueId,
        from_column: UniqueId,
    },
    AddColumnRequest {
        item_id: UniqueId,
        from_column: UniqueId,
    },
    /// Index change inside one column.
    Reorder {
        column_id: UniqueId,
        from_index: usize,
        to_index: usize,
    },
    /// Item finalized in the column it was hovered into.
    Settle {
        item_id: UniqueId,
        column_id: UniqueId,
        new_index: usize,
    },
    /// Nothing committed; the board keeps its last hover state.
    Aborted,
}

/// Effect of one lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        active: UniqueId,
        phase: DragPhase,
    },
    /// Target resolved with no board change.
    Hovered {
        over: Option<UniqueId>,
    },
    /// Item spliced into another column.
    Planned {
        plan: InsertionPlan,
    },
    Dropped {
        outcome: DropOutcome,
    },
    Canceled {
        active: UniqueId,
        vetoed: bool,
    },
    Noop {
        reason: DragNoopReason,
    },
}

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEngineError {
    /// The board cannot be replaced while a gesture is active.
    GestureActive { active: UniqueId },
}

impl fmt::Display for DragEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GestureActive { active } => {
                write!(f, "cannot replace board while `{active}` is being dragged")
            }
        }
    }
}

impl std::error::Error for DragEngineError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveKind {
    Item,
    Column,
}

#[derive(Debug, Clone)]
struct Gesture {
    active: UniqueId,
    kind: ActiveKind,
    snapshot: Board,
    over: Option<UniqueId>,
}

/// Drag-reconciliation engine for one board.
pub struct DragEngine<S = Vec<BoardEvent>> {
    board: Board,
    config: DndConfig,
    resolver: CollisionResolver,
    emitter: MoveEmitter,
    gesture: Option<Gesture>,
    cancel_drop: Option<CancelDrop>,
    sink: S,
}

impl DragEngine<Vec<BoardEvent>> {
    /// Engine that records events into a `Vec`.
    #[must_use]
    pub fn recording(board: Board, config: DndConfig) -> Self {
        Self::new(board, config, Vec::new())
    }
}

impl<S: BoardEventSink> DragEngine<S> {
    #[must_use]
    pub fn new(board: Board, config: DndConfig, sink: S) -> Self {
        Self {
            board,
            config,
            resolver: CollisionResolver::new(),
            emitter: MoveEmitter::new(),
            gesture: None,
            cancel_drop: None,
            sink,
        }
    }

    /// Install a drop veto.
    pub fn set_cancel_drop(
        &mut self,
        predicate: impl FnMut(&UniqueId, Option<&UniqueId>) -> bool + 'static,
    ) {
        self.cancel_drop = Some(Box::new(predicate));
    }

    /// Remove the drop veto.
    pub fn clear_cancel_drop(&mut self) {
        self.cancel_drop = None;
    }

    /// Replace the board between gestures.
    pub fn set_board(&mut self, board: Board) -> Result<(), DragEngineError> {
        if let Some(gesture) = &self.gesture {
            return Err(DragEngineError::GestureActive {
                active: gesture.active.clone(),
            });
        }
        self.board = board;
        Ok(())
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn config(&self) -> &DndConfig {
        &self.config
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn into_parts(self) -> (Board, S) {
        (self.board, self.sink)
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match self.gesture.as_ref().map(|gesture| gesture.kind) {
            None => DragPhase::Idle,
            Some(ActiveKind::Item) => DragPhase::DraggingItem,
            Some(ActiveKind::Column) => DragPhase::DraggingColumn,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// While a column is dragged, items are not sortable.
    #[must_use]
    pub fn is_dragging_column(&self) -> bool {
        self.phase() == DragPhase::DraggingColumn
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&UniqueId> {
        self.gesture.as_ref().map(|gesture| &gesture.active)
    }

    /// Item shown in the drag overlay.
    #[must_use]
    pub fn active_item(&self) -> Option<&Item> {
        self.gesture
            .as_ref()
            .filter(|gesture| gesture.kind == ActiveKind::Item)
            .and_then(|gesture| self.board.item(&gesture.active))
    }

    /// Column shown in the drag overlay.
    #[must_use]
    pub fn active_column(&self) -> Option<&Column> {
        self.gesture
            .as_ref()
            .filter(|gesture| gesture.kind == ActiveKind::Column)
            .and_then(|gesture| self.board.column(&gesture.active))
    }

    /// Target resolved by the latest hover.
    #[must_use]
    pub fn over(&self) -> Option<&UniqueId> {
        self.gesture.as_ref().and_then(|gesture| gesture.over.as_ref())
    }

    /// Column to highlight as the drop target of an item drag.
    #[must_use]
    pub fn hovered_column(&self) -> Option<&UniqueId> {
        let gesture = self.gesture.as_ref()?;
        if gesture.kind != ActiveKind::Item {
            return None;
        }
        self.board.container_of(gesture.over.as_ref()?)
    }

    /// Whether the trash target should be shown.
    #[must_use]
    pub fn shows_trash(&self) -> bool {
        self.config.trashable && self.phase() == DragPhase::DraggingItem
    }

    /// Sticky resolver memory.
    #[must_use]
    pub fn last_over(&self) -> Option<&UniqueId> {
        self.resolver.last_over()
    }

    /// Staged item move of the active gesture.
    #[must_use]
    pub fn moved_item(&self) -> Option<&MovedItemState> {
        self.emitter.current()
    }

    /// Layout has caught up with the last board change.
    ///
    /// Hosts should call this once per rendered frame while dragging. Until
    /// it is called after a cross-column move, a hover that hits nothing
    /// resolves to the dragged item itself rather than the last target.
    pub fn on_frame(&mut self) {
        self.resolver.settle();
    }

    /// The placeholder was clicked without a drag.
    ///
    /// Returns `false` when the placeholder is disabled.
    pub fn request_add_column(&mut self) -> bool {
        if !self.config.add_column {
            return false;
        }
        debug!(target: "kanban_dnd::lifecycle", "add_column requested");
        self.sink
            .on_event(BoardEvent::AddColumnRequested(AddColumnRequest::default()));
        true
    }

    /// Begin dragging `active`, which may be a column or an item.
    pub fn on_drag_start(&mut self, active: &UniqueId) -> DragEffect {
        if self.gesture.is_some() {
            return noop(DragNoopReason::DragAlreadyInProgress);
        }
        let kind = if self.board.is_column(active) {
            ActiveKind::Column
        } else if let Some(source) = self.board.container_of(active) {
            self.emitter.begin(active.clone(), source.clone());
            ActiveKind::Item
        } else {
            debug!(target: "kanban_dnd::lifecycle", active = %active, "drag_start ignored: unknown id");
            return noop(DragNoopReason::UnknownActive);
        };

        self.resolver.reset();
        self.gesture = Some(Gesture {
            active: active.clone(),
            kind,
            snapshot: self.board.clone(),
            over: None,
        });
        let phase = self.phase();
        debug!(target: "kanban_dnd::lifecycle", active = %active, ?phase, "drag_start");
        DragEffect::Started {
            active: active.clone(),
            phase,
        }
    }

    /// Resolve the hovered target and, for item drags into another column,
    /// splice the item there.
    pub fn on_drag_over(&mut self, active: &UniqueId, frame: &CollisionFrame) -> DragEffect {
        let Some(gesture) = self.gesture.as_mut() else {
            return noop(DragNoopReason::IdleWithoutActiveDrag);
        };
        if &gesture.active != active {
            return noop(DragNoopReason::ActiveMismatch);
        }

        let over = self
            .resolver
            .resolve(active, &self.board, frame, &self.config);
        gesture.over.clone_from(&over);

        let target = match (&over, gesture.kind) {
            (Some(target), ActiveKind::Item) if !self.config.is_trash(target) => target,
            _ => {
                trace!(target: "kanban_dnd::lifecycle", active = %active, over = ?over, "drag_over");
                return DragEffect::Hovered { over };
            }
        };

        let over_rect = frame.droppable(target).map(|droppable| droppable.rect);
        let Some(plan) = plan_insertion(&self.board, active, target, frame.active_rect, over_rect)
        else {
            trace!(target: "kanban_dnd::lifecycle", active = %active, over = %target, "drag_over");
            return DragEffect::Hovered { over };
        };

        self.board = plan.apply(&self.board);
        self.resolver.mark_moved();
        self.emitter.stage(plan.target_column.clone(), plan.index);
        debug!(
            target: "kanban_dnd::lifecycle",
            active = %active,
            from = %plan.source_column,
            to = %plan.target_column,
            index = plan.index,
            "drag_over moved item"
        );
        DragEffect::Planned { plan }
    }

    /// Commit the gesture against `over`.
    pub fn on_drag_end(&mut self, active: &UniqueId, over: Option<&UniqueId>) -> DragEffect {
        let Some(gesture) = self.gesture.as_ref() else {
            return noop(DragNoopReason::IdleWithoutActiveDrag);
        };
        if &gesture.active != active {
            return noop(DragNoopReason::ActiveMismatch);
        }
        if let Some(veto) = self.cancel_drop.as_mut()
            && veto(active, over)
        {
            return self.cancel(true);
        }
        let Some(gesture) = self.gesture.take() else {
            return noop(DragNoopReason::IdleWithoutActiveDrag);
        };
        self.resolver.reset();

        let outcome = match gesture.kind {
            ActiveKind::Column => self.drop_column(active, over),
            ActiveKind::Item => self.drop_item(active, over),
        };
        if let Some(state) = self.emitter.take_terminal() {
            self.sink.on_event(BoardEvent::ItemMoved(state));
        }
        self.emitter.discard();
        debug!(target: "kanban_dnd::lifecycle", active = %active, over = ?over, ?outcome, "drag_end");
        DragEffect::Dropped { outcome }
    }

    /// Abandon the gesture and restore the board from the snapshot.
    pub fn on_drag_cancel(&mut self) -> DragEffect {
        if self.gesture.is_none() {
            return noop(DragNoopReason::IdleWithoutActiveDrag);
        }
        self.cancel(false)
    }

    fn cancel(&mut self, vetoed: bool) -> DragEffect {
        let Some(gesture) = self.gesture.take() else {
            return noop(DragNoopReason::IdleWithoutActiveDrag);
        };
        self.board = gesture.snapshot;
        self.emitter.discard();
        self.resolver.reset();
        debug!(target: "kanban_dnd::lifecycle", active = %gesture.active, vetoed, "drag_cancel");
        DragEffect::Canceled {
            active: gesture.active,
            vetoed,
        }
    }

    fn drop_column(&mut self, active: &UniqueId, over: Option<&UniqueId>) -> DropOutcome {
        let Some(over) = over else {
            return DropOutcome::Aborted;
        };
        let (Some(from), Some(to)) = (self.board.column_index(active), self.board.column_index(over))
        else {
            return DropOutcome::Aborted;
        };
        self.board = move_column(&self.board, from, to);
        self.sink.on_event(BoardEvent::ColumnMoved(ColumnMove {
            new_index: to,
            column_id: active.clone(),
        }));
        DropOutcome::ColumnReorder {
            column_id: active.clone(),
            new_index: to,
        }
    }

    fn drop_item(&mut self, active: &UniqueId, over: Option<&UniqueId>) -> DropOutcome {
        // Only reachable if the caller broke board ownership mid-gesture;
        // `set_board` refuses while dragging.
        let Some(source) = self.board.container_of(active).cloned() else {
            return DropOutcome::Aborted;
        };
        let Some(over) = over else {
            return DropOutcome::Aborted;
        };

        if self.config.trashable && self.config.is_trash(over) {
            self.board = remove_column_item(&self.board, &source, active);
            self.sink
                .on_event(BoardEvent::ItemRemoveRequested(ItemRemoveRequest {
                    item_id: active.clone(),
                    from_column: source.clone(),
                }));
            return DropOutcome::ItemDelete {
                item_id: active.clone(),
                from_column: source,
            };
        }

        if self.config.add_column && self.config.is_placeholder(over) {
            self.sink
                .on_event(BoardEvent::AddColumnRequested(AddColumnRequest {
                    item: self.board.item(active).cloned(),
                    from_column: Some(source.clone()),
                }));
            return DropOutcome::AddColumnRequest {
                item_id: active.clone(),
                from_column: source,
            };
        }

        let Some(target) = self.board.container_of(over).cloned() else {
            return DropOutcome::Aborted;
        };

        if target != source {
            // Dropped into another column without a prior hover there.
            let Some(plan) = plan_insertion(&self.board, active, over, None, None) else {
                return DropOutcome::Aborted;
            };
            self.board = plan.apply(&self.board);
            self.emitter.finalize(plan.target_column.clone(), plan.index);
            return DropOutcome::Settle {
                item_id: active.clone(),
                column_id: plan.target_column,
                new_index: plan.index,
            };
        }

        let Some(column) = self.board.column(&target) else {
            return DropOutcome::Aborted;
        };
        let Some(active_index) = column.item_index(active) else {
            return DropOutcome::Aborted;
        };
        // A drop on the column shell itself sends the item to the end, unless
        // a hover already placed it here from another column.
        let hovered_in = self
            .emitter
            .current()
            .is_some_and(|state| state.target_column_id.is_some());
        let over_index = if *over == target && !hovered_in {
            Some(column.len().saturating_sub(1))
        } else {
            column.item_index(over)
        };
        match over_index {
            Some(over_index) if over_index != active_index => {
                self.board = move_item_within(&self.board, &target, active_index, over_index);
                self.emitter.finalize(target.clone(), over_index);
                DropOutcome::Reorder {
                    column_id: target,
                    from_index: active_index,
                    to_index: over_index,
                }
            }
            _ => {
                self.emitter.finalize_in_place(target.clone(), active_index);
                let new_index = self
                    .emitter
                    .current()
                    .map_or(active_index, |state| state.new_index);
                DropOutcome::Settle {
                    item_id: active.clone(),
                    column_id: target,
                    new_index,
                }
            }
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for DragEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragEngine")
            .field("board", &self.board)
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .field("emitter", &self.emitter)
            .field("gesture", &self.gesture)
            .field("cancel_drop", &self.cancel_drop.is_some())
            .field("sink", &self.sink)
            .finish()
    }
}

const fn noop(reason: DragNoopReason) -> DragEffect {
    DragEffect::Noop { reason }
}

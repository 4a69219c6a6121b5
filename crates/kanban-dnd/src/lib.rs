#![forbid(unsafe_code)]

//! Drag reconciliation for Kanban boards.
//!
//! # Role in the workspace
//! `kanban-dnd` consumes drag lifecycle events and collision geometry from a
//! host drag-and-drop layer and keeps a [`kanban_core::Board`] consistent
//! with them. It renders nothing and senses no input.
//!
//! # Primary responsibilities
//! - **Detection**: pointer containment, rectangle overlap, nearest center.
//! - **Resolution**: one target per hover, with sticky fallback memory.
//! - **Planning**: provisional cross-column insertion during hover.
//! - **Lifecycle**: start/over/end/cancel with snapshot rollback.
//! - **Notification**: one terminal [`BoardEvent`] per completed gesture.
//!
//! # Example
//! ```
//! use kanban_core::{Board, Column, Item};
//! use kanban_dnd::{BoardEvent, DndConfig, DragEngine};
//!
//! let board = Board::new([
//!     Column::new("todo", "Todo").with_items([Item::new("a", "A"), Item::new("b", "B")]),
//!     Column::new("done", "Done"),
//! ]);
//! let mut engine = DragEngine::recording(board, DndConfig::default());
//! engine.on_drag_start(&"a".into());
//! engine.on_drag_end(&"a".into(), Some(&"b".into()));
//! assert!(matches!(engine.sink().as_slice(), [BoardEvent::ItemMoved(_)]));
//! ```

pub mod collision;
pub mod config;
pub mod detect;
pub mod emitter;
pub mod event;
pub mod lifecycle;
pub mod planner;

pub use collision::CollisionResolver;
pub use config::{DEFAULT_PLACEHOLDER_ID, DEFAULT_TRASH_ID, DndConfig, DndConfigError};
pub use detect::{
    Collision, CollisionFrame, Droppable, DroppableKind, closest_center, pointer_within,
    rect_intersection,
};
pub use emitter::MoveEmitter;
pub use event::{
    AddColumnRequest, BoardEvent, BoardEventSink, ColumnMove, FnSink, ItemRemoveRequest,
    MovedItemState, NullSink,
};
pub use lifecycle::{
    CancelDrop, DragEffect, DragEngine, DragEngineError, DragNoopReason, DragPhase, DropOutcome,
};
pub use planner::{InsertionPlan, plan_insertion};

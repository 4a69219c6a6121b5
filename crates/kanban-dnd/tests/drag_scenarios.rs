#![forbid(unsafe_code)]

//! End-to-end gestures driven through the public engine API.
//!
//! Run:
//!   cargo test -p kanban-dnd --test drag_scenarios

use kanban_core::{Board, Column, Item, Point, Rect};
use kanban_dnd::{
    BoardEvent, CollisionFrame, ColumnMove, DndConfig, DragEffect, DragEngine, DropOutcome,
    DroppableKind, ItemRemoveRequest, MovedItemState,
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn xy_board() -> Board {
    Board::new([
        Column::new("X", "Todo").with_items([Item::new("i1", "one"), Item::new("i2", "two")]),
        Column::new("Y", "Done"),
    ])
}

fn column_ids(board: &Board) -> Vec<String> {
    board.columns().map(|c| c.id.to_string()).collect()
}

fn item_ids(board: &Board, column: &str) -> Vec<String> {
    board
        .column(&column.into())
        .map(|c| c.items.iter().map(|i| i.id.to_string()).collect())
        .unwrap_or_default()
}

/// Two columns side by side, each item 40px tall with 10px gaps.
fn layout(board: &Board) -> CollisionFrame {
    let mut frame = CollisionFrame::new();
    for (c, column) in board.columns().enumerate() {
        let left = c as f64 * 120.0;
        frame = frame.with_droppable(
            column.id.clone(),
            DroppableKind::Column,
            Rect::new(left, 0.0, 100.0, 400.0),
        );
        for (i, item) in column.items.iter().enumerate() {
            frame = frame.with_droppable(
                item.id.clone(),
                DroppableKind::Item,
                Rect::new(left + 10.0, 10.0 + i as f64 * 50.0, 80.0, 40.0),
            );
        }
    }
    frame
        .with_droppable("void", DroppableKind::Trash, Rect::new(0.0, 450.0, 220.0, 50.0))
        .with_droppable("placeholder", DroppableKind::Placeholder, Rect::new(240.0, 0.0, 100.0, 400.0))
}

fn pointer_at(board: &Board, x: f64, y: f64) -> CollisionFrame {
    layout(board)
        .with_pointer(Point::new(x, y))
        .with_active_rect(Rect::new(x - 40.0, y - 20.0, 80.0, 40.0))
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn column_reorder_moves_to_target_index() {
    let board = Board::new([Column::new("A", "A"), Column::new("B", "B"), Column::new("C", "C")]);
    let mut engine = DragEngine::recording(board, DndConfig::default());

    engine.on_drag_start(&"A".into());
    let effect = engine.on_drag_end(&"A".into(), Some(&"C".into()));

    assert_eq!(
        effect,
        DragEffect::Dropped {
            outcome: DropOutcome::ColumnReorder {
                column_id: "A".into(),
                new_index: 2
            }
        }
    );
    assert_eq!(column_ids(engine.board()), ["B", "C", "A"]);
    assert_eq!(
        engine.sink().as_slice(),
        [BoardEvent::ColumnMoved(ColumnMove {
            new_index: 2,
            column_id: "A".into()
        })]
    );
}

#[test]
fn cross_column_move_into_empty_column() {
    let mut engine = DragEngine::recording(xy_board(), DndConfig::default());

    engine.on_drag_start(&"i1".into());
    let frame = pointer_at(engine.board(), 170.0, 200.0);
    let effect = engine.on_drag_over(&"i1".into(), &frame);
    assert!(matches!(effect, DragEffect::Planned { ref plan } if plan.index == 1));
    // Hover already applied the move; nothing is published yet.
    assert_eq!(item_ids(engine.board(), "Y"), ["i1"]);
    assert!(engine.sink().is_empty());

    engine.on_frame();
    engine.on_drag_end(&"i1".into(), Some(&"Y".into()));

    assert_eq!(item_ids(engine.board(), "X"), ["i2"]);
    assert_eq!(item_ids(engine.board(), "Y"), ["i1"]);
    assert_eq!(
        engine.sink().as_slice(),
        [BoardEvent::ItemMoved(MovedItemState {
            item_id: "i1".into(),
            new_index: 1,
            source_column_id: "X".into(),
            target_column_id: Some("Y".into()),
            has_ended: true,
        })]
    );
}

#[test]
fn trash_drop_removes_item_and_requests_removal() {
    let config = DndConfig::default().trashable(true);
    let mut engine = DragEngine::recording(xy_board(), config);

    engine.on_drag_start(&"i1".into());
    assert!(engine.shows_trash());
    let frame = pointer_at(engine.board(), 60.0, 470.0);
    assert_eq!(
        engine.on_drag_over(&"i1".into(), &frame),
        DragEffect::Hovered {
            over: Some("void".into())
        }
    );
    let over = engine.over().cloned();
    engine.on_drag_end(&"i1".into(), over.as_ref());

    assert_eq!(item_ids(engine.board(), "X"), ["i2"]);
    assert_eq!(
        engine.sink().as_slice(),
        [BoardEvent::ItemRemoveRequested(ItemRemoveRequest {
            item_id: "i1".into(),
            from_column: "X".into()
        })]
    );
}

#[test]
fn end_without_target_leaves_board_untouched() {
    let mut engine = DragEngine::recording(xy_board(), DndConfig::default());
    engine.on_drag_start(&"i1".into());
    let effect = engine.on_drag_end(&"i1".into(), None);
    assert_eq!(
        effect,
        DragEffect::Dropped {
            outcome: DropOutcome::Aborted
        }
    );
    assert_eq!(engine.board(), &xy_board());
    assert!(engine.sink().is_empty());
}

#[test]
fn cancel_after_hover_restores_snapshot() {
    let mut engine = DragEngine::recording(xy_board(), DndConfig::default());
    engine.on_drag_start(&"i2".into());
    let frame = pointer_at(engine.board(), 170.0, 30.0);
    engine.on_drag_over(&"i2".into(), &frame);
    assert_eq!(item_ids(engine.board(), "Y"), ["i2"]);

    engine.on_drag_cancel();
    assert_eq!(engine.board(), &xy_board());
    assert!(engine.sink().is_empty());
    assert!(!engine.is_dragging());
}

#[test]
fn untouched_columns_are_shared_with_snapshot() {
    let board = Board::new([
        Column::new("X", "X").with_items([Item::new("i1", "one")]),
        Column::new("Y", "Y"),
        Column::new("Z", "Z").with_items([Item::new("i9", "nine")]),
    ]);
    let mut engine = DragEngine::recording(board.clone(), DndConfig::default());
    engine.on_drag_start(&"i1".into());
    let frame = pointer_at(engine.board(), 170.0, 200.0);
    engine.on_drag_over(&"i1".into(), &frame);
    assert!(engine.board().shares_column(&board, &"Z".into()));
    assert!(!engine.board().shares_column(&board, &"Y".into()));
}

#[test]
fn sticky_target_survives_empty_space() {
    let mut engine = DragEngine::recording(xy_board(), DndConfig::default());
    engine.on_drag_start(&"i2".into());
    let hit = pointer_at(engine.board(), 50.0, 30.0);
    assert_eq!(
        engine.on_drag_over(&"i2".into(), &hit),
        DragEffect::Hovered {
            over: Some("i1".into())
        }
    );
    let miss = CollisionFrame::new().with_pointer(Point::new(900.0, 900.0));
    engine.on_drag_over(&"i2".into(), &miss);
    assert_eq!(engine.over(), Some(&"i1".into()));
    assert_eq!(engine.last_over(), Some(&"i1".into()));

    engine.on_drag_end(&"i2".into(), Some(&"i1".into()));
    assert_eq!(item_ids(engine.board(), "X"), ["i2", "i1"]);
}

#[test]
fn disabled_placeholder_is_not_a_target() {
    let config = DndConfig::default().add_column(false);
    let mut engine = DragEngine::recording(xy_board(), config);
    engine.on_drag_start(&"i1".into());
    let frame = pointer_at(engine.board(), 300.0, 200.0);
    assert_eq!(
        engine.on_drag_over(&"i1".into(), &frame),
        DragEffect::Hovered { over: None }
    );
    let effect = engine.on_drag_end(&"i1".into(), Some(&"placeholder".into()));
    assert_eq!(
        effect,
        DragEffect::Dropped {
            outcome: DropOutcome::Aborted
        }
    );
    assert!(engine.sink().is_empty());
}

#![forbid(unsafe_code)]

//! Pure board transformations.
//!
//! Every function takes the current board by reference and returns a new
//! one. Unknown column or item ids, and out-of-range source indices, return
//! an unchanged copy instead of failing. Insertion indices past the end are
//! clamped, so an index of `len + 1` appends.

use crate::id::UniqueId;
use crate::model::{Board, Column, Item};

/// Return a copy of `items` with the element at `from` moved to `to`.
///
/// `to` is clamped to the last position. An out-of-range `from` returns an
/// unchanged copy.
#[must_use]
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    move_in_place(&mut out, from, to);
    out
}

fn move_in_place<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let moved = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, moved);
    true
}

/// Replace the items of one column with `update(current_items)`.
#[must_use]
pub fn update_column_items<F>(board: &Board, column_id: &UniqueId, update: F) -> Board
where
    F: FnOnce(&[Item]) -> Vec<Item>,
{
    let mut next = board.clone();
    if let Some(index) = board.column_index(column_id)
        && let Some(column) = next.column_mut(index)
    {
        column.items = update(&column.items);
    }
    next
}

/// Remove one item from one column.
#[must_use]
pub fn remove_column_item(board: &Board, column_id: &UniqueId, item_id: &UniqueId) -> Board {
    let Some(index) = board.column_index(column_id) else {
        return board.clone();
    };
    let Some(column) = board.column_at(index) else {
        return board.clone();
    };
    if !column.contains_item(item_id) {
        return board.clone();
    }
    let mut next = board.clone();
    if let Some(column) = next.column_mut(index) {
        column.items.retain(|item| &item.id != item_id);
    }
    next
}

/// Remove a column and all of its items.
#[must_use]
pub fn remove_column(board: &Board, column_id: &UniqueId) -> Board {
    let mut next = board.clone();
    next.columns_mut().retain(|column| &column.id != column_id);
    next
}

/// Rename a column.
#[must_use]
pub fn rename_column(board: &Board, column_id: &UniqueId, name: impl Into<String>) -> Board {
    let mut next = board.clone();
    if let Some(index) = board.column_index(column_id)
        && let Some(column) = next.column_mut(index)
    {
        column.name = name.into();
    }
    next
}

/// Insert an item into a column at `index` (clamped to the end).
#[must_use]
pub fn insert_item(board: &Board, column_id: &UniqueId, index: usize, item: Item) -> Board {
    let mut next = board.clone();
    if let Some(position) = board.column_index(column_id)
        && let Some(column) = next.column_mut(position)
    {
        let index = index.min(column.items.len());
        column.items.insert(index, item);
    }
    next
}

/// Append a column at the end of the board.
#[must_use]
pub fn push_column(board: &Board, column: Column) -> Board {
    let mut next = board.clone();
    next.columns_mut().push(std::sync::Arc::new(column));
    next
}

/// Move an item from one column into another at `index` (clamped).
///
/// Removal and insertion happen together: if the item is not in `from` or
/// `to` does not exist, the board is returned unchanged. When `from == to`
/// this is an in-column move.
#[must_use]
pub fn relocate_item(
    board: &Board,
    item_id: &UniqueId,
    from: &UniqueId,
    to: &UniqueId,
    index: usize,
) -> Board {
    let (Some(from_index), Some(to_index)) = (board.column_index(from), board.column_index(to))
    else {
        return board.clone();
    };
    let Some(current) = board
        .column_at(from_index)
        .and_then(|column| column.item_index(item_id))
    else {
        return board.clone();
    };
    if from_index == to_index {
        return move_item_within(board, from, current, index);
    }

    let mut next = board.clone();
    let Some(moved) = next
        .column_mut(from_index)
        .map(|column| column.items.remove(current))
    else {
        return board.clone();
    };
    match next.column_mut(to_index) {
        Some(target) => {
            let index = index.min(target.items.len());
            target.items.insert(index, moved);
            next
        }
        None => board.clone(),
    }
}

/// Reorder one item inside a column.
#[must_use]
pub fn move_item_within(board: &Board, column_id: &UniqueId, from: usize, to: usize) -> Board {
    let Some(position) = board.column_index(column_id) else {
        return board.clone();
    };
    let in_range = board
        .column_at(position)
        .is_some_and(|column| from < column.items.len());
    if !in_range || from == to {
        return board.clone();
    }
    let mut next = board.clone();
    if let Some(column) = next.column_mut(position) {
        move_in_place(&mut column.items, from, to);
    }
    next
}

/// Reorder columns.
#[must_use]
pub fn move_column(board: &Board, from: usize, to: usize) -> Board {
    let mut next = board.clone();
    move_in_place(next.columns_mut(), from, to);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(board: &Board, column: &str) -> Vec<String> {
        board
            .column(&column.into())
            .map(|c| c.items.iter().map(|i| i.id.to_string()).collect())
            .unwrap_or_default()
    }

    fn column_ids(board: &Board) -> Vec<String> {
        board.columns().map(|c| c.id.to_string()).collect()
    }

    fn board() -> Board {
        Board::new([
            Column::new("x", "X").with_items([Item::new("i1", "one"), Item::new("i2", "two")]),
            Column::new("y", "Y"),
            Column::new("z", "Z").with_items([Item::new("i3", "three")]),
        ])
    }

    #[test]
    fn array_move_semantics() {
        assert_eq!(array_move(&[1, 2, 3], 0, 2), vec![2, 3, 1]);
        assert_eq!(array_move(&[1, 2, 3], 2, 0), vec![3, 1, 2]);
        assert_eq!(array_move(&[1, 2, 3], 0, 99), vec![2, 3, 1]);
        assert_eq!(array_move(&[1, 2, 3], 7, 0), vec![1, 2, 3]);
    }

    #[test]
    fn relocate_moves_atomically_and_shares_untouched_columns() {
        let before = board();
        let after = relocate_item(&before, &"i1".into(), &"x".into(), &"y".into(), 1);
        assert_eq!(ids(&after, "x"), ["i2"]);
        assert_eq!(ids(&after, "y"), ["i1"]);
        assert!(after.shares_column(&before, &"z".into()));
        assert!(!after.shares_column(&before, &"x".into()));
        // input untouched
        assert_eq!(ids(&before, "x"), ["i1", "i2"]);
    }

    #[test]
    fn relocate_with_unknown_ids_is_noop() {
        let before = board();
        assert_eq!(
            relocate_item(&before, &"i9".into(), &"x".into(), &"y".into(), 0),
            before
        );
        assert_eq!(
            relocate_item(&before, &"i1".into(), &"x".into(), &"nope".into(), 0),
            before
        );
        assert_eq!(
            relocate_item(&before, &"i3".into(), &"x".into(), &"y".into(), 0),
            before
        );
    }

    #[test]
    fn relocate_within_same_column_reorders() {
        let after = relocate_item(&board(), &"i1".into(), &"x".into(), &"x".into(), 1);
        assert_eq!(ids(&after, "x"), ["i2", "i1"]);
    }

    #[test]
    fn remove_rename_insert() {
        let b = remove_column_item(&board(), &"x".into(), &"i1".into());
        assert_eq!(ids(&b, "x"), ["i2"]);
        let b = rename_column(&b, &"y".into(), "Doing");
        assert_eq!(b.column(&"y".into()).map(|c| c.name.as_str()), Some("Doing"));
        let b = insert_item(&b, &"y".into(), 5, Item::new("i4", "four"));
        assert_eq!(ids(&b, "y"), ["i4"]);
        let b = remove_column(&b, &"z".into());
        assert_eq!(column_ids(&b), ["x", "y"]);
        let b = push_column(&b, Column::new("w", "W"));
        assert_eq!(column_ids(&b), ["x", "y", "w"]);
    }

    #[test]
    fn update_column_items_applies_closure() {
        let b = update_column_items(&board(), &"x".into(), |items| {
            items.iter().rev().cloned().collect()
        });
        assert_eq!(ids(&b, "x"), ["i2", "i1"]);
        let unchanged = update_column_items(&board(), &"nope".into(), |_| Vec::new());
        assert_eq!(unchanged, board());
    }

    #[test]
    fn move_column_reorders() {
        let b = move_column(&board(), 0, 2);
        assert_eq!(column_ids(&b), ["y", "z", "x"]);
        assert_eq!(move_column(&board(), 5, 0), board());
    }

    #[test]
    fn remove_unknown_item_is_noop() {
        let before = board();
        let after = remove_column_item(&before, &"y".into(), &"i1".into());
        assert_eq!(after, before);
    }
}

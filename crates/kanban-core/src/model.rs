#![forbid(unsafe_code)]

//! Board, column, and item records.
//!
//! # Invariants
//!
//! 1. Item ids are unique across the whole board; column ids are unique among
//!    columns. Neither is validated here: on duplicates the first match wins.
//! 2. Order inside [`Column::items`] and inside the board is the logical
//!    (rendered) order.
//! 3. Columns are reference-counted. Cloning a [`Board`] is linear in the
//!    number of columns, and mutators copy only the columns they touch.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::id::UniqueId;

/// Atomic draggable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: UniqueId,
    pub name: String,
    /// Caller-defined fields carried along unchanged.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, String>,
}

impl Item {
    /// Build an item with no extension fields.
    #[must_use]
    pub fn new(id: impl Into<UniqueId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extensions: BTreeMap::new(),
        }
    }

    /// Attach one extension field.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }
}

/// Named, ordered container of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: UniqueId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Column {
    /// Build an empty column.
    #[must_use]
    pub fn new(id: impl Into<UniqueId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Replace the item list.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Position of an item inside this column.
    #[must_use]
    pub fn item_index(&self, id: &UniqueId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Look up an item inside this column.
    #[must_use]
    pub fn item(&self, id: &UniqueId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains_item(&self, id: &UniqueId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Location of an item: column position and position inside that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPosition {
    pub column: usize,
    pub index: usize,
}

/// Ordered collection of columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    columns: Vec<Arc<Column>>,
}

impl Board {
    /// Build a board from columns in display order.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        columns.into_iter().collect()
    }

    /// Columns in display order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Total number of items across all columns.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|column| column.items.len()).sum()
    }

    /// All item ids, column by column.
    pub fn item_ids(&self) -> impl Iterator<Item = &UniqueId> + '_ {
        self.columns
            .iter()
            .flat_map(|column| column.items.iter().map(|item| &item.id))
    }

    #[must_use]
    pub fn column(&self, id: &UniqueId) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| &column.id == id)
            .map(AsRef::as_ref)
    }

    #[must_use]
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn column_index(&self, id: &UniqueId) -> Option<usize> {
        self.columns.iter().position(|column| &column.id == id)
    }

    /// Whether `id` names a column (as opposed to an item or a sentinel).
    #[must_use]
    pub fn is_column(&self, id: &UniqueId) -> bool {
        self.column_index(id).is_some()
    }

    /// Locate an item by id.
    #[must_use]
    pub fn item_position(&self, id: &UniqueId) -> Option<ItemPosition> {
        self.columns.iter().enumerate().find_map(|(column, col)| {
            col.item_index(id)
                .map(|index| ItemPosition { column, index })
        })
    }

    /// Look up an item anywhere on the board.
    #[must_use]
    pub fn item(&self, id: &UniqueId) -> Option<&Item> {
        self.columns.iter().find_map(|column| column.item(id))
    }

    /// Position of an item inside its column.
    #[must_use]
    pub fn item_index(&self, id: &UniqueId) -> Option<usize> {
        self.item_position(id).map(|position| position.index)
    }

    /// The column an id belongs to.
    ///
    /// A column id resolves to itself; an item id resolves to the column that
    /// currently holds it. Anything else resolves to `None`.
    #[must_use]
    pub fn container_of(&self, id: &UniqueId) -> Option<&UniqueId> {
        if let Some(column) = self.column(id) {
            return Some(&column.id);
        }
        self.columns
            .iter()
            .find(|column| column.contains_item(id))
            .map(|column| &column.id)
    }

    /// Whether two boards share the same allocation for column `id`.
    ///
    /// Used to observe that untouched columns are not copied by mutators.
    #[must_use]
    pub fn shares_column(&self, other: &Board, id: &UniqueId) -> bool {
        let mine = self.columns.iter().find(|column| &column.id == id);
        let theirs = other.columns.iter().find(|column| &column.id == id);
        match (mine, theirs) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Unwrap into owned columns.
    #[must_use]
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
            .into_iter()
            .map(Arc::unwrap_or_clone)
            .collect()
    }

    /// Mutable access to one column, copying it first if it is shared.
    pub(crate) fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index).map(Arc::make_mut)
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Arc<Column>> {
        &mut self.columns
    }
}

impl FromIterator<Column> for Board {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

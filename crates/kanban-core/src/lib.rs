#![forbid(unsafe_code)]

//! Core: board model, identifiers, geometry, and pure mutators.
//!
//! # Role in the workspace
//! `kanban-core` holds the data the drag engine reasons about. It has no
//! notion of a gesture; `kanban-dnd` builds the drag lifecycle on top of it.
//!
//! # Primary responsibilities
//! - **Board / Column / Item**: the caller-owned collection, with lookups
//!   that return `Option` on a miss.
//! - **Geometry**: `Rect` and `Point` with validity rules for malformed input.
//! - **Mutators**: insert, remove, relocate, rename, and reorder, each
//!   returning a new `Board`.

pub mod geometry;
pub mod id;
pub mod model;
pub mod mutate;

pub use geometry::{Point, Rect};
pub use id::UniqueId;
pub use model::{Board, Column, Item, ItemPosition};

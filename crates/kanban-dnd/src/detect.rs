#![forbid(unsafe_code)]

//! Geometric collision detectors and the per-event candidate frame.
//!
//! The detectors are pure functions over droppable rectangles. Each returns
//! matches best-first; equal scores keep the order in which candidates were
//! supplied, so results are deterministic for identical input. Droppables
//! with invalid rectangles (NaN, infinite, zero-sized) never match.

use kanban_core::{Point, Rect, UniqueId};
use serde::{Deserialize, Serialize};

/// What kind of element a droppable represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroppableKind {
    Item,
    Column,
    Trash,
    Placeholder,
}

/// One droppable target with its current bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub id: UniqueId,
    pub kind: DroppableKind,
    pub rect: Rect,
}

impl Droppable {
    #[must_use]
    pub fn new(id: impl Into<UniqueId>, kind: DroppableKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
        }
    }
}

/// One detector match. Lower scores are better for distance detectors,
/// higher for [`rect_intersection`].
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub id: UniqueId,
    pub score: f64,
}

/// Geometry delivered with one drag event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionFrame {
    /// Pointer position, when the sensor has one (keyboard drags may not).
    pub pointer: Option<Point>,
    /// Dragged element's rectangle after applying the drag translation.
    pub active_rect: Option<Rect>,
    /// Every droppable currently registered.
    pub droppables: Vec<Droppable>,
}

impl CollisionFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }

    #[must_use]
    pub fn with_active_rect(mut self, rect: Rect) -> Self {
        self.active_rect = Some(rect);
        self
    }

    /// Register one droppable.
    #[must_use]
    pub fn with_droppable(mut self, id: impl Into<UniqueId>, kind: DroppableKind, rect: Rect) -> Self {
        self.droppables.push(Droppable::new(id, kind, rect));
        self
    }

    /// Look up a droppable by id (first match).
    #[must_use]
    pub fn droppable(&self, id: &UniqueId) -> Option<&Droppable> {
        self.droppables.iter().find(|droppable| &droppable.id == id)
    }
}

fn sort_ascending(collisions: &mut [Collision]) {
    collisions.sort_by(|a, b| a.score.total_cmp(&b.score));
}

/// Droppables whose bounds contain the pointer, nearest corners first.
///
/// The score is the mean distance from the pointer to the four corners.
#[must_use]
pub fn pointer_within<'a>(
    pointer: Option<Point>,
    droppables: impl IntoIterator<Item = &'a Droppable>,
) -> Vec<Collision> {
    let Some(pointer) = pointer.filter(Point::is_finite) else {
        return Vec::new();
    };
    let mut out: Vec<Collision> = droppables
        .into_iter()
        .filter(|droppable| droppable.rect.contains(pointer))
        .map(|droppable| {
            let total: f64 = droppable
                .rect
                .corners()
                .iter()
                .map(|corner| corner.distance(pointer))
                .sum();
            Collision {
                id: droppable.id.clone(),
                score: total / 4.0,
            }
        })
        .collect();
    sort_ascending(&mut out);
    out
}

/// Droppables overlapping the active rectangle, largest overlap first.
///
/// The score is intersection over union; non-overlapping targets are
/// dropped.
#[must_use]
pub fn rect_intersection<'a>(
    active: Option<Rect>,
    droppables: impl IntoIterator<Item = &'a Droppable>,
) -> Vec<Collision> {
    let Some(active) = active.filter(Rect::is_valid) else {
        return Vec::new();
    };
    let mut out: Vec<Collision> = droppables
        .into_iter()
        .filter_map(|droppable| {
            let ratio = active.overlap_ratio(&droppable.rect);
            (ratio > 0.0).then(|| Collision {
                id: droppable.id.clone(),
                score: ratio,
            })
        })
        .collect();
    out.sort_by(|a, b| b.score.total_cmp(&a.score));
    out
}

/// All valid droppables ordered by distance between their center and the
/// active rectangle's center.
#[must_use]
pub fn closest_center<'a>(
    active: Option<Rect>,
    droppables: impl IntoIterator<Item = &'a Droppable>,
) -> Vec<Collision> {
    let Some(active) = active.filter(Rect::is_valid) else {
        return Vec::new();
    };
    let center = active.center();
    let mut out: Vec<Collision> = droppables
        .into_iter()
        .filter(|droppable| droppable.rect.is_valid())
        .map(|droppable| Collision {
            id: droppable.id.clone(),
            score: droppable.rect.center().distance(center),
        })
        .collect();
    sort_ascending(&mut out);
    out
}

//! Visibility transitions produced by the viewport observation service.

use serde::{Deserialize, Serialize};

use super::document::{ElementId, PageElement};

/// Intersection ratio at which a page counts as read.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// True when an element intersects the viewport with at least `threshold` of
/// its area. A NaN ratio is never visible.
pub fn is_sufficiently_visible(intersecting: bool, intersection_ratio: f64, threshold: f64) -> bool {
    intersecting && intersection_ratio >= threshold
}

/// One element moving in or out of the viewport, resolved to a tracked page.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTransition {
    pub element: PageElement,
    pub intersecting: bool,
    /// Fraction of the element inside the viewport, in `[0, 1]`.
    pub intersection_ratio: f64,
}

impl VisibilityTransition {
    pub fn new(element: PageElement, intersecting: bool, intersection_ratio: f64) -> Self {
        Self {
            element,
            intersecting,
            intersection_ratio,
        }
    }

    pub fn is_sufficiently_visible(&self, threshold: f64) -> bool {
        is_sufficiently_visible(self.intersecting, self.intersection_ratio, threshold)
    }
}

/// A transition as delivered by the observation service, naming its element
/// by id. Accepts both snake_case and the browser's camelCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransition {
    #[serde(alias = "target")]
    pub element: ElementId,
    #[serde(alias = "isIntersecting")]
    pub intersecting: bool,
    #[serde(alias = "intersectionRatio")]
    pub intersection_ratio: f64,
}

impl RawTransition {
    pub fn new(element: impl Into<String>, intersecting: bool, intersection_ratio: f64) -> Self {
        Self {
            element: ElementId::new(element),
            intersecting,
            intersection_ratio,
        }
    }
}

/// One observation callback's worth of transitions.
pub type VisibilityBatch = Vec<RawTransition>;

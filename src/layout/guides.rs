//! Alignment guides derived from a source/target rectangle pair
//!
//! Every value is expressed relative to the containing frame's offset, so
//! the same guides can be fed straight into an SVG canvas positioned at
//! that frame.

use super::types::{Point, Rect};

/// Default gap kept between a routed connection and the node silhouettes
pub const DEFAULT_MARGIN: f64 = 12.0;

/// Guides for a single node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGuides {
    /// Left edge
    pub l: f64,
    /// Right edge
    pub r: f64,
    /// Top edge
    pub t: f64,
    /// Bottom edge
    pub b: f64,
    /// Horizontal center (an x coordinate)
    pub hc: f64,
    /// Vertical center (a y coordinate)
    pub vc: f64,
}

impl NodeGuides {
    /// Compute the guides of `rect` relative to `offset`
    pub fn from_rect(rect: &Rect, offset: Point) -> Self {
        Self {
            l: rect.left() - offset.x,
            r: rect.right() - offset.x,
            t: rect.top() - offset.y,
            b: rect.bottom() - offset.y,
            hc: (rect.left() + rect.width() / 2.0) - offset.x,
            vc: (rect.top() + rect.height() / 2.0) - offset.y,
        }
    }
}

/// The outer left/right lines bounding the routing corridor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginGuides {
    pub l: f64,
    pub r: f64,
}

/// The full guide set for a (source, target) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGuides {
    /// Corridor margins shared by both nodes
    pub m: MarginGuides,
    /// Source node guides
    pub s: NodeGuides,
    /// Target node guides
    pub t: NodeGuides,
    /// Midline between the source bottom and the target top
    pub vc: f64,
}

/// `f64::min`/`max` drop a NaN operand; measurement garbage must show up in
/// the margins instead
fn envelope(a: f64, b: f64, pick: fn(f64, f64) -> f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        pick(a, b)
    }
}

/// Compute the grid guides for a source and target rectangle
///
/// The midline is always the mean of the source's bottom and the target's
/// top, even when the target sits above the source. A zero or negative
/// margin shrinks or inverts the corridor; nothing is validated.
pub fn compute_grid_guides(source: &Rect, target: &Rect, offset: Point, margin: f64) -> GridGuides {
    let guides = GridGuides {
        m: MarginGuides {
            l: envelope(source.left(), target.left(), f64::min) - margin - offset.x,
            r: envelope(source.right(), target.right(), f64::max) + margin - offset.x,
        },
        s: NodeGuides::from_rect(source, offset),
        t: NodeGuides::from_rect(target, offset),
        vc: (source.bottom() + target.top()) / 2.0 - offset.y,
    };
    tracing::trace!(?guides, margin, "computed grid guides");
    guides
}

//! Connection routing along grid guides
//!
//! A connector leaves the source through one of its sides, travels along
//! the margin lines and the shared midline, and enters the target through
//! one of its sides. Every turn is rounded with a quadratic curve whose
//! control point is the corner itself.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SideError;
use crate::renderer::path::{ConnectorPath, PathCommand};

use super::guides::GridGuides;
use super::types::{p, Point};

/// Default corner radius for rounded turns
pub const DEFAULT_CORNER_RADIUS: f64 = 8.0;

/// Side of the source node the connector leaves from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSide {
    Left,
    #[default]
    Bottom,
    Right,
}

/// Side of the target node the connector enters through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSide {
    Left,
    #[default]
    Top,
    Right,
}

impl SourceSide {
    pub const ALL: [SourceSide; 3] = [SourceSide::Left, SourceSide::Bottom, SourceSide::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSide::Left => "left",
            SourceSide::Bottom => "bottom",
            SourceSide::Right => "right",
        }
    }
}

impl TargetSide {
    pub const ALL: [TargetSide; 3] = [TargetSide::Left, TargetSide::Top, TargetSide::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetSide::Left => "left",
            TargetSide::Top => "top",
            TargetSide::Right => "right",
        }
    }
}

impl FromStr for SourceSide {
    type Err = SideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceSide::ALL
            .into_iter()
            .find(|side| side.as_str() == s)
            .ok_or_else(|| SideError::unknown("source", s, &["left", "bottom", "right"]))
    }
}

impl FromStr for TargetSide {
    type Err = SideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetSide::ALL
            .into_iter()
            .find(|side| side.as_str() == s)
            .ok_or_else(|| SideError::unknown("target", s, &["left", "top", "right"]))
    }
}

impl fmt::Display for SourceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TargetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate the sharp-cornered waypoints of a connector
///
/// Consecutive duplicates (typically where the source leg ends on the same
/// point the target leg starts from) are removed.
pub fn generate_path_points(
    guides: &GridGuides,
    source_side: SourceSide,
    target_side: TargetSide,
) -> Vec<Point> {
    let GridGuides { m, s, t, vc } = *guides;
    let mut points = Vec::with_capacity(6);

    match source_side {
        SourceSide::Left => points.extend([p(s.l, s.vc), p(m.l, s.vc), p(m.l, vc)]),
        SourceSide::Right => points.extend([p(s.r, s.vc), p(m.r, s.vc), p(m.r, vc)]),
        SourceSide::Bottom => points.extend([p(s.hc, s.b), p(s.hc, vc)]),
    }

    match target_side {
        TargetSide::Left => points.extend([p(m.l, vc), p(m.l, t.vc), p(t.l, t.vc)]),
        TargetSide::Right => points.extend([p(m.r, vc), p(m.r, t.vc), p(t.r, t.vc)]),
        TargetSide::Top => points.extend([p(t.hc, vc), p(t.hc, t.t)]),
    }

    points.dedup();
    points
}

/// Generate the rounded connector as a list of path commands
///
/// The path is built from three legs: the exit from the source down to the
/// midline, the join along the midline, and the entry into the target.
/// The radius is not clamped against the available space.
///
/// A bottom→top connector is a straight vertical run only when both
/// horizontal centers line up. Otherwise it rounds onto the midline, runs
/// across to the target's center and rounds down into the target, so the
/// path still ends on the target's top edge.
pub fn generate_path_commands(
    guides: &GridGuides,
    source_side: SourceSide,
    target_side: TargetSide,
    radius: f64,
) -> ConnectorPath {
    use PathCommand::{HorizontalTo as H, MoveTo as M, QuadraticTo, VerticalTo as V};

    let GridGuides { m, s, t, vc } = *guides;
    let r = radius;
    let q = |control: Point, end: Point| QuadraticTo { control, end };
    let mut commands = Vec::with_capacity(12);

    // Source exit: run to the corridor (or straight down) and stop one
    // radius above the midline
    match source_side {
        SourceSide::Left => commands.extend([
            M(p(s.l, s.vc)),
            H(m.l + r),
            q(p(m.l, s.vc), p(m.l, s.vc + r)),
            V(vc - r),
        ]),
        SourceSide::Bottom => commands.extend([M(p(s.hc, s.b)), V(vc - r)]),
        SourceSide::Right => commands.extend([
            M(p(s.r, s.vc)),
            H(m.r - r),
            q(p(m.r, s.vc), p(m.r, s.vc + r)),
            V(vc - r),
        ]),
    }

    // Join along the midline, ending one radius below it on the column the
    // target leg descends
    match (source_side, target_side) {
        (SourceSide::Left, TargetSide::Left) | (SourceSide::Right, TargetSide::Right) => {
            commands.push(V(vc + r))
        }
        (SourceSide::Left, TargetSide::Top) => commands.extend([
            q(p(m.l, vc), p(m.l + r, vc)),
            H(t.hc - r),
            q(p(t.hc, vc), p(t.hc, vc + r)),
        ]),
        (SourceSide::Left, TargetSide::Right) => commands.extend([
            q(p(m.l, vc), p(m.l + r, vc)),
            H(t.hc - r),
            H(t.hc + r),
            H(m.r - r),
            q(p(m.r, vc), p(m.r, vc + r)),
        ]),
        (SourceSide::Bottom, TargetSide::Left) => commands.extend([
            q(p(s.hc, vc), p(s.hc - r, vc)),
            H(m.l + r),
            q(p(m.l, vc), p(m.l, vc + r)),
        ]),
        (SourceSide::Bottom, TargetSide::Top) => {
            if s.hc == t.hc {
                commands.push(V(vc + r));
            } else {
                // Centers are not aligned: jog sideways along the midline
                let dir = if t.hc > s.hc { 1.0 } else { -1.0 };
                commands.extend([
                    q(p(s.hc, vc), p(s.hc + dir * r, vc)),
                    H(t.hc - dir * r),
                    q(p(t.hc, vc), p(t.hc, vc + r)),
                ]);
            }
        }
        (SourceSide::Bottom, TargetSide::Right) => commands.extend([
            q(p(s.hc, vc), p(s.hc + r, vc)),
            H(m.r - r),
            q(p(m.r, vc), p(m.r, vc + r)),
        ]),
        (SourceSide::Right, TargetSide::Left) => commands.extend([
            q(p(m.r, vc), p(m.r - r, vc)),
            H(t.hc - r),
            H(t.hc + r),
            H(m.l + r),
            q(p(m.l, vc), p(m.l, vc + r)),
        ]),
        (SourceSide::Right, TargetSide::Top) => commands.extend([
            q(p(m.r, vc), p(m.r - r, vc)),
            H(t.hc + r),
            q(p(t.hc, vc), p(t.hc, vc + r)),
        ]),
    }

    // Target entry
    match target_side {
        TargetSide::Left => commands.extend([
            V(t.vc - r),
            q(p(m.l, t.vc), p(m.l + r, t.vc)),
            H(t.l),
        ]),
        TargetSide::Top => commands.push(V(t.t)),
        TargetSide::Right => commands.extend([
            V(t.vc - r),
            q(p(m.r, t.vc), p(m.r - r, t.vc)),
            H(t.r),
        ]),
    }

    tracing::trace!(
        %source_side,
        %target_side,
        radius,
        commands = commands.len(),
        "generated connector path"
    );
    ConnectorPath::new(commands)
}

/// Generate the rounded connector as an SVG `d` string
pub fn generate_path_string(
    guides: &GridGuides,
    source_side: SourceSide,
    target_side: TargetSide,
    radius: f64,
) -> String {
    generate_path_commands(guides, source_side, target_side, radius).to_svg_d()
}

/// Anchor point for a connection label
///
/// Labels sit on the midline: above the target center when the connector
/// crosses the corridor or drops straight in, otherwise on the margin line
/// the connector runs along.
pub fn label_position(
    guides: &GridGuides,
    source_side: SourceSide,
    target_side: TargetSide,
) -> Point {
    let GridGuides { m, t, vc, .. } = *guides;
    match (source_side, target_side) {
        (SourceSide::Left, TargetSide::Right)
        | (SourceSide::Right, TargetSide::Left)
        | (SourceSide::Bottom, TargetSide::Top) => p(t.hc, vc),
        (SourceSide::Left, TargetSide::Left)
        | (SourceSide::Left, TargetSide::Top)
        | (SourceSide::Bottom, TargetSide::Left) => p(m.l, vc),
        (SourceSide::Right, TargetSide::Right)
        | (SourceSide::Right, TargetSide::Top)
        | (SourceSide::Bottom, TargetSide::Right) => p(m.r, vc),
    }
}

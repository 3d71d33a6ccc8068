//! SVG path command emitters
//!
//! Connector paths only ever need four commands: an initial `M`, straight
//! `H`/`V` runs along the guides and a `Q` curve at each rounded corner.
//! All coordinates are absolute and tokens are separated by single spaces,
//! so the output can be dropped into a `d` attribute as is.

use std::fmt;

use crate::layout::Point;

/// Format a coordinate in its shortest round-trip decimal form
///
/// Integral values print without a fractional part (`50`, `-12`). Negative
/// zero prints as `0`, infinities as `Infinity`/`-Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// `M x y`
pub fn move_to(point: Point) -> String {
    PathCommand::MoveTo(point).to_string()
}

/// `H x`
pub fn horizontal_to(x: f64) -> String {
    PathCommand::HorizontalTo(x).to_string()
}

/// `V y`
pub fn vertical_to(y: f64) -> String {
    PathCommand::VerticalTo(y).to_string()
}

/// `Q cx cy ex ey`
pub fn quadratic_curve_to(control: Point, end: Point) -> String {
    PathCommand::QuadraticTo { control, end }.to_string()
}

/// A single command in a connector path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to starting point
    MoveTo(Point),
    /// Horizontal line to x
    HorizontalTo(f64),
    /// Vertical line to y
    VerticalTo(f64),
    /// Quadratic Bezier curve; the control point is the corner being rounded
    QuadraticTo { control: Point, end: Point },
}

impl PathCommand {
    /// The SVG command letter
    pub fn letter(&self) -> char {
        match self {
            PathCommand::MoveTo(_) => 'M',
            PathCommand::HorizontalTo(_) => 'H',
            PathCommand::VerticalTo(_) => 'V',
            PathCommand::QuadraticTo { .. } => 'Q',
        }
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(p) => {
                write!(f, "M {} {}", format_number(p.x), format_number(p.y))
            }
            PathCommand::HorizontalTo(x) => write!(f, "H {}", format_number(*x)),
            PathCommand::VerticalTo(y) => write!(f, "V {}", format_number(*y)),
            PathCommand::QuadraticTo { control, end } => write!(
                f,
                "Q {} {} {} {}",
                format_number(control.x),
                format_number(control.y),
                format_number(end.x),
                format_number(end.y)
            ),
        }
    }
}

/// An ordered list of commands making up one connector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorPath {
    pub commands: Vec<PathCommand>,
}

impl ConnectorPath {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        self.commands
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolve the absolute point reached after each command
    ///
    /// `H`/`V` keep the other coordinate of the current point. A path that
    /// does not start with `M` starts from the origin.
    pub fn positions(&self) -> Vec<Point> {
        let mut current = Point::default();
        self.commands
            .iter()
            .map(|cmd| {
                current = match *cmd {
                    PathCommand::MoveTo(p) => p,
                    PathCommand::HorizontalTo(x) => Point::new(x, current.y),
                    PathCommand::VerticalTo(y) => Point::new(current.x, y),
                    PathCommand::QuadraticTo { end, .. } => end,
                };
                current
            })
            .collect()
    }
}

impl fmt::Display for ConnectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg_d())
    }
}

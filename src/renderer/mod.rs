//! Rendering of connector paths and whole flows
//!
//! `path` turns routed connectors into SVG path data; `svg` wraps a
//! recomputed flow into a standalone document.

pub mod config;
pub mod path;
pub mod svg;

pub use config::SvgConfig;
pub use path::{
    horizontal_to, move_to, quadratic_curve_to, vertical_to, ConnectorPath, PathCommand,
};
pub use svg::render_svg;

//! Flow Viewer - rounded orthogonal connectors between rectangular nodes
//!
//! This library derives alignment guides from two node bounding boxes and
//! routes a connector along them, rendering it as SVG path data.
//!
//! # Example
//!
//! ```rust
//! use flow_viewer::{compute_grid_guides, generate_path_string, p, Rect, SourceSide, TargetSide};
//!
//! let source = Rect::new(0.0, 0.0, 100.0, 50.0);
//! let target = Rect::new(0.0, 150.0, 100.0, 50.0);
//! let guides = compute_grid_guides(&source, &target, p(0.0, 0.0), 12.0);
//!
//! let d = generate_path_string(&guides, SourceSide::Bottom, TargetSide::Top, 8.0);
//! assert_eq!(d, "M 50 50 V 92 V 108 V 150");
//! ```

pub mod error;
pub mod flow;
pub mod layout;
pub mod renderer;

pub use error::{FlowError, SideError};
pub use flow::{Connection, ConnectionLayout, Flow, FlowLayout, FlowNode, FlowOptions};
pub use layout::{
    compute_grid_guides, generate_path_commands, generate_path_points, generate_path_string,
    label_position, p, GridGuides, LayoutConfig, NodeGuides, Point, Rect, SourceSide, TargetSide,
};
pub use renderer::{render_svg, ConnectorPath, PathCommand, SvgConfig};

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Overrides the flow's own margin and corner radius when set
    pub layout: Option<LayoutConfig>,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Log guides and paths for every connection
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the layout configuration of rendered flows
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = Some(config);
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Enable or disable debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Route a single connector between two rectangles and return its `d` string
///
/// ```rust
/// use flow_viewer::{connector_path, p, LayoutConfig, Rect, SourceSide, TargetSide};
///
/// let d = connector_path(
///     &Rect::new(0.0, 0.0, 100.0, 50.0),
///     &Rect::new(0.0, 150.0, 100.0, 50.0),
///     p(0.0, 0.0),
///     SourceSide::Left,
///     TargetSide::Left,
///     &LayoutConfig::default(),
/// );
/// assert!(d.starts_with("M 0 25"));
/// ```
pub fn connector_path(
    source: &Rect,
    target: &Rect,
    offset: Point,
    source_side: SourceSide,
    target_side: TargetSide,
    config: &LayoutConfig,
) -> String {
    let guides = compute_grid_guides(source, target, offset, config.margin);
    generate_path_string(&guides, source_side, target_side, config.corner_radius)
}

/// Render a TOML flow description to SVG with default configuration
pub fn render(source: &str) -> Result<String, FlowError> {
    render_with_config(source, &RenderConfig::default())
}

/// Render a TOML flow description to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use flow_viewer::{render_with_config, RenderConfig, SvgConfig};
///
/// let source = r#"
///     [root]
///     x = 0
///     y = 0
///     width = 200
///     height = 240
///
///     [[nodes]]
///     name = "a"
///     x = 0
///     y = 0
///     width = 100
///     height = 50
///
///     [[nodes]]
///     name = "b"
///     x = 0
///     y = 150
///     width = 100
///     height = 50
///
///     [[connections]]
///     source = "a"
///     target = "b"
/// "#;
///
/// let config = RenderConfig::new().with_svg(SvgConfig::default().with_standalone(false));
/// let svg = render_with_config(source, &config).unwrap();
/// assert!(svg.contains(r#"d="M 50 50 V 92 V 108 V 150""#));
/// ```
pub fn render_with_config(source: &str, config: &RenderConfig) -> Result<String, FlowError> {
    let flow = Flow::from_toml_str(source)?;
    render_flow(&flow, config)
}

/// Recompute a flow and render it to SVG
pub fn render_flow(flow: &Flow, config: &RenderConfig) -> Result<String, FlowError> {
    let mut options = flow.options.clone();
    if let Some(layout) = &config.layout {
        options.layout = layout.clone();
    }
    options.debug |= config.debug;

    let flow = Flow {
        options,
        ..flow.clone()
    };
    let layout = flow.recompute()?;
    Ok(render_svg(&layout, &config.svg))
}

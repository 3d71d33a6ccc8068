//! Configuration for SVG rendering

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Padding around the viewBox; connectors on a margin line may sit
    /// outside the root frame
    ///
    /// The default of 16 fits a margin line at the default 12 units outside
    /// a node flush with the frame, plus the stroke width.
    pub viewbox_padding: f64,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "fv-" for "fv-connection")
    pub class_prefix: Option<String>,

    /// Connector stroke color
    pub stroke: String,

    /// Connector stroke width
    pub stroke_width: f64,

    /// Whether connectors end in an arrow head
    pub arrow_markers: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 16.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("fv-".to_string()),
            stroke: "#333333".to_string(),
            stroke_width: 2.0,
            arrow_markers: true,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewBox padding
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set the connector stroke
    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = color.into();
        self.stroke_width = width;
        self
    }

    pub fn with_arrow_markers(mut self, enabled: bool) -> Self {
        self.arrow_markers = enabled;
        self
    }
}

//! Configuration for guide computation and routing

use serde::Deserialize;

use super::guides::DEFAULT_MARGIN;
use super::routing::DEFAULT_CORNER_RADIUS;

/// Configuration options for connector layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap kept between connectors and the outer node silhouettes
    pub margin: f64,

    /// Radius of the rounded corner at each turn
    pub corner_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the corridor margin
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the corner radius
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.margin, 12.0);
        assert_eq!(config.corner_radius, 8.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_margin(20.0)
            .with_corner_radius(4.0);

        assert_eq!(config.margin, 20.0);
        assert_eq!(config.corner_radius, 4.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LayoutConfig = toml::from_str("margin = 30").unwrap();
        assert_eq!(config.margin, 30.0);
        assert_eq!(config.corner_radius, 8.0);
    }
}

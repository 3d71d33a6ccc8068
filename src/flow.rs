//! Flow documents: named nodes, connections between them, and on-demand
//! recomputation of every connector
//!
//! Node rectangles are given in page coordinates, the same space the host
//! layout measures in. The root frame's top-left corner is the offset that
//! turns them into canvas coordinates.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::FlowError;
use crate::layout::{
    self, compute_grid_guides, generate_path_commands, generate_path_points, label_position,
    GridGuides, LayoutConfig, Point, Rect, SourceSide, TargetSide,
};
use crate::renderer::path::ConnectorPath;

/// Options shared by every connection in a flow
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowOptions {
    #[serde(flatten)]
    pub layout: LayoutConfig,

    /// Prefix used to build node element ids
    pub id_prefix: String,

    /// Log guides and paths at debug level for every routed connection
    pub debug: bool,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            id_prefix: "flow".to_string(),
            debug: false,
        }
    }
}

impl FlowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// A named rectangle in the flow
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlowNode {
    pub name: String,
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub label: Option<String>,
}

impl FlowNode {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A connector request between two nodes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_side: SourceSide,
    #[serde(default)]
    pub target_side: TargetSide,
    #[serde(default)]
    pub label: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_side: SourceSide::default(),
            target_side: TargetSide::default(),
            label: None,
        }
    }

    pub fn with_sides(mut self, source_side: SourceSide, target_side: TargetSide) -> Self {
        self.source_side = source_side;
        self.target_side = target_side;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A routed connection, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionLayout {
    pub source: String,
    pub target: String,
    pub source_side: SourceSide,
    pub target_side: TargetSide,
    pub guides: GridGuides,
    pub path: ConnectorPath,
    pub points: Vec<Point>,
    pub label: Option<LabelLayout>,
}

/// A positioned connection label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub text: String,
    pub position: Point,
}

/// A node positioned in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub id: String,
    pub name: String,
    pub bounds: Rect,
    pub label: Option<String>,
}

/// Everything needed to draw a flow
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout {
    /// Canvas size (the root frame size)
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<NodeLayout>,
    pub connections: Vec<ConnectionLayout>,
}

/// A flow description: root frame, nodes and connections
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Flow {
    #[serde(default)]
    pub options: FlowOptions,
    #[serde(default)]
    pub root: Rect,
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Flow {
    pub fn new(root: Rect) -> Self {
        Self {
            root,
            ..Self::default()
        }
    }

    /// Load a flow from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, FlowError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a flow from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, FlowError> {
        let flow: Flow = toml::from_str(content)?;
        flow.validate()?;
        Ok(flow)
    }

    pub fn with_options(mut self, options: FlowOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_node(mut self, node: FlowNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    /// Reject node names used more than once
    pub fn validate(&self) -> Result<(), FlowError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.name.as_str()) {
                return Err(FlowError::DuplicateNode {
                    name: node.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Element id for a node name
    pub fn node_id(&self, name: &str) -> String {
        format!("{}__node-{}", self.options.id_prefix, name)
    }

    pub fn node(&self, name: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Offset of the root frame; guides are relative to it
    pub fn offset(&self) -> Point {
        self.root.origin()
    }

    fn require_node(&self, name: &str) -> Result<&FlowNode, FlowError> {
        self.node(name).ok_or_else(|| {
            let names = self.nodes.iter().map(|n| n.name.as_str());
            FlowError::undefined(name, layout::find_similar(names, name, 2))
        })
    }

    /// Guides between two named nodes
    pub fn grid_guides(&self, source: &str, target: &str) -> Result<GridGuides, FlowError> {
        let source = self.require_node(source)?;
        let target = self.require_node(target)?;
        Ok(compute_grid_guides(
            &source.rect,
            &target.rect,
            self.offset(),
            self.options.layout.margin,
        ))
    }

    /// Route a single connection
    pub fn route(&self, connection: &Connection) -> Result<ConnectionLayout, FlowError> {
        let guides = self.grid_guides(&connection.source, &connection.target)?;
        let (source_side, target_side) = (connection.source_side, connection.target_side);

        let path = generate_path_commands(
            &guides,
            source_side,
            target_side,
            self.options.layout.corner_radius,
        );
        let points = generate_path_points(&guides, source_side, target_side);
        let label = connection.label.as_ref().map(|text| LabelLayout {
            text: text.clone(),
            position: label_position(&guides, source_side, target_side),
        });

        if self.options.debug {
            tracing::debug!(
                source = %connection.source,
                target = %connection.target,
                ?guides,
                path = %path,
                "routed connection"
            );
        }

        Ok(ConnectionLayout {
            source: connection.source.clone(),
            target: connection.target.clone(),
            source_side,
            target_side,
            guides,
            path,
            points,
            label,
        })
    }

    /// Recompute every node position and connector from scratch
    ///
    /// Nothing is cached; call this whenever a node or the root frame moves.
    /// Node names are checked again here since `nodes` may have been edited
    /// after loading.
    pub fn recompute(&self) -> Result<FlowLayout, FlowError> {
        self.validate()?;
        let offset = self.offset();
        let nodes = self
            .nodes
            .iter()
            .map(|node| NodeLayout {
                id: self.node_id(&node.name),
                name: node.name.clone(),
                bounds: node.rect.translate(-offset.x, -offset.y),
                label: node.label.clone(),
            })
            .collect();

        let connections = self
            .connections
            .iter()
            .map(|c| self.route(c))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FlowLayout {
            width: self.root.width(),
            height: self.root.height(),
            nodes,
            connections,
        })
    }
}

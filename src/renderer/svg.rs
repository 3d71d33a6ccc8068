//! SVG generation from a recomputed flow

use crate::flow::{ConnectionLayout, FlowLayout, NodeLayout};
use crate::layout::Point;

use super::path::{format_number, ConnectorPath};
use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    nodes: Vec<String>,
    connections: Vec<String>,
    labels: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            nodes: vec![],
            connections: vec![],
            labels: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the arrow marker definition for connector ends
    pub fn add_arrow_marker(&mut self) {
        let prefix = self.prefix();
        // orient="auto" follows the final V/H run into the target
        self.defs.push(format!(
            r#"<marker id="{prefix}arrow" viewBox="0 0 10 10" refX="8" refY="5" markerWidth="4" markerHeight="4" markerUnits="strokeWidth" orient="auto"><path d="M 0 0 L 10 5 L 0 10 Z" fill="context-stroke"/></marker>"#
        ));
    }

    /// Add a node rectangle, optionally with a centered label
    pub fn add_node(&mut self, node: &NodeLayout) {
        let prefix = self.prefix();
        let b = &node.bounds;
        self.nodes.push(format!(
            r#"{}<rect class="{}node" data-node-id="{}" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}"/>"#,
            self.indent_str(),
            prefix,
            escape_xml(&node.id),
            format_number(b.x),
            format_number(b.y),
            format_number(b.width),
            format_number(b.height),
            escape_xml(&self.config.stroke),
        ));
        if let Some(label) = &node.label {
            self.add_text(&format!("{prefix}node-label"), label, b.center());
        }
    }

    /// Add a connector path
    pub fn add_connection_path(&mut self, path: &ConnectorPath) {
        let prefix = self.prefix();
        let marker = if self.config.arrow_markers {
            format!(r#" marker-end="url(#{prefix}arrow)""#)
        } else {
            String::new()
        };

        self.connections.push(format!(
            r#"{}<path class="{}connection" d="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
            self.indent_str(),
            prefix,
            path.to_svg_d(),
            escape_xml(&self.config.stroke),
            format_number(self.config.stroke_width),
            marker
        ));
    }

    /// Add a text element centered on `at`
    pub fn add_text(&mut self, class: &str, text: &str, at: Point) {
        self.labels.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            class,
            format_number(at.x),
            format_number(at.y),
            escape_xml(text)
        ));
    }

    /// Build the final SVG document for a canvas of the given size
    pub fn build(self, width: f64, height: f64) -> String {
        let padding = self.config.viewbox_padding;
        let nl = self.newline();
        let inner = if self.config.pretty_print { "    " } else { "" };
        let outer = if self.config.pretty_print { "  " } else { "" };

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            format_number(width),
            format_number(height),
            format_number(-padding),
            format_number(-padding),
            format_number(width + 2.0 * padding),
            format_number(height + 2.0 * padding)
        ));
        svg.push_str(nl);

        if !self.defs.is_empty() {
            svg.push_str(outer);
            svg.push_str("<defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str(inner);
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str(outer);
            svg.push_str("</defs>");
            svg.push_str(nl);
        }

        // Connectors are drawn over the nodes, labels over everything
        for line in self
            .nodes
            .iter()
            .chain(&self.connections)
            .chain(&self.labels)
        {
            svg.push_str(line);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

fn render_connection(conn: &ConnectionLayout, builder: &mut SvgBuilder) {
    builder.add_connection_path(&conn.path);
    if let Some(label) = &conn.label {
        let class = format!("{}label", builder.prefix());
        builder.add_text(&class, &label.text, label.position);
    }
}

/// Render a recomputed flow as an SVG document
pub fn render_svg(layout: &FlowLayout, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    if config.arrow_markers && !layout.connections.is_empty() {
        builder.add_arrow_marker();
    }
    for node in &layout.nodes {
        builder.add_node(node);
    }
    for conn in &layout.connections {
        render_connection(conn, &mut builder);
    }
    builder.build(layout.width, layout.height)
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Connection, Flow, FlowNode};
    use crate::layout::{Rect, SourceSide, TargetSide};

    fn flow() -> Flow {
        Flow::new(Rect::new(0.0, 0.0, 200.0, 220.0))
            .with_node(FlowNode::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)).with_label("A & B"))
            .with_node(FlowNode::new("b", Rect::new(0.0, 150.0, 100.0, 50.0)))
            .with_connection(
                Connection::new("a", "b")
                    .with_sides(SourceSide::Left, TargetSide::Top)
                    .with_label("<yes>"),
            )
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn test_render_contains_elements() {
        let svg = render_svg(&flow().recompute().unwrap(), &SvgConfig::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="-16 -16 232 252""#));
        assert!(svg.contains(r#"data-node-id="flow__node-a""#));
        assert!(svg.contains(r#"d="M 0 25 H -4 Q -12 25 -12 33 V 92 Q -12 100 -4 100 H 42 Q 50 100 50 108 V 150""#));
        assert!(svg.contains(r#"marker-end="url(#fv-arrow)""#));
        assert!(svg.contains("A &amp; B"));
        assert!(svg.contains(r#"x="-12" y="100""#));
        assert!(svg.contains("&lt;yes&gt;"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_without_markers_or_prefix() {
        let config = SvgConfig::new()
            .with_arrow_markers(false)
            .without_class_prefix()
            .with_standalone(false);
        let svg = render_svg(&flow().recompute().unwrap(), &config);
        assert!(!svg.contains("<defs>"));
        assert!(!svg.contains("marker-end"));
        assert!(svg.contains(r#"class="connection""#));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_compact_output_is_single_line() {
        let config = SvgConfig::new().with_pretty_print(false);
        let svg = render_svg(&flow().recompute().unwrap(), &config);
        assert!(!svg.contains('\n'));
    }
}

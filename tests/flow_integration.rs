//! Integration tests for flow loading, recomputation and SVG output

use std::fs;
use std::path::Path;

use flow_viewer::{
    p, render_flow, render_svg, Connection, Flow, FlowError, FlowNode, Rect, RenderConfig,
    SourceSide, SvgConfig, TargetSide,
};
use pretty_assertions::assert_eq;

fn demo(name: &str) -> Flow {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name);
    Flow::from_file(&path).expect("demo flow should load")
}

#[test]
fn test_all_demos_render() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let mut rendered = 0;
    for entry in fs::read_dir(&dir).expect("demos directory") {
        let path = entry.expect("dir entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        let flow = Flow::from_file(&path)
            .unwrap_or_else(|e| panic!("{} failed to load: {e}", path.display()));
        let svg = render_flow(&flow, &RenderConfig::default())
            .unwrap_or_else(|e| panic!("{} failed to render: {e}", path.display()));
        assert!(svg.contains("<svg"), "{}", path.display());
        assert_eq!(
            svg.matches("fv-connection").count(),
            flow.connections.len(),
            "{}",
            path.display()
        );
        rendered += 1;
    }
    assert!(rendered >= 2);
}

#[test]
fn test_approval_paths_are_offset_by_root() {
    let layout = demo("approval.toml").recompute().unwrap();
    let paths: Vec<String> = layout
        .connections
        .iter()
        .map(|c| c.path.to_svg_d())
        .collect();

    insta::assert_snapshot!(paths[0], @"M 180 60 V 92 V 108 V 140");
    insta::assert_snapshot!(
        paths[1],
        @"M 100 160 H 16 Q 8 160 8 168 V 222 Q 8 230 16 230 H 82 Q 90 230 90 238 V 280"
    );
    insta::assert_snapshot!(
        paths[2],
        @"M 260 160 H 344 Q 352 160 352 168 V 222 Q 352 230 344 230 H 278 Q 270 230 270 238 V 280"
    );
}

#[test]
fn test_approval_labels_and_points() {
    let layout = demo("approval.toml").recompute().unwrap();

    let labels: Vec<_> = layout
        .connections
        .iter()
        .map(|c| c.label.as_ref().map(|l| (l.text.as_str(), l.position)))
        .collect();
    assert_eq!(
        labels,
        vec![
            None,
            Some(("needs work", p(8.0, 230.0))),
            Some(("ok", p(352.0, 230.0))),
        ]
    );

    assert_eq!(
        layout.connections[1].points,
        vec![
            p(100.0, 160.0),
            p(8.0, 160.0),
            p(8.0, 230.0),
            p(90.0, 230.0),
            p(90.0, 280.0),
        ]
    );
    assert_eq!(layout.nodes[0].id, "approval__node-submit");
}

#[test]
fn test_side_combinations_demo() {
    let layout = demo("side_by_side.toml").recompute().unwrap();
    let paths: Vec<String> = layout
        .connections
        .iter()
        .map(|c| c.path.to_svg_d())
        .collect();

    insta::assert_snapshot!(
        paths[0],
        @"M 40 40 H 36 Q 28 40 28 48 V 102 Q 28 110 36 110 H 92 H 108 H 164 Q 172 110 172 118 V 172 Q 172 180 164 180 H 160"
    );
    insta::assert_snapshot!(
        paths[1],
        @"M 160 40 H 164 Q 172 40 172 48 V 102 V 118 V 172 Q 172 180 164 180 H 160"
    );
    insta::assert_snapshot!(
        paths[2],
        @"M 100 60 V 102 Q 100 110 92 110 H 36 Q 28 110 28 118 V 172 Q 28 180 36 180 H 40"
    );
    assert_eq!(
        layout.connections[0].label.as_ref().map(|l| l.position),
        Some(p(100.0, 110.0))
    );
}

#[test]
fn test_compact_svg_output() {
    let flow = Flow::new(Rect::new(0.0, 0.0, 200.0, 220.0))
        .with_node(FlowNode::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)))
        .with_node(FlowNode::new("b", Rect::new(0.0, 150.0, 100.0, 50.0)))
        .with_connection(Connection::new("a", "b"));
    let config = SvgConfig::new()
        .with_standalone(false)
        .with_pretty_print(false);
    let svg = render_svg(&flow.recompute().unwrap(), &config);

    let expected = concat!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="220" viewBox="-16 -16 232 252">"#,
        r#"<defs><marker id="fv-arrow" viewBox="0 0 10 10" refX="8" refY="5" markerWidth="4" markerHeight="4" markerUnits="strokeWidth" orient="auto"><path d="M 0 0 L 10 5 L 0 10 Z" fill="context-stroke"/></marker></defs>"#,
        r##"<rect class="fv-node" data-node-id="flow__node-a" x="0" y="0" width="100" height="50" fill="none" stroke="#333333"/>"##,
        r##"<rect class="fv-node" data-node-id="flow__node-b" x="0" y="150" width="100" height="50" fill="none" stroke="#333333"/>"##,
        r##"<path class="fv-connection" d="M 50 50 V 92 V 108 V 150" fill="none" stroke="#333333" stroke-width="2" marker-end="url(#fv-arrow)"/>"##,
        "</svg>"
    );
    assert_eq!(svg, expected);
}

#[test]
fn test_invalid_side_is_rejected_with_context() {
    let source = r#"
        [[nodes]]
        name = "a"
        x = 0
        y = 0
        width = 10
        height = 10

        [[connections]]
        source = "a"
        target = "a"
        source_side = "top"
    "#;
    let err = Flow::from_toml_str(source).unwrap_err();
    assert!(matches!(err, FlowError::Toml(_)));
    let report = err.format(source, "flow.toml");
    assert!(report.contains("unknown variant"), "{report}");
}

#[test]
fn test_missing_node_suggests_close_names() {
    let flow = demo("approval.toml").with_connection(Connection::new("reveiw", "approved"));
    let err = flow.recompute().unwrap_err();
    assert_eq!(
        err.to_string(),
        "undefined node 'reveiw' (did you mean: review?)"
    );
}

#[test]
fn test_duplicate_node_in_file() {
    let source = r#"
        [[nodes]]
        name = "a"
        x = 0
        y = 0
        width = 10
        height = 10

        [[nodes]]
        name = "a"
        x = 0
        y = 50
        width = 10
        height = 10
    "#;
    assert!(matches!(
        Flow::from_toml_str(source),
        Err(FlowError::DuplicateNode { .. })
    ));
}

#[test]
fn test_moving_a_node_changes_only_its_connectors() {
    let mut flow = demo("approval.toml");
    let before = flow.recompute().unwrap();

    let approved = flow
        .nodes
        .iter_mut()
        .find(|n| n.name == "approved")
        .unwrap();
    approved.rect = approved.rect.translate(20.0, 0.0);
    let after = flow.recompute().unwrap();

    assert_eq!(before.connections[0], after.connections[0]);
    assert_eq!(before.connections[1], after.connections[1]);
    assert_ne!(before.connections[2].path, after.connections[2].path);
}

#[test]
fn test_sides_parse_from_cli_style_strings() {
    let source: SourceSide = "right".parse().unwrap();
    let target: TargetSide = "left".parse().unwrap();
    let flow = demo("side_by_side.toml");
    let routed = flow
        .route(&Connection::new("a", "b").with_sides(source, target))
        .unwrap();
    assert_eq!(
        routed.path.to_svg_d(),
        "M 160 40 H 164 Q 172 40 172 48 V 102 Q 172 110 164 110 H 92 H 108 H 36 \
         Q 28 110 28 118 V 172 Q 28 180 36 180 H 40"
    );
}

#[test]
fn test_misnamed_side_keys_are_rejected() {
    let source = r#"
        [[nodes]]
        name = "a"
        x = 0
        y = 0
        width = 10
        height = 10

        [[nodes]]
        name = "b"
        x = 0
        y = 50
        width = 10
        height = 10

        [[connections]]
        source = "a"
        target = "b"
        sourceSide = "left"
        targetSide = "right"
    "#;
    let err = Flow::from_toml_str(source).unwrap_err();
    assert!(matches!(err, FlowError::Toml(_)));
    let report = err.format(source, "flow.toml");
    assert!(report.contains("unknown field"), "{report}");
}

#[test]
fn test_unknown_top_level_table_is_rejected() {
    let source = r#"
        [option]
        margin = 4
    "#;
    assert!(matches!(
        Flow::from_toml_str(source),
        Err(FlowError::Toml(_))
    ));
}

#[test]
fn test_default_padding_covers_margin_line_at_frame_edge() {
    let flow = Flow::new(Rect::new(0.0, 0.0, 100.0, 200.0))
        .with_node(FlowNode::new("a", Rect::new(0.0, 0.0, 100.0, 50.0)))
        .with_node(FlowNode::new("b", Rect::new(0.0, 150.0, 100.0, 50.0)))
        .with_connection(
            Connection::new("a", "b").with_sides(SourceSide::Left, TargetSide::Left),
        );
    let config = SvgConfig::default();
    let layout = flow.recompute().unwrap();
    let outer = layout.connections[0].guides.m.l - config.stroke_width / 2.0;
    assert_eq!(layout.connections[0].guides.m.l, -12.0);
    assert!(outer >= -config.viewbox_padding, "{outer}");
}

//! Flow Viewer CLI
//!
//! Usage:
//!   flow-viewer [OPTIONS] [FILE]
//!
//! Options:
//!   --margin <N>   Override the corridor margin
//!   --radius <N>   Override the corner radius
//!   --points       Print connector waypoints instead of SVG
//!   --paths        Print one path `d` string per connection
//!   -d, --debug    Dump guides for every connection to stderr
//!   -h, --help     Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use flow_viewer::renderer::path::format_number;
use flow_viewer::{render_svg, Flow, FlowError, FlowLayout, SvgConfig};

#[derive(Parser)]
#[command(name = "flow-viewer")]
#[command(about = "Rounded orthogonal connectors between flow nodes, rendered as SVG")]
struct Cli {
    /// Flow description in TOML (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Override the corridor margin
    #[arg(long)]
    margin: Option<f64>,

    /// Override the corner radius
    #[arg(long)]
    radius: Option<f64>,

    /// Print connector waypoints instead of SVG
    #[arg(long, conflicts_with = "paths")]
    points: bool,

    /// Print one path `d` string per connection instead of SVG
    #[arg(long)]
    paths: bool,

    /// Debug mode: dump guides for every connection to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // No input file and an interactive stdin: show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match run(&cli, &source) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, source: &str) -> Result<String, FlowError> {
    let mut flow = Flow::from_toml_str(source)?;
    if let Some(margin) = cli.margin {
        flow.options.layout.margin = margin;
    }
    if let Some(radius) = cli.radius {
        flow.options.layout.corner_radius = radius;
    }
    flow.options.debug |= cli.debug;

    let layout = flow.recompute()?;

    if cli.debug {
        print_debug(&layout);
    }

    let output = if cli.points {
        format_points(&layout)
    } else if cli.paths {
        layout
            .connections
            .iter()
            .map(|c| format!("{}\n", c.path.to_svg_d()))
            .collect()
    } else {
        render_svg(&layout, &SvgConfig::default())
    };
    Ok(output)
}

fn format_points(layout: &FlowLayout) -> String {
    let mut out = String::new();
    for conn in &layout.connections {
        let points = conn
            .points
            .iter()
            .map(|p| format!("{},{}", format_number(p.x), format_number(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(
            "{}:{} -> {}:{}  {}\n",
            conn.source, conn.source_side, conn.target, conn.target_side, points
        ));
    }
    out
}

fn print_debug(layout: &FlowLayout) {
    eprintln!("=== Guides Debug ===");
    for conn in &layout.connections {
        let g = &conn.guides;
        eprintln!(
            "[{} -> {}] m.l={:.1} m.r={:.1} vc={:.1}",
            conn.source, conn.target, g.m.l, g.m.r, g.vc
        );
        for (name, n) in [("s", &g.s), ("t", &g.t)] {
            eprintln!(
                "  {} l={:.1} r={:.1} t={:.1} b={:.1} hc={:.1} vc={:.1}",
                name, n.l, n.r, n.t, n.b, n.hc, n.vc
            );
        }
        eprintln!("  d={}", conn.path);
    }
    eprintln!("====================");
}

fn print_intro() {
    println!(
        r#"Flow Viewer - rounded orthogonal connectors between flow nodes

USAGE:
    flow-viewer [OPTIONS] [FILE]
    cat flow.toml | flow-viewer

OPTIONS:
    --margin <N>   Override the corridor margin (default 12)
    --radius <N>   Override the corner radius (default 8)
    --points       Print connector waypoints instead of SVG
    --paths        Print one path d string per connection
    -d, --debug    Dump guides to stderr
    -h, --help     Print help

FLOW FILE:
    [options]
    margin = 12
    corner_radius = 8
    id_prefix = "flow"

    [root]
    x = 0
    y = 0
    width = 400
    height = 300

    [[nodes]]
    name = "start"
    x = 20
    y = 20
    width = 100
    height = 40

    [[connections]]
    source = "start"
    target = "end"
    source_side = "bottom"   # left | bottom | right
    target_side = "top"      # left | top | right"#
    );
}

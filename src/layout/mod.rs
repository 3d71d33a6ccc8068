//! Geometry engine for connector routing
//!
//! Guides are derived from two node rectangles, then a connector is routed
//! along them between a source side and a target side. Everything here is
//! a pure function of its arguments.

pub mod config;
pub mod guides;
pub mod routing;
pub mod types;

pub use config::LayoutConfig;
pub use guides::{compute_grid_guides, GridGuides, MarginGuides, NodeGuides, DEFAULT_MARGIN};
pub use routing::{
    generate_path_commands, generate_path_points, generate_path_string, label_position,
    SourceSide, TargetSide, DEFAULT_CORNER_RADIUS,
};
pub use types::*;

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    if a_chars.is_empty() {
        return n;
    }
    if n == 0 {
        return a_chars.len();
    }

    // Single rolling row instead of the full table
    let mut row: Vec<usize> = (0..=n).collect();
    for (i, ca) in a_chars.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[n]
}

/// Find names within a maximum edit distance of `target`, closest first
pub(crate) fn find_similar<'a>(
    names: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = names
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    candidates.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}

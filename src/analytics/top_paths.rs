//! Most chosen-in knot paths

use indexmap::IndexMap;

use crate::types::{EventRecord, PathCount};

/// Limit used when the caller does not supply one
pub const DEFAULT_TOP_PATHS_LIMIT: usize = 10;

/// Rank knot paths by number of choices made there
///
/// Sorting is stable, so paths with equal counts keep the order in which they
/// were first seen in `entries`.
pub fn top_paths(entries: &[EventRecord], limit: usize) -> Vec<PathCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();

    for entry in entries.iter().filter(|e| e.is_choice()) {
        *counts.entry(entry.knot_path_or_unknown()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .map(|(path, count)| PathCount {
            path: path.to_string(),
            count,
        })
        .collect()
}

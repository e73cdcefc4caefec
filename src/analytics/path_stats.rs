//! Path popularity: knot → choice index → count

use std::collections::HashSet;

use crate::types::{ChoiceBucket, EventRecord, PathStats};

/// Compute choice counts per knot path and choice index
///
/// The label stored for an index is the one carried by the first event seen
/// for it. `uniqueSessions` counts every session in the log, not only those
/// that made a choice.
pub fn path_statistics(entries: &[EventRecord]) -> PathStats {
    let mut stats = PathStats::default();
    let mut sessions: HashSet<&str> = HashSet::new();

    for entry in entries {
        sessions.insert(entry.session_id_or_default());

        if !entry.is_choice() {
            continue;
        }
        stats.total_choices += 1;

        let bucket = stats
            .path_distribution
            .entry(entry.knot_path_or_unknown().to_string())
            .or_default()
            .entry(entry.choice_index_or_default())
            .or_insert_with(|| ChoiceBucket {
                count: 0,
                text: entry.choice_text_or_default().to_string(),
            });
        bucket.count += 1;
    }

    stats.unique_sessions = sessions.len();
    stats
}

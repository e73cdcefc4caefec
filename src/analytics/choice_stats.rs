//! Per-choice selection percentages
//!
//! A choice identifier is `"<knot>:<index>"`, e.g. `"interrogation:0"`. The
//! knot part is resolved from `payload.knotPath`, then `context.knot`, so the
//! same event can be attributed to a different knot here than in the path
//! statistics.

use std::collections::HashMap;

use crate::types::{ChoiceStat, ChoiceStats, EventRecord};

/// Build the identifier a choice is counted under
pub fn choice_id(knot: &str, index: i64) -> String {
    format!("{}:{}", knot, index)
}

struct ObservedChoice<'a> {
    knot: &'a str,
    count: usize,
}

/// Look up selection counts and percentages for the requested identifiers
///
/// The percentage is the identifier's share of all choices made at its knot,
/// rounded half-to-even. Identifiers that never occurred (including bare names
/// with no `:index` part) report zero for both fields. Results follow request
/// order; a repeated identifier is reported once.
pub fn choice_statistics<S: AsRef<str>>(entries: &[EventRecord], ids: &[S]) -> ChoiceStats {
    let mut knot_totals: HashMap<&str, usize> = HashMap::new();
    let mut observed: HashMap<String, ObservedChoice<'_>> = HashMap::new();

    for entry in entries.iter().filter(|e| e.is_choice()) {
        let knot = entry.resolved_knot();
        *knot_totals.entry(knot).or_insert(0) += 1;
        observed
            .entry(choice_id(knot, entry.choice_index_or_default()))
            .or_insert(ObservedChoice { knot, count: 0 })
            .count += 1;
    }

    let mut stats = ChoiceStats::default();
    for id in ids {
        let id = id.as_ref();
        if stats.choices.contains_key(id) {
            continue;
        }

        let stat = match observed.get(id) {
            Some(choice) => {
                let knot_total = knot_totals.get(choice.knot).copied().unwrap_or(0).max(1);
                ChoiceStat {
                    total: choice.count,
                    percentage: percentage(choice.count, knot_total),
                }
            }
            None => ChoiceStat::default(),
        };
        stats.choices.insert(id.to_string(), stat);
    }

    stats
}

fn percentage(count: usize, total: usize) -> u32 {
    ((count as f64 / total as f64) * 100.0).round_ties_even() as u32
}

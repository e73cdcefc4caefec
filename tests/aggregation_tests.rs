//! Aggregation engine integration tests
//!
//! Exercises the engine through the public API the way the gateway does:
//! events go into an `EventLog`, queries run on its snapshot.

use choice_analytics::analytics::{
    choice_statistics, path_statistics, session_summaries, top_paths,
};
use choice_analytics::event_store::{EventLog, InMemoryEventLog};
use choice_analytics::types::{ChoiceStat, EventRecord, PathStats};
use serde_json::json;

fn parse(raw: serde_json::Value) -> Vec<EventRecord> {
    serde_json::from_value(raw).expect("valid event array")
}

fn example_events() -> Vec<EventRecord> {
    parse(json!([
        {"type": "choice", "sessionId": "s1", "timestamp": 100,
         "payload": {"knotPath": "intro", "choiceIndex": 0, "choiceText": "Go left"}},
        {"type": "choice", "sessionId": "s1", "timestamp": 200,
         "payload": {"knotPath": "intro", "choiceIndex": 0, "choiceText": "Go left"}},
        {"type": "choice", "sessionId": "s2", "timestamp": 150,
         "payload": {"knotPath": "intro", "choiceIndex": 1, "choiceText": "Go right"}}
    ]))
}

/// A messier log: non-choice events, missing fields, context-only knots
fn mixed_events() -> Vec<EventRecord> {
    parse(json!([
        {"type": "session_start", "sessionId": "a", "timestamp": 10},
        {"type": "choice", "sessionId": "a", "timestamp": 20,
         "payload": {"knotPath": "intro", "choiceIndex": 0, "choiceText": "Wake up"}},
        {"type": "knot_enter", "sessionId": "b", "timestamp": 5, "payload": {"knotPath": "intro"}},
        {"type": "choice", "sessionId": "b", "timestamp": 30,
         "payload": {"choiceIndex": 1}, "context": {"knot": "intro"}},
        {"type": "choice", "sessionId": "b", "timestamp": 40,
         "payload": {"knotPath": "cellar", "choiceIndex": 2, "choiceText": "Descend"}},
        {"type": "choice", "timestamp": 50},
        {"type": "choice", "sessionId": "c", "timestamp": "noon",
         "payload": {"knotPath": "cellar", "choiceIndex": 2, "choiceText": "Go down"}},
        {"type": "session_end", "sessionId": "a", "timestamp": 90}
    ]))
}

#[test]
fn test_end_to_end_example() {
    let log = InMemoryEventLog::new();
    log.append_all(example_events());
    let entries = log.snapshot();

    let stats = path_statistics(&entries);
    assert_eq!(
        serde_json::to_value(&stats).unwrap(),
        json!({
            "totalChoices": 3,
            "uniqueSessions": 2,
            "pathDistribution": {
                "intro": {
                    "0": {"count": 2, "text": "Go left"},
                    "1": {"count": 1, "text": "Go right"}
                }
            }
        })
    );

    let sessions = session_summaries(&entries);
    let s1 = sessions.iter().find(|s| s.session_id == "s1").unwrap();
    assert_eq!(s1.start_time, 100);
    assert_eq!(s1.end_time, 200);
    assert_eq!(s1.choice_count, 2);
    assert_eq!(s1.duration_ms, 100);

    let top = top_paths(&entries, 10);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].path, "intro");
    assert_eq!(top[0].count, 3);

    let choices = choice_statistics(&entries, &["intro:0", "intro:1"]);
    assert_eq!(choices.choices["intro:0"], ChoiceStat { total: 2, percentage: 67 });
    assert_eq!(choices.choices["intro:1"], ChoiceStat { total: 1, percentage: 33 });
}

#[test]
fn test_totals_match_choice_count() {
    let entries = mixed_events();
    let stats = path_statistics(&entries);

    let choices = entries.iter().filter(|e| e.is_choice()).count();
    assert_eq!(stats.total_choices, choices);
    assert_eq!(stats.total_choices, 5);

    let sum: usize = stats
        .path_distribution
        .values()
        .flat_map(|c| c.values())
        .map(|b| b.count)
        .sum();
    assert_eq!(sum, stats.total_choices);
}

#[test]
fn test_unique_sessions_include_non_choice_events_and_empty_id() {
    let stats = path_statistics(&mixed_events());
    // a, b, c and the event without a session id
    assert_eq!(stats.unique_sessions, 4);
}

#[test]
fn test_knot_attribution_differs_between_queries() {
    let entries = mixed_events();

    let stats = path_statistics(&entries);
    assert_eq!(stats.path_distribution["unknown"][&1i64].count, 1);

    let choices = choice_statistics(&entries, &["intro:1", "unknown:1", "unknown:-1"]);
    assert_eq!(choices.choices["intro:1"], ChoiceStat { total: 1, percentage: 50 });
    assert_eq!(choices.choices["unknown:1"], ChoiceStat::default());
    assert_eq!(choices.choices["unknown:-1"], ChoiceStat { total: 1, percentage: 100 });
}

#[test]
fn test_mistyped_timestamp_is_skipped_for_the_span() {
    let sessions = session_summaries(&mixed_events());
    // "c" has no usable timestamp at all, so its span is empty
    let c = sessions.iter().find(|s| s.session_id == "c").unwrap();
    assert_eq!((c.start_time, c.end_time, c.duration_ms), (0, 0, 0));
    assert_eq!(c.paths, vec!["cellar".to_string()]);

    let a = sessions.iter().find(|s| s.session_id == "a").unwrap();
    assert_eq!((a.start_time, a.end_time, a.duration_ms), (10, 90, 80));
    assert_eq!(a.choice_count, 1);

    let b = sessions.iter().find(|s| s.session_id == "b").unwrap();
    assert_eq!(b.paths, vec!["cellar".to_string()]);
    assert_eq!(b.choice_count, 2);
}

#[test]
fn test_mistyped_timestamp_does_not_pull_start_to_zero() {
    let entries = parse(json!([
        {"type": "session_start", "sessionId": "s", "timestamp": 1700000000000.0},
        {"type": "knot_enter", "sessionId": "s", "timestamp": "later"},
        {"type": "session_end", "sessionId": "s", "timestamp": 1700000005000i64}
    ]));

    let sessions = session_summaries(&entries);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].start_time, 1_700_000_000_000);
    assert_eq!(sessions[0].end_time, 1_700_000_005_000);
    assert_eq!(sessions[0].duration_ms, 5000);
}

#[test]
fn test_queries_are_idempotent() {
    let entries = mixed_events();
    let ids = ["intro:0", "cellar:2", "missing"];

    assert_eq!(path_statistics(&entries), path_statistics(&entries));
    assert_eq!(session_summaries(&entries), session_summaries(&entries));
    assert_eq!(top_paths(&entries, 3), top_paths(&entries, 3));
    assert_eq!(
        choice_statistics(&entries, &ids),
        choice_statistics(&entries, &ids)
    );
}

#[test]
fn test_top_paths_prefix_property() {
    let entries = mixed_events();
    let all = top_paths(&entries, usize::MAX);

    for window in all.windows(2) {
        assert!(window[0].count >= window[1].count);
    }
    for n in 0..=all.len() + 1 {
        let top = top_paths(&entries, n);
        assert_eq!(top.as_slice(), &all[..n.min(all.len())]);
    }
}

#[test]
fn test_cleared_log_yields_empty_results() {
    let log = InMemoryEventLog::new();
    log.append_all(mixed_events());
    log.clear();
    let entries = log.snapshot();

    assert_eq!(path_statistics(&entries), PathStats::default());
    assert!(session_summaries(&entries).is_empty());
    assert!(top_paths(&entries, 10).is_empty());
    assert_eq!(
        choice_statistics(&entries, &["intro:0"]).choices["intro:0"],
        ChoiceStat::default()
    );
}

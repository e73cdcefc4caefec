//! Per-session summaries

use indexmap::{IndexMap, IndexSet};

use crate::types::{EventRecord, SessionSummary};

#[derive(Default)]
struct SessionAccumulator<'a> {
    // None until the session has an event with a usable timestamp
    span: Option<(i64, i64)>,
    choice_count: usize,
    paths: IndexSet<&'a str>,
}

impl SessionAccumulator<'_> {
    fn observe(&mut self, timestamp: i64) {
        self.span = Some(match self.span {
            Some((start, end)) => (start.min(timestamp), end.max(timestamp)),
            None => (timestamp, timestamp),
        });
    }
}

/// Summarize every session in the log
///
/// Start and end times span all of a session's events, not just its choices.
/// An absent timestamp counts as 0; a malformed one is left out of the span.
/// Sessions come out in the order they first appear in `entries`.
pub fn session_summaries(entries: &[EventRecord]) -> Vec<SessionSummary> {
    let mut sessions: IndexMap<&str, SessionAccumulator<'_>> = IndexMap::new();

    for entry in entries {
        let session = sessions.entry(entry.session_id_or_default()).or_default();

        if let Some(timestamp) = entry.ordering_timestamp() {
            session.observe(timestamp);
        }

        if entry.is_choice() {
            session.choice_count += 1;
            if let Some(path) = entry.non_empty_knot_path() {
                session.paths.insert(path);
            }
        }
    }

    sessions
        .into_iter()
        .map(|(session_id, s)| {
            let (start_time, end_time) = s.span.unwrap_or_default();
            SessionSummary {
                session_id: session_id.to_string(),
                start_time,
                end_time,
                choice_count: s.choice_count,
                paths: s.paths.into_iter().map(str::to_string).collect(),
                duration_ms: end_time.saturating_sub(start_time),
            }
        })
        .collect()
}

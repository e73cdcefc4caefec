//! Event record types for the player interaction log
//!
//! Events arrive as loosely-shaped JSON objects from game clients. Every known
//! field is optional and carries a documented default, so a record with missing
//! or mistyped fields still takes part in aggregation instead of failing it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Event type tag the aggregation engine cares about
pub const CHOICE_EVENT: &str = "choice";

/// Knot used when a choice carries no location
pub const UNKNOWN_KNOT: &str = "unknown";

/// Choice index used when a choice carries no index
pub const NO_CHOICE_INDEX: i64 = -1;

/// A single logged player interaction
///
/// Unknown top-level keys are kept in `extra` and written back out on
/// serialization, so the raw event surface returns what the client sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event tag, e.g. "choice", "knot_enter", "session_start"
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub event_type: Option<String>,

    /// Play session this event belongs to
    #[serde(
        rename = "sessionId",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<String>,

    /// Epoch milliseconds (or a monotonic counter), only used for ordering
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<Timestamp>,

    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<ChoicePayload>,

    #[serde(
        default,
        deserialize_with = "lenient_object",
        skip_serializing_if = "Option::is_none"
    )]
    pub context: Option<EventContext>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A submitted timestamp
///
/// A value that is not an integral number is kept as sent, so it is echoed back
/// by the raw event surface but ignored when ordering a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Malformed(Value),
}

/// Payload of a "choice" event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoicePayload {
    /// Narrative location (knot or knot.stitch) the choice was made at
    #[serde(
        rename = "knotPath",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub knot_path: Option<String>,

    #[serde(
        rename = "choiceIndex",
        default,
        deserialize_with = "lenient_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub choice_index: Option<i64>,

    #[serde(
        rename = "choiceText",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub choice_text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Story context captured alongside an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventContext {
    /// Current knot, used as a fallback location for choice statistics
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub knot: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventRecord {
    /// Create a bare event of the given type
    pub fn new(event_type: impl Into<String>, session_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            event_type: Some(event_type.into()),
            session_id: Some(session_id.into()),
            timestamp: Some(Timestamp::Millis(timestamp)),
            ..Default::default()
        }
    }

    /// Create a choice event
    pub fn choice(
        session_id: impl Into<String>,
        timestamp: i64,
        knot_path: impl Into<String>,
        choice_index: i64,
        choice_text: impl Into<String>,
    ) -> Self {
        Self::new(CHOICE_EVENT, session_id, timestamp).with_payload(ChoicePayload {
            knot_path: Some(knot_path.into()),
            choice_index: Some(choice_index),
            choice_text: Some(choice_text.into()),
            extra: Map::new(),
        })
    }

    /// Attach a payload
    pub fn with_payload(mut self, payload: ChoicePayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach a context carrying the current knot
    pub fn with_context_knot(mut self, knot: impl Into<String>) -> Self {
        self.context = Some(EventContext {
            knot: Some(knot.into()),
            extra: Map::new(),
        });
        self
    }

    pub fn is_choice(&self) -> bool {
        self.event_type.as_deref() == Some(CHOICE_EVENT)
    }

    /// Session id, empty when absent
    pub fn session_id_or_default(&self) -> &str {
        self.session_id.as_deref().unwrap_or("")
    }

    /// Timestamp when it is a usable integer
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self.timestamp {
            Some(Timestamp::Millis(ms)) => Some(ms),
            _ => None,
        }
    }

    /// Timestamp, 0 when absent or malformed
    pub fn timestamp_or_default(&self) -> i64 {
        self.timestamp_millis().unwrap_or(0)
    }

    /// Timestamp used to order a session: 0 when absent, `None` when malformed
    pub fn ordering_timestamp(&self) -> Option<i64> {
        match &self.timestamp {
            None => Some(0),
            Some(Timestamp::Millis(ms)) => Some(*ms),
            Some(Timestamp::Malformed(_)) => None,
        }
    }

    /// Knot path as recorded by the payload; absence maps to "unknown",
    /// an empty string is kept as-is
    pub fn knot_path_or_unknown(&self) -> &str {
        self.payload
            .as_ref()
            .and_then(|p| p.knot_path.as_deref())
            .unwrap_or(UNKNOWN_KNOT)
    }

    /// Knot path only when present and non-empty
    pub fn non_empty_knot_path(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|p| p.knot_path.as_deref())
            .filter(|k| !k.is_empty())
    }

    /// Knot resolved from `payload.knotPath`, then `context.knot`, then "unknown"
    pub fn resolved_knot(&self) -> &str {
        self.non_empty_knot_path()
            .or_else(|| {
                self.context
                    .as_ref()
                    .and_then(|c| c.knot.as_deref())
                    .filter(|k| !k.is_empty())
            })
            .unwrap_or(UNKNOWN_KNOT)
    }

    /// Choice index, -1 when absent
    pub fn choice_index_or_default(&self) -> i64 {
        self.payload
            .as_ref()
            .and_then(|p| p.choice_index)
            .unwrap_or(NO_CHOICE_INDEX)
    }

    /// Choice label, empty when absent
    pub fn choice_text_or_default(&self) -> &str {
        self.payload
            .as_ref()
            .and_then(|p| p.choice_text.as_deref())
            .unwrap_or("")
    }
}

// Mistyped values are treated as absent so field defaults apply.

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Integer value of a JSON number, accepting integral floats such as `3.0`
fn integral(n: &Number) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    const LOWER: f64 = i64::MIN as f64;
    const UPPER: f64 = i64::MAX as f64;

    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= LOWER && *f < UPPER)
            .map(|f| f as i64)
    })
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => integral(&n),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => integral(n),
        _ => None,
    };
    Ok(Some(parsed.map_or(Timestamp::Malformed(value), Timestamp::Millis)))
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

//! Request payloads and lenient JSON decoding.
//!
//! The API accepts JSON bodies, but callers sometimes hold a payload as text
//! that may or may not be JSON. [`Payload::from_text`] resolves that once, up
//! front, so the client never has to guess at send time.

use serde::Serialize;
use serde_json::Value;

/// Outcome of [`json_parse_if_possible`].
#[derive(Debug, Clone, PartialEq)]
pub enum JsonParse {
    Parsed(Value),
    Raw(String),
}

impl JsonParse {
    pub fn is_parsed(&self) -> bool {
        matches!(self, JsonParse::Parsed(_))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            JsonParse::Parsed(value) => Some(value),
            JsonParse::Raw(_) => None,
        }
    }
}

/// Parse `text` as JSON, keeping the original text when it is not valid JSON.
pub fn json_parse_if_possible(text: &str) -> JsonParse {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => JsonParse::Parsed(value),
        Err(_) => JsonParse::Raw(text.to_string()),
    }
}

/// Body of a POST request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent as a JSON body.
    Structured(Value),
    /// Sent verbatim.
    Raw(String),
}

impl Payload {
    /// Serialize any schema into a structured payload.
    pub fn structured<T: Serialize>(body: &T) -> Result<Self, serde_json::Error> {
        Ok(Payload::Structured(serde_json::to_value(body)?))
    }

    /// Resolve a textual payload: JSON text becomes structured, anything else stays raw.
    pub fn from_text(text: impl AsRef<str>) -> Self {
        json_parse_if_possible(text.as_ref()).into()
    }
}

impl From<JsonParse> for Payload {
    fn from(parsed: JsonParse) -> Self {
        match parsed {
            JsonParse::Parsed(value) => Payload::Structured(value),
            JsonParse::Raw(text) => Payload::Raw(text),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Structured(value)
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who spoke a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The AI or human sales agent
    Agent,
    /// The customer
    User,
    /// Any other role (tool calls, system notices)
    Other,
}

impl Speaker {
    /// Map a transcript `role` value; anything unrecognised is [`Speaker::Other`]
    pub fn from_role(role: &str) -> Self {
        match role {
            "agent" => Speaker::Agent,
            "user" => Speaker::User,
            _ => Speaker::Other,
        }
    }
}

/// One turn of a call transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utterance {
    pub speaker: Speaker,
    /// Raw text, absent for turns that carried no message
    pub text: Option<String>,
}

impl Utterance {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: Some(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Speaker::Agent, text)
    }

    /// Read a `{"role": ..., "message": ...}` object
    ///
    /// Returns `None` for anything that is not an object. A missing or
    /// non-string `role` becomes [`Speaker::Other`]; a missing or non-string
    /// `message` becomes an absent text.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let speaker = object
            .get("role")
            .and_then(Value::as_str)
            .map(Speaker::from_role)
            .unwrap_or(Speaker::Other);
        let text = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(Self { speaker, text })
    }

    /// Text of this turn, empty when absent
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Read every well-formed turn out of a JSON messages array
///
/// Non-array input yields no turns; non-object elements are skipped.
pub fn utterances_from_value(value: &Value) -> Vec<Utterance> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(Utterance::from_value).collect())
        .unwrap_or_default()
}

/// Concatenate the customer's turns with single spaces
///
/// Agent and other turns are dropped; absent text counts as empty.
pub fn customer_text(utterances: &[Utterance]) -> String {
    utterances
        .iter()
        .filter(|u| u.speaker == Speaker::User)
        .map(Utterance::text)
        .collect::<Vec<_>>()
        .join(" ")
}

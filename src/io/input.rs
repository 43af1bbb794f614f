use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::models::{Campaign, Utterance, utterances_from_value};

/// Parse a transcript JSON file into utterances
pub fn parse_transcript_file(path: &Path) -> Result<Vec<Utterance>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcript_json(&content)
}

/// Parse a transcript from JSON
///
/// Accepts a bare array of `{"role", "message"}` turns, or an object that
/// carries the turns under `transcript` or `messages` (conversation exports
/// use either). Malformed turns are skipped.
pub fn parse_transcript_json(json: &str) -> Result<Vec<Utterance>> {
    let value: Value = serde_json::from_str(json).context("Failed to parse transcript JSON")?;

    let turns = match &value {
        Value::Array(_) => &value,
        Value::Object(object) => match object.get("transcript").or_else(|| object.get("messages")) {
            Some(turns) => turns,
            None => bail!("Transcript object has no `transcript` or `messages` field"),
        },
        _ => bail!("Transcript must be an array or an object"),
    };

    Ok(utterances_from_value(turns))
}

/// Parse a campaign JSON file (leads plus conversations)
pub fn parse_campaign_file(path: &Path) -> Result<Campaign> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_campaign_json(&content)
}

pub fn parse_campaign_json(json: &str) -> Result<Campaign> {
    serde_json::from_str(json).context("Failed to parse campaign JSON")
}

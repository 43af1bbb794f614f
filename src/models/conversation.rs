use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Utterance, utterances_from_value};

/// A lead (prospective customer) in a call campaign
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Lead {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Lead {
    /// Digits-only phone number used to find the lead's conversations
    pub fn normalized_phone(&self) -> String {
        normalize_phone(self.phone.as_deref().unwrap_or(""))
    }
}

/// A recorded call conversation from the voice-agent platform
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Conversation {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// RFC 3339, or a naive ISO timestamp taken as UTC
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Raw transcript turns, kept as JSON so malformed turns can be skipped
    #[serde(default)]
    pub messages: Value,
}

impl Conversation {
    pub fn normalized_phone(&self) -> String {
        normalize_phone(self.phone_number.as_deref().unwrap_or(""))
    }

    pub fn utterances(&self) -> Vec<Utterance> {
        utterances_from_value(&self.messages)
    }
}

/// Leads plus every conversation that may belong to them
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Campaign {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

/// Strip everything but ASCII digits, keeping any country code
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Parse an RFC 3339 or naive ISO-8601 timestamp; unparseable input is `None`
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+971 (50) 123-4567"), "971501234567");
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("n/a"), "");
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-01T09:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T13:30:00+04:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-01 09:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_campaign_json() {
        let json = r#"{
            "leads": [{"id": 7, "name": "Sam", "phone": "+971-50-000"}],
            "conversations": [{
                "conversation_id": "conv_1",
                "phone_number": "97150000",
                "created_at": "2025-03-01T09:30:00",
                "messages": [{"role": "user", "message": "not now"}, "noise"]
            }, {
                "phone_number": "97150000",
                "created_at": "not a date",
                "messages": null
            }]
        }"#;

        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.leads[0].normalized_phone(), "97150000");
        assert_eq!(campaign.conversations[0].normalized_phone(), "97150000");
        assert_eq!(campaign.conversations[0].utterances().len(), 1);
        assert!(campaign.conversations[1].created_at.is_none());
        assert!(campaign.conversations[1].utterances().is_empty());
    }
}

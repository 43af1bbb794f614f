use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Customer-interest label produced for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CustomerInterest {
    Interested,
    NotInterested,
    /// Hesitant customer, reported as "Maybe" in campaign statistics
    FollowUp,
    /// No lexicon matched at all
    Undetermined,
}

impl CustomerInterest {
    pub const ALL: [CustomerInterest; 4] = [
        CustomerInterest::Interested,
        CustomerInterest::NotInterested,
        CustomerInterest::FollowUp,
        CustomerInterest::Undetermined,
    ];

    /// Stored `customer_interest` value
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerInterest::Interested => "Interested",
            CustomerInterest::NotInterested => "Not Interested",
            CustomerInterest::FollowUp => "Follow Up",
            CustomerInterest::Undetermined => "",
        }
    }

    /// Sentiment bucket used in campaign statistics
    pub fn sentiment(&self) -> Option<&'static str> {
        match self {
            CustomerInterest::Interested => Some("Interested"),
            CustomerInterest::NotInterested => Some("Not Interested"),
            CustomerInterest::FollowUp => Some("Maybe"),
            CustomerInterest::Undetermined => None,
        }
    }

    pub fn is_determined(&self) -> bool {
        *self != CustomerInterest::Undetermined
    }
}

impl fmt::Display for CustomerInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown customer interest label {0:?}")]
pub struct UnknownLabel(pub String);

impl FromStr for CustomerInterest {
    type Err = UnknownLabel;

    /// Accepts the stored labels case-insensitively, plus "Maybe" for Follow Up
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "interested" => Ok(CustomerInterest::Interested),
            "not interested" => Ok(CustomerInterest::NotInterested),
            "follow up" | "maybe" => Ok(CustomerInterest::FollowUp),
            "" => Ok(CustomerInterest::Undetermined),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl Serialize for CustomerInterest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CustomerInterest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Weighted lexicon scores for one transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    pub not_interested: u32,
    pub interested: u32,
    pub maybe: u32,
}

impl ScoreSet {
    pub fn new(not_interested: u32, interested: u32, maybe: u32) -> Self {
        Self {
            not_interested,
            interested,
            maybe,
        }
    }

    /// True when no lexicon matched
    pub fn is_empty(&self) -> bool {
        self.not_interested == 0 && self.interested == 0 && self.maybe == 0
    }
}

/// Label plus the evidence behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub label: CustomerInterest,
    pub scores: ScoreSet,
    /// Normalized customer text the scores were computed on
    pub normalized_text: String,
    /// Whether the not-interested/interested tie-break decided the label
    pub tie_broken: bool,
}

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::classifier::InterestClassifier;
use crate::error::Result;
use crate::models::{Campaign, Classification, Conversation, CustomerInterest, Lead, Utterance};

/// Configuration for batch classification
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of transcripts classified at the same time
    pub max_workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_workers: 10 }
    }
}

/// Classify independent transcripts on a bounded pool of blocking tasks
///
/// Every transcript is classified on its own task, with at most
/// `max_workers` running at once. Results are keyed by the caller's
/// identifier; completion order does not matter.
pub async fn classify_batch<K>(
    classifier: Arc<InterestClassifier>,
    transcripts: Vec<(K, Vec<Utterance>)>,
    config: &BatchConfig,
) -> Result<BTreeMap<K, Classification>>
where
    K: Ord + Send + 'static,
{
    let max_workers = config.max_workers.max(1);
    let mut results = BTreeMap::new();
    let mut tasks = JoinSet::new();

    info!(
        "Classifying {} transcripts with up to {} workers",
        transcripts.len(),
        max_workers
    );

    for (key, utterances) in transcripts {
        while tasks.len() >= max_workers {
            if let Some(joined) = tasks.join_next().await {
                let (key, classification) = joined?;
                results.insert(key, classification);
            }
        }

        let classifier = Arc::clone(&classifier);
        tasks.spawn_blocking(move || {
            let classification = classifier.classify_detailed(&utterances);
            (key, classification)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (key, classification) = joined?;
        results.insert(key, classification);
    }

    Ok(results)
}

/// Classify transcripts one after another on the current thread
pub fn classify_sequential<K>(
    classifier: &InterestClassifier,
    transcripts: Vec<(K, Vec<Utterance>)>,
) -> BTreeMap<K, Classification>
where
    K: Ord,
{
    transcripts
        .into_iter()
        .map(|(key, utterances)| (key, classifier.classify_detailed(&utterances)))
        .collect()
}

/// The transcript chosen to classify a lead
#[derive(Debug, Clone)]
pub struct LeadTranscript<'a> {
    pub lead: &'a Lead,
    /// Latest conversation on the lead's phone number, if any
    pub conversation: Option<&'a Conversation>,
}

impl LeadTranscript<'_> {
    pub fn utterances(&self) -> Vec<Utterance> {
        self.conversation
            .map(Conversation::utterances)
            .unwrap_or_default()
    }
}

/// Pair each lead with its most recent conversation
///
/// Conversations are matched on digits-only phone numbers; a lead without
/// any digits matches nothing. The latest
/// `created_at` wins, a missing timestamp counts as oldest, and the earlier
/// listed conversation wins a tie. Leads come back in input order.
pub fn select_latest_transcripts(campaign: &Campaign) -> Vec<LeadTranscript<'_>> {
    let mut by_phone: HashMap<String, Vec<&Conversation>> = HashMap::new();
    for conversation in &campaign.conversations {
        by_phone
            .entry(conversation.normalized_phone())
            .or_default()
            .push(conversation);
    }

    campaign
        .leads
        .iter()
        .map(|lead| {
            let phone = lead.normalized_phone();
            let conversation = if phone.is_empty() {
                None
            } else {
                by_phone
                    .get(&phone)
                    .and_then(|conversations| latest(conversations))
            };
            if conversation.is_none() {
                debug!("Lead {} has no conversation", lead.id);
            }
            LeadTranscript { lead, conversation }
        })
        .collect()
}

fn latest<'a>(conversations: &[&'a Conversation]) -> Option<&'a Conversation> {
    conversations.iter().copied().reduce(|best, candidate| {
        if candidate.created_at > best.created_at {
            candidate
        } else {
            best
        }
    })
}

/// Outcome for one lead in a campaign run
#[derive(Debug, Clone, Serialize)]
pub struct LeadOutcome {
    pub lead: Lead,
    pub conversation_id: Option<String>,
    pub classification: Classification,
}

/// Lead counts per interest bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InterestSummary {
    pub total: usize,
    pub interested: usize,
    pub not_interested: usize,
    /// Leads labelled Follow Up
    pub maybe: usize,
    pub undetermined: usize,
}

impl InterestSummary {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = CustomerInterest>,
    {
        let mut summary = Self::default();
        for label in labels {
            summary.total += 1;
            match label {
                CustomerInterest::Interested => summary.interested += 1,
                CustomerInterest::NotInterested => summary.not_interested += 1,
                CustomerInterest::FollowUp => summary.maybe += 1,
                CustomerInterest::Undetermined => summary.undetermined += 1,
            }
        }
        summary
    }
}

/// Classify every lead of a campaign from its latest conversation
pub async fn classify_campaign(
    classifier: Arc<InterestClassifier>,
    campaign: &Campaign,
    config: &BatchConfig,
) -> Result<Vec<LeadOutcome>> {
    let selected = select_latest_transcripts(campaign);
    let transcripts: Vec<(usize, Vec<Utterance>)> = selected
        .iter()
        .enumerate()
        .map(|(index, chosen)| (index, chosen.utterances()))
        .collect();

    let mut results = classify_batch(classifier, transcripts, config).await?;

    let outcomes: Vec<LeadOutcome> = selected
        .into_iter()
        .enumerate()
        .filter_map(|(index, chosen)| {
            let classification = results.remove(&index)?;
            Some(LeadOutcome {
                lead: chosen.lead.clone(),
                conversation_id: chosen.conversation.and_then(|c| c.conversation_id.clone()),
                classification,
            })
        })
        .collect();

    let summary = InterestSummary::from_labels(outcomes.iter().map(|o| o.classification.label));
    info!(
        "Classified {} leads: {} interested, {} not interested, {} maybe, {} undetermined",
        summary.total,
        summary.interested,
        summary.not_interested,
        summary.maybe,
        summary.undetermined
    );

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transcripts() -> Vec<(u64, Vec<Utterance>)> {
        let texts = [
            "Not interested.",
            "I'll think about it",
            "Stop calling, not interested",
            "I'm interested in buying now",
            "Interested in buying, but no thanks",
            "Hello?",
            "What's the price range? Can we negotiate?",
            "call me next week, i need time",
        ];
        (0..64u64)
            .map(|i| {
                let text = texts[i as usize % texts.len()];
                (
                    i,
                    vec![
                        Utterance::agent("Hi, this is the property desk."),
                        Utterance::user(text),
                    ],
                )
            })
            .collect()
    }

    fn conversation(
        id: &str,
        phone: &str,
        created_at: serde_json::Value,
        text: &str,
    ) -> Conversation {
        serde_json::from_value(json!({
            "conversation_id": id,
            "phone_number": phone,
            "created_at": created_at,
            "messages": [{"role": "user", "message": text}],
        }))
        .unwrap()
    }

    fn lead(id: u64, phone: &str) -> Lead {
        Lead {
            id,
            name: Some(format!("Lead {id}")),
            phone: Some(phone.to_string()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let classifier = Arc::new(InterestClassifier::default());
        let config = BatchConfig { max_workers: 4 };

        let concurrent = classify_batch(Arc::clone(&classifier), transcripts(), &config)
            .await
            .unwrap();
        let sequential = classify_sequential(&classifier, transcripts());

        assert_eq!(concurrent.len(), 64);
        assert_eq!(concurrent, sequential);
    }

    #[tokio::test]
    async fn test_batch_labels() {
        let classifier = Arc::new(InterestClassifier::default());
        let results = classify_batch(classifier, transcripts(), &BatchConfig::default())
            .await
            .unwrap();

        assert_eq!(results[&0].label, CustomerInterest::NotInterested);
        assert_eq!(results[&1].label, CustomerInterest::FollowUp);
        assert_eq!(results[&2].label, CustomerInterest::NotInterested);
        assert_eq!(results[&3].label, CustomerInterest::Interested);
        assert_eq!(results[&4].label, CustomerInterest::Interested);
        assert_eq!(results[&5].label, CustomerInterest::Undetermined);
    }

    #[tokio::test]
    async fn test_zero_workers_still_runs() {
        let classifier = Arc::new(InterestClassifier::default());
        let results = classify_batch(classifier, transcripts(), &BatchConfig { max_workers: 0 })
            .await
            .unwrap();
        assert_eq!(results.len(), 64);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let classifier = Arc::new(InterestClassifier::default());
        let results = classify_batch::<u64>(classifier, vec![], &BatchConfig::default())
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_select_latest_conversation() {
        let campaign = Campaign {
            leads: vec![lead(1, "+971 50 111"), lead(2, "050-222"), lead(3, "")],
            conversations: vec![
                conversation("old", "97150111", json!("2025-01-01T10:00:00"), "not now"),
                conversation("new", "971-50-111", json!("2025-02-01T10:00:00Z"), "i'm ready"),
                conversation("undated", "97150111", json!(null), "stop calling"),
                conversation("first", "050222", json!("2025-03-01T10:00:00"), "possibly"),
                conversation("second", "050222", json!("2025-03-01T10:00:00"), "no thanks"),
                conversation("no phone", "", json!("2025-04-01T10:00:00"), "not interested"),
            ],
        };

        let selected = select_latest_transcripts(&campaign);
        let ids: Vec<Option<&str>> = selected
            .iter()
            .map(|s| s.conversation.and_then(|c| c.conversation_id.as_deref()))
            .collect();

        assert_eq!(ids, vec![Some("new"), Some("first"), None]);
        assert!(selected[2].utterances().is_empty());
    }

    #[tokio::test]
    async fn test_classify_campaign() {
        let campaign = Campaign {
            leads: vec![lead(10, "111"), lead(20, "222"), lead(30, "333")],
            conversations: vec![
                conversation("a", "111", json!("2025-01-01T10:00:00"), "No thanks, stop calling"),
                conversation("b", "222", json!("2025-01-01T10:00:00"), "I'll let you know"),
            ],
        };

        let outcomes = classify_campaign(
            Arc::new(InterestClassifier::default()),
            &campaign,
            &BatchConfig::default(),
        )
        .await
        .unwrap();

        let labels: Vec<(u64, CustomerInterest)> = outcomes
            .iter()
            .map(|o| (o.lead.id, o.classification.label))
            .collect();
        assert_eq!(
            labels,
            vec![
                (10, CustomerInterest::NotInterested),
                (20, CustomerInterest::FollowUp),
                (30, CustomerInterest::Undetermined),
            ]
        );
        assert_eq!(outcomes[0].conversation_id.as_deref(), Some("a"));
        assert_eq!(outcomes[2].conversation_id, None);
    }

    #[test]
    fn test_interest_summary() {
        let summary = InterestSummary::from_labels([
            CustomerInterest::Interested,
            CustomerInterest::FollowUp,
            CustomerInterest::FollowUp,
            CustomerInterest::Undetermined,
        ]);
        assert_eq!(
            summary,
            InterestSummary {
                total: 4,
                interested: 1,
                not_interested: 0,
                maybe: 2,
                undetermined: 1,
            }
        );
    }
}

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::batch::{InterestSummary, LeadOutcome};
use crate::models::{CustomerInterest, ScoreSet};

/// Machine-readable campaign classification report
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// One row per lead, in input order
    pub leads: Vec<ReportLead>,
    pub summary: InterestSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportLead {
    pub id: u64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub customer_interest: CustomerInterest,
    pub scores: ScoreSet,
    pub conversation_id: Option<String>,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: &[LeadOutcome]) -> Self {
        let leads: Vec<ReportLead> = outcomes
            .iter()
            .map(|o| ReportLead {
                id: o.lead.id,
                name: o.lead.name.clone(),
                phone: o.lead.phone.clone(),
                customer_interest: o.classification.label,
                scores: o.classification.scores,
                conversation_id: o.conversation_id.clone(),
            })
            .collect();

        let summary = InterestSummary::from_labels(leads.iter().map(|l| l.customer_interest));

        Self { leads, summary }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }

    /// Human-readable rendering of this report
    pub fn human(&self) -> HumanSummary<'_> {
        HumanSummary::new(self)
    }
}

/// Human-readable campaign summary
pub struct HumanSummary<'a> {
    report: &'a BatchReport,
}

impl<'a> HumanSummary<'a> {
    pub fn new(report: &'a BatchReport) -> Self {
        Self { report }
    }

    /// Format the summary as text: totals, then one line per lead
    pub fn format(&self) -> String {
        let summary = &self.report.summary;
        let mut output = String::new();

        output.push_str("Customer Interest\n");
        output.push_str("=================\n");
        output.push_str(&format!("Leads:          {}\n", summary.total));
        output.push_str(&format!(
            "Interested:     {}\n",
            count_with_share(summary.interested, summary.total)
        ));
        output.push_str(&format!(
            "Not interested: {}\n",
            count_with_share(summary.not_interested, summary.total)
        ));
        output.push_str(&format!(
            "Maybe:          {}\n",
            count_with_share(summary.maybe, summary.total)
        ));
        output.push_str(&format!(
            "Undetermined:   {}\n",
            count_with_share(summary.undetermined, summary.total)
        ));

        if self.report.leads.is_empty() {
            return output;
        }

        output.push('\n');
        for lead in &self.report.leads {
            let label = lead.customer_interest.sentiment().unwrap_or("-");
            output.push_str(&format!(
                "{:>6}  {:<24}  {:<14}  (not {}, interested {}, maybe {})\n",
                lead.id,
                truncate(lead.name.as_deref().unwrap_or(""), 24),
                label,
                lead.scores.not_interested,
                lead.scores.interested,
                lead.scores.maybe
            ));
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format a count with its percentage of the total
fn count_with_share(count: usize, total: usize) -> String {
    if total == 0 {
        return count.to_string();
    }
    format!("{} ({:.1}%)", count, count as f64 / total as f64 * 100.0)
}

/// Cut a name to at most `width` chars
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

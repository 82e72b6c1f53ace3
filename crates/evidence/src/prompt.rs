//! Prompt assembly for grounded and ungrounded answers.

use std::fmt;
use std::str::FromStr;

use regintel_core::EvidenceItem;
use serde::{Deserialize, Serialize};

pub const GROUNDED_SYSTEM_PROMPT: &str = "You are RegIntel AI, a regulatory compliance copilot for banks. \
Answer only from the numbered evidence you are given. Cite evidence by its [n] marker. \
If the evidence does not cover the question, say so plainly. \
Reply in the language of the question.";

pub const SMALLTALK_REPLY: &str = "I am RegIntel AI, a compliance copilot for banks. \
I can explain regulatory frameworks such as BCBS 239, the EU AI Act or GDPR, \
run a gap analysis against them, or draft a remediation plan. What would you like to look at?";

/// Requested shape of the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStyle {
    #[default]
    Auto,
    Overview,
    GapAnalysis,
    RemediationPlan,
}

impl AnswerStyle {
    fn instruction(self) -> &'static str {
        match self {
            AnswerStyle::Auto => "Pick the most useful format for the question.",
            AnswerStyle::Overview => {
                "Give a structured overview: objective, key principles or requirements, and what they imply for a bank."
            }
            AnswerStyle::GapAnalysis => {
                "Produce a gap analysis: for each requirement, the expected state, typical gaps, and severity."
            }
            AnswerStyle::RemediationPlan => {
                "Produce a remediation plan: actions, owners, milestones, and how progress is evidenced."
            }
        }
    }
}

impl fmt::Display for AnswerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnswerStyle::Auto => "auto",
            AnswerStyle::Overview => "overview",
            AnswerStyle::GapAnalysis => "gap_analysis",
            AnswerStyle::RemediationPlan => "remediation_plan",
        };
        f.write_str(s)
    }
}

impl FromStr for AnswerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "auto" => Ok(AnswerStyle::Auto),
            "overview" => Ok(AnswerStyle::Overview),
            "gap_analysis" | "gap" => Ok(AnswerStyle::GapAnalysis),
            "remediation_plan" | "remediation" | "plan" => Ok(AnswerStyle::RemediationPlan),
            other => Err(format!("unknown answer style: {other}")),
        }
    }
}

/// `[rank] source — chunk n` header with the snippet beneath, one per item.
pub fn evidence_entries(items: &[EvidenceItem]) -> Vec<String> {
    items
        .iter()
        .map(|e| format!("[{}] {} — chunk {}\n{}", e.rank, e.source, e.chunk_index, e.snippet))
        .collect()
}

/// Evidence entries separated by a blank line.
pub fn evidence_block(items: &[EvidenceItem]) -> String {
    evidence_entries(items).join("\n\n")
}

pub fn compose_grounded_prompt(question: &str, style: AnswerStyle, evidence: &str) -> String {
    format!(
        "Question:\n{question}\n\nAnswer format: {}\n\nEvidence:\n{evidence}\n\n\
         Answer using only the evidence above and cite it with [n] markers.",
        style.instruction()
    )
}

pub fn ungrounded_system_prompt(style: AnswerStyle) -> String {
    format!(
        "You are RegIntel AI, a regulatory compliance copilot for banks. \
         No document evidence is available for this question, so answer from general knowledge \
         and say that the answer is not grounded in the indexed corpus. {} \
         Reply in the language of the question.",
        style.instruction()
    )
}

// IntegrityAI Data Models
// Shared domain and wire types consumed across services

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Classifier Output ============

/// Risk label attached to a classifier result. This enum is closed on
/// purpose: a value outside Low/Medium/High is a classification error and
/// fails at deserialization instead of silently defaulting.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// High and Medium both count against the author.
    pub fn is_adverse(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Medium)
    }
}

/// Result of one classifier call. Field names match the external service
/// (snake_case on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub prediction: String,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<BreakdownSpan>>,
}

/// Per-span heatmap item inside an analyze response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownSpan {
    pub text: String,
    pub risk: RiskLevel,
    pub prob: f64,
}

// ============ Normalized Risk ============

/// Two-sided probability split derived from a `ScanResult`.
/// `ai_probability + human_probability == 100` by construction.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRisk {
    pub ai_probability: f64,
    pub human_probability: f64,
}

/// Whether one side of the split is large enough to draw. Components below
/// the threshold stay in the numeric pair; only presentation skips them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Significance {
    Significant,
    Negligible,
}

// ============ Paraphraser ============

/// Rewrite tone accepted by the paraphrase/rewrite endpoints.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub enum Tone {
    #[default]
    Standard,
    Fluent,
    Formal,
}

// ============ Authorship Proof ============

/// Verdict of the session integrity scorer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Verified Human")]
    VerifiedHuman,
    #[serde(rename = "Suspicious")]
    Suspicious,
    #[serde(rename = "Likely Copied/AI")]
    LikelyCopied,
}

impl Verdict {
    pub fn color_tag(&self) -> &'static str {
        match self {
            Verdict::VerifiedHuman => "emerald",
            Verdict::Suspicious => "yellow",
            Verdict::LikelyCopied => "red",
        }
    }
}

/// Immutable authorship report produced from one writing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub score: i32,
    pub verdict: Verdict,
    pub wpm: i32,
    pub keystroke_count: i32,
    pub backspace_count: i32,
    pub paste_count: i32,
    pub color_tag: String,
}

// ============ Challenge Game ============

/// Outcome of one detection-evasion round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub win: bool,
    pub human_score: f64,
    pub ai_score: f64,
    pub prompt: String,
}

// ============ Plagiarism ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlagiarismMatch {
    pub text: String,
    pub source_url: String,
    pub source_title: String,
}

// ============ History ============

/// One completed action, appended newest-first to the owner's ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub ts: DateTime<Utc>,
    pub snippet: String,
    #[serde(flatten)]
    pub action: HistoryAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HistoryAction {
    #[serde(rename_all = "camelCase")]
    Scan {
        full_text: String,
        result: ScanResult,
        normalized: NormalizedRisk,
    },
    Paraphrase {
        original: String,
        result: String,
        tone: Tone,
    },
    Proof {
        report: IntegrityReport,
    },
    Game {
        outcome: GameOutcome,
    },
}

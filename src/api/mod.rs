// Action Layer
// One entry point per user-triggered action. Each action brackets its
// network call with an in-flight guard so the same action cannot be
// resubmitted while pending, and a settled response is discarded when a
// newer request (or a view switch) has superseded it.

use tracing::{info, warn};

use crate::models::{GameOutcome, HistoryAction, NormalizedRisk, ScanResult, Tone};
use crate::services::backend_client::{BackendClient, BackendError};
use crate::services::history_store::{self, HistoryStore};
use crate::services::segmenter::ParaphraseEditor;
use crate::services::{challenge, risk};

/// Single-flight guard for one action kind in one view.
///
/// `try_begin` hands out a generation ticket and refuses while a request is
/// pending. `settle` accepts a response only if its ticket is still current;
/// `invalidate` (called when the user navigates away or resets the view)
/// bumps the generation so any response still in flight is dropped on
/// arrival instead of applied to unrelated state.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    in_flight: bool,
    generation: u64,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Take a ticket for a new request. None while another is pending.
    pub fn try_begin(&mut self) -> Option<u64> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.generation = self.generation.wrapping_add(1);
        Some(self.generation)
    }

    /// Release the guard for a settled request. Returns false when the
    /// ticket is stale, in which case the response must be discarded.
    pub fn settle(&mut self, ticket: u64) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Abandon whatever is pending; the next settle with an old ticket
    /// reports stale.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = false;
    }
}

/// Classifier result with its derived two-sided split.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub result: ScanResult,
    pub normalized: NormalizedRisk,
}

fn append_history(store: &HistoryStore, identity: Option<&str>, source: &str, action: HistoryAction) {
    let Some(identity) = identity else {
        return;
    };
    // History is ancillary: a persistence failure never undoes the action.
    if let Err(e) = store.append(identity, history_store::new_entry(source, action)) {
        warn!("history append failed: {}", e);
    }
}

/// Scanner action: classify text, normalize the split, and record the scan.
/// Blank input and double submission are no-ops; a stale response is
/// discarded.
pub async fn analyze_text(
    client: &BackendClient,
    guard: &mut InFlightGuard,
    store: &HistoryStore,
    identity: Option<&str>,
    content: &str,
) -> Result<Option<ScanOutcome>, BackendError> {
    if content.trim().is_empty() {
        return Ok(None);
    }
    let Some(ticket) = guard.try_begin() else {
        return Ok(None);
    };

    let response = client.analyze(content).await;
    if !guard.settle(ticket) {
        info!("discarding stale analyze response");
        return Ok(None);
    }
    let result = response?;

    let normalized = risk::normalize(&result);
    append_history(
        store,
        identity,
        content,
        HistoryAction::Scan {
            full_text: content.to_string(),
            result: result.clone(),
            normalized,
        },
    );

    Ok(Some(ScanOutcome { result, normalized }))
}

/// Paraphraser action: rewrite text, segment the result into an editable
/// document, and record the rewrite.
pub async fn paraphrase_text(
    client: &BackendClient,
    guard: &mut InFlightGuard,
    store: &HistoryStore,
    identity: Option<&str>,
    content: &str,
    tone: Tone,
) -> Result<Option<ParaphraseEditor>, BackendError> {
    if content.trim().is_empty() {
        return Ok(None);
    }
    let Some(ticket) = guard.try_begin() else {
        return Ok(None);
    };

    let response = client.paraphrase(content, tone).await;
    if !guard.settle(ticket) {
        info!("discarding stale paraphrase response");
        return Ok(None);
    }
    let paraphrased = response?;

    append_history(
        store,
        identity,
        content,
        HistoryAction::Paraphrase {
            original: content.to_string(),
            result: paraphrased.clone(),
            tone,
        },
    );

    Ok(Some(ParaphraseEditor::from_text(&paraphrased)))
}

/// Synonym lookup for a word the user targeted in the editor.
pub async fn fetch_synonyms(
    client: &BackendClient,
    guard: &mut InFlightGuard,
    word: &str,
) -> Result<Option<Vec<String>>, BackendError> {
    let Some(ticket) = guard.try_begin() else {
        return Ok(None);
    };
    let response = client.synonyms(word).await;
    if !guard.settle(ticket) {
        return Ok(None);
    }
    Ok(Some(response?))
}

/// Rewrite variants for a sentence the user targeted in the editor.
pub async fn fetch_sentence_variants(
    client: &BackendClient,
    guard: &mut InFlightGuard,
    sentence: &str,
    tone: Tone,
) -> Result<Option<Vec<String>>, BackendError> {
    let Some(ticket) = guard.try_begin() else {
        return Ok(None);
    };
    let response = client.rewrite_sentence(sentence, tone).await;
    if !guard.settle(ticket) {
        return Ok(None);
    }
    Ok(Some(response?))
}

/// Game action: classify the submission and judge the round.
pub async fn submit_challenge(
    client: &BackendClient,
    guard: &mut InFlightGuard,
    store: &HistoryStore,
    identity: Option<&str>,
    prompt: &str,
    response_text: &str,
) -> Result<Option<GameOutcome>, BackendError> {
    if response_text.trim().is_empty() {
        return Ok(None);
    }
    let Some(ticket) = guard.try_begin() else {
        return Ok(None);
    };

    let response = client.analyze(response_text).await;
    if !guard.settle(ticket) {
        info!("discarding stale challenge response");
        return Ok(None);
    }
    let scan = response?;

    let outcome = challenge::evaluate(&scan, prompt);
    append_history(
        store,
        identity,
        response_text,
        HistoryAction::Game { outcome: outcome.clone() },
    );

    Ok(Some(outcome))
}

/// Record a finished authorship proof in the owner's ledger. The report
/// itself is produced synchronously by `WritingSession`.
pub fn record_proof(
    store: &HistoryStore,
    identity: Option<&str>,
    written_text: &str,
    report: crate::models::IntegrityReport,
) {
    append_history(store, identity, written_text, HistoryAction::Proof { report });
}

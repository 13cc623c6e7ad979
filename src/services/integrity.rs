// Session Integrity Scorer
// Converts a stream of keystroke/paste events from the live-writer view into
// an authorship-confidence verdict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{IntegrityReport, Verdict};

/// Key value the surrounding editor reports for a deletion.
pub const BACKSPACE_KEY: &str = "Backspace";

const PASTE_PENALTY: i32 = 20;
const FAST_TYPING_WPM: i32 = 120;
const FAST_TYPING_PENALTY: i32 = 30;
const EDIT_BONUS_THRESHOLD: i32 = 5;
const EDIT_BONUS: i32 = 5;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Reported,
}

/// One continuous writing attempt, from first keystroke to report or reset.
///
/// `start_time` is set exactly once per session, on the first keystroke after
/// creation or reset. Once a report is produced the session is terminal and
/// ignores further events until `reset`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingSession {
    phase: SessionPhase,
    keystroke_count: i32,
    backspace_count: i32,
    paste_count: i32,
    start_time: Option<DateTime<Utc>>,
    last_report: Option<IntegrityReport>,
}

impl WritingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn keystroke_count(&self) -> i32 {
        self.keystroke_count
    }

    pub fn backspace_count(&self) -> i32 {
        self.backspace_count
    }

    pub fn paste_count(&self) -> i32 {
        self.paste_count
    }

    pub fn last_report(&self) -> Option<&IntegrityReport> {
        self.last_report.as_ref()
    }

    /// Record one key event. The first keystroke after Idle activates the
    /// session and stamps its start time.
    pub fn record_keystroke(&mut self, key: &str) {
        self.record_keystroke_at(key, Utc::now());
    }

    pub fn record_keystroke_at(&mut self, key: &str, now: DateTime<Utc>) {
        match self.phase {
            SessionPhase::Reported => return,
            SessionPhase::Idle => {
                self.phase = SessionPhase::Active;
                self.start_time = Some(now);
            }
            SessionPhase::Active => {}
        }

        self.keystroke_count += 1;
        if key == BACKSPACE_KEY {
            self.backspace_count += 1;
        }
    }

    /// Record one clipboard paste. Pastes do not activate the session.
    pub fn record_paste(&mut self) {
        if self.phase == SessionPhase::Reported {
            return;
        }
        self.paste_count += 1;
    }

    /// Produce the authorship report and move to the terminal Reported phase.
    /// A no-op (state unchanged) when the session is not active or the text
    /// is empty/whitespace.
    pub fn generate_report(&mut self, current_text: &str) -> Option<IntegrityReport> {
        self.generate_report_at(current_text, Utc::now())
    }

    pub fn generate_report_at(
        &mut self,
        current_text: &str,
        now: DateTime<Utc>,
    ) -> Option<IntegrityReport> {
        if self.phase != SessionPhase::Active || current_text.trim().is_empty() {
            return None;
        }
        // Active implies start_time was stamped.
        let start = self.start_time?;

        let duration_minutes = (now - start).num_milliseconds() as f64 / 60_000.0;
        let word_count = current_text.split_whitespace().count();
        let wpm = if duration_minutes > 0.0 {
            (word_count as f64 / duration_minutes).round() as i32
        } else {
            0
        };

        let mut score = 100;
        score -= self.paste_count * PASTE_PENALTY;
        if wpm > FAST_TYPING_WPM {
            score -= FAST_TYPING_PENALTY;
        }
        if self.backspace_count > EDIT_BONUS_THRESHOLD {
            score += EDIT_BONUS;
        }
        let score = score.clamp(0, 100);

        let verdict = if score < 50 {
            Verdict::LikelyCopied
        } else if score < 80 {
            Verdict::Suspicious
        } else {
            Verdict::VerifiedHuman
        };

        let report = IntegrityReport {
            score,
            verdict,
            wpm,
            keystroke_count: self.keystroke_count,
            backspace_count: self.backspace_count,
            paste_count: self.paste_count,
            color_tag: verdict.color_tag().to_string(),
        };

        info!(
            score,
            wpm,
            pastes = self.paste_count,
            backspaces = self.backspace_count,
            "integrity.report_generated"
        );

        self.phase = SessionPhase::Reported;
        self.last_report = Some(report.clone());
        Some(report)
    }

    /// Return to Idle, zeroing all counters and discarding the start time
    /// and last report. Idempotent; confirmation prompts belong to the UI.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_first_keystroke_activates_and_stamps_start() {
        let mut session = WritingSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        session.record_keystroke("a");
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.keystroke_count(), 1);
    }

    #[test]
    fn test_backspace_counts_twice() {
        let mut session = WritingSession::new();
        session.record_keystroke("a");
        session.record_keystroke(BACKSPACE_KEY);
        assert_eq!(session.keystroke_count(), 2);
        assert_eq!(session.backspace_count(), 1);
    }

    #[test]
    fn test_report_pastes_and_fast_typing_penalized() {
        let start = Utc::now();
        let mut session = WritingSession::new();
        session.record_keystroke_at("a", start);
        session.record_paste();
        session.record_paste();

        let report = session
            .generate_report_at(&words(150), start + Duration::minutes(1))
            .unwrap();
        assert_eq!(report.wpm, 150);
        assert_eq!(report.score, 30);
        assert_eq!(report.verdict, Verdict::LikelyCopied);
        assert_eq!(report.color_tag, "red");
        assert_eq!(session.phase(), SessionPhase::Reported);
    }

    #[test]
    fn test_report_edit_bonus_clamped_at_one_hundred() {
        let start = Utc::now();
        let mut session = WritingSession::new();
        session.record_keystroke_at("a", start);
        for _ in 0..8 {
            session.record_keystroke_at(BACKSPACE_KEY, start);
        }

        let report = session
            .generate_report_at(&words(40), start + Duration::minutes(1))
            .unwrap();
        assert_eq!(report.wpm, 40);
        assert_eq!(report.score, 100);
        assert_eq!(report.verdict, Verdict::VerifiedHuman);
        assert_eq!(report.color_tag, "emerald");
    }

    #[test]
    fn test_report_score_never_below_zero() {
        let start = Utc::now();
        let mut session = WritingSession::new();
        session.record_keystroke_at("a", start);
        for _ in 0..6 {
            session.record_paste();
        }

        let report = session
            .generate_report_at(&words(10), start + Duration::minutes(1))
            .unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.verdict, Verdict::LikelyCopied);
    }

    #[test]
    fn test_report_zero_duration_yields_zero_wpm() {
        let start = Utc::now();
        let mut session = WritingSession::new();
        session.record_keystroke_at("a", start);
        let report = session.generate_report_at(&words(20), start).unwrap();
        assert_eq!(report.wpm, 0);
    }

    #[test]
    fn test_report_noop_on_whitespace_text() {
        let mut session = WritingSession::new();
        session.record_keystroke("a");
        assert!(session.generate_report("   \n\t ").is_none());
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn test_report_noop_when_idle() {
        let mut session = WritingSession::new();
        assert!(session.generate_report("some text").is_none());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_reported_session_ignores_events_until_reset() {
        let start = Utc::now();
        let mut session = WritingSession::new();
        session.record_keystroke_at("a", start);
        session
            .generate_report_at("hello there", start + Duration::seconds(30))
            .unwrap();

        session.record_keystroke("b");
        session.record_paste();
        assert_eq!(session.keystroke_count(), 1);
        assert_eq!(session.paste_count(), 0);

        session.reset();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.last_report().is_none());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = WritingSession::new();
        session.record_keystroke("a");
        session.record_paste();
        session.reset();
        let snapshot = format!("{:?}", session);
        session.reset();
        assert_eq!(snapshot, format!("{:?}", session));
        assert_eq!(session.keystroke_count(), 0);
        assert_eq!(session.paste_count(), 0);
    }
}

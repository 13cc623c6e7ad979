// Challenge Game Evaluator
// Win/lose judgment for the detection-evasion game, built on top of risk
// normalization.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{GameOutcome, ScanResult};
use crate::services::risk;

/// A round is won when the human side of the split clears this score.
pub const WIN_THRESHOLD: f64 = 80.0;

/// Fixed prompt set for the game. Selection is uniform; the same prompt may
/// come up on consecutive calls.
pub const CHALLENGE_PROMPTS: [&str; 5] = [
    "Explain how a CPU works using only cooking metaphors.",
    "Write a sincere apology letter to a time traveler.",
    "Describe the color 'blue' to someone who has never seen it.",
    "Convince a medieval peasant to buy a subscription to Spotify.",
    "Write a review for a restaurant that serves invisible food.",
];

/// Judge one game submission from its classifier result.
pub fn evaluate(scan: &ScanResult, prompt: &str) -> GameOutcome {
    let normalized = risk::normalize(scan);
    let human_score = normalized.human_probability.max(0.0);
    let win = human_score > WIN_THRESHOLD;
    let ai_score = round1(100.0 - human_score);

    GameOutcome {
        win,
        human_score,
        ai_score,
        prompt: prompt.to_string(),
    }
}

/// Pick the next prompt uniformly at random.
pub fn next_prompt() -> &'static str {
    next_prompt_with(&mut rand::thread_rng())
}

pub fn next_prompt_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CHALLENGE_PROMPTS
        .choose(rng)
        .copied()
        .unwrap_or(CHALLENGE_PROMPTS[0])
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;
    use rand::rngs::mock::StepRng;

    fn scan(confidence: f64, risk_level: RiskLevel) -> ScanResult {
        ScanResult {
            prediction: "test".to_string(),
            confidence,
            risk_level,
            breakdown: None,
        }
    }

    #[test]
    fn test_high_risk_submission_loses() {
        let outcome = evaluate(&scan(72.0, RiskLevel::High), "prompt");
        assert!(!outcome.win);
        assert_eq!(outcome.human_score, 28.0);
        assert_eq!(outcome.ai_score, 72.0);
    }

    #[test]
    fn test_low_risk_submission_wins() {
        let outcome = evaluate(&scan(95.0, RiskLevel::Low), "prompt");
        assert!(outcome.win);
        assert_eq!(outcome.human_score, 95.0);
        assert_eq!(outcome.ai_score, 5.0);
    }

    #[test]
    fn test_win_threshold_is_strict() {
        let outcome = evaluate(&scan(80.0, RiskLevel::Low), "prompt");
        assert!(!outcome.win);
    }

    #[test]
    fn test_outcome_keeps_prompt() {
        let outcome = evaluate(&scan(50.0, RiskLevel::Low), "the prompt");
        assert_eq!(outcome.prompt, "the prompt");
    }

    #[test]
    fn test_ai_score_rounded_to_one_decimal() {
        let outcome = evaluate(&scan(33.33, RiskLevel::Low), "prompt");
        assert_eq!(outcome.ai_score, 66.7);
    }

    #[test]
    fn test_next_prompt_comes_from_fixed_set() {
        let mut rng = StepRng::new(0, 1);
        for _ in 0..20 {
            let prompt = next_prompt_with(&mut rng);
            assert!(CHALLENGE_PROMPTS.contains(&prompt));
        }
    }
}

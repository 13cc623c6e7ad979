// IntegrityAI Core Services

pub mod segmenter;
pub mod risk;
pub mod integrity;
pub mod challenge;
pub mod backend_client;
pub mod history_store;

pub use segmenter::*;
pub use risk::{classify_significance, normalize, risk_style, RiskStyle, SIGNIFICANCE_THRESHOLD};
pub use integrity::{SessionPhase, WritingSession, BACKSPACE_KEY};
pub use challenge::{evaluate, next_prompt, CHALLENGE_PROMPTS, WIN_THRESHOLD};
pub use backend_client::{BackendClient, BackendError, BackendStatus};
pub use history_store::{new_entry, HistoryError, HistoryStore};

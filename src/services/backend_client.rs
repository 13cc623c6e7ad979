// Detection Backend Client
// HTTP client for the external classifier/rewriter service. The core treats
// classifier output as opaque numbers and paraphrase output as plain text.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

use crate::models::{PlagiarismMatch, ScanResult, Tone};

/// Backend service URL
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Shared HTTP client singleton
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn get_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client")
    })
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend returned error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Service status reported by the backend root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendStatus {
    pub status: String,
    #[serde(default)]
    pub device: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ParaphraseRequest<'a> {
    content: &'a str,
    tone: Tone,
}

#[derive(Debug, Deserialize)]
struct ParaphraseResponse {
    paraphrased: String,
}

#[derive(Debug, Serialize)]
struct SynonymsRequest<'a> {
    word: &'a str,
}

#[derive(Debug, Deserialize)]
struct SynonymsResponse {
    synonyms: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RewriteRequest<'a> {
    sentence: &'a str,
    tone: Tone,
}

#[derive(Debug, Deserialize)]
struct RewriteResponse {
    variants: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PlagiarismRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct PlagiarismResponse {
    matches: Vec<PlagiarismMatch>,
}

/// Classifier/rewriter service client
pub struct BackendClient {
    base_url: String,
}

impl Default for BackendClient {
    fn default() -> Self {
        let base_url = std::env::var("INTEGRITYAI_BACKEND_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Self::new(&base_url)
    }
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = get_client().post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Check whether the backend is reachable and report its device.
    pub async fn health(&self) -> Result<BackendStatus, BackendError> {
        let url = format!("{}/", self.base_url);
        let response = get_client().get(&url).send().await?;
        Ok(response.json().await?)
    }

    /// Classify a piece of text for AI origin.
    pub async fn analyze(&self, content: &str) -> Result<ScanResult, BackendError> {
        self.post_json("/analyze", &AnalyzeRequest { content }).await
    }

    /// Rewrite text in the requested tone. The raw output is fed into the
    /// segmenter unmodified.
    pub async fn paraphrase(&self, content: &str, tone: Tone) -> Result<String, BackendError> {
        let resp: ParaphraseResponse = self
            .post_json("/paraphrase", &ParaphraseRequest { content, tone })
            .await?;
        Ok(resp.paraphrased)
    }

    /// Candidate replacements for a cleaned word token.
    pub async fn synonyms(&self, word: &str) -> Result<Vec<String>, BackendError> {
        let resp: SynonymsResponse = self.post_json("/synonyms", &SynonymsRequest { word }).await?;
        Ok(resp.synonyms)
    }

    /// Full-sentence rewrite variants in the requested tone.
    pub async fn rewrite_sentence(
        &self,
        sentence: &str,
        tone: Tone,
    ) -> Result<Vec<String>, BackendError> {
        let resp: RewriteResponse = self
            .post_json("/rewrite_sentence", &RewriteRequest { sentence, tone })
            .await?;
        Ok(resp.variants)
    }

    /// Plagiarism matches for a piece of text.
    pub async fn check_plagiarism(
        &self,
        content: &str,
    ) -> Result<Vec<PlagiarismMatch>, BackendError> {
        let resp: PlagiarismResponse = self
            .post_json("/check_plagiarism", &PlagiarismRequest { content })
            .await?;
        Ok(resp.matches)
    }
}

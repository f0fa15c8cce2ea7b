//! Harvest client: the only place that talks to the applicant-tracking API.
//!
//! One submission is one `POST /candidates` carrying the candidate, its
//! application for the configured job, and the resume (plus optional cover
//! letter) as base64 attachments. There are no retries: a failure is reported
//! back to the applicant, who can resubmit.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::application::{ApplicationFields, Field};

pub mod payload;

use payload::CandidatePayload;

pub const DEFAULT_BASE_URL: &str = "https://harvest.greenhouse.io/v1";
const ON_BEHALF_OF: &str = "On-Behalf-Of";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to submit application: {status}")]
    Rejected { status: u16, body: String },

    #[error("Unreadable response from applicant tracker: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Application reached the tracker without {0}")]
    IncompleteApplication(Field),
}

/// Connection settings for the Harvest API, supplied at construction.
#[derive(Clone)]
pub struct HarvestConfig {
    pub base_url: String,
    pub api_key: String,
    pub job_id: u64,
    /// Harvest user id recorded as the actor for every candidate created.
    pub on_behalf_of: String,
    pub timeout: Duration,
}

impl fmt::Debug for HarvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarvestConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("job_id", &self.job_id)
            .field("on_behalf_of", &self.on_behalf_of)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Identifiers the tracker assigned to a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub application_id: u64,
    pub candidate_id: u64,
}

#[derive(Debug, Deserialize)]
struct CreatedCandidate {
    id: u64,
    #[serde(default)]
    applications: Vec<CreatedApplication>,
}

#[derive(Debug, Deserialize)]
struct CreatedApplication {
    id: u64,
}

impl From<CreatedCandidate> for SubmissionReceipt {
    /// Harvest returns the candidate; its first application is the one just
    /// created. Responses without application ids fall back to the candidate id.
    fn from(created: CreatedCandidate) -> Self {
        let application_id = created
            .applications
            .first()
            .map_or(created.id, |app| app.id);
        Self {
            application_id,
            candidate_id: created.id,
        }
    }
}

/// Destination for validated applications.
///
/// Carried in `AppState` as `Arc<dyn ApplicantTracker>`.
#[async_trait]
pub trait ApplicantTracker: Send + Sync {
    async fn submit(
        &self,
        application: &ApplicationFields,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

#[derive(Clone)]
pub struct HarvestClient {
    client: Client,
    config: HarvestConfig,
}

impl HarvestClient {
    pub fn new(config: HarvestConfig) -> Result<Self, SubmissionError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn candidates_url(&self) -> String {
        format!("{}/candidates", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ApplicantTracker for HarvestClient {
    async fn submit(
        &self,
        application: &ApplicationFields,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let payload = CandidatePayload::build(application, self.config.job_id)?;

        debug!(
            job_id = self.config.job_id,
            attachments = payload.attachments.len(),
            "Posting candidate to Harvest"
        );

        let response = self
            .client
            .post(self.candidates_url())
            .basic_auth(&self.config.api_key, None::<&str>)
            .header(ON_BEHALF_OF, &self.config.on_behalf_of)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "Harvest rejected candidate");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let receipt = SubmissionReceipt::from(serde_json::from_str::<CreatedCandidate>(&body)?);
        info!(
            candidate_id = receipt.candidate_id,
            application_id = receipt.application_id,
            "Harvest accepted candidate"
        );
        Ok(receipt)
    }
}

use serde::{Deserialize, Serialize};

use crate::application::validation::ValidationError;
use crate::harvest::SubmissionReceipt;

pub const SUBMITTED_MESSAGE: &str = "Application submitted successfully!";
pub const INVALID_MESSAGE: &str = "Please correct the highlighted fields.";
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to submit application. Please try again.";

/// Uniform response body for every application submission outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EnvelopeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    #[serde(rename_all = "camelCase")]
    Submitted {
        application_id: u64,
        candidate_id: u64,
    },
    Invalid { errors: Vec<ValidationError> },
}

impl ResultEnvelope {
    pub fn submitted(receipt: &SubmissionReceipt) -> Self {
        Self {
            success: true,
            message: SUBMITTED_MESSAGE.to_string(),
            data: Some(EnvelopeData::Submitted {
                application_id: receipt.application_id,
                candidate_id: receipt.candidate_id,
            }),
            error: None,
        }
    }

    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            success: false,
            message: INVALID_MESSAGE.to_string(),
            data: Some(EnvelopeData::Invalid { errors }),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, diagnostic: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: diagnostic,
        }
    }
}

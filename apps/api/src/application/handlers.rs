//! Axum route handlers for the Applications API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::application::envelope::ResultEnvelope;
use crate::application::validation::{validate_application, validate_field, ValidationMode};
use crate::errors::AppError;
use crate::models::application::{ApplicationFields, Field, FieldValue, ResumeFile};
use crate::state::AppState;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const FALLBACK_RESUME_NAME: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCheckRequest {
    pub field: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub file: Option<FileMetadata>,
}

/// What the browser knows about a selected file before uploading it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub content_type: String,
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub struct FieldCheckResponse {
    pub field: Field,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
///
/// Reads the multipart application form, validates every field, and forwards
/// the application to the tracker. Validation failures never reach the tracker.
pub async fn handle_submit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultEnvelope>, AppError> {
    let submission_id = Uuid::new_v4();
    submit_application(state, multipart)
        .instrument(info_span!("submission", %submission_id))
        .await
}

async fn submit_application(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultEnvelope>, AppError> {
    let multipart = multipart.map_err(|e| invalid_form(e.body_text()))?;
    let fields = read_application(multipart).await?;

    let errors = validate_application(&fields);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let receipt = state.tracker.submit(&fields).await?;
    info!(
        candidate_id = receipt.candidate_id,
        application_id = receipt.application_id,
        "Application submitted"
    );
    Ok(Json(ResultEnvelope::submitted(&receipt)))
}

/// POST /api/v1/applications/validate
///
/// Advisory single-field check for immediate feedback while the form is
/// being filled in. Submission re-validates everything regardless.
pub async fn handle_validate_field(
    Json(request): Json<FieldCheckRequest>,
) -> Result<Json<FieldCheckResponse>, AppError> {
    let field = Field::from_name(&request.field)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown field '{}'", request.field)))?;

    let value = match (field, &request.file, request.value.as_deref()) {
        (Field::Resume, Some(file), _) => FieldValue::File {
            content_type: &file.content_type,
            size: file.size,
        },
        (Field::Resume, None, _) | (_, _, None) => FieldValue::Missing,
        (_, _, Some(text)) => FieldValue::Text(text),
    };

    let error = validate_field(field, value, ValidationMode::Interactive).map(|e| e.message);
    Ok(Json(FieldCheckResponse {
        field,
        valid: error.is_none(),
        error,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Form decoding
// ────────────────────────────────────────────────────────────────────────────

/// Collects the known form parts into `ApplicationFields`.
/// Unknown parts are skipped; a repeated part overwrites the earlier one.
async fn read_application(mut multipart: Multipart) -> Result<ApplicationFields, AppError> {
    let mut fields = ApplicationFields::default();

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| invalid_form(e.body_text()))?
    {
        let Some(field) = part.name().and_then(Field::from_name) else {
            continue;
        };

        if field == Field::Resume {
            let file_name = part.file_name().unwrap_or_default().to_string();
            let content_type = part
                .content_type()
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string();
            let content = part
                .bytes()
                .await
                .map_err(|e| invalid_form(e.body_text()))?;

            // Browsers send an empty, unnamed part when no file was chosen.
            fields.resume = if file_name.is_empty() && content.is_empty() {
                None
            } else {
                Some(ResumeFile {
                    file_name: if file_name.is_empty() {
                        FALLBACK_RESUME_NAME.to_string()
                    } else {
                        file_name
                    },
                    content_type,
                    content,
                })
            };
            continue;
        }

        let text = part.text().await.map_err(|e| invalid_form(e.body_text()))?;
        set_text(&mut fields, field, text);
    }

    Ok(fields)
}

fn set_text(fields: &mut ApplicationFields, field: Field, text: String) {
    match field {
        Field::FirstName => fields.first_name = text,
        Field::LastName => fields.last_name = text,
        Field::Email => fields.email = text,
        Field::Phone => fields.phone = text,
        Field::LinkedinUrl => fields.linkedin_url = non_blank(text),
        Field::CoverLetter => fields.cover_letter = non_blank(text),
        Field::Resume => {}
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn invalid_form(detail: String) -> AppError {
    AppError::BadRequest(format!("Invalid form submission: {detail}"))
}

//! Request body for the Harvest `POST /candidates` endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::harvest::SubmissionError;
use crate::models::application::{ApplicationFields, Field};

pub const COVER_LETTER_FILENAME: &str = "cover_letter.txt";
pub const COVER_LETTER_CONTENT_TYPE: &str = "text/plain";

#[derive(Debug, Clone, Serialize)]
pub struct CandidatePayload {
    pub first_name: String,
    pub last_name: String,
    pub email_addresses: Vec<EmailAddress>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub social_media_addresses: Vec<SocialMediaAddress>,
    pub applications: Vec<ApplicationRef>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    Personal,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailAddress {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: EmailType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneType {
    Mobile,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhoneNumber {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: PhoneType,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialMediaAddress {
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationRef {
    pub job_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    Resume,
    CoverLetter,
}

#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: AttachmentType,
    /// Base64 (standard alphabet, padded).
    pub content: String,
    pub content_type: String,
}

impl CandidatePayload {
    /// Shapes validated form input into a candidate record with one
    /// application for `job_id`. The resume is always the first attachment.
    pub fn build(fields: &ApplicationFields, job_id: u64) -> Result<Self, SubmissionError> {
        let first_name = required(&fields.first_name, Field::FirstName)?;
        let last_name = required(&fields.last_name, Field::LastName)?;
        let email = required(&fields.email, Field::Email)?;
        let phone = required(&fields.phone, Field::Phone)?;
        let resume = fields
            .resume
            .as_ref()
            .ok_or(SubmissionError::IncompleteApplication(Field::Resume))?;

        let mut attachments = vec![Attachment {
            filename: resume.file_name.clone(),
            kind: AttachmentType::Resume,
            content: STANDARD.encode(&resume.content),
            content_type: resume.content_type.clone(),
        }];

        // The letter body is forwarded verbatim; only blank letters are dropped.
        if let Some(letter) = fields
            .cover_letter
            .as_deref()
            .filter(|letter| !letter.trim().is_empty())
        {
            attachments.push(Attachment {
                filename: COVER_LETTER_FILENAME.to_string(),
                kind: AttachmentType::CoverLetter,
                content: STANDARD.encode(letter),
                content_type: COVER_LETTER_CONTENT_TYPE.to_string(),
            });
        }

        let social_media_addresses = optional(fields.linkedin_url.as_deref())
            .map(|url| SocialMediaAddress {
                value: url.to_string(),
            })
            .into_iter()
            .collect();

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email_addresses: vec![EmailAddress {
                value: email.to_string(),
                kind: EmailType::Personal,
            }],
            phone_numbers: vec![PhoneNumber {
                value: phone.to_string(),
                kind: PhoneType::Mobile,
            }],
            social_media_addresses,
            applications: vec![ApplicationRef { job_id }],
            attachments,
        })
    }
}

fn required(value: &str, field: Field) -> Result<&str, SubmissionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SubmissionError::IncompleteApplication(field));
    }
    Ok(trimmed)
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ResumeFile;
    use bytes::Bytes;
    use serde_json::json;

    fn ada() -> ApplicationFields {
        ApplicationFields {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            linkedin_url: None,
            cover_letter: None,
            resume: Some(ResumeFile {
                file_name: "ada.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                content: Bytes::from_static(b"%PDF"),
            }),
        }
    }

    #[test]
    fn test_minimal_payload() {
        let payload = CandidatePayload::build(&ada(), 4012).unwrap();
        assert_eq!(payload.first_name, "Ada");
        assert_eq!(payload.email_addresses.len(), 1);
        assert_eq!(payload.phone_numbers.len(), 1);
        assert!(payload.social_media_addresses.is_empty());
        assert_eq!(payload.attachments.len(), 1);
        assert_eq!(payload.applications[0].job_id, 4012);
    }

    #[test]
    fn test_payload_wire_format() {
        let value = serde_json::to_value(CandidatePayload::build(&ada(), 4012).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email_addresses": [{ "value": "ada@example.com", "type": "personal" }],
                "phone_numbers": [{ "value": "(555) 123-4567", "type": "mobile" }],
                "social_media_addresses": [],
                "applications": [{ "job_id": 4012 }],
                "attachments": [{
                    "filename": "ada.pdf",
                    "type": "resume",
                    "content": "JVBERg==",
                    "content_type": "application/pdf"
                }]
            })
        );
    }

    #[test]
    fn test_cover_letter_follows_resume() {
        let mut fields = ada();
        fields.cover_letter = Some("Hello".to_string());
        fields.linkedin_url = Some("https://www.linkedin.com/in/ada".to_string());

        let payload = CandidatePayload::build(&fields, 1).unwrap();
        assert_eq!(payload.attachments.len(), 2);
        assert_eq!(payload.attachments[0].kind, AttachmentType::Resume);

        let letter = &payload.attachments[1];
        assert_eq!(letter.kind, AttachmentType::CoverLetter);
        assert_eq!(letter.filename, "cover_letter.txt");
        assert_eq!(letter.content_type, "text/plain");
        assert_eq!(letter.content, "SGVsbG8=");

        assert_eq!(payload.social_media_addresses.len(), 1);
        assert_eq!(
            payload.social_media_addresses[0].value,
            "https://www.linkedin.com/in/ada"
        );
    }

    #[test]
    fn test_attachment_kinds_on_the_wire() {
        let mut fields = ada();
        fields.cover_letter = Some("Hello".to_string());
        let value = serde_json::to_value(CandidatePayload::build(&fields, 1).unwrap()).unwrap();
        let kinds: Vec<&str> = value["attachments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|attachment| attachment["type"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, ["resume", "cover_letter"]);
    }

    #[test]
    fn test_blank_optionals_are_dropped() {
        let mut fields = ada();
        fields.cover_letter = Some("   ".to_string());
        fields.linkedin_url = Some(String::new());
        let payload = CandidatePayload::build(&fields, 1).unwrap();
        assert_eq!(payload.attachments.len(), 1);
        assert!(payload.social_media_addresses.is_empty());
    }

    #[test]
    fn test_missing_resume_is_rejected() {
        let mut fields = ada();
        fields.resume = None;
        assert!(matches!(
            CandidatePayload::build(&fields, 1),
            Err(SubmissionError::IncompleteApplication(Field::Resume))
        ));
    }

    #[test]
    fn test_blank_required_field_is_rejected() {
        let mut fields = ada();
        fields.email = "  ".to_string();
        assert!(matches!(
            CandidatePayload::build(&fields, 1),
            Err(SubmissionError::IncompleteApplication(Field::Email))
        ));
    }
}

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A single form field of the application, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    LinkedinUrl,
    CoverLetter,
    Resume,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::LinkedinUrl,
        Field::CoverLetter,
        Field::Resume,
    ];

    /// Wire name used by the multipart form and the JSON error list.
    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::LinkedinUrl => "linkedinUrl",
            Field::CoverLetter => "coverLetter",
            Field::Resume => "resume",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uploaded resume as received from the form.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub content: Bytes,
}

impl ResumeFile {
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Raw applicant input for one submission. Lives for a single request.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: Option<String>,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeFile>,
}

/// Borrowed view of one field's value, shaped for the validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    File { content_type: &'a str, size: u64 },
}

impl ApplicationFields {
    pub fn value(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::FirstName => FieldValue::Text(&self.first_name),
            Field::LastName => FieldValue::Text(&self.last_name),
            Field::Email => FieldValue::Text(&self.email),
            Field::Phone => FieldValue::Text(&self.phone),
            Field::LinkedinUrl => text_or_missing(self.linkedin_url.as_deref()),
            Field::CoverLetter => text_or_missing(self.cover_letter.as_deref()),
            Field::Resume => match &self.resume {
                Some(file) => FieldValue::File {
                    content_type: &file.content_type,
                    size: file.size(),
                },
                None => FieldValue::Missing,
            },
        }
    }
}

fn text_or_missing(value: Option<&str>) -> FieldValue<'_> {
    value.map_or(FieldValue::Missing, FieldValue::Text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("middleName"), None);
    }

    #[test]
    fn test_field_serde_uses_wire_name() {
        let json = serde_json::to_string(&Field::LinkedinUrl).unwrap();
        assert_eq!(json, "\"linkedinUrl\"");
    }

    #[test]
    fn test_value_reports_resume_metadata() {
        let fields = ApplicationFields {
            resume: Some(ResumeFile {
                file_name: "cv.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                content: Bytes::from_static(b"%PDF-1.7"),
            }),
            ..Default::default()
        };
        assert_eq!(
            fields.value(Field::Resume),
            FieldValue::File {
                content_type: "application/pdf",
                size: 8
            }
        );
        assert_eq!(fields.value(Field::LinkedinUrl), FieldValue::Missing);
    }
}

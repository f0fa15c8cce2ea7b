// Applicant intake: form decoding, field validation, and the response envelope.
// Remote submission lives in `harvest`; nothing here talks to the network.

pub mod envelope;
pub mod handlers;
pub mod validation;

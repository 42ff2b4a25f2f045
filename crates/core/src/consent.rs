//! Consent-flow payload validation.
//!
//! The survey client renders the consent document itself (canvas
//! rasterization over an image template) and posts the result as a
//! Base64 PDF alongside the signature images. The server validates the
//! payloads before persisting them; it never renders PDFs.
//!
//! Also holds the identity checks for the optional personal-info record
//! collected on explicit consent (name, birth date, phone).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::CoreError;

/// Maximum decoded size of one signature image: 2 MiB.
pub const MAX_SIGNATURE_BYTES: usize = 2 * 1024 * 1024;

/// Maximum decoded size of a stored consent PDF: 20 MiB.
pub const MAX_PDF_BYTES: usize = 20 * 1024 * 1024;

/// Maximum participant name length.
const MAX_NAME_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Consent draft payload
// ---------------------------------------------------------------------------

/// Session-scoped draft of consent data, stored verbatim until the
/// client finalizes the PDF. Signature fields are Base64 images.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsentDraftPayload {
    pub participant_name: Option<String>,
    /// Signature images collected so far, in form order.
    #[serde(default)]
    pub signatures: Vec<String>,
    pub signed_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Payload validation
// ---------------------------------------------------------------------------

/// Decode a Base64 payload, tolerating a `data:<mime>;base64,` prefix.
pub fn decode_base64_payload(value: &str) -> Result<Vec<u8>, CoreError> {
    let encoded = match value.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => value,
    };
    BASE64
        .decode(encoded.trim())
        .map_err(|_| CoreError::Validation("Payload is not valid Base64".into()))
}

/// Validate a signature image: decodes, is non-empty, and fits the cap.
pub fn validate_signature_image(value: &str) -> Result<(), CoreError> {
    let bytes = decode_base64_payload(value)?;
    if bytes.is_empty() {
        return Err(CoreError::Validation("Signature image is empty".into()));
    }
    if bytes.len() > MAX_SIGNATURE_BYTES {
        return Err(CoreError::Validation(format!(
            "Signature image exceeds {} bytes",
            MAX_SIGNATURE_BYTES
        )));
    }
    Ok(())
}

/// Validate and decode a stored consent PDF.
///
/// The document must decode from Base64, start with the `%PDF-` magic,
/// and fit the size cap. Returns the decoded bytes so callers can reuse
/// them (e.g. for ZIP export) without decoding twice.
pub fn validate_consent_pdf(value: &str) -> Result<Vec<u8>, CoreError> {
    let bytes = decode_base64_payload(value)?;
    if !bytes.starts_with(b"%PDF-") {
        return Err(CoreError::Validation(
            "Consent document is not a PDF".into(),
        ));
    }
    if bytes.len() > MAX_PDF_BYTES {
        return Err(CoreError::Validation(format!(
            "Consent PDF exceeds {} bytes",
            MAX_PDF_BYTES
        )));
    }
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Identity checks (personal info)
// ---------------------------------------------------------------------------

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Mobile number with optional separators: 010-1234-5678, 01012345678.
    RE.get_or_init(|| Regex::new(r"^01[016789]-?\d{3,4}-?\d{4}$").unwrap())
}

/// Validate a participant name for the personal-info record.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name exceeds {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a participant phone number.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if !phone_regex().is_match(phone.trim()) {
        return Err(CoreError::Validation(format!(
            "Invalid phone number: {phone}"
        )));
    }
    Ok(())
}

/// Normalize a phone number to digits only, so the duplicate-identity
/// constraint treats `010-1234-5678` and `01012345678` as the same tuple.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a participant birth date: in the past, not absurdly old.
pub fn validate_birth_date(birth_date: NaiveDate) -> Result<(), CoreError> {
    let today = Utc::now().date_naive();
    if birth_date >= today {
        return Err(CoreError::Validation(
            "Birth date must be in the past".into(),
        ));
    }
    if birth_date < NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() {
        return Err(CoreError::Validation("Birth date is implausible".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tiny valid PDF header followed by junk, Base64-encoded.
    fn tiny_pdf_b64() -> String {
        BASE64.encode(b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n%%EOF")
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let encoded = format!("data:image/png;base64,{}", BASE64.encode(b"\x89PNG\r\n"));
        let bytes = decode_base64_payload(&encoded).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn bare_base64_accepted() {
        let bytes = decode_base64_payload(&BASE64.encode(b"hello")).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn invalid_base64_rejected() {
        assert!(decode_base64_payload("not base64 at all!!!").is_err());
    }

    #[test]
    fn empty_signature_rejected() {
        assert!(validate_signature_image("").is_err());
    }

    #[test]
    fn oversize_signature_rejected() {
        let payload = BASE64.encode(vec![0u8; MAX_SIGNATURE_BYTES + 1]);
        let err = validate_signature_image(&payload).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn signature_at_the_cap_accepted() {
        let payload = BASE64.encode(vec![0u8; MAX_SIGNATURE_BYTES]);
        validate_signature_image(&payload).unwrap();
    }

    #[test]
    fn oversize_pdf_rejected() {
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.resize(MAX_PDF_BYTES + 1, 0);
        let err = validate_consent_pdf(&BASE64.encode(&bytes)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn pdf_magic_required() {
        let not_pdf = BASE64.encode(b"plain text file");
        let err = validate_consent_pdf(&not_pdf).unwrap_err();
        assert!(err.to_string().contains("not a PDF"));
    }

    #[test]
    fn valid_pdf_decodes() {
        let bytes = validate_consent_pdf(&tiny_pdf_b64()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn phone_with_and_without_separators() {
        validate_phone("010-1234-5678").unwrap();
        validate_phone("01012345678").unwrap();
        validate_phone("010-123-4567").unwrap();
        assert!(validate_phone("02-1234-5678").is_err());
        assert!(validate_phone("12345").is_err());
    }

    #[test]
    fn phone_normalization_strips_separators() {
        assert_eq!(normalize_phone("010-1234-5678"), "01012345678");
        assert_eq!(normalize_phone("01012345678"), "01012345678");
    }

    #[test]
    fn birth_date_bounds() {
        assert!(validate_birth_date(NaiveDate::from_ymd_opt(1990, 3, 14).unwrap()).is_ok());
        assert!(validate_birth_date(NaiveDate::from_ymd_opt(1899, 12, 31).unwrap()).is_err());
        let tomorrow = Utc::now().date_naive() + chrono::Duration::days(1);
        assert!(validate_birth_date(tomorrow).is_err());
    }

    #[test]
    fn name_bounds() {
        validate_name("Kim Jiyoung").unwrap();
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(200)).is_err());
    }
}

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use roster_worker::error::ApiError;
use roster_worker::models::{DEFAULT_AGENT_ID, ErrorResponse};
use roster_worker::upload::{parse_start_date, resolve_agent_id, validate_filename};

#[test]
fn accepts_pdf_filenames() {
    assert!(validate_filename("roster.pdf").is_ok());
    assert!(validate_filename("FL-A 2025.pdf").is_ok());
}

#[test]
fn empty_filename_is_a_bad_request() {
    let error = validate_filename("").expect_err("empty filename should fail");
    assert_eq!(error.status_code(), 400);
}

#[test]
fn non_pdf_filename_is_unsupported_media() {
    for filename in ["roster.docx", "roster.PDF", "roster.pdf.txt"] {
        let error = validate_filename(filename).expect_err("non-pdf should fail");
        assert_eq!(error.status_code(), 415, "filename: {filename}");
    }
}

#[test]
fn agent_id_falls_back_to_default() {
    assert_eq!(resolve_agent_id(None, DEFAULT_AGENT_ID), "AGENT_ID_DEFAULT");
    assert_eq!(resolve_agent_id(Some("   "), "FROM_ENV"), "FROM_ENV");
    assert_eq!(resolve_agent_id(Some(" 12345 "), DEFAULT_AGENT_ID), "12345");
}

#[test]
fn start_date_is_optional_but_validated() {
    assert_eq!(parse_start_date(None).expect("absent is fine"), None);
    assert_eq!(parse_start_date(Some("")).expect("blank is fine"), None);
    assert_eq!(
        parse_start_date(Some("2025-09-01")).expect("valid date"),
        NaiveDate::from_ymd_opt(2025, 9, 1)
    );

    let error = parse_start_date(Some("01/09/2025")).expect_err("wrong format should fail");
    assert_eq!(error.status_code(), 400);
    assert!(error.message().contains("01/09/2025"));
}

#[test]
fn unreadable_document_maps_to_server_error() {
    let error = ApiError::from(roster_extract::ExtractError::NoPagesSelected);
    assert_eq!(error.status_code(), 500);
    assert!(error.message().starts_with("PDF processing error:"));
}

#[test]
fn error_body_has_single_error_field() {
    let body = serde_json::to_value(ErrorResponse {
        error: "invalid filename".to_string(),
    })
    .expect("serializes");
    assert_eq!(body, serde_json::json!({ "error": "invalid filename" }));
}

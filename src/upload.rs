use chrono::NaiveDate;
use roster_extract::{ExtractOptions, RosterExtraction, extract_roster_from_bytes};
use worker::{FormData, FormEntry, Request};

use crate::error::ApiError;
use crate::models::{AGENT_ID_FIELD, FILE_FIELD, PDF_EXTENSION, START_DATE_FIELD};

/// A validated roster upload, ready for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub agent_id: String,
    pub start_date: Option<NaiveDate>,
}

pub fn validate_filename(filename: &str) -> Result<(), ApiError> {
    if filename.is_empty() {
        return Err(ApiError::BadRequest("invalid filename".to_string()));
    }
    if !filename.ends_with(PDF_EXTENSION) {
        return Err(ApiError::UnsupportedMediaType(
            "unsupported file type, please upload a PDF".to_string(),
        ));
    }
    Ok(())
}

/// Blank or missing agent ids fall back to `default_agent_id`.
pub fn resolve_agent_id(field: Option<&str>, default_agent_id: &str) -> String {
    field
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default_agent_id)
        .to_string()
}

pub fn parse_start_date(field: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    let Some(raw) = field.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|error| ApiError::BadRequest(format!("invalid start_date '{raw}': {error}")))
}

fn text_field(form: &FormData, name: &str) -> Option<String> {
    match form.get(name) {
        Some(FormEntry::Field(value)) => Some(value),
        _ => None,
    }
}

pub async fn read_upload(req: &mut Request, default_agent_id: &str) -> Result<RosterUpload, ApiError> {
    let form = req
        .form_data()
        .await
        .map_err(|error| ApiError::BadRequest(format!("expected a multipart form: {error}")))?;

    let Some(FormEntry::File(file)) = form.get(FILE_FIELD) else {
        return Err(ApiError::BadRequest(
            "no 'file' part was provided".to_string(),
        ));
    };

    let filename = file.name();
    validate_filename(&filename)?;

    let agent_id = resolve_agent_id(text_field(&form, AGENT_ID_FIELD).as_deref(), default_agent_id);
    let start_date = parse_start_date(text_field(&form, START_DATE_FIELD).as_deref())?;
    let bytes = file.bytes().await?;

    Ok(RosterUpload {
        filename,
        bytes,
        agent_id,
        start_date,
    })
}

pub fn convert_upload(upload: &RosterUpload) -> Result<RosterExtraction, ApiError> {
    let options = ExtractOptions {
        agent_id: upload.agent_id.clone(),
        start_date: upload.start_date,
        pages: None,
    };

    let extraction = extract_roster_from_bytes(&upload.bytes, &options)?;

    worker::console_log!(
        "roster extraction completed: file={}, cells={}, shifts={}, errors={}",
        upload.filename,
        extraction.logs.total_cells_detected,
        extraction.logs.shifts_converted,
        extraction.logs.errors.len()
    );

    Ok(extraction)
}

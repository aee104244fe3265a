use serde::{Deserialize, Serialize};

pub use roster_extract::DEFAULT_AGENT_ID;

pub const AGENT_ID_ENV: &str = "DEFAULT_AGENT_ID";
pub const FILE_FIELD: &str = "file";
pub const AGENT_ID_FIELD: &str = "agent_id";
pub const START_DATE_FIELD: &str = "start_date";
pub const PDF_EXTENSION: &str = ".pdf";

pub const INDEX_HTML: &str = "<h1>Roster to JSON Converter</h1>\
<p>POST your roster PDF as the <code>file</code> field of a multipart form to \
<code>/upload</code>. Optional fields: <code>agent_id</code>, <code>start_date</code> \
(YYYY-MM-DD).</p>";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

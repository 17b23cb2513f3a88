use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// One persisted scrape result: the page URL and its filtered markdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRecord {
    /// URL of the page
    pub url: String,

    /// Filtered markdown content
    pub content: String,
}

impl ScrapeRecord {
    /// Create a new scrape record
    pub fn new(url: String, content: String) -> Self {
        Self { url, content }
    }
}

/// Serialize records as indented JSON
///
/// Output uses 4-space indentation and leaves non-ASCII characters literal.
/// `None` serializes to the literal `null`, the contract for a failed run.
pub fn to_json(records: Option<&[ScrapeRecord]>) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;

    Ok(String::from_utf8(buf).expect("serde_json emits valid UTF-8"))
}

/// Write records (or `null` on a failed run) to the output file
pub fn write_json(path: &Path, records: Option<&[ScrapeRecord]>) -> Result<(), Box<dyn Error>> {
    let json = to_json(records)?;
    std::fs::write(path, json)?;

    Ok(())
}

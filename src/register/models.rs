// src/register/models.rs
use serde::{Deserialize, Serialize};

/// Text every genuine register page carries. Matched case-insensitively.
pub const REGISTER_MARKER: &str = "FMCSA Register";

/// Sentinel stored in `Entry::decided` when no date could be recovered.
pub const UNKNOWN_DATE: &str = "N/A";

/// One category section of the register, keyed by its anchor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub code: &'static str,
    pub label: &'static str,
}

/// The register's categories, in output order.
pub static CATEGORIES: &[CategoryDescriptor] = &[
    CategoryDescriptor { code: "NC", label: "NAME CHANGE" },
    CategoryDescriptor { code: "CPL", label: "CERTIFICATE, PERMIT, LICENSE" },
    CategoryDescriptor { code: "CX2", label: "CERTIFICATE OF REGISTRATION" },
    CategoryDescriptor { code: "DIS", label: "DISMISSAL" },
    CategoryDescriptor { code: "WDN", label: "WITHDRAWAL" },
    CategoryDescriptor { code: "REV", label: "REVOCATION" },
    CategoryDescriptor { code: "TRN", label: "TRANSFERS" },
    CategoryDescriptor { code: "GDN", label: "GRANT DECISION NOTICES" },
];

/// Fetched register HTML, tagged with whether it carries the register marker.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub html: String,
    pub has_marker: bool,
}

impl RawDocument {
    pub fn new(html: String) -> Self {
        Self::with_marker(html, REGISTER_MARKER)
    }

    pub fn with_marker(html: String, marker: &str) -> Self {
        let has_marker = html.to_lowercase().contains(&marker.to_lowercase());
        Self { html, has_marker }
    }
}

/// A single register decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub number: String,
    pub title: String,
    pub decided: String,
    pub category: String,
}

/// Deduplicated entries from one register page, with the request date echoed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub entries: Vec<Entry>,
    pub count: usize,
    pub source_date: String,
}

impl ExtractionResult {
    pub fn new(entries: Vec<Entry>, source_date: &str) -> Self {
        Self {
            count: entries.len(),
            entries,
            source_date: source_date.to_string(),
        }
    }
}

/// JSON body handed to whoever consumes the extraction (stdout, storage, UI).
///
/// Success: `{ success, count, date, entries }`.
/// Failure: `{ success: false, error, entries: [] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub entries: Vec<Entry>,
}

impl RegisterResponse {
    pub fn success(result: &ExtractionResult) -> Self {
        Self {
            success: true,
            count: Some(result.count),
            date: Some(result.source_date.clone()),
            error: None,
            entries: result.entries.clone(),
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            count: None,
            date: None,
            error: Some(error.to_string()),
            entries: Vec::new(),
        }
    }
}

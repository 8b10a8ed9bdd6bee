// src/extractors/pipeline.rs
use scraper::Html;

use crate::extractors::dedup::dedupe_entries;
use crate::extractors::record::RecordExtractor;
use crate::extractors::section::SectionLocator;
use crate::register::models::{
    CategoryDescriptor, Entry, ExtractionResult, RawDocument, CATEGORIES, REGISTER_MARKER,
};
use crate::utils::error::ExtractError;

/// What one category contributed to an extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    Found {
        category: CategoryDescriptor,
        entries: Vec<Entry>,
    },
    NotFound {
        category: CategoryDescriptor,
        reason: String,
    },
}

/// Turns a fetched register page into a deduplicated list of entries.
///
/// Holds no state between calls; one instance can serve any number of
/// documents, concurrently or not.
pub struct RegisterExtractor<'c> {
    catalog: &'c [CategoryDescriptor],
    records: RecordExtractor,
}

impl RegisterExtractor<'static> {
    pub fn new() -> Self {
        Self::with_catalog(CATEGORIES)
    }
}

impl<'c> RegisterExtractor<'c> {
    pub fn with_catalog(catalog: &'c [CategoryDescriptor]) -> Self {
        Self {
            catalog,
            records: RecordExtractor::new(),
        }
    }

    /// Extracts every category's entries from `document`.
    ///
    /// Fails only when the page is not a register page at all; missing
    /// sections and malformed records are skipped. `source_date` is echoed
    /// into the result untouched.
    pub fn extract(&self, document: &RawDocument, source_date: &str) -> Result<ExtractionResult, ExtractError> {
        if !document.has_marker {
            tracing::error!("Document ({} bytes) lacks the '{}' marker", document.html.len(), REGISTER_MARKER);
            return Err(ExtractError::UnexpectedDocument(format!(
                "'{}' marker not found; the fetch likely returned an error page",
                REGISTER_MARKER
            )));
        }

        let parsed = Html::parse_document(&document.html);

        let mut collected = Vec::new();
        for outcome in self.extract_categories(&parsed) {
            match outcome {
                CategoryOutcome::Found { category, entries } => {
                    tracing::info!("{} ({}): {} records", category.code, category.label, entries.len());
                    collected.extend(entries);
                }
                CategoryOutcome::NotFound { category, reason } => {
                    tracing::warn!("Skipping {} ({}): {}", category.code, category.label, reason);
                }
            }
        }

        let before = collected.len();
        let entries = dedupe_entries(collected);
        if entries.len() < before {
            tracing::info!("Removed {} duplicate records", before - entries.len());
        }

        tracing::info!("Extracted {} register entries for {}", entries.len(), source_date);
        Ok(ExtractionResult::new(entries, source_date))
    }

    /// Runs locator and record extraction per category, in catalog order.
    pub fn extract_categories(&self, document: &Html) -> Vec<CategoryOutcome> {
        let locator = SectionLocator::new(self.catalog);

        self.catalog
            .iter()
            .map(|category| match locator.locate(document, category) {
                Ok(section) => CategoryOutcome::Found {
                    category: *category,
                    entries: self.records.extract(&section),
                },
                Err(e) => CategoryOutcome::NotFound {
                    category: *category,
                    reason: e.to_string(),
                },
            })
            .collect()
    }
}

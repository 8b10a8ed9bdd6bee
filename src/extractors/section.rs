// src/extractors/section.rs

// --- Imports ---
use crate::extractors::dom;
use crate::register::models::CategoryDescriptor;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
// Category sections are introduced by <a name="CODE"> markers.
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[name]").expect("Failed to compile ANCHOR_SELECTOR")
});

// --- Data Structures ---

/// How a section's table was reached from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStrategy {
    /// The table is the anchor's next element sibling.
    ImmediateSibling,
    /// The first table after the anchor's enclosing table (or after the anchor
    /// itself when it is not inside one).
    FollowingTable,
}

/// The data table belonging to one category in one parsed document.
#[derive(Debug, Clone, Copy)]
pub struct SectionHandle<'a> {
    pub category: CategoryDescriptor,
    pub table: ElementRef<'a>,
    pub strategy: TableStrategy,
}

// --- Locator ---
pub struct SectionLocator<'c> {
    catalog: &'c [CategoryDescriptor],
}

impl<'c> SectionLocator<'c> {
    pub fn new(catalog: &'c [CategoryDescriptor]) -> Self {
        Self { catalog }
    }

    /// Finds the table for `category`.
    ///
    /// Only the first anchor named after the category is considered. Both a
    /// missing anchor and an anchor with no reachable table come back as
    /// `ExtractError::SectionNotFound`.
    pub fn locate<'a>(
        &self,
        document: &'a Html,
        category: &CategoryDescriptor,
    ) -> Result<SectionHandle<'a>, ExtractError> {
        let anchor = dom::find_first_by_attr(document, &ANCHOR_SELECTOR, "name", category.code)
            .ok_or_else(|| ExtractError::SectionNotFound(format!("anchor '{}' missing", category.code)))?;
        tracing::trace!("Found anchor for {} ({})", category.code, category.label);

        let (table, strategy) = self.table_for_anchor(anchor)
            .ok_or_else(|| ExtractError::SectionNotFound(format!("no table after anchor '{}'", category.code)))?;
        tracing::debug!("Located {} table via {:?}", category.code, strategy);

        Ok(SectionHandle {
            category: *category,
            table,
            strategy,
        })
    }

    /// Tries the immediate-sibling layout first, then falls back to the
    /// next-table layout.
    fn table_for_anchor<'a>(&self, anchor: ElementRef<'a>) -> Option<(ElementRef<'a>, TableStrategy)> {
        if let Some(sibling) = dom::next_sibling_element(anchor) {
            if dom::is_tag(&sibling, "table") {
                return Some((sibling, TableStrategy::ImmediateSibling));
            }
        }

        let start = dom::closest_ancestor(anchor, "table").unwrap_or(anchor);
        // Stop at the next category's anchor so an empty section never
        // borrows its neighbour's table.
        dom::next_following_match(
            start,
            |el| dom::is_tag(el, "table"),
            |el| self.is_category_anchor(el),
        )
        .map(|table| (table, TableStrategy::FollowingTable))
    }

    fn is_category_anchor(&self, element: &ElementRef) -> bool {
        dom::is_tag(element, "a")
            && element
                .value()
                .attr("name")
                .is_some_and(|name| self.catalog.iter().any(|c| c.code == name))
    }
}

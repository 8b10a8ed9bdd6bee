// src/extractors/record.rs

// --- Imports ---
use crate::extractors::dom;
use crate::extractors::section::SectionHandle;
use crate::register::models::{Entry, UNKNOWN_DATE};
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

// --- CSS Selectors (Lazy Static) ---
// Each logical record starts at a row header cell. Row containers around it
// are unreliable in the register markup, so they are never consulted.
static ROW_HEADER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"th[scope="row"]"#).expect("Failed to compile ROW_HEADER_SELECTOR")
});

// --- Regex Patterns ---
static DECISION_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").expect("Failed to compile DECISION_DATE_RE")
});

// --- Record Extractor ---
pub struct RecordExtractor;

impl RecordExtractor {
    pub fn new() -> Self { Self {} }

    /// Builds one entry per row header cell in the section's table, in
    /// document order. Header cells that do not yield a docket number and a
    /// title are dropped.
    pub fn extract(&self, section: &SectionHandle) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut dropped = 0;
        tracing::trace!("Extracting {} records via {:?}", section.category.code, section.strategy);

        for header in section.table.select(&ROW_HEADER_SELECTOR) {
            // Headers of tables nested inside a cell belong to that cell.
            if dom::closest_ancestor(header, "table").map(|t| t.id()) != Some(section.table.id()) {
                tracing::trace!("Skipping nested row header in {}", section.category.code);
                continue;
            }
            match self.extract_record(header, section.category.label) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    dropped += 1;
                    tracing::debug!("Dropping record in {}: {}", section.category.code, e);
                }
            }
        }

        if dropped > 0 {
            tracing::debug!("{}: kept {} records, dropped {}", section.category.code, entries.len(), dropped);
        }
        entries
    }

    /// Reconstructs a single entry from a row header cell and the data cells
    /// that follow it, up to the next row header cell.
    pub fn extract_record(&self, header: ElementRef, label: &str) -> Result<Entry, ExtractError> {
        let number = dom::trimmed_text(&header);
        if number.is_empty() {
            return Err(ExtractError::MalformedRecord("row header cell has no docket number".to_string()));
        }

        let cells: Vec<String> = dom::collect_following_siblings(
            header,
            |el| dom::is_tag(el, "td"),
            |el| ROW_HEADER_SELECTOR.matches(el),
            None,
        )
        .iter()
        .map(dom::collapsed_text)
        .collect();

        let title = match cells.first() {
            Some(text) if !text.is_empty() => text.clone(),
            Some(_) => return Err(ExtractError::MalformedRecord(format!("{}: empty title cell", number))),
            None => return Err(ExtractError::MalformedRecord(format!("{}: no data cells", number))),
        };

        let decided = recover_date(&cells);

        Ok(Entry {
            number,
            title,
            decided,
            category: label.to_string(),
        })
    }
}

// --- Date Recovery ---

/// Picks the decision date out of a record's data cells (`cells[0]` is the
/// title).
///
/// The cell right after the title is preferred; otherwise every later cell
/// is scanned in order and the first date-shaped token wins. Falls back to
/// `"N/A"`.
pub fn recover_date(cells: &[String]) -> String {
    if let Some(date) = cells.get(1).and_then(|cell| find_date(cell)) {
        return date;
    }

    for (position, cell) in cells.iter().enumerate().skip(2) {
        if let Some(date) = find_date(cell) {
            tracing::trace!("Recovered decision date from shifted cell {}", position);
            return date;
        }
    }

    UNKNOWN_DATE.to_string()
}

fn find_date(text: &str) -> Option<String> {
    DECISION_DATE_RE.find(text).map(|m| m.as_str().to_string())
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::section::TableStrategy;
    use crate::register::models::CATEGORIES;
    use scraper::Html;

    fn cells(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn extract_from(html: &str, code: &str) -> Vec<Entry> {
        let document = Html::parse_document(html);
        let table_selector = Selector::parse("table").unwrap();
        let table = document.select(&table_selector).next().unwrap();
        let category = *CATEGORIES.iter().find(|c| c.code == code).unwrap();
        let section = SectionHandle { category, table, strategy: TableStrategy::ImmediateSibling };
        RecordExtractor::new().extract(&section)
    }

    #[test]
    fn test_date_in_next_cell() {
        assert_eq!(recover_date(&cells(&["ACME", "03/10/2024"])), "03/10/2024");
    }

    #[test]
    fn test_date_recovered_from_shifted_cell() {
        assert_eq!(recover_date(&cells(&["Some Carrier Co", "", "01/15/2024"])), "01/15/2024");
        assert_eq!(
            recover_date(&cells(&["Some Carrier Co", "pending", "n/a", "x", "Decided 02/01/2024"])),
            "02/01/2024"
        );
    }

    #[test]
    fn test_next_cell_preferred_over_later_cells() {
        assert_eq!(recover_date(&cells(&["A", "01/01/2024", "02/02/2024"])), "01/01/2024");
    }

    #[test]
    fn test_title_cell_is_not_a_date_source() {
        assert_eq!(recover_date(&cells(&["01/01/2024"])), "N/A");
        assert_eq!(recover_date(&cells(&["A", "1/5/24", "2024-01-05"])), "N/A");
        assert_eq!(recover_date(&[]), "N/A");
    }

    #[test]
    fn test_extracts_example_record() {
        let html = r#"<table><tr><th scope="row">MC-98765</th><td>ACME TRUCKING LLC</td><td>03/10/2024</td></tr></table>"#;
        let entries = extract_from(html, "REV");
        assert_eq!(
            entries,
            vec![Entry {
                number: "MC-98765".to_string(),
                title: "ACME TRUCKING LLC".to_string(),
                decided: "03/10/2024".to_string(),
                category: "REVOCATION".to_string(),
            }]
        );
    }

    #[test]
    fn test_rows_without_row_containers() {
        // No <tr> at all and a stray unclosed cell: every record still lands.
        let html = r#"<table>
            <th scope="row"> MC-1 </th><td>ALPHA   FREIGHT
               INC</td><td>01/02/2024</td>
            <th scope="row">MC-2</th><td>BETA LLC</td><td></td><td>01/03/2024
            <th scope="row">MC-3</th><td>GAMMA CO</td>
        </table>"#;
        let entries = extract_from(html, "NC");
        let summary: Vec<(&str, &str, &str)> = entries
            .iter()
            .map(|e| (e.number.as_str(), e.title.as_str(), e.decided.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("MC-1", "ALPHA FREIGHT INC", "01/02/2024"),
                ("MC-2", "BETA LLC", "01/03/2024"),
                ("MC-3", "GAMMA CO", "N/A"),
            ]
        );
        assert!(entries.iter().all(|e| e.category == "NAME CHANGE"));
    }

    #[test]
    fn test_date_scan_stops_at_next_record() {
        let html = r#"<table><tr>
            <th scope="row">MC-1</th><td>FIRST</td>
            <th scope="row">MC-2</th><td>SECOND</td><td>05/06/2024</td>
        </tr></table>"#;
        let entries = extract_from(html, "DIS");
        assert_eq!(entries[0].decided, "N/A");
        assert_eq!(entries[1].decided, "05/06/2024");
    }

    #[test]
    fn test_unclosed_rows_keep_record_boundaries() {
        let html = r#"<table>
            <tr><th scope="row">MC-10</th><td>ONE</td><td>01/01/2024</td>
            <tr><th scope="row">MC-11</th><td>TWO</td><td>02/02/2024</td>
        </table>"#;
        let entries = extract_from(html, "GDN");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].number, "MC-11");
        assert_eq!(entries[1].decided, "02/02/2024");
    }

    #[test]
    fn test_malformed_headers_are_dropped() {
        let html = r#"<table><tr>
            <th scope="row">MC-1</th>
            <th scope="row">   </th><td>NO NUMBER</td>
            <th scope="row">MC-3</th><td>  </td><td>01/01/2024</td>
            <th scope="row">MC-4</th><td>KEPT</td>
        </tr></table>"#;
        let entries = extract_from(html, "WDN");
        let numbers: Vec<&str> = entries.iter().map(|e| e.number.as_str()).collect();
        assert_eq!(numbers, vec!["MC-4"]);
    }

    #[test]
    fn test_header_without_siblings_is_malformed() {
        let document = Html::parse_document(r#"<table><tr><th scope="row">MC-1</th></tr></table>"#);
        let selector = Selector::parse("th").unwrap();
        let header = document.select(&selector).next().unwrap();
        let result = RecordExtractor::new().extract_record(header, "DISMISSAL");
        assert!(matches!(result, Err(ExtractError::MalformedRecord(_))));
    }

    #[test]
    fn test_nested_table_headers_are_not_records() {
        let html = r#"<table><tr>
            <th scope="row">MC-1</th>
            <td>ACME<table><tr><th scope="row">MC-9</th><td>INNER</td></tr></table></td>
            <td>03/10/2024</td>
        </tr></table>"#;
        let entries = extract_from(html, "REV");
        let numbers: Vec<&str> = entries.iter().map(|e| e.number.as_str()).collect();
        assert_eq!(numbers, vec!["MC-1"]);
        assert_eq!(entries[0].decided, "03/10/2024");
    }

    #[test]
    fn test_column_headers_are_not_records() {
        let html = r#"<table>
            <tr><th>Docket</th><th>Name</th><th>Decided</th></tr>
            <tr><th scope="row">MC-5</th><td>REAL</td><td>04/04/2024</td></tr>
        </table>"#;
        let entries = extract_from(html, "TRN");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].number, "MC-5");
    }
}

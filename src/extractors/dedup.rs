// src/extractors/dedup.rs
use std::collections::HashSet;

use crate::register::models::Entry;

/// Removes later entries whose `(number, title)` pair was already seen.
/// Category and decision date are ignored; survivors keep their order.
pub fn dedupe_entries(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|entry| seen.insert((entry.number.clone(), entry.title.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: &str, title: &str, decided: &str, category: &str) -> Entry {
        Entry {
            number: number.to_string(),
            title: title.to_string(),
            decided: decided.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_first_occurrence_survives() {
        let entries = vec![
            entry("MC-1", "ACME", "01/01/2024", "NAME CHANGE"),
            entry("MC-1", "ACME", "02/02/2024", "REVOCATION"),
        ];
        let deduped = dedupe_entries(entries);
        assert_eq!(deduped, vec![entry("MC-1", "ACME", "01/01/2024", "NAME CHANGE")]);
    }

    #[test]
    fn test_identity_needs_both_fields() {
        let entries = vec![
            entry("MC-1", "ACME", "N/A", "DISMISSAL"),
            entry("MC-1", "ACME HOLDINGS", "N/A", "DISMISSAL"),
            entry("MC-2", "ACME", "N/A", "DISMISSAL"),
        ];
        assert_eq!(dedupe_entries(entries.clone()), entries);
    }

    #[test]
    fn test_survivor_order_is_stable() {
        let entries = vec![
            entry("MC-3", "C", "N/A", "NAME CHANGE"),
            entry("MC-1", "A", "N/A", "NAME CHANGE"),
            entry("MC-3", "C", "N/A", "TRANSFERS"),
            entry("MC-2", "B", "N/A", "TRANSFERS"),
            entry("MC-1", "A", "N/A", "TRANSFERS"),
        ];
        let numbers: Vec<String> = dedupe_entries(entries).into_iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec!["MC-3", "MC-1", "MC-2"]);
    }
}

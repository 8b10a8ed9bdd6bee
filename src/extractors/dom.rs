// src/extractors/dom.rs
//! Small query layer over `scraper`'s tree.
//!
//! The locator and record extractor only need three capabilities: find an
//! element by attribute value, walk forward over sibling elements, and read
//! an element's text. Keeping them here means nothing else touches
//! `ego_tree` node plumbing directly.

use scraper::{ElementRef, Html, Selector};

/// First element matched by `selector` whose `attr` equals `value`, in document order.
pub fn find_first_by_attr<'a>(
    document: &'a Html,
    selector: &Selector,
    attr: &str,
    value: &str,
) -> Option<ElementRef<'a>> {
    document
        .select(selector)
        .find(|el| el.value().attr(attr) == Some(value))
}

pub fn is_tag(element: &ElementRef, tag: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(tag)
}

/// The next element sibling, skipping text and comment nodes.
pub fn next_sibling_element<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Walks forward from `start` over its following element siblings.
///
/// Siblings satisfying `qualifies` are collected until one satisfies `stop`
/// (which is not collected) or `limit` siblings have been collected.
/// Non-qualifying siblings are passed over.
pub fn collect_following_siblings<'a, Q, S>(
    start: ElementRef<'a>,
    qualifies: Q,
    stop: S,
    limit: Option<usize>,
) -> Vec<ElementRef<'a>>
where
    Q: Fn(&ElementRef<'a>) -> bool,
    S: Fn(&ElementRef<'a>) -> bool,
{
    let mut collected = Vec::new();
    for sibling in start.next_siblings().filter_map(ElementRef::wrap) {
        if limit.is_some_and(|k| collected.len() >= k) || stop(&sibling) {
            break;
        }
        if qualifies(&sibling) {
            collected.push(sibling);
        }
    }
    collected
}

/// Nearest ancestor with the given tag name.
pub fn closest_ancestor<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| is_tag(ancestor, tag))
}

/// First element satisfying `target` that comes after `element` in document
/// order, excluding `element`'s own descendants.
///
/// Returns `None` if an element satisfying `barrier` is reached first, or if
/// the matched element itself contains one.
pub fn next_following_match<'a, T, B>(element: ElementRef<'a>, target: T, barrier: B) -> Option<ElementRef<'a>>
where
    T: Fn(&ElementRef<'a>) -> bool,
    B: Fn(&ElementRef<'a>) -> bool,
{
    let mut current = *element;
    loop {
        for sibling in current.next_siblings() {
            let hit = sibling
                .descendants()
                .filter_map(ElementRef::wrap)
                .find(|el| target(el) || barrier(el));
            if let Some(el) = hit {
                if !target(&el) {
                    return None;
                }
                let guarded = el.descendants().filter_map(ElementRef::wrap).any(|d| barrier(&d));
                return if guarded { None } else { Some(el) };
            }
        }
        current = current.parent()?;
    }
}

/// Element text with leading and trailing whitespace removed.
pub fn trimmed_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Element text with every whitespace run reduced to one space, trimmed.
pub fn collapsed_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

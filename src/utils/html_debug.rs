// src/utils/html_debug.rs
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::error::AppError;

/// Patterns highlighted in the annotated register dump, with their highlight type.
static DEBUG_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r#"(?i)<a\b[^>]*\bname\s*=\s*["']?[A-Z0-9]+["']?[^>]*>"#, "anchor"),
        (r#"(?i)<th\b[^>]*\bscope\s*=\s*["']?row["']?[^>]*>"#, "header"),
        (r"\b\d{2}/\d{2}/\d{4}\b", "date"),
        (r"(?i)fmcsa\s+register", "marker"),
    ]
    .iter()
    .filter_map(|(pat, kind)| Regex::new(pat).ok().map(|re| (re, *kind)))
    .collect()
});

/// Wraps each highlighted byte range of `html` in a styled span.
/// Ranges overlapping an earlier one are dropped.
pub fn annotate_html(html: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    out.push_str(".highlight-anchor { background-color: #FFFF00; }\n");
    out.push_str(".highlight-header { background-color: #90EE90; }\n");
    out.push_str(".highlight-date { background-color: #ADD8E6; }\n");
    out.push_str(".highlight-marker { background-color: #FFA500; }\n");
    out.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    out.push_str("</style>\n</head>\n<body>\n");

    let mut sorted = highlights.to_vec();
    sorted.sort_by_key(|h| h.0);

    let mut last_pos = 0;
    for (start, end, kind) in sorted {
        if start < last_pos || end > html.len() || start >= end {
            continue;
        }
        out.push_str(&html[last_pos..start]);

        let css_class = match kind {
            "anchor" => "highlight-anchor",
            "header" => "highlight-header",
            "date" => "highlight-date",
            "marker" => "highlight-marker",
            _ => "highlight-custom",
        };
        out.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, kind
        ));
        out.push_str(&html[start..end]);
        out.push_str("</span>");
        last_pos = end;
    }

    out.push_str(&html[last_pos..]);
    out.push_str("\n</body>\n</html>");
    out
}

/// Saves the raw register HTML and an annotated copy into `debug_dir`.
pub fn save_register_debug(html: &str, debug_dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(debug_dir)?;

    let raw_path = debug_dir.join("raw_register.html");
    fs::write(&raw_path, html)?;
    tracing::info!("Saved raw register to: {}", raw_path.display());

    let highlights: Vec<(usize, usize, &str)> = DEBUG_PATTERNS
        .iter()
        .flat_map(|(re, kind)| re.find_iter(html).map(move |m| (m.start(), m.end(), *kind)))
        .collect();
    tracing::debug!("Annotating {} highlight ranges", highlights.len());

    let annotated_path = debug_dir.join("register_annotated.html");
    fs::write(&annotated_path, annotate_html(html, &highlights))?;
    tracing::info!("Saved annotated register to: {}", annotated_path.display());

    Ok(())
}

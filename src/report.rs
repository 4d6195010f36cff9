//! Site-list input parsing and CSV output rendering.
//!
//! The input is a newline-delimited listing of site identifiers; the output
//! is exactly two columns, `url` and `notes`, one row per input site.

use crate::types::SiteResult;

/// Parse a newline-delimited site listing. Lines are trimmed; blank lines
/// are ignored.
pub fn parse_site_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Render results as a two-column CSV with a `url,notes` header.
///
/// Rows appear in the order given (the runner has already restored input
/// order). Fields containing commas, quotes, or newlines are quoted.
pub fn to_csv(results: &[SiteResult]) -> String {
    let mut csv = String::from("url,notes\n");
    for result in results {
        csv.push_str(&format!(
            "{},{}\n",
            escape_csv(&result.url),
            escape_csv(&result.notes)
        ));
    }
    csv
}

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

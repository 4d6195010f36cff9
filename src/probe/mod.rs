//! Streaming external-link probe.
//!
//! Answers one question about a page: does it link out to a non-ignored
//! external domain? The body is streamed and rescanned as it accumulates,
//! returning on the first qualifying href and never reading past a fixed
//! byte cap — worst-case latency and bandwidth per page are bounded no
//! matter how large the page is.
//!
//! The href scan is a lightweight pattern match over the buffered bytes,
//! deliberately not a document parse: a parser would need the full document
//! before it could answer, which is exactly what the early exit avoids.

pub mod hosts;

use futures::StreamExt;

use crate::error::FinderError;
use crate::types::ProbeOutcome;

use hosts::{
    extract_host, is_absolute_capable, is_ignored_host, is_internal, is_skippable, normalize_host,
};

/// Maximum number of body bytes buffered before the probe gives up.
pub const MAX_HTML_BYTES: usize = 200_000;

/// Probe a page for its first qualifying outbound link.
///
/// Never fails: network and parse problems are logged and reported as a
/// negative outcome, the same as a page with no external links.
pub async fn probe_page(client: &reqwest::Client, page_url: &str) -> ProbeOutcome {
    match probe_inner(client, page_url, MAX_HTML_BYTES).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::debug!(url = page_url, error = %err, "probe failed");
            ProbeOutcome::negative()
        }
    }
}

async fn probe_inner(
    client: &reqwest::Client,
    page_url: &str,
    byte_cap: usize,
) -> Result<ProbeOutcome, FinderError> {
    let parsed = url::Url::parse(page_url)
        .map_err(|e| FinderError::InvalidSite(format!("{page_url}: {e}")))?;
    let page_host = parsed
        .host_str()
        .map(normalize_host)
        .ok_or_else(|| FinderError::InvalidSite(format!("no host in {page_url}")))?;

    // Error pages get scanned too; a 404 with outbound links still counts.
    let response = client
        .get(page_url)
        .send()
        .await
        .map_err(|e| FinderError::Http(format!("probe request failed: {e}")))?;

    let mut stream = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| FinderError::Http(format!("probe body read failed: {e}")))?;
        if chunk.is_empty() {
            break;
        }
        buffer.extend_from_slice(&chunk);
        if buffer.len() >= byte_cap {
            break;
        }
        let text = String::from_utf8_lossy(&buffer);
        if let Some(link) = first_external_link(&text, &page_host) {
            // Dropping the stream here closes the connection without
            // reading the rest of the body.
            tracing::trace!(url = page_url, link = %link, bytes = buffer.len(), "external link found");
            return Ok(ProbeOutcome::hit(link));
        }
    }

    // Final pass over exactly what was buffered.
    let text = String::from_utf8_lossy(&buffer);
    if let Some(link) = first_external_link(&text, &page_host) {
        return Ok(ProbeOutcome::hit(link));
    }

    tracing::trace!(url = page_url, bytes = buffer.len(), "no external link");
    Ok(ProbeOutcome::negative())
}

/// Scan HTML text for the first href that resolves to a qualifying external
/// host. Shared by the incremental and final passes.
pub(crate) fn first_external_link(html: &str, page_host: &str) -> Option<String> {
    for raw in scan_hrefs(html) {
        let href = raw.replace("&amp;", "&");
        let href = href.trim();
        if href.is_empty() {
            continue;
        }
        if !is_absolute_capable(href) {
            continue;
        }
        if is_skippable(href) {
            continue;
        }
        let Some(link_host) = extract_host(href) else {
            continue;
        };
        if link_host.is_empty() {
            continue;
        }
        if is_ignored_host(&link_host) {
            continue;
        }
        if !is_internal(&link_host, page_host) {
            return Some(href.to_string());
        }
    }
    None
}

/// Extract raw href attribute values from anchor tags.
///
/// A byte-level scan, not a parse: finds `<a`, then the first quoted
/// `href=` value before the closing `>`. Good enough for link discovery;
/// malformed markup simply yields fewer matches.
pub(crate) fn scan_hrefs(html: &str) -> Vec<&str> {
    let bytes = html.as_bytes();
    let mut hrefs = Vec::new();
    let mut pos = 0;

    while pos + 1 < bytes.len() {
        if bytes[pos] != b'<' || !bytes[pos + 1].eq_ignore_ascii_case(&b'a') {
            pos += 1;
            continue;
        }
        let tag_start = pos + 2;
        let tag_end = find_byte(bytes, tag_start, b'>').unwrap_or(bytes.len());

        if let Some(href_at) = find_subslice_ci(&bytes[tag_start..tag_end], b"href=") {
            let value_start = tag_start + href_at + b"href=".len();
            if value_start < tag_end
                && (bytes[value_start] == b'"' || bytes[value_start] == b'\'')
            {
                let quote = bytes[value_start];
                if let Some(close) = find_byte(bytes, value_start + 1, quote) {
                    hrefs.push(&html[value_start + 1..close]);
                    pos = close + 1;
                    continue;
                }
            }
        }
        pos = tag_end + 1;
    }

    hrefs
}

fn find_byte(bytes: &[u8], from: usize, target: u8) -> Option<usize> {
    bytes[from..].iter().position(|b| *b == target).map(|i| from + i)
}

/// Case-insensitive search for `needle` in `haystack` (ASCII only).
fn find_subslice_ci(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| {
        haystack[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_finds_double_and_single_quoted_hrefs() {
        let html = r#"<a href="https://a.test/one">x</a> <A HREF='https://b.test/two'>y</A>"#;
        let hrefs = scan_hrefs(html);
        assert_eq!(hrefs, vec!["https://a.test/one", "https://b.test/two"]);
    }

    #[test]
    fn scan_ignores_unquoted_and_missing_hrefs() {
        let html = r#"<a name="anchor">x</a><a href=nope>y</a>"#;
        assert!(scan_hrefs(html).is_empty());
    }

    #[test]
    fn scan_handles_attributes_before_href() {
        let html = r#"<a class="btn" rel="nofollow" href="https://a.test/">x</a>"#;
        assert_eq!(scan_hrefs(html), vec!["https://a.test/"]);
    }

    #[test]
    fn scan_tolerates_truncated_tail() {
        // A buffer cut mid-tag must not panic or mis-slice.
        let html = r#"<a href="https://a.test/full">x</a><a href="https://b.te"#;
        assert_eq!(scan_hrefs(html), vec!["https://a.test/full"]);
    }

    #[test]
    fn internal_and_ignored_links_rejected() {
        let html = r##"
            <a href="https://example.com/about">about</a>
            <a href="https://blog.example.com/post">subdomain</a>
            <a href="https://facebook.com/page">social</a>
            <a href="https://www.youtube.com/watch?v=1">video</a>
            <a href="/relative">rel</a>
            <a href="#top">frag</a>
            <a href="mailto:hi@example.com">mail</a>
        "##;
        assert_eq!(first_external_link(html, "example.com"), None);
    }

    #[test]
    fn first_external_survivor_wins() {
        let html = r#"
            <a href="https://facebook.com/page">social</a>
            <a href="https://example-external.test/page">external</a>
            <a href="https://other.test/later">later</a>
        "#;
        assert_eq!(
            first_external_link(html, "example.com"),
            Some("https://example-external.test/page".into())
        );
    }

    #[test]
    fn amp_entity_decoded() {
        let html = r#"<a href="https://other.test/page?a=1&amp;b=2">x</a>"#;
        assert_eq!(
            first_external_link(html, "example.com"),
            Some("https://other.test/page?a=1&b=2".into())
        );
    }

    #[test]
    fn protocol_relative_counts_as_external() {
        let html = r#"<a href="//other.test/lib">x</a>"#;
        assert_eq!(
            first_external_link(html, "example.com"),
            Some("//other.test/lib".into())
        );
    }

    #[test]
    fn www_prefix_still_internal() {
        let html = r#"<a href="https://www.example.com/page">x</a>"#;
        assert_eq!(first_external_link(html, "example.com"), None);
    }

    #[test]
    fn wa_me_variants_skipped() {
        let html = r#"
            <a href="https://wa.me/15551234567">chat</a>
            <a href="//wa.me/15551234567">chat</a>
        "#;
        assert_eq!(first_external_link(html, "example.com"), None);
    }
}

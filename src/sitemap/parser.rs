//! Sitemap XML parser
//!
//! Only `<urlset>` documents are accepted. Page URLs are the `<loc>` values of
//! each `<url>` entry, in document order. Namespace prefixes are ignored.

use quick_xml::events::Event;
use quick_xml::Reader;

const URLSET: &[u8] = b"urlset";
const URL: &[u8] = b"url";
const LOC: &[u8] = b"loc";
const SITEMAP_INDEX: &[u8] = b"sitemapindex";

/// Parses a sitemap document and returns its page URLs
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Trimmed, non-empty `<loc>` values; empty for an empty `<urlset>`
/// * `Err(String)` - Malformed XML, or a root element other than `<urlset>`
///
/// # Example
///
/// ```
/// use a11y_sweep::sitemap::parse_sitemap;
///
/// let xml = "<urlset><url><loc>https://example.com/</loc></url></urlset>";
/// assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/"]);
/// ```
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut root: Option<Vec<u8>> = None;
    let mut loc: Option<String> = None;
    let mut urls = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("invalid XML at byte {}: {}", reader.buffer_position(), e))?;

        match event {
            Event::Start(start) => {
                let name = start.local_name().as_ref().to_vec();
                if stack.is_empty() {
                    if root.is_some() {
                        return Err("document has more than one root element".to_string());
                    }
                    root = Some(name.clone());
                }
                stack.push(name);
                if is_loc_path(&stack) {
                    loc = Some(String::new());
                }
            }
            Event::Empty(empty) => {
                if stack.is_empty() {
                    if root.is_some() {
                        return Err("document has more than one root element".to_string());
                    }
                    root = Some(empty.local_name().as_ref().to_vec());
                }
            }
            Event::Text(text) => {
                if let Some(buf) = loc.as_mut() {
                    let value = text
                        .unescape()
                        .map_err(|e| format!("invalid text in <loc>: {}", e))?;
                    buf.push_str(&value);
                }
            }
            Event::CData(cdata) => {
                if let Some(buf) = loc.as_mut() {
                    let bytes = cdata.into_inner();
                    let value = std::str::from_utf8(&bytes)
                        .map_err(|e| format!("invalid UTF-8 in <loc>: {}", e))?;
                    buf.push_str(value);
                }
            }
            Event::End(_) => {
                if is_loc_path(&stack) {
                    if let Some(value) = loc.take() {
                        let value = value.trim();
                        if !value.is_empty() {
                            urls.push(value.to_string());
                        }
                    }
                }
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }

    match root.as_deref() {
        Some(URLSET) => Ok(urls),
        Some(SITEMAP_INDEX) => {
            Err("document is a sitemap index; nested sitemaps are not followed".to_string())
        }
        Some(other) => Err(format!(
            "expected <urlset> root element, found <{}>",
            String::from_utf8_lossy(other)
        )),
        None => Err("document has no root element".to_string()),
    }
}

/// True when the open elements are exactly `urlset > url > loc`
fn is_loc_path(stack: &[Vec<u8>]) -> bool {
    matches!(stack, [a, b, c] if a == URLSET && b == URL && c == LOC)
}

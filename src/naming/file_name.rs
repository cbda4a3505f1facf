use crate::naming::RunDate;

/// Leftover of `https://www.` once punctuation has been stripped
const SCHEME_ARTIFACT: &str = "httpswww";

/// Derives the report file name for a page URL
///
/// The URL is slugified with [`slugify`] and prefixed with the run date:
/// `{YYYY-M-D}-{slug}.html`.
///
/// # Examples
///
/// ```
/// use a11y_sweep::naming::{file_name_for, RunDate};
///
/// let name = file_name_for("https://www.example.com/about-us/", RunDate::new(2024, 3, 7));
/// assert_eq!(name, "2024-3-7-examplecomabout-us.html");
/// ```
pub fn file_name_for(url: &str, run_date: RunDate) -> String {
    format!("{}-{}.html", run_date, slugify(url))
}

/// Derives the summary report file name for a site folder
pub fn summary_file_name(folder_name: &str, run_date: RunDate) -> String {
    format!("{}-{}-summary.html", run_date, folder_name)
}

/// Turns a URL into a filesystem-safe slug
///
/// Steps, in order:
/// 1. lower-case and trim
/// 2. drop everything except ASCII letters, digits, `_`, whitespace and `-`
///    (whitespace in the ECMAScript sense, see `is_separator_space`)
/// 3. collapse runs of whitespace, `_` and `-` into a single `-`
/// 4. trim leading and trailing `-`
/// 5. remove the first `httpswww` left behind by `https://www.`
pub fn slugify(url: &str) -> String {
    let lowered = url.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_separator = false;

    for c in lowered.trim_matches(is_separator_space).chars() {
        if is_separator_space(c) || c == '_' || c == '-' {
            if !in_separator {
                slug.push('-');
                in_separator = true;
            }
        } else if c.is_ascii_alphanumeric() {
            slug.push(c);
            in_separator = false;
        }
        // Anything else is dropped without ending a separator run, so
        // "a-/-b" still collapses to "a-b".
    }

    slug.trim_matches('-').replacen(SCHEME_ARTIFACT, "", 1)
}

/// Whitespace as ECMAScript defines it (`\s`, `String.prototype.trim`)
///
/// Differs from [`char::is_whitespace`]: U+FEFF counts, U+0085 does not.
fn is_separator_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

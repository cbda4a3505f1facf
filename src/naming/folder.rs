use crate::SweepError;
use url::Url;

/// Derives the per-site report folder name from a hostname
///
/// A leading `www.` is stripped, then only the first remaining `.` is
/// removed: `www.example.co.uk` becomes `exampleco.uk`. Report folders from
/// earlier runs use this layout, so it is kept as-is.
///
/// # Examples
///
/// ```
/// use a11y_sweep::naming::folder_name_for;
///
/// assert_eq!(folder_name_for("www.example.com"), "examplecom");
/// assert_eq!(folder_name_for("a.b.c"), "ab.c");
/// ```
pub fn folder_name_for(hostname: &str) -> String {
    let host = hostname.strip_prefix("www.").unwrap_or(hostname);
    host.replacen('.', "", 1)
}

/// Extracts the hostname of a sitemap URL
pub fn hostname_of(url: &str) -> Result<String, SweepError> {
    let parsed = Url::parse(url)?;
    parsed
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or_else(|| SweepError::MissingHost {
            url: url.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_www_prefix() {
        assert_eq!(folder_name_for("www.example.com"), "examplecom");
    }

    #[test]
    fn test_removes_only_first_dot() {
        assert_eq!(folder_name_for("a.b.c"), "ab.c");
        assert_eq!(folder_name_for("www.example.co.uk"), "exampleco.uk");
    }

    #[test]
    fn test_www_only_stripped_as_prefix() {
        assert_eq!(folder_name_for("shop.www.example.com"), "shopwww.example.com");
    }

    #[test]
    fn test_host_without_dots() {
        assert_eq!(folder_name_for("localhost"), "localhost");
    }

    #[test]
    fn test_hostname_of() {
        assert_eq!(
            hostname_of("https://WWW.Example.com/sitemap.xml").unwrap(),
            "www.example.com"
        );
        assert_eq!(
            hostname_of("http://127.0.0.1:8080/sitemap.xml").unwrap(),
            "127.0.0.1"
        );
    }

    #[test]
    fn test_hostname_of_invalid() {
        assert!(matches!(
            hostname_of("not a url"),
            Err(SweepError::UrlParse(_))
        ));
        assert!(matches!(
            hostname_of("data:text/plain,hello"),
            Err(SweepError::MissingHost { .. })
        ));
    }
}

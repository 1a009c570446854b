//! Source URL validation.

use url::Url;

/// Check whether `s` is a syntactically valid gem source URL.
///
/// Accepts only absolute URLs with scheme `http` or `https` and a non-empty
/// host. No network access is performed; whether the URL actually serves a
/// gem index is checked by `gem` itself when the source is activated.
pub fn is_valid_source_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

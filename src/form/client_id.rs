use regex::Regex;
use std::sync::LazyLock;

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Slug a business name into the client identifier sent with every submission.
///
/// `"Joe's Plumbing Co."` becomes `"joes_plumbing_co"`.
pub fn derive(business_name: &str) -> String {
    let lowered = business_name.trim().to_lowercase();
    let stripped = PUNCTUATION_RE.replace_all(&lowered, "");
    WHITESPACE_RE.replace_all(&stripped, "_").into_owned()
}

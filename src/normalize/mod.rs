pub mod podcast;
pub mod title;

use std::sync::LazyLock;

use regex::Regex;

static BREAK_INDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n\s*").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static TRACKING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?(ref=|utm_).*$").unwrap());

/// Put a whole document on one line: a line break and the indentation after
/// it disappear, other whitespace runs become one space.
pub fn flatten(raw: &str) -> String {
    let joined = BREAK_INDENT_RE.replace_all(raw, "");
    SPACES_RE.replace_all(&joined, " ").into_owned()
}

/// First capture group of the first match.
pub fn capture_first<'a>(text: &'a str, re: &Regex) -> Option<&'a str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Canonical display form: entities decoded, whitespace collapsed, trimmed.
pub fn fmt_value(value: &str) -> String {
    let decoded = decode_entities(value);
    SPACES_RE.replace_all(decoded.trim(), " ").into_owned()
}

/// Drops tracking query strings (`?ref=…`, `?utm_…`).
pub fn clean_url(url: &str) -> String {
    TRACKING_RE.replace(url.trim(), "").into_owned()
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    // &amp; last so "&amp;quot;" stays "&quot;"
    s.replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&rsquo;", "\u{2019}")
        .replace("&lsquo;", "\u{2018}")
        .replace("&ldquo;", "\u{201c}")
        .replace("&rdquo;", "\u{201d}")
        .replace("&mdash;", "\u{2014}")
        .replace("&ndash;", "\u{2013}")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

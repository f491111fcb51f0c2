//! Text normalization: URL stripping, newline removal, lowercasing.

use regex::Regex;
use std::sync::{LazyLock, Once};

/// Scheme, `:`, one or more `//` or `\`, then the URL body.
/// The body class spans `+` through `=` (so `,-./0-9:;<=` are all allowed), plus
/// ASCII word chars and `:#@%/;$()~_?\.&`. Case folding is ASCII-only.
const URL_PATTERN: &str =
    r"(?i-u)(?:https?|ftp|gopher|telnet|file|unsure):(?://|\\)+[A-Za-z0-9_:#@%/;$()~?+,\-.<=\\&]*";

static URL_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(URL_PATTERN));
static URL_WARN_ONCE: Once = Once::new();

/// Full normalization in fixed order: URLs out, newlines out, lowercase.
pub fn normalize(text: &str) -> String {
    let stripped = remove_urls(text);
    stripped.replace('\n', "").to_lowercase()
}

/// Remove every URL span. Spans are cut by position, so a URL string that also
/// appears elsewhere in the text only disappears where it actually matched.
/// If the pattern is unusable the text comes back unmodified.
pub fn remove_urls(text: &str) -> String {
    let re = match URL_RE.as_ref() {
        Ok(re) => re,
        Err(e) => {
            URL_WARN_ONCE.call_once(|| {
                tracing::error!(error=%e, "URL pattern failed to compile; URLs will not be stripped");
            });
            return text.to_string();
        }
    };
    cut_spans(text, re)
}

/// Rebuild `text` skipping every non-overlapping match of `re`.
pub(crate) fn cut_spans(text: &str, re: &Regex) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

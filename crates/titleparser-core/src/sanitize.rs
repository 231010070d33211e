use regex::Regex;
use std::sync::LazyLock;

/// Longest title, in characters, returned before truncation kicks in.
pub const MAX_TITLE_CHARS: usize = 200;

/// Appended to a title cut at [`MAX_TITLE_CHARS`].
pub const TRUNCATION_MARKER: &str = "...";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Normalizes an extracted title for display.
///
/// Runs of two or more whitespace characters become a single space, the
/// result is trimmed, remaining line breaks are removed and anything longer
/// than [`MAX_TITLE_CHARS`] is cut and suffixed with [`TRUNCATION_MARKER`].
///
/// `sanitize(&sanitize(s)) == sanitize(s)` for every input.
pub fn sanitize(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw, " ");
    let cleaned: String = collapsed
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .collect();

    match cleaned.char_indices().nth(MAX_TITLE_CHARS) {
        Some((cut, _)) => format!("{}{}", &cleaned[..cut], TRUNCATION_MARKER),
        None => cleaned,
    }
}

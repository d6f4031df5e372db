//! HTML escaping for substituted token values

use std::borrow::Cow;

/// Character replacements applied to values inserted into HTML output.
///
/// `&` comes first so entities produced for the other characters are never
/// escaped a second time.
pub const HTML_ESCAPES: [(char, &str); 6] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('/', "&#x2F;"),
];

fn entity_for(c: char) -> Option<&'static str> {
    HTML_ESCAPES
        .iter()
        .find_map(|&(from, to)| (from == c).then_some(to))
}

/// Escape a value for insertion into HTML
///
/// Returns the input unchanged (borrowed) when it contains nothing to escape.
///
/// # Examples
///
/// ```rust
/// use thiep_cuoi::template::escape_html;
///
/// assert_eq!(escape_html("Tom & Jerry"), "Tom &amp; Jerry");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
#[must_use]
pub fn escape_html(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(|c: char| entity_for(c).is_some()) else {
        return Cow::Borrowed(input);
    };

    let mut escaped = String::with_capacity(input.len() + 16);
    escaped.push_str(&input[..first]);
    for c in input[first..].chars() {
        match entity_for(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

//! `{{token}}` substitution for card HTML and CSS
//!
//! Card designs are stored as plain HTML and CSS with placeholders such as
//! `{{groom_name}}`. Rendering swaps each placeholder for the matching
//! user-supplied value:
//!
//! ```rust
//! use std::collections::HashMap;
//! use thiep_cuoi::template::{render_css, render_html};
//!
//! let data = HashMap::from([
//!     ("groom_name".to_string(), "Minh".to_string()),
//!     ("primary_color".to_string(), "#ffd700".to_string()),
//! ]);
//!
//! assert_eq!(render_html("<h1>{{ groom_name }}</h1>", &data), "<h1>Minh</h1>");
//! assert_eq!(render_css("h1 { color: {{primary_color}}; }", &data), "h1 { color: #ffd700; }");
//! ```
//!
//! Unknown tokens render as the empty string. An unterminated `{{` is left
//! in the output as-is.

use super::escape::escape_html;
use super::validate::trim_space;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("Invalid token regex"));

/// Output format of a rendered template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Values are HTML-escaped before insertion
    Html,
    /// Values are inserted verbatim
    Css,
}

/// Stateless token renderer for one output format
///
/// Cheap to copy and safe to share between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateRenderer {
    format: OutputFormat,
}

impl TemplateRenderer {
    /// Renderer that HTML-escapes substituted values
    #[must_use]
    pub const fn html() -> Self {
        Self {
            format: OutputFormat::Html,
        }
    }

    /// Renderer that substitutes raw values
    #[must_use]
    pub const fn css() -> Self {
        Self {
            format: OutputFormat::Css,
        }
    }

    /// Renderer for the given format
    #[must_use]
    pub const fn for_format(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Output format of this renderer
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Replace every `{{identifier}}` token in `template`
    ///
    /// The identifier is the token text with surrounding ASCII whitespace and
    /// control characters trimmed.
    /// Tokens missing from `data` become the empty string. All matches are
    /// located in the input template first, so an inserted value is never
    /// itself scanned for tokens.
    #[must_use]
    pub fn render<S: BuildHasher>(&self, template: &str, data: &HashMap<String, String, S>) -> String {
        if template.is_empty() {
            return String::new();
        }

        TOKEN_PATTERN
            .replace_all(template, |caps: &Captures<'_>| {
                let value = data.get(trim_space(&caps[1])).map_or("", String::as_str);
                match self.format {
                    OutputFormat::Html => escape_html(value).into_owned(),
                    OutputFormat::Css => value.to_owned(),
                }
            })
            .into_owned()
    }
}

/// Identifiers of all tokens in `template`, in order of appearance
///
/// Repeated tokens are reported once per occurrence.
///
/// # Examples
///
/// ```rust
/// use thiep_cuoi::template::token_names;
///
/// let names: Vec<_> = token_names("{{groom_name}} & {{ bride_name }}").collect();
/// assert_eq!(names, ["groom_name", "bride_name"]);
/// ```
pub fn token_names(template: &str) -> impl Iterator<Item = &str> {
    TOKEN_PATTERN
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|inner| trim_space(inner.as_str()))
}

/// Render an HTML template, escaping every substituted value
#[must_use]
pub fn render_html<S: BuildHasher>(template: &str, data: &HashMap<String, String, S>) -> String {
    TemplateRenderer::html().render(template, data)
}

/// Render a CSS template, substituting raw values
#[must_use]
pub fn render_css<S: BuildHasher>(template: &str, data: &HashMap<String, String, S>) -> String {
    TemplateRenderer::css().render(template, data)
}

//! Card template rendering and validation
//!
//! Two pure operations make up the core of card customization:
//!
//! - [`TemplateRenderer`] replaces `{{token}}` placeholders in stored HTML or
//!   CSS with user data (HTML output is escaped)
//! - [`TemplateDataValidator`] checks user data against a template's
//!   required-field declaration before anything is rendered
//!
//! Neither holds state between calls, so both can be shared freely across
//! request handlers.

pub mod escape;
pub mod render;
pub mod validate;

pub use escape::{escape_html, HTML_ESCAPES};
pub use render::{render_css, render_html, token_names, OutputFormat, TemplateRenderer};
pub use validate::{
    declared_fields, is_blank, trim_space, validate, TemplateDataValidator, ValidationFailure,
    MANDATORY_FIELDS,
};

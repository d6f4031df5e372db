//! thiep-cuoi: wedding invitation card customization
//!
//! Users pick a card design stored as HTML/CSS with `{{token}}` placeholders,
//! fill in their details (names, date, venue) and receive the rendered card.
//!
//! # Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use thiep_cuoi::prelude::*;
//!
//! # fn main() -> thiep_cuoi::Result<()> {
//! let service = CardService::new(InMemoryCardTemplates::with_sample()?);
//!
//! let data: HashMap<String, String> = [
//!     ("groom_name", "Minh"),
//!     ("bride_name", "Lan"),
//!     ("wedding_date", "20/12/2026"),
//!     ("wedding_time", "18:00"),
//!     ("wedding_venue", "Trung tâm tiệc cưới"),
//!     ("custom_message", ""),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let card = service.customize(&CustomizeCardRequest::preview(1, data))?;
//! assert!(card.rendered_html.contains("<p class=\"date\">20&#x2F;12&#x2F;2026</p>"));
//! # Ok(())
//! # }
//! ```
//!
//! The rendering and validation primitives are available on their own in
//! [`template`].

#![allow(clippy::missing_errors_doc)]

pub mod cards;
pub mod config;
pub mod error;
pub mod observability;
pub mod template;

pub use error::{Result, ThiepCuoiError};

pub mod prelude {
    //! Convenience re-exports for common types and traits

    pub use crate::cards::{
        CardDetails, CardService, CardTemplate, CardTemplateSource, CustomizeCardRequest,
        CustomizedCard, InMemoryCardTemplates, InMemoryCustomizedCards, NewCardTemplate,
    };
    pub use crate::config::ThiepCuoiConfig;
    pub use crate::error::{Result, ThiepCuoiError};
    pub use crate::template::{
        render_css, render_html, validate, OutputFormat, TemplateDataValidator, TemplateRenderer,
    };
}

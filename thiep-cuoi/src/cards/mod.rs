//! Wedding card customization
//!
//! - [`CardService`] turns a [`CustomizeCardRequest`] into a [`CustomizedCard`]
//! - [`CardTemplateSource`] supplies stored card designs
//! - [`InMemoryCardTemplates`] is a ready-made source, optionally seeded with
//!   the [`sample::classic_gold`] design
//! - [`InMemoryCustomizedCards`] keeps the cards users chose to save

pub mod model;
pub mod sample;
pub mod service;
pub mod source;
pub mod store;

pub use model::{
    CardDetails, CardTemplate, CustomizeCardRequest, CustomizedCard, NewCardTemplate,
    DEFAULT_TEMPLATE_VERSION,
};
pub use service::CardService;
pub use source::{CardTemplateSource, InMemoryCardTemplates};
pub use store::InMemoryCustomizedCards;

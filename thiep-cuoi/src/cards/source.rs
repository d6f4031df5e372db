//! Card template lookup
//!
//! [`CardTemplateSource`] is the seam between card customization and
//! wherever card templates are stored. [`InMemoryCardTemplates`] is a
//! thread-safe implementation for tests, demos and small deployments.

use super::model::{CardTemplate, NewCardTemplate, DEFAULT_TEMPLATE_VERSION};
use super::sample;
use crate::error::{Result, ThiepCuoiError};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use validator::Validate;

/// Provides stored card templates by id
pub trait CardTemplateSource: Send + Sync {
    /// Find a card template, active or not
    fn find(&self, id: i64) -> Option<Arc<CardTemplate>>;

    /// Find a card template only if it is active
    fn find_active(&self, id: i64) -> Option<Arc<CardTemplate>> {
        self.find(id).filter(|template| template.is_active)
    }
}

impl<T: CardTemplateSource + ?Sized> CardTemplateSource for Arc<T> {
    fn find(&self, id: i64) -> Option<Arc<CardTemplate>> {
        (**self).find(id)
    }

    fn find_active(&self, id: i64) -> Option<Arc<CardTemplate>> {
        (**self).find_active(id)
    }
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    templates: BTreeMap<i64, Arc<CardTemplate>>,
}

/// In-memory card template store
///
/// Ids are assigned sequentially starting at 1. Deleting a template only
/// deactivates it, so cards rendered from it can still be re-rendered.
///
/// # Example
///
/// ```rust
/// use thiep_cuoi::cards::{CardTemplateSource, InMemoryCardTemplates, NewCardTemplate};
///
/// # fn example() -> thiep_cuoi::Result<()> {
/// let store = InMemoryCardTemplates::new();
/// let template = store.insert(NewCardTemplate {
///     template_id: 1,
///     template_name: "Minimal".to_string(),
///     html_content: "<h1>{{groom_name}} & {{bride_name}}</h1>".to_string(),
///     ..NewCardTemplate::default()
/// })?;
///
/// assert_eq!(template.version, "1.0");
/// assert!(store.find_active(template.id).is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCardTemplates {
    inner: RwLock<Inner>,
}

impl InMemoryCardTemplates {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the classic gold sample card as id 1
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled sample fails validation.
    pub fn with_sample() -> Result<Self> {
        let store = Self::new();
        store.insert(sample::classic_gold())?;
        Ok(store)
    }

    /// Store a new card template
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::Validation`] if the name or HTML content is
    /// blank.
    pub fn insert(&self, new: NewCardTemplate) -> Result<Arc<CardTemplate>> {
        new.validate()?;

        let now = Utc::now();
        let mut inner = self.inner.write();
        inner.last_id += 1;
        let template = Arc::new(CardTemplate {
            id: inner.last_id,
            template_id: new.template_id,
            template_name: new.template_name,
            html_content: new.html_content,
            css_content: new.css_content,
            template_variables: new.template_variables,
            preview_image_url: new.preview_image_url,
            thumbnail_url: new.thumbnail_url,
            version: new
                .version
                .unwrap_or_else(|| DEFAULT_TEMPLATE_VERSION.to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        });
        inner.templates.insert(template.id, Arc::clone(&template));

        tracing::debug!(
            card_template_id = template.id,
            template_id = template.template_id,
            "Card template stored"
        );
        Ok(template)
    }

    /// Replace the content of a stored card template
    ///
    /// The catalogue template and active flag are kept; `new.template_id` is
    /// ignored. A `None` version keeps the current one.
    ///
    /// # Errors
    ///
    /// - [`ThiepCuoiError::Validation`] if the name or HTML content is blank
    /// - [`ThiepCuoiError::CardTemplateNotFound`] if no template has this id
    pub fn update(&self, id: i64, new: NewCardTemplate) -> Result<Arc<CardTemplate>> {
        new.validate()?;

        let updated = {
            let mut inner = self.inner.write();
            let template = inner
                .templates
                .get_mut(&id)
                .ok_or(ThiepCuoiError::CardTemplateNotFound(id))?;

            let current = Arc::make_mut(template);
            current.template_name = new.template_name;
            current.html_content = new.html_content;
            current.css_content = new.css_content;
            current.template_variables = new.template_variables;
            current.preview_image_url = new.preview_image_url;
            current.thumbnail_url = new.thumbnail_url;
            if let Some(version) = new.version {
                current.version = version;
            }
            current.updated_at = Utc::now();
            Arc::clone(template)
        };

        tracing::debug!(card_template_id = id, "Card template updated");
        Ok(updated)
    }

    /// Deactivate a card template
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::CardTemplateNotFound`] if no template has
    /// this id.
    pub fn deactivate(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write();
        let template = inner
            .templates
            .get_mut(&id)
            .ok_or(ThiepCuoiError::CardTemplateNotFound(id))?;

        let updated = Arc::make_mut(template);
        updated.is_active = false;
        updated.updated_at = Utc::now();

        tracing::debug!(card_template_id = id, "Card template deactivated");
        Ok(())
    }

    /// All active card templates, ordered by id
    #[must_use]
    pub fn list_active(&self) -> Vec<Arc<CardTemplate>> {
        self.inner
            .read()
            .templates
            .values()
            .filter(|template| template.is_active)
            .cloned()
            .collect()
    }

    /// Active card templates of one catalogue template, ordered by id
    #[must_use]
    pub fn list_by_template(&self, template_id: i64) -> Vec<Arc<CardTemplate>> {
        self.inner
            .read()
            .templates
            .values()
            .filter(|template| template.is_active && template.template_id == template_id)
            .cloned()
            .collect()
    }
}

impl CardTemplateSource for InMemoryCardTemplates {
    fn find(&self, id: i64) -> Option<Arc<CardTemplate>> {
        self.inner.read().templates.get(&id).cloned()
    }
}

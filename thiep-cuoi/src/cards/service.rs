//! Card customization service
//!
//! Validates user data against a card template's required-field declaration
//! and renders the template's HTML and CSS. Validation failure aborts the
//! whole operation with [`ThiepCuoiError::InvalidCardData`]; nothing is
//! rendered or stored and an existing card is left untouched.
//!
//! Cards requested with `save_card` are kept in an
//! [`InMemoryCustomizedCards`] store and can later be listed, re-rendered,
//! saved or deleted by id. Previews are returned without an id.

use super::model::{CardTemplate, CustomizeCardRequest, CustomizedCard};
use super::source::CardTemplateSource;
use super::store::InMemoryCustomizedCards;
use crate::config::CardSettings;
use crate::error::{Result, ThiepCuoiError};
use crate::template::{TemplateDataValidator, TemplateRenderer};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Customizes card templates with user data
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use thiep_cuoi::cards::{CardService, CustomizeCardRequest, InMemoryCardTemplates};
///
/// # fn example() -> thiep_cuoi::Result<()> {
/// let service = CardService::new(InMemoryCardTemplates::with_sample()?);
///
/// let data = HashMap::from([
///     ("groom_name".to_string(), "Minh".to_string()),
///     ("bride_name".to_string(), "Lan".to_string()),
///     ("wedding_date".to_string(), "20/12/2026".to_string()),
///     ("wedding_time".to_string(), "18:00".to_string()),
///     ("wedding_venue".to_string(), "Hà Nội".to_string()),
///     ("custom_message".to_string(), String::new()),
/// ]);
///
/// let card = service.customize(&CustomizeCardRequest::preview(1, data))?;
/// assert!(card.rendered_html.contains("<h1>Minh & Lan</h1>"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CardService<S> {
    templates: S,
    cards: Arc<InMemoryCustomizedCards>,
    validator: TemplateDataValidator,
}

impl<S: CardTemplateSource> CardService<S> {
    /// Create a service with the built-in mandatory fields
    #[must_use]
    pub fn new(templates: S) -> Self {
        Self {
            templates,
            cards: Arc::default(),
            validator: TemplateDataValidator::new(),
        }
    }

    /// Create a service using configured extra mandatory fields
    #[must_use]
    pub fn from_settings(templates: S, settings: &CardSettings) -> Self {
        Self::new(templates).with_validator(
            TemplateDataValidator::new().with_mandatory(settings.extra_mandatory_fields.iter().cloned()),
        )
    }

    /// Replace the data validator
    #[must_use]
    pub fn with_validator(mut self, validator: TemplateDataValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Share a customized card store with other services
    #[must_use]
    pub fn with_card_store(mut self, cards: Arc<InMemoryCustomizedCards>) -> Self {
        self.cards = cards;
        self
    }

    /// The card template source
    #[must_use]
    pub const fn templates(&self) -> &S {
        &self.templates
    }

    /// The customized card store
    #[must_use]
    pub fn cards(&self) -> &InMemoryCustomizedCards {
        &self.cards
    }

    /// Render an active card template with the request's data
    ///
    /// When `save_card` is set the card is stored and returned with its id.
    ///
    /// # Errors
    ///
    /// - [`ThiepCuoiError::CardTemplateNotFound`] if the card template does
    ///   not exist or is inactive
    /// - [`ThiepCuoiError::InvalidCardData`] if the data fails the template's
    ///   required-field declaration
    pub fn customize(&self, request: &CustomizeCardRequest) -> Result<CustomizedCard> {
        let template = self
            .templates
            .find_active(request.card_template_id)
            .ok_or(ThiepCuoiError::CardTemplateNotFound(request.card_template_id))?;

        let rendered = self.render(&template, &request.custom_data)?;
        let now = Utc::now();

        tracing::info!(
            card_template_id = template.id,
            saved = request.save_card,
            "Card customized"
        );

        let card = CustomizedCard {
            id: None,
            card_template_id: template.id,
            template_id: template.template_id,
            card_template_name: template.template_name.clone(),
            custom_data: rendered.custom_data,
            rendered_html: rendered.html,
            rendered_css: rendered.css,
            is_saved: request.save_card,
            created_at: now,
            updated_at: now,
        };

        if request.save_card {
            return Ok(self.cards.insert(card));
        }
        Ok(card)
    }

    /// Re-render an existing card with new data
    ///
    /// The card's template is used even if it has since been deactivated.
    ///
    /// # Errors
    ///
    /// - [`ThiepCuoiError::CardTemplateNotFound`] if the card's template no
    ///   longer exists
    /// - [`ThiepCuoiError::InvalidCardData`] if the data fails validation; the
    ///   card is not modified
    pub fn recustomize(
        &self,
        card: &mut CustomizedCard,
        custom_data: &HashMap<String, String>,
    ) -> Result<()> {
        let template = self
            .templates
            .find(card.card_template_id)
            .ok_or(ThiepCuoiError::CardTemplateNotFound(card.card_template_id))?;

        let rendered = self.render(&template, custom_data)?;

        card.custom_data = rendered.custom_data;
        card.rendered_html = rendered.html;
        card.rendered_css = rendered.css;
        card.updated_at = Utc::now();

        tracing::info!(card_template_id = template.id, "Card re-rendered");
        Ok(())
    }

    /// Re-render a stored card with new data
    ///
    /// # Errors
    ///
    /// - [`ThiepCuoiError::CustomizedCardNotFound`] if no card has this id
    /// - the errors of [`CardService::recustomize`]; the stored card is not
    ///   modified
    pub fn update_card(
        &self,
        id: i64,
        custom_data: &HashMap<String, String>,
    ) -> Result<CustomizedCard> {
        let mut card = self.card(id)?;
        self.recustomize(&mut card, custom_data)?;
        self.cards.replace(card)
    }

    /// Mark a stored card as saved
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::CustomizedCardNotFound`] if no card has
    /// this id.
    pub fn save_card(&self, id: i64) -> Result<CustomizedCard> {
        let card = self.cards.mark_saved(id)?;
        tracing::info!(customized_card_id = id, "Card saved");
        Ok(card)
    }

    /// A stored card by id
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::CustomizedCardNotFound`] if no card has
    /// this id.
    pub fn card(&self, id: i64) -> Result<CustomizedCard> {
        self.cards
            .get(id)
            .ok_or(ThiepCuoiError::CustomizedCardNotFound(id))
    }

    /// All stored cards, newest first
    #[must_use]
    pub fn customized_cards(&self) -> Vec<CustomizedCard> {
        self.cards.list()
    }

    /// Saved cards, newest first
    #[must_use]
    pub fn saved_cards(&self) -> Vec<CustomizedCard> {
        self.cards.list_saved()
    }

    /// Delete a stored card
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::CustomizedCardNotFound`] if no card has
    /// this id.
    pub fn delete_card(&self, id: i64) -> Result<()> {
        self.cards.remove(id)?;
        tracing::info!(customized_card_id = id, "Card deleted");
        Ok(())
    }

    fn render(
        &self,
        template: &CardTemplate,
        custom_data: &HashMap<String, String>,
    ) -> Result<Rendered> {
        let declaration = template.template_variables.as_deref().unwrap_or_default();
        if let Err(failure) = self.validator.check(declaration, custom_data) {
            tracing::debug!(
                card_template_id = template.id,
                reason = %failure,
                "Card data rejected"
            );
            return Err(ThiepCuoiError::InvalidCardData);
        }

        let sorted: BTreeMap<_, _> = custom_data.iter().collect();
        Ok(Rendered {
            custom_data: serde_json::to_string(&sorted)?,
            html: TemplateRenderer::html().render(&template.html_content, custom_data),
            css: template
                .css_content
                .as_deref()
                .map(|css| TemplateRenderer::css().render(css, custom_data)),
        })
    }
}

struct Rendered {
    custom_data: String,
    html: String,
    css: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{InMemoryCardTemplates, NewCardTemplate};

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn store_with(new: NewCardTemplate) -> InMemoryCardTemplates {
        let store = InMemoryCardTemplates::new();
        store.insert(new).unwrap();
        store
    }

    fn venue_template() -> NewCardTemplate {
        NewCardTemplate {
            template_id: 9,
            template_name: "Venue".to_string(),
            html_content: "<p>{{groom_name}} @ {{wedding_venue}}</p>".to_string(),
            css_content: Some(".v::after { content: \"{{wedding_venue}}\"; }".to_string()),
            template_variables: Some(
                r#"{"groom_name": "Tên chú rể", "wedding_venue": "Địa điểm"}"#.to_string(),
            ),
            ..NewCardTemplate::default()
        }
    }

    #[test]
    fn test_customize_renders_html_and_css() {
        let service = CardService::new(store_with(venue_template()));
        let request = CustomizeCardRequest::preview(
            1,
            data(&[("groom_name", "Minh"), ("wedding_venue", "<Nhà hàng/>")]),
        );

        let card = service.customize(&request).unwrap();

        assert_eq!(card.rendered_html, "<p>Minh @ &lt;Nhà hàng&#x2F;&gt;</p>");
        assert_eq!(
            card.rendered_css.as_deref(),
            Some(".v::after { content: \"<Nhà hàng/>\"; }")
        );
        assert_eq!(card.template_id, 9);
        assert_eq!(card.card_template_name, "Venue");
        assert!(!card.is_saved);
    }

    #[test]
    fn test_custom_data_is_sorted_json() {
        let service = CardService::new(store_with(venue_template()));
        let request = CustomizeCardRequest::preview(
            1,
            data(&[("wedding_venue", "Huế"), ("groom_name", "Minh")]),
        );

        let card = service.customize(&request).unwrap();

        assert_eq!(
            card.custom_data,
            r#"{"groom_name":"Minh","wedding_venue":"Huế"}"#
        );
        assert_eq!(card.details().wedding_venue.as_deref(), Some("Huế"));
    }

    #[test]
    fn test_invalid_data_aborts() {
        let service = CardService::new(store_with(venue_template()));
        let request = CustomizeCardRequest::preview(1, data(&[("groom_name", " ")]));

        assert!(matches!(
            service.customize(&request),
            Err(ThiepCuoiError::InvalidCardData)
        ));
    }

    #[test]
    fn test_saved_request_is_stored() {
        let service = CardService::new(store_with(venue_template()));
        let request = CustomizeCardRequest::preview(
            1,
            data(&[("groom_name", "Minh"), ("wedding_venue", "")]),
        )
        .saved();

        let card = service.customize(&request).unwrap();

        assert!(card.is_saved);
        assert_eq!(card.id, Some(1));
        assert_eq!(service.card(1).unwrap(), card);
        assert_eq!(service.saved_cards(), [card]);
    }

    #[test]
    fn test_preview_is_not_stored() {
        let service = CardService::new(store_with(venue_template()));
        let card = service
            .customize(&CustomizeCardRequest::preview(
                1,
                data(&[("groom_name", "Minh"), ("wedding_venue", "")]),
            ))
            .unwrap();

        assert!(card.id.is_none());
        assert!(service.customized_cards().is_empty());
    }

    #[test]
    fn test_rejected_saved_request_stores_nothing() {
        let service = CardService::new(store_with(venue_template()));
        let request = CustomizeCardRequest::preview(1, data(&[("groom_name", "")])).saved();

        assert!(service.customize(&request).is_err());
        assert!(service.customized_cards().is_empty());
    }

    #[test]
    fn test_update_card() {
        let service = CardService::new(store_with(venue_template()));
        let stored = service
            .customize(
                &CustomizeCardRequest::preview(
                    1,
                    data(&[("groom_name", "Minh"), ("wedding_venue", "Huế")]),
                )
                .saved(),
            )
            .unwrap();
        let id = stored.id.unwrap();

        let updated = service
            .update_card(id, &data(&[("groom_name", "Nam"), ("wedding_venue", "Vinh")]))
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.rendered_html, "<p>Nam @ Vinh</p>");
        assert_eq!(service.card(id).unwrap(), updated);

        assert!(matches!(
            service.update_card(id, &data(&[("groom_name", " ")])),
            Err(ThiepCuoiError::InvalidCardData)
        ));
        assert_eq!(service.card(id).unwrap(), updated);
        assert!(matches!(
            service.update_card(99, &HashMap::new()),
            Err(ThiepCuoiError::CustomizedCardNotFound(99))
        ));
    }

    #[test]
    fn test_save_and_delete_card() {
        let cards = Arc::new(InMemoryCustomizedCards::new());
        let service =
            CardService::new(store_with(venue_template())).with_card_store(Arc::clone(&cards));
        let preview = service
            .customize(&CustomizeCardRequest::preview(
                1,
                data(&[("groom_name", "Minh"), ("wedding_venue", "")]),
            ))
            .unwrap();
        let id = cards.insert(preview).id.unwrap();

        assert_eq!(service.customized_cards().len(), 1);
        assert!(service.saved_cards().is_empty());
        assert!(service.save_card(id).unwrap().is_saved);
        assert_eq!(service.saved_cards().len(), 1);

        service.delete_card(id).unwrap();
        assert!(cards.get(id).is_none());
        assert!(matches!(
            service.delete_card(id),
            Err(ThiepCuoiError::CustomizedCardNotFound(_))
        ));
        assert!(matches!(
            service.save_card(id),
            Err(ThiepCuoiError::CustomizedCardNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_and_inactive_templates() {
        let store = store_with(venue_template());
        store.deactivate(1).unwrap();
        let service = CardService::new(store);
        let values = data(&[("groom_name", "Minh"), ("wedding_venue", "")]);

        assert!(matches!(
            service.customize(&CustomizeCardRequest::preview(1, values.clone())),
            Err(ThiepCuoiError::CardTemplateNotFound(1))
        ));
        assert!(matches!(
            service.customize(&CustomizeCardRequest::preview(2, values)),
            Err(ThiepCuoiError::CardTemplateNotFound(2))
        ));
    }

    #[test]
    fn test_template_without_declaration_or_css() {
        let service = CardService::new(store_with(NewCardTemplate {
            template_id: 1,
            template_name: "Bare".to_string(),
            html_content: "<b>{{groom_name}}</b>".to_string(),
            ..NewCardTemplate::default()
        }));

        let card = service
            .customize(&CustomizeCardRequest::preview(1, HashMap::new()))
            .unwrap();

        assert_eq!(card.rendered_html, "<b></b>");
        assert!(card.rendered_css.is_none());
        assert_eq!(card.custom_data, "{}");
    }

    #[test]
    fn test_recustomize_updates_card() {
        let store = Arc::new(store_with(venue_template()));
        let service = CardService::new(Arc::clone(&store));
        let mut card = service
            .customize(&CustomizeCardRequest::preview(
                1,
                data(&[("groom_name", "Minh"), ("wedding_venue", "Huế")]),
            ))
            .unwrap();

        store.deactivate(1).unwrap();
        service
            .recustomize(&mut card, &data(&[("groom_name", "Nam"), ("wedding_venue", "Đà Nẵng")]))
            .unwrap();

        assert_eq!(card.rendered_html, "<p>Nam @ Đà Nẵng</p>");
        assert_eq!(card.details().groom_name.as_deref(), Some("Nam"));
    }

    #[test]
    fn test_recustomize_failure_leaves_card_untouched() {
        let service = CardService::new(store_with(venue_template()));
        let mut card = service
            .customize(&CustomizeCardRequest::preview(
                1,
                data(&[("groom_name", "Minh"), ("wedding_venue", "Huế")]),
            ))
            .unwrap();
        let before = card.clone();

        let result = service.recustomize(&mut card, &data(&[("groom_name", "Nam")]));

        assert!(matches!(result, Err(ThiepCuoiError::InvalidCardData)));
        assert_eq!(card, before);
    }

    #[test]
    fn test_configured_extra_mandatory_field() {
        let settings = CardSettings {
            extra_mandatory_fields: vec!["wedding_venue".to_string()],
        };
        let service = CardService::from_settings(store_with(venue_template()), &settings);
        let request = CustomizeCardRequest::preview(
            1,
            data(&[("groom_name", "Minh"), ("wedding_venue", "")]),
        );

        assert!(matches!(
            service.customize(&request),
            Err(ThiepCuoiError::InvalidCardData)
        ));
    }
}

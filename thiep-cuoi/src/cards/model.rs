//! Card template and customized card models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::template::is_blank;
use validator::{Validate, ValidationError};

/// Version assigned to card templates created without one
pub const DEFAULT_TEMPLATE_VERSION: &str = "1.0";

/// Stored HTML/CSS design for a wedding card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Card template ID
    pub id: i64,

    /// Parent catalogue template this design belongs to
    pub template_id: i64,

    /// Display name of this design
    pub template_name: String,

    /// HTML with `{{token}}` placeholders
    pub html_content: String,

    /// CSS with `{{token}}` placeholders
    pub css_content: Option<String>,

    /// Required-field declaration, a JSON object of field name to label
    pub template_variables: Option<String>,

    /// Full-size preview image
    pub preview_image_url: Option<String>,

    /// Thumbnail image
    pub thumbnail_url: Option<String>,

    /// Design version
    pub version: String,

    /// Inactive templates are hidden from new customizations
    pub is_active: bool,

    /// Timestamp when the template was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the template was last updated
    pub updated_at: DateTime<Utc>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Data for creating or replacing a card template
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewCardTemplate {
    /// Parent catalogue template
    pub template_id: i64,

    /// Display name of this design
    #[validate(custom(function = "not_blank", message = "Card template name must not be empty"))]
    pub template_name: String,

    /// HTML with `{{token}}` placeholders
    #[validate(custom(function = "not_blank", message = "HTML content must not be empty"))]
    pub html_content: String,

    /// CSS with `{{token}}` placeholders
    #[serde(default)]
    pub css_content: Option<String>,

    /// Required-field declaration
    #[serde(default)]
    pub template_variables: Option<String>,

    /// Full-size preview image
    #[serde(default)]
    pub preview_image_url: Option<String>,

    /// Thumbnail image
    #[serde(default)]
    pub thumbnail_url: Option<String>,

    /// Design version, defaults to [`DEFAULT_TEMPLATE_VERSION`]
    #[serde(default)]
    pub version: Option<String>,
}

/// Request to customize a card template with user data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomizeCardRequest {
    /// Card template to render
    pub card_template_id: i64,

    /// Token values, keyed by token name
    pub custom_data: HashMap<String, String>,

    /// Keep the result (`true`) or only preview it (`false`)
    #[serde(default)]
    pub save_card: bool,
}

impl CustomizeCardRequest {
    /// Preview request for `card_template_id`
    #[must_use]
    pub fn preview(card_template_id: i64, custom_data: HashMap<String, String>) -> Self {
        Self {
            card_template_id,
            custom_data,
            save_card: false,
        }
    }

    /// Mark the request as one whose result should be saved
    #[must_use]
    pub fn saved(mut self) -> Self {
        self.save_card = true;
        self
    }
}

/// A card template rendered with one user's data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizedCard {
    /// Stored card ID, `None` for previews that were never kept
    pub id: Option<i64>,

    /// Card template the card was rendered from
    pub card_template_id: i64,

    /// Parent catalogue template
    pub template_id: i64,

    /// Name of the card template
    pub card_template_name: String,

    /// Custom data as a JSON object with sorted keys
    pub custom_data: String,

    /// Rendered, escaped HTML
    pub rendered_html: String,

    /// Rendered CSS, absent when the template has none
    pub rendered_css: Option<String>,

    /// Whether the user kept this card
    pub is_saved: bool,

    /// Timestamp when the card was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the card was last rendered or saved
    pub updated_at: DateTime<Utc>,
}

impl CustomizedCard {
    /// Mark the card as saved
    pub fn mark_saved(&mut self) {
        self.is_saved = true;
        self.updated_at = Utc::now();
    }

    /// Well-known fields parsed from the custom data
    ///
    /// Unparseable custom data yields empty details.
    #[must_use]
    pub fn details(&self) -> CardDetails {
        serde_json::from_str(&self.custom_data).unwrap_or_default()
    }
}

/// Well-known invitation fields of a customized card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    /// Groom's name
    pub groom_name: Option<String>,
    /// Bride's name
    pub bride_name: Option<String>,
    /// Wedding date
    pub wedding_date: Option<String>,
    /// Wedding time
    pub wedding_time: Option<String>,
    /// Wedding venue
    pub wedding_venue: Option<String>,
    /// Free-form message
    pub custom_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(custom_data: &str) -> CustomizedCard {
        let now = Utc::now();
        CustomizedCard {
            id: None,
            card_template_id: 1,
            template_id: 1,
            card_template_name: "Classic".to_string(),
            custom_data: custom_data.to_string(),
            rendered_html: String::new(),
            rendered_css: None,
            is_saved: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_details_parses_known_fields() {
        let details =
            card(r#"{"groom_name":"Minh","bride_name":"Lan","extra":"ignored"}"#).details();
        assert_eq!(details.groom_name.as_deref(), Some("Minh"));
        assert_eq!(details.bride_name.as_deref(), Some("Lan"));
        assert!(details.wedding_venue.is_none());
    }

    #[test]
    fn test_details_ignores_unparseable_data() {
        assert_eq!(card("{oops").details(), CardDetails::default());
    }

    #[test]
    fn test_mark_saved() {
        let mut card = card("{}");
        let before = card.updated_at;
        card.mark_saved();
        assert!(card.is_saved);
        assert!(card.updated_at >= before);
    }

    #[test]
    fn test_new_card_template_validation() {
        let empty = NewCardTemplate::default();
        let errors = empty.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("template_name"));
        assert!(fields.contains_key("html_content"));
    }

    #[test]
    fn test_whitespace_only_name_and_html_are_blank() {
        let blank = NewCardTemplate {
            template_name: "   ".to_string(),
            html_content: " \n\t".to_string(),
            ..NewCardTemplate::default()
        };
        let errors = blank.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["template_name"][0].code, "blank");
        assert_eq!(
            fields["html_content"][0].message.as_deref(),
            Some("HTML content must not be empty")
        );
    }

    #[test]
    fn test_request_defaults_to_preview() {
        let request: CustomizeCardRequest =
            serde_json::from_str(r#"{"card_template_id": 3, "custom_data": {}}"#).unwrap();
        assert!(!request.save_card);
        assert!(CustomizeCardRequest::preview(3, HashMap::new()).saved().save_card);
    }
}

//! Bundled sample card design

use super::model::NewCardTemplate;

const CLASSIC_GOLD_HTML: &str = r#"<div class="wedding-card classic-gold">
    <div class="card-header">
        <h1>{{groom_name}} & {{bride_name}}</h1>
    </div>
    <div class="card-body">
        <p class="date">{{wedding_date}}</p>
        <p class="time">{{wedding_time}}</p>
        <p class="venue">{{wedding_venue}}</p>
        <p class="message">{{custom_message}}</p>
    </div>
    <div class="card-footer">
        <p>Trân trọng kính mời</p>
    </div>
</div>"#;

const CLASSIC_GOLD_CSS: &str = r#".wedding-card.classic-gold {
    max-width: 500px;
    margin: 0 auto;
    background: linear-gradient(135deg, #ffd700 0%, #ffed4a 100%);
    border: 1px solid #e0e0e0;
    padding: 40px;
    font-family: "Inter", sans-serif;
    text-align: center;
    color: #333;
    box-shadow: 0 4px 20px rgba(0,0,0,0.1);
}
.card-content h2 { font-size: 2rem; font-weight: 300; margin-bottom: 20px; }
.divider { width: 100px; height: 2px; background: #e91e63; margin: 20px auto; }
.date { font-size: 1.3rem; font-weight: 500; margin: 15px 0; }"#;

const CLASSIC_GOLD_VARIABLES: &str = r#"{"groom_name": "Tên chú rể", "bride_name": "Tên cô dâu", "wedding_date": "Ngày cưới", "wedding_time": "Giờ cưới", "wedding_venue": "Địa điểm", "custom_message": "Lời nhắn"}"#;

/// The "classic gold" card design declaring all six invitation fields
#[must_use]
pub fn classic_gold() -> NewCardTemplate {
    NewCardTemplate {
        template_id: 1,
        template_name: "Thiệp cổ điển vàng HTML".to_string(),
        html_content: CLASSIC_GOLD_HTML.to_string(),
        css_content: Some(CLASSIC_GOLD_CSS.to_string()),
        template_variables: Some(CLASSIC_GOLD_VARIABLES.to_string()),
        preview_image_url: Some("/images/modern-white-template.jpg".to_string()),
        thumbnail_url: None,
        version: Some("1.0".to_string()),
    }
}

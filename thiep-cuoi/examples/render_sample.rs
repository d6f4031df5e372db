//! Render the bundled sample card
//!
//! Demonstrates:
//! - Configuration loading
//! - Observability initialization
//! - Card customization and validation failure
//!
//! Run with: `cargo run --example render_sample`

use std::collections::HashMap;
use std::sync::Arc;
use thiep_cuoi::{observability, prelude::*};

fn main() -> anyhow::Result<()> {
    let config = ThiepCuoiConfig::load_for_service("thiep-cuoi")?;
    observability::init(&config.logging)?;

    tracing::info!(service = %config.service.name, "Starting sample render");

    let templates = Arc::new(InMemoryCardTemplates::with_sample()?);
    let service = CardService::from_settings(Arc::clone(&templates), &config.cards);

    for template in templates.list_active() {
        tracing::info!(id = template.id, name = %template.template_name, "Card template available");
    }

    let data: HashMap<String, String> = [
        ("groom_name", "Nguyễn Minh"),
        ("bride_name", "Trần Lan"),
        ("wedding_date", "20/12/2026"),
        ("wedding_time", "18:00"),
        ("wedding_venue", "Trung tâm tiệc cưới Hoa Sen"),
        ("custom_message", "Sự hiện diện của bạn là niềm vinh hạnh của chúng tôi"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let card = service.customize(&CustomizeCardRequest::preview(1, data.clone()))?;
    println!("{}", card.rendered_html);

    let mut incomplete = data;
    incomplete.insert("bride_name".to_string(), "   ".to_string());
    match service.customize(&CustomizeCardRequest::preview(1, incomplete)) {
        Ok(_) => tracing::warn!("Blank bride name was accepted"),
        Err(e) => tracing::info!(error = %e, "Blank bride name rejected"),
    }

    Ok(())
}

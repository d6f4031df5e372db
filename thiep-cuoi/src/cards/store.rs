//! Customized card storage

use super::model::CustomizedCard;
use crate::error::{Result, ThiepCuoiError};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    cards: BTreeMap<i64, CustomizedCard>,
}

/// In-memory store of customized cards
///
/// Ids are assigned sequentially starting at 1. Listings are newest first.
#[derive(Debug, Default)]
pub struct InMemoryCustomizedCards {
    inner: RwLock<Inner>,
}

impl InMemoryCustomizedCards {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a card under a fresh id and return the stored copy
    #[must_use]
    pub fn insert(&self, mut card: CustomizedCard) -> CustomizedCard {
        let id = {
            let mut inner = self.inner.write();
            inner.last_id += 1;
            let id = inner.last_id;
            card.id = Some(id);
            inner.cards.insert(id, card.clone());
            id
        };

        tracing::debug!(customized_card_id = id, "Customized card stored");
        card
    }

    /// Find a stored card
    #[must_use]
    pub fn get(&self, id: i64) -> Option<CustomizedCard> {
        self.inner.read().cards.get(&id).cloned()
    }

    /// Overwrite a stored card with `card`
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::CustomizedCardNotFound`] if `card` has no id
    /// or nothing is stored under it.
    pub fn replace(&self, card: CustomizedCard) -> Result<CustomizedCard> {
        let id = card.id.unwrap_or_default();
        let mut inner = self.inner.write();
        let stored = inner
            .cards
            .get_mut(&id)
            .ok_or(ThiepCuoiError::CustomizedCardNotFound(id))?;
        stored.clone_from(&card);
        Ok(card)
    }

    /// Mark a stored card as saved
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::CustomizedCardNotFound`] for an unknown id.
    pub fn mark_saved(&self, id: i64) -> Result<CustomizedCard> {
        let mut inner = self.inner.write();
        let card = inner
            .cards
            .get_mut(&id)
            .ok_or(ThiepCuoiError::CustomizedCardNotFound(id))?;
        card.mark_saved();
        Ok(card.clone())
    }

    /// Remove a stored card
    ///
    /// # Errors
    ///
    /// Returns [`ThiepCuoiError::CustomizedCardNotFound`] for an unknown id.
    pub fn remove(&self, id: i64) -> Result<CustomizedCard> {
        let card = self
            .inner
            .write()
            .cards
            .remove(&id)
            .ok_or(ThiepCuoiError::CustomizedCardNotFound(id))?;

        tracing::debug!(customized_card_id = id, "Customized card deleted");
        Ok(card)
    }

    /// All stored cards, newest first
    #[must_use]
    pub fn list(&self) -> Vec<CustomizedCard> {
        self.newest_first(|_| true)
    }

    /// Saved cards, newest first
    #[must_use]
    pub fn list_saved(&self) -> Vec<CustomizedCard> {
        self.newest_first(|card| card.is_saved)
    }

    fn newest_first(&self, keep: impl Fn(&CustomizedCard) -> bool) -> Vec<CustomizedCard> {
        let mut cards: Vec<_> = self
            .inner
            .read()
            .cards
            .values()
            .filter(|card| keep(card))
            .cloned()
            .collect();
        cards.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        cards
    }
}

//! Result grid projection
//!
//! Pure join of the normalized card list with the ownership overlay into
//! render-ready rows. No caching: rows are recomputed whenever the card
//! list or the overlay changes, and `owned` is read from the overlay at
//! projection time.

use super::cards::CardRecord;
use crate::vault::OwnershipOverlay;

/// Fixed back-of-card image substituted when a card image is missing.
pub const PLACEHOLDER_IMAGE: &str = "https://images.pokemontcg.io/base1/back.png";

/// One render-ready grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    pub card_id: String,
    pub name: String,
    pub number: Option<String>,
    /// Resolved display image; the placeholder when the record has none.
    pub image_url: String,
    /// Whether the ownership badge is shown.
    pub owned: bool,
    /// Hover caption: collector number and name.
    pub hover_label: String,
}

fn hover_label(card: &CardRecord) -> String {
    match &card.number {
        Some(number) => format!("#{} {}", number, card.name),
        None => card.name.clone(),
    }
}

/// Project cards and overlay into grid rows.
pub fn project(cards: &[CardRecord], overlay: &OwnershipOverlay) -> Vec<RenderRow> {
    cards
        .iter()
        .map(|card| RenderRow {
            card_id: card.id.clone(),
            name: card.name.clone(),
            number: card.number.clone(),
            image_url: card
                .image_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            owned: overlay.is_owned(&card.id),
            hover_label: hover_label(card),
        })
        .collect()
}

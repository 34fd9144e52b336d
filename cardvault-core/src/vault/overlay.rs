//! Ownership overlay store
//!
//! Session-scoped record of which cards the user owns and in which print
//! variant. The overlay is the only state shared between the results grid
//! and the card-detail session, and it is mutated exclusively through
//! [`OwnershipOverlay::adjust`] so the two consumers never hold divergent
//! copies. Nothing here persists: the overlay is created empty and
//! discarded with the browsing session.

use std::collections::HashMap;
use tracing::debug;

/// Print finish of a card. Closed set: a variant outside this enum is a
/// caller bug and cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Normal,
    Reverse,
    Holo,
}

impl Variant {
    /// All variants, in the order the detail view lists them.
    pub const ALL: [Variant; 3] = [Variant::Normal, Variant::Reverse, Variant::Holo];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Normal => "Normal",
            Variant::Reverse => "Reverse",
            Variant::Holo => "Holo",
        }
    }

    fn index(&self) -> usize {
        match self {
            Variant::Normal => 0,
            Variant::Reverse => 1,
            Variant::Holo => 2,
        }
    }
}

/// Per-card variant counts. Counts never go below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnershipRecord {
    counts: [u32; 3],
}

impl OwnershipRecord {
    pub fn count(&self, variant: Variant) -> u32 {
        self.counts[variant.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// A card is owned iff any variant count is positive.
    pub fn is_owned(&self) -> bool {
        self.total() > 0
    }
}

type OwnedCallback = Box<dyn FnMut(bool)>;

/// Mapping card id → ownership record, with change notification at the
/// owned/unowned boundary.
///
/// Records are created lazily on first adjustment and never removed;
/// acceptable because the overlay lives only as long as the session.
#[derive(Default)]
pub struct OwnershipOverlay {
    records: HashMap<String, OwnershipRecord>,
    subscribers: HashMap<String, Vec<OwnedCallback>>,
}

impl OwnershipOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a delta to one variant count, clamping at zero.
    ///
    /// Returns the new count. Subscribers for the card are notified only
    /// when the adjustment crosses the owned/unowned boundary, so grid
    /// badges update without recomputing the whole grid.
    pub fn adjust(&mut self, card_id: &str, variant: Variant, delta: i32) -> u32 {
        let record = self.records.entry(card_id.to_string()).or_default();
        let was_owned = record.is_owned();

        let old = record.counts[variant.index()];
        let new = if delta < 0 {
            old.saturating_sub(delta.unsigned_abs())
        } else {
            old.saturating_add(delta as u32)
        };
        record.counts[variant.index()] = new;

        let now_owned = record.is_owned();
        if was_owned != now_owned {
            debug!(card = card_id, owned = now_owned, "ownership boundary crossed");
            if let Some(callbacks) = self.subscribers.get_mut(card_id) {
                for callback in callbacks.iter_mut() {
                    callback(now_owned);
                }
            }
        }
        new
    }

    /// Snapshot of a card's record; default (all zero) when untouched.
    pub fn record(&self, card_id: &str) -> OwnershipRecord {
        self.records.get(card_id).copied().unwrap_or_default()
    }

    pub fn count(&self, card_id: &str, variant: Variant) -> u32 {
        self.record(card_id).count(variant)
    }

    pub fn is_owned(&self, card_id: &str) -> bool {
        self.record(card_id).is_owned()
    }

    /// Register a callback invoked with the new `is_owned` value whenever
    /// an adjustment changes it for this card.
    pub fn subscribe(&mut self, card_id: &str, callback: impl FnMut(bool) + 'static) {
        self.subscribers
            .entry(card_id.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Number of cards with a record (touched at least once).
    pub fn tracked_cards(&self) -> usize {
        self.records.len()
    }
}

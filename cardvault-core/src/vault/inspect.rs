//! Card inspection session
//!
//! Transient state for the currently opened card detail view. While open,
//! the session exclusively owns two global UI resources: background
//! scroll suppression and the escape-key listener. Both are acquired on
//! open and released unconditionally when the session ends, however it
//! ends (explicit close, escape input, or drop).

use tracing::debug;

use crate::catalog::cards::CardRecord;
use super::overlay::{OwnershipOverlay, Variant};

/// Global UI resources the detail view needs for its lifetime.
///
/// The session only drives acquisition order and guaranteed release;
/// what "scroll" and "escape listener" mean is up to the front end.
pub trait InspectionResources {
    fn suppress_scroll(&mut self);
    fn restore_scroll(&mut self);
    fn install_escape_listener(&mut self);
    fn remove_escape_listener(&mut self);
}

/// No-op resources for headless front ends (CLI, tests).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessResources;

impl InspectionResources for HeadlessResources {
    fn suppress_scroll(&mut self) {}
    fn restore_scroll(&mut self) {}
    fn install_escape_listener(&mut self) {}
    fn remove_escape_listener(&mut self) {}
}

/// A single open card-detail view.
pub struct InspectionSession {
    card: CardRecord,
    resources: Box<dyn InspectionResources>,
    open: bool,
}

impl InspectionSession {
    /// Open a session for `card`, acquiring the detail view's resources.
    pub fn open(card: CardRecord, mut resources: Box<dyn InspectionResources>) -> Self {
        resources.suppress_scroll();
        resources.install_escape_listener();
        debug!(card = %card.id, "inspection session opened");
        Self {
            card,
            resources,
            open: true,
        }
    }

    pub fn card(&self) -> &CardRecord {
        &self.card
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Increment one variant counter for the inspected card.
    pub fn increment(&mut self, overlay: &mut OwnershipOverlay, variant: Variant) -> u32 {
        overlay.adjust(&self.card.id, variant, 1)
    }

    /// Decrement one variant counter; clamps at zero in the overlay.
    pub fn decrement(&mut self, overlay: &mut OwnershipOverlay, variant: Variant) -> u32 {
        overlay.adjust(&self.card.id, variant, -1)
    }

    /// Live per-variant counters for the detail view, in display order.
    pub fn counts(&self, overlay: &OwnershipOverlay) -> [(Variant, u32); 3] {
        let record = overlay.record(&self.card.id);
        Variant::ALL.map(|variant| (variant, record.count(variant)))
    }

    /// Cancellation key input: ends the session.
    pub fn handle_escape(&mut self) {
        self.end();
    }

    /// Explicitly end the session.
    pub fn close(&mut self) {
        self.end();
    }

    fn end(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.resources.remove_escape_listener();
        self.resources.restore_scroll();
        debug!(card = %self.card.id, "inspection session closed");
    }
}

impl Drop for InspectionSession {
    fn drop(&mut self) {
        self.end();
    }
}

//! Catalog browsing subsystem
//!
//! Cascading filter (license → extension → card) over asynchronous,
//! shape-inconsistent API responses, joined with the session-local
//! ownership overlay into a render-ready grid.
//!
//! [`CatalogBrowser`] is the facade: it owns the filter state machine,
//! the fetcher, and the overlay, and exposes the selection operations the
//! front end drives. Each successful selection re-derives the request
//! key, fetches, and normalizes the response; stale responses are
//! discarded by the fetcher's generation rule.

pub mod cards;
pub mod extensions;
pub mod fetcher;
pub mod filter;
pub mod grid;
pub mod query;
pub mod transport;

// Re-export main types
pub use cards::CardRecord;
pub use fetcher::{CatalogFetcher, FetchState, FetchTicket};
pub use filter::{FilterController, SubmenuFocus};
pub use grid::{RenderRow, PLACEHOLDER_IMAGE};
pub use query::{CatalogQuery, Extension, License};
pub use transport::{CatalogTransport, ClientConfig, HttpTransport};

use tracing::debug;

use crate::vault::{HeadlessResources, InspectionResources, InspectionSession, OwnershipOverlay};

/// Owns the browsing state: filter selection, fetch state, normalized
/// results, and the ownership overlay.
pub struct CatalogBrowser {
    controller: FilterController,
    fetcher: CatalogFetcher,
    overlay: OwnershipOverlay,
    extensions: Vec<Extension>,
    cards: Vec<CardRecord>,
}

impl CatalogBrowser {
    /// Create a browser over the given transport with an empty overlay.
    pub fn new(transport: Box<dyn CatalogTransport>) -> Self {
        Self {
            controller: FilterController::new(),
            fetcher: CatalogFetcher::new(transport),
            overlay: OwnershipOverlay::new(),
            extensions: Vec::new(),
            cards: Vec::new(),
        }
    }

    /// Fetch the base catalog listing for the initial no-selection state.
    pub async fn load_initial(&mut self) {
        self.refresh().await;
    }

    /// Select a license; fetches that license's extension list.
    pub async fn select_license(&mut self, license: License) {
        if self.controller.select_license(license) {
            self.cards.clear();
            self.extensions.clear();
            self.refresh().await;
        }
    }

    /// Select an extension; fetches that extension's cards. Invalid
    /// selections (no license, wrong license) are no-ops.
    pub async fn select_extension(&mut self, extension: Extension) {
        if self.controller.select_extension(extension) {
            self.cards.clear();
            self.refresh().await;
        }
    }

    /// Clear the selection and reload the base listing.
    pub async fn clear_selection(&mut self) {
        if self.controller.clear() {
            self.cards.clear();
            self.extensions.clear();
            self.refresh().await;
        }
    }

    async fn refresh(&mut self) {
        let endpoint = self.controller.endpoint();
        if self.fetcher.fetch(&endpoint).await {
            self.apply_response();
        }
    }

    /// Normalize whatever the current query expects out of the last
    /// response. License scope yields extensions; everything else yields
    /// cards.
    fn apply_response(&mut self) {
        let data = self.fetcher.state().data.as_ref();
        match self.controller.query().clone() {
            CatalogQuery::All => {
                self.cards = cards::normalize_card_list(data, None, None);
                debug!(count = self.cards.len(), "base listing normalized");
            }
            CatalogQuery::License(license) => {
                self.extensions = extensions::normalize_extension_list(data, license);
                debug!(
                    license = %license,
                    count = self.extensions.len(),
                    "extension list normalized"
                );
            }
            CatalogQuery::Extension(license, extension_id) => {
                self.cards =
                    cards::normalize_card_list(data, Some(license), Some(&extension_id));
                debug!(
                    license = %license,
                    extension = %extension_id,
                    count = self.cards.len(),
                    "card list normalized"
                );
            }
        }
    }

    /// Open the detail session for a card in the current results.
    pub fn open_card(&self, card_id: &str) -> Option<InspectionSession> {
        self.open_card_with(card_id, Box::new(HeadlessResources))
    }

    /// Open the detail session with front-end supplied resources.
    pub fn open_card_with(
        &self,
        card_id: &str,
        resources: Box<dyn InspectionResources>,
    ) -> Option<InspectionSession> {
        let card = self.cards.iter().find(|card| card.id == card_id)?.clone();
        Some(InspectionSession::open(card, resources))
    }

    /// Render-ready rows for the current results and overlay.
    pub fn grid(&self) -> Vec<RenderRow> {
        grid::project(&self.cards, &self.overlay)
    }

    // State the front end reads.

    pub fn fetch_state(&self) -> &FetchState {
        self.fetcher.state()
    }

    pub fn filter(&self) -> &FilterController {
        &self.controller
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn overlay(&self) -> &OwnershipOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OwnershipOverlay {
        &mut self.overlay
    }

    // Panel visibility, delegated so front ends never touch selection
    // state directly.

    pub fn toggle_filter_panel(&mut self) {
        self.controller.toggle_filter_panel();
    }

    pub fn toggle_sort_panel(&mut self) {
        self.controller.toggle_sort_panel();
    }

    pub fn toggle_submenu(&mut self, which: SubmenuFocus) {
        self.controller.toggle_submenu(which);
    }
}

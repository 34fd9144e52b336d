//! Cascading filter state machine
//!
//! Owns the license → extension selection and the filter panel's UI
//! flags. Selection transitions are guarded here so invalid combinations
//! never reach the fetcher: an extension can only be selected under its
//! own license, and selecting a new license always clears the extension.
//!
//! The two submenus inside the filter panel are single-focus: opening one
//! closes the other. That mutual exclusion is modeled as one enumerated
//! focus value rather than two independent booleans, so the
//! both-open combination is unreachable.

use tracing::debug;

use super::query::{CatalogQuery, Extension, License};

/// Which submenu of the filter panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmenuFocus {
    #[default]
    None,
    Licenses,
    Extensions,
}

/// Cascading selection state machine plus panel visibility flags.
///
/// States: no selection → license selected → license and extension
/// selected. Every successful transition re-derives the request key;
/// callers observe that through [`FilterController::endpoint`].
#[derive(Default)]
pub struct FilterController {
    query: CatalogQuery,
    /// Full object for the selected extension, kept for display.
    selected_extension: Option<Extension>,
    filter_open: bool,
    sort_open: bool,
    submenu: SubmenuFocus,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Request key for the current selection.
    pub fn endpoint(&self) -> String {
        self.query.endpoint()
    }

    pub fn selected_license(&self) -> Option<License> {
        self.query.license()
    }

    pub fn selected_extension(&self) -> Option<&Extension> {
        self.selected_extension.as_ref()
    }

    /// Select a license. Valid from any state.
    ///
    /// Clears any extension selection and closes the submenus (a pick is
    /// made from the license submenu, and stale extension ids from the
    /// previous license must not survive). Returns `true` when the query
    /// changed and the request key must be recomputed.
    pub fn select_license(&mut self, license: License) -> bool {
        self.selected_extension = None;
        self.submenu = SubmenuFocus::None;

        let next = CatalogQuery::License(license);
        if self.query == next {
            return false;
        }
        debug!(license = %license, "license selected");
        self.query = next;
        true
    }

    /// Select an extension. Valid only with a license selected, and the
    /// extension must belong to it; anything else is a no-op.
    pub fn select_extension(&mut self, extension: Extension) -> bool {
        let Some(license) = self.query.license() else {
            debug!(
                extension = %extension.id,
                "extension selection ignored: no license selected"
            );
            return false;
        };
        if extension.license != license {
            debug!(
                extension = %extension.id,
                expected = %license,
                got = %extension.license,
                "extension selection ignored: license mismatch"
            );
            return false;
        }

        self.submenu = SubmenuFocus::None;
        let next = CatalogQuery::Extension(license, extension.id.clone());
        let changed = self.query != next;
        if changed {
            debug!(extension = %extension.id, "extension selected");
            self.query = next;
        }
        self.selected_extension = Some(extension);
        changed
    }

    /// Return to the no-selection state.
    pub fn clear(&mut self) -> bool {
        self.selected_extension = None;
        self.submenu = SubmenuFocus::None;
        if self.query == CatalogQuery::All {
            return false;
        }
        debug!("filter selection cleared");
        self.query = CatalogQuery::All;
        true
    }

    // Panel visibility. Filter and sort panels are independent of each
    // other and of the selection machine.

    pub fn filter_open(&self) -> bool {
        self.filter_open
    }

    pub fn sort_open(&self) -> bool {
        self.sort_open
    }

    pub fn submenu(&self) -> SubmenuFocus {
        self.submenu
    }

    pub fn toggle_filter_panel(&mut self) {
        self.filter_open = !self.filter_open;
    }

    pub fn toggle_sort_panel(&mut self) {
        self.sort_open = !self.sort_open;
    }

    /// Toggle a submenu. Opening one closes the other by construction.
    pub fn toggle_submenu(&mut self, which: SubmenuFocus) {
        self.submenu = if self.submenu == which {
            SubmenuFocus::None
        } else {
            which
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extension(id: &str, license: License) -> Extension {
        Extension {
            id: id.to_string(),
            name: id.to_uppercase(),
            total_cards: None,
            license,
        }
    }

    #[test]
    fn test_initial_state() {
        let controller = FilterController::new();
        assert_eq!(controller.query(), &CatalogQuery::All);
        assert_eq!(controller.endpoint(), "/search");
        assert_eq!(controller.submenu(), SubmenuFocus::None);
        assert!(!controller.filter_open());
    }

    #[test]
    fn test_extension_without_license_is_noop() {
        let mut controller = FilterController::new();
        let changed = controller.select_extension(extension("base1", License::Pokemon));
        assert!(!changed);
        assert_eq!(controller.query(), &CatalogQuery::All);
        assert_eq!(controller.selected_extension(), None);
    }

    #[test]
    fn test_license_then_extension() {
        let mut controller = FilterController::new();
        assert!(controller.select_license(License::Pokemon));
        assert_eq!(controller.endpoint(), "/search/pokemon");

        assert!(controller.select_extension(extension("swsh3", License::Pokemon)));
        assert_eq!(controller.endpoint(), "/search/pokemon/swsh3");
        assert_eq!(
            controller.selected_extension().map(|e| e.id.as_str()),
            Some("swsh3")
        );
    }

    #[test]
    fn test_extension_license_mismatch_is_noop() {
        let mut controller = FilterController::new();
        controller.select_license(License::Pokemon);
        let changed = controller.select_extension(extension("lea", License::Magic));
        assert!(!changed);
        assert_eq!(controller.endpoint(), "/search/pokemon");
    }

    #[test]
    fn test_new_license_clears_extension() {
        let mut controller = FilterController::new();
        controller.select_license(License::Pokemon);
        controller.select_extension(extension("swsh3", License::Pokemon));

        assert!(controller.select_license(License::Magic));
        assert_eq!(controller.endpoint(), "/search/magic");
        assert_eq!(controller.selected_extension(), None);

        // The old extension cannot come back without a fresh selection.
        let changed = controller.select_extension(extension("swsh3", License::Pokemon));
        assert!(!changed);
        assert_eq!(controller.endpoint(), "/search/magic");
    }

    #[test]
    fn test_reselecting_same_license_reports_no_change_but_resets_extension() {
        let mut controller = FilterController::new();
        controller.select_license(License::Pokemon);
        controller.select_extension(extension("base1", License::Pokemon));

        // Same license again: query moves back to license scope.
        assert!(controller.select_license(License::Pokemon));
        assert_eq!(controller.endpoint(), "/search/pokemon");
        assert_eq!(controller.selected_extension(), None);
    }

    #[test]
    fn test_clear_returns_to_no_selection() {
        let mut controller = FilterController::new();
        controller.select_license(License::Magic);
        assert!(controller.clear());
        assert_eq!(controller.query(), &CatalogQuery::All);
        assert!(!controller.clear());
    }

    #[test]
    fn test_submenus_are_mutually_exclusive() {
        let mut controller = FilterController::new();
        controller.toggle_submenu(SubmenuFocus::Licenses);
        assert_eq!(controller.submenu(), SubmenuFocus::Licenses);

        controller.toggle_submenu(SubmenuFocus::Extensions);
        assert_eq!(controller.submenu(), SubmenuFocus::Extensions);

        controller.toggle_submenu(SubmenuFocus::Extensions);
        assert_eq!(controller.submenu(), SubmenuFocus::None);
    }

    #[test]
    fn test_panels_independent_of_submenus() {
        let mut controller = FilterController::new();
        controller.toggle_filter_panel();
        controller.toggle_sort_panel();
        controller.toggle_submenu(SubmenuFocus::Licenses);
        assert!(controller.filter_open());
        assert!(controller.sort_open());

        // Selecting a license closes the submenu but leaves panels alone.
        controller.select_license(License::Pokemon);
        assert_eq!(controller.submenu(), SubmenuFocus::None);
        assert!(controller.filter_open());
        assert!(controller.sort_open());
    }
}

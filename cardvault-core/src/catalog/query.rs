//! Catalog selection model and request-key derivation
//!
//! A `CatalogQuery` is the current (license, extension) selection. The
//! endpoint string derived from it doubles as the request key: equal
//! selections always produce the identical string, so the fetcher can use
//! it to recognize key changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trading-card license (brand/property). Closed set, supplied statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    Pokemon,
    Magic,
}

impl License {
    /// All supported licenses, in menu order.
    pub const ALL: [License; 2] = [License::Pokemon, License::Magic];

    /// Display name shown in the filter menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            License::Pokemon => "Pokemon",
            License::Magic => "Magic",
        }
    }

    /// Lowercase identifier used in endpoint paths.
    pub fn slug(&self) -> &'static str {
        match self {
            License::Pokemon => "pokemon",
            License::Magic => "magic",
        }
    }

    /// Resolve a license from a user- or API-supplied name, case-insensitively.
    pub fn from_name(name: &str) -> Option<License> {
        License::ALL
            .into_iter()
            .find(|license| license.slug().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An expansion/set released within a license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    /// Source-provided set identifier (e.g. "swsh3", "base1").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Number of cards in the set, when the source provides it.
    pub total_cards: Option<u32>,

    /// License this extension belongs to.
    pub license: License,
}

/// The current cascading filter selection.
///
/// An extension selection without a license is unrepresentable by
/// construction; selecting a new license always starts from the
/// `License` variant, which carries no extension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogQuery {
    /// Nothing selected: base catalog listing.
    #[default]
    All,
    /// License selected: that license's extension list.
    License(License),
    /// License and extension selected: that extension's cards.
    Extension(License, String),
}

impl CatalogQuery {
    /// Derive the endpoint (request key) for this selection.
    ///
    /// Pure and deterministic; path segments are lowercased so case
    /// variants of the same identifiers yield the identical key.
    pub fn endpoint(&self) -> String {
        match self {
            CatalogQuery::All => "/search".to_string(),
            CatalogQuery::License(license) => format!("/search/{}", license.slug()),
            CatalogQuery::Extension(license, extension) => {
                format!("/search/{}/{}", license.slug(), extension.to_lowercase())
            }
        }
    }

    /// The selected license, if any.
    pub fn license(&self) -> Option<License> {
        match self {
            CatalogQuery::All => None,
            CatalogQuery::License(license) | CatalogQuery::Extension(license, _) => Some(*license),
        }
    }

    /// The selected extension id, if any.
    pub fn extension_id(&self) -> Option<&str> {
        match self {
            CatalogQuery::Extension(_, extension) => Some(extension),
            _ => None,
        }
    }
}

//! Vault - session-local ownership tracking
//!
//! The overlay records which cards the user owns and in which print
//! variant; the inspection session is the detail view that mutates it.
//! Both are scoped to the browsing session; persistence is a future
//! collaborator's concern.

pub mod inspect;
pub mod overlay;

pub use inspect::{HeadlessResources, InspectionResources, InspectionSession};
pub use overlay::{OwnershipOverlay, OwnershipRecord, Variant};

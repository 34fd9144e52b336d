//! CardVault core library exports

pub mod catalog;
pub mod error;
pub mod vault;

pub use error::CatalogError;

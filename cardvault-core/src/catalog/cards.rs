//! Card record normalization
//!
//! License payloads do not agree on field names: the id may arrive as
//! `card_id`, `id`, or `api_id`, the collector number as `card_number`,
//! `localId`, or `collector_number`, and the image as `image_url` or
//! `image`. This module reshapes one raw record at a time into a uniform
//! [`CardRecord`]; nothing downstream inspects raw shapes.

use serde_json::Value;
use tracing::debug;

use super::query::License;

/// Canonical id resolution order: most specific field first.
const ID_FIELDS: [&str; 3] = ["card_id", "id", "api_id"];
const NUMBER_FIELDS: [&str; 3] = ["card_number", "localId", "collector_number"];
const IMAGE_FIELDS: [&str; 2] = ["image_url", "image"];
const NAME_FIELDS: [&str; 2] = ["card_name", "name"];

/// A card reshaped into the one view model the grid and detail view use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    /// Canonical id, resolved from heterogeneous source fields. Never
    /// empty: a record that cannot yield one is dropped, not synthesized.
    pub id: String,
    pub name: String,
    pub number: Option<String>,
    /// Display image URL with the license-specific suffix rule applied.
    pub image_url: Option<String>,
    pub license: License,
    /// Extension id the card was fetched under, when known.
    pub extension: Option<String>,
}

/// Read the first present field as a string; numbers are stringified so
/// numeric ids and collector numbers survive.
pub(crate) fn first_string(raw: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match raw.get(*field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Normalize one raw record from a license-specific payload.
///
/// The license is taken from the record itself when present, falling back
/// to the license of the query the payload was fetched under. Records
/// with no resolvable canonical id or license are dropped.
pub fn normalize_card(
    raw: &Value,
    fallback_license: Option<License>,
    extension: Option<&str>,
) -> Option<CardRecord> {
    let id = first_string(raw, &ID_FIELDS)?;

    let license = raw
        .get("license")
        .and_then(Value::as_str)
        .and_then(License::from_name)
        .or(fallback_license);
    let Some(license) = license else {
        debug!(card = %id, "dropping card record with no resolvable license");
        return None;
    };

    let image_url = first_string(raw, &IMAGE_FIELDS).map(|url| match license {
        // The Magic API returns a complete image URL; every other license
        // returns a base path that needs the low-resolution suffix.
        License::Magic => url,
        _ => format!("{url}/low.png"),
    });

    Some(CardRecord {
        id,
        name: first_string(raw, &NAME_FIELDS).unwrap_or_default(),
        number: first_string(raw, &NUMBER_FIELDS),
        image_url,
        license,
        extension: extension.map(str::to_string),
    })
}

/// Normalize a card-list response.
///
/// Accepts a bare sequence, `{ "cards": [...] }`, or `{ "data": [...] }`;
/// anything else yields an empty list. Records that fail to normalize are
/// silently dropped.
pub fn normalize_card_list(
    raw: Option<&Value>,
    fallback_license: Option<License>,
    extension: Option<&str>,
) -> Vec<CardRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let items = match raw {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => match raw.get("cards").or_else(|| raw.get("data")) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| normalize_card(item, fallback_license, extension))
        .collect()
}

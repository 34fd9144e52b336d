//! Extension list normalization
//!
//! Extension-list responses arrive as a bare sequence, as `{ "data":
//! [...] }`, or as a lone object in the single-extension case. Field
//! names differ per license (`extension_id`/`set_id`, `extension_name`/
//! `set_name`). The output is uniform and reversed from source order:
//! the business rule is newest release first.

use serde_json::Value;

use super::cards::first_string;
use super::query::{Extension, License};

const ID_FIELDS: [&str; 3] = ["extension_id", "set_id", "id"];
const NAME_FIELDS: [&str; 3] = ["extension_name", "set_name", "name"];
const TOTAL_FIELDS: [&str; 3] = ["total_cards", "card_count", "cardCount"];

fn normalize_extension(raw: &Value, license: License) -> Option<Extension> {
    let id = first_string(raw, &ID_FIELDS)?;
    let total_cards = TOTAL_FIELDS
        .iter()
        .find_map(|field| raw.get(*field))
        .and_then(Value::as_u64)
        .map(|n| n as u32);

    Some(Extension {
        id,
        name: first_string(raw, &NAME_FIELDS).unwrap_or_default(),
        total_cards,
        license,
    })
}

/// Normalize an extension-list response into display order.
///
/// Absent or malformed input yields an empty list; entries with no
/// resolvable id are dropped. The result is the exact reverse of source
/// order, so the most recently released set is listed first.
pub fn normalize_extension_list(raw: Option<&Value>, license: License) -> Vec<Extension> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut extensions: Vec<Extension> = match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| normalize_extension(item, license))
            .collect(),
        Value::Object(_) => match raw.get("data") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| normalize_extension(item, license))
                .collect(),
            // Lone extension object.
            _ => normalize_extension(raw, license).into_iter().collect(),
        },
        _ => Vec::new(),
    };

    extensions.reverse();
    extensions
}

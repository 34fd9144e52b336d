//! End-to-end browsing flow over a scripted transport: select a license,
//! pick the newest extension, open a card, and watch the grid badge
//! follow the variant counters.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use cardvault_core::catalog::{CatalogBrowser, CatalogTransport, License};
use cardvault_core::error::CatalogError;
use cardvault_core::vault::Variant;

struct ScriptedTransport {
    responses: HashMap<String, Value>,
}

impl ScriptedTransport {
    fn new(pairs: &[(&str, Value)]) -> Self {
        Self {
            responses: pairs
                .iter()
                .map(|(endpoint, body)| (endpoint.to_string(), body.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl CatalogTransport for ScriptedTransport {
    async fn get_json(&self, endpoint: &str) -> Result<Value, CatalogError> {
        self.responses
            .get(endpoint)
            .cloned()
            .ok_or_else(|| CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn pokemon_catalog() -> Box<ScriptedTransport> {
    Box::new(ScriptedTransport::new(&[
        (
            "/search/pokemon",
            // Source order is oldest first; display must reverse it.
            json!([
                {"extension_id": "base1", "extension_name": "Base Set", "total_cards": 102},
                {"extension_id": "jungle", "extension_name": "Jungle", "total_cards": 64},
                {"extension_id": "swsh3", "extension_name": "Darkness Ablaze", "total_cards": 189}
            ]),
        ),
        (
            "/search/pokemon/swsh3",
            json!({"cards": [
                {"card_id": "pokemon-swsh3-2", "card_name": "Scorbunny", "localId": 2,
                 "image": "https://assets.tcgdex.net/en/swsh/swsh3/2", "license": "pokemon"},
                {"card_id": "pokemon-swsh3-3", "card_name": "Raboot", "localId": 3,
                 "image": "https://assets.tcgdex.net/en/swsh/swsh3/3", "license": "pokemon"}
            ]}),
        ),
    ]))
}

#[tokio::test]
async fn test_full_browse_and_badge_flow() {
    let mut browser = CatalogBrowser::new(pokemon_catalog());

    // Select the Pokemon license: extension list loads, newest first.
    browser.select_license(License::Pokemon).await;
    assert!(browser.fetch_state().error.is_none());
    let names: Vec<&str> = browser
        .extensions()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Darkness Ablaze", "Jungle", "Base Set"]);

    // Select the first listed extension: the card grid loads.
    let newest = browser.extensions()[0].clone();
    browser.select_extension(newest).await;
    assert_eq!(browser.cards().len(), 2);
    assert_eq!(
        browser.cards()[0].image_url.as_deref(),
        Some("https://assets.tcgdex.net/en/swsh/swsh3/2/low.png")
    );

    // Badge state propagates to the grid via the overlay.
    let badge: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&badge);
    browser
        .overlay_mut()
        .subscribe("pokemon-swsh3-2", move |owned| sink.borrow_mut().push(owned));

    // Open the card and increment Holo twice: badge appears.
    let mut session = browser.open_card("pokemon-swsh3-2").expect("card in grid");
    {
        let overlay = browser.overlay_mut();
        session.increment(overlay, Variant::Holo);
        session.increment(overlay, Variant::Holo);
    }
    let rows = browser.grid();
    assert!(rows[0].owned);
    assert!(!rows[1].owned);

    // Decrement Holo twice: badge disappears.
    {
        let overlay = browser.overlay_mut();
        session.decrement(overlay, Variant::Holo);
        session.decrement(overlay, Variant::Holo);
    }
    let rows = browser.grid();
    assert!(!rows[0].owned);

    // Exactly two boundary notifications: owned, then unowned.
    assert_eq!(*badge.borrow(), vec![true, false]);

    session.close();
}

#[tokio::test]
async fn test_license_switch_resets_extension_scope() {
    let mut browser = CatalogBrowser::new(pokemon_catalog());
    browser.select_license(License::Pokemon).await;
    let newest = browser.extensions()[0].clone();
    browser.select_extension(newest.clone()).await;
    assert_eq!(browser.filter().endpoint(), "/search/pokemon/swsh3");

    // Switching license drops the extension; its cards are gone and the
    // old extension cannot be reselected under the new license.
    browser.select_license(License::Magic).await;
    assert_eq!(browser.filter().endpoint(), "/search/magic");
    assert!(browser.cards().is_empty());

    browser.select_extension(newest).await;
    assert_eq!(browser.filter().endpoint(), "/search/magic");
}

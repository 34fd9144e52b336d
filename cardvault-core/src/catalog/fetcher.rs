//! Per-key fetch state with stale-response reconciliation
//!
//! The fetcher tracks `{loading, data, error}` for the current request
//! key. Every key change bumps a generation counter, and a completing
//! request is applied only if it still belongs to the current generation.
//! A response that arrives after the key has moved on is discarded, so
//! displayed data always reflects the newest query rather than the last
//! responder.

use serde_json::Value;
use tracing::{debug, warn};

use super::transport::CatalogTransport;
use crate::error::CatalogError;

/// Observable fetch state for the current request key.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    /// A request for the current key is in flight.
    pub loading: bool,
    /// Last successful response body for the current key.
    pub data: Option<Value>,
    /// Human-readable failure message, cleared on key change and success.
    pub error: Option<String>,
}

/// Identifies the generation a request was issued under.
///
/// Obtained from [`CatalogFetcher::begin`] and handed back to
/// [`CatalogFetcher::resolve`] when the request completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Issues one GET per request key and reconciles completions against the
/// current key.
pub struct CatalogFetcher {
    transport: Box<dyn CatalogTransport>,
    state: FetchState,
    endpoint: Option<String>,
    generation: u64,
}

impl CatalogFetcher {
    pub fn new(transport: Box<dyn CatalogTransport>) -> Self {
        Self {
            transport,
            state: FetchState::default(),
            endpoint: None,
            generation: 0,
        }
    }

    /// Current observable state.
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The request key most recently begun, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Record a key change: sets `loading`, clears any prior error, and
    /// supersedes every outstanding request.
    pub fn begin(&mut self, endpoint: &str) -> FetchTicket {
        self.generation += 1;
        self.endpoint = Some(endpoint.to_string());
        self.state.loading = true;
        self.state.error = None;
        debug!(
            endpoint,
            generation = self.generation,
            "catalog fetch started"
        );
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply a completed request.
    ///
    /// Returns `false` when the ticket was superseded by a newer key; the
    /// result is discarded and state is left untouched.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<Value, CatalogError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale catalog response"
            );
            return false;
        }

        match result {
            Ok(body) => {
                self.state.data = Some(body);
                self.state.error = None;
            }
            Err(e) => {
                warn!("catalog fetch failed: {}", e);
                self.state.error = Some(e.to_string());
                self.state.data = None;
            }
        }
        self.state.loading = false;
        true
    }

    /// Begin a request for `endpoint`, await the transport, and resolve.
    ///
    /// Returns `true` when the result was applied (success or failure);
    /// `false` when it arrived stale.
    pub async fn fetch(&mut self, endpoint: &str) -> bool {
        let ticket = self.begin(endpoint);
        let result = self.transport.get_json(endpoint).await;
        self.resolve(ticket, result)
    }
}

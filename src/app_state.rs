//! The shared state for the application's route handlers.

use std::sync::{Arc, Mutex};

use crate::{insights::InsightsClient, transaction::TransactionStore};

/// The state shared between routes, usually database connections.
///
/// Handlers take narrower substates via `FromRef` so they only see the parts
/// they need.
#[derive(Clone)]
pub struct AppState {
    /// The transaction collection shared between handlers.
    pub store: Arc<Mutex<TransactionStore>>,
    /// The client for the generative-text service.
    pub insights: Arc<InsightsClient>,
}

impl AppState {
    /// Create the shared application state.
    pub fn new(store: TransactionStore, insights: InsightsClient) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            insights: Arc::new(insights),
        }
    }
}

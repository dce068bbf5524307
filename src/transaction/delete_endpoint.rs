//! Defines the endpoint for deleting a transaction from its table row.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::{
    AppState, Error, alert::AlertTemplate,
    transaction::{TransactionId, TransactionStore},
};

/// The state needed to delete a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// The shared transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// On success the response body is empty so that htmx removes the table row
/// it targets. A missing ID renders an alert instead.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> impl IntoResponse {
    let Ok(mut store) = state.store.lock() else {
        return Error::StoreLockError.into_response();
    };

    if store.remove(transaction_id) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Html(String::new()).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            AlertTemplate::error(
                "Could not delete transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if the transaction has already been deleted.",
            )
            .into_html(),
        )
            .into_response()
    }
}

//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    transaction::{Branch, PaymentMode, Transaction, TransactionStore},
};

/// The state needed to create a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The shared transaction store.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The date when the transaction occurred.
    pub date: Date,
    /// The branch where the transaction was recorded.
    pub branch: Branch,
    /// How the transaction was paid for.
    pub payment_mode: PaymentMode,
    /// The value of the transaction in dollars. Kept as text so a bad value
    /// produces an alert instead of a rejected form submission.
    pub amount: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
}

/// Parse the amount field as a dollar value of at least one cent.
fn parse_amount(raw: &str) -> Result<f64, Error> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.01 => Ok(amount),
        _ => Err(Error::InvalidAmount(raw.to_owned())),
    }
}

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> impl IntoResponse {
    let amount = match parse_amount(&form.amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_response(),
    };

    let transaction = Transaction::build(
        form.date,
        form.branch,
        form.payment_mode,
        amount,
        form.description,
    );

    let Ok(mut store) = state.store.lock() else {
        return Error::StoreLockError.into_response();
    };
    store.add(transaction);

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

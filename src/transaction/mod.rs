//! Everything for recording and managing transactions: the domain model, the
//! persisted store, seed data, the transactions page and its endpoints.

mod create_endpoint;
mod delete_endpoint;
mod models;
mod seed;
mod store;
mod transactions_page;

pub use models::{Branch, PaymentMode, Transaction, TransactionId};
pub use store::TransactionStore;

pub(crate) use create_endpoint::create_transaction_endpoint;
pub(crate) use delete_endpoint::delete_transaction_endpoint;
pub(crate) use transactions_page::get_transactions_page;

//! BizDash is a web app for tracking sales transactions across branches and
//! answering questions about them with an AI analyst.
//!
//! This library provides an HTTP server that directly serves HTML pages: a
//! dashboard with summary cards and charts, a transaction manager with a
//! searchable table and quick-add form, and a floating panel that forwards
//! natural-language questions about the data to a generative-text service.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod insights;
mod navigation;
mod not_found;
mod persist;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use insights::InsightsClient;
pub use persist::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use routing::build_router;
pub use transaction::{Branch, PaymentMode, Transaction, TransactionId, TransactionStore};

use crate::{alert::AlertTemplate, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// No error here is fatal: every variant renders as either a 404 page or an
/// alert partial that htmx swaps into the page's alert container.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The amount field of the add-transaction form could not be parsed as a
    /// positive dollar value.
    ///
    /// The record is rejected before it reaches the store.
    #[error("invalid amount \"{0}\"")]
    InvalidAmount(String),

    /// Could not acquire the transaction store lock.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                AlertTemplate::error(
                    "Invalid amount",
                    &format!(
                        "\"{amount}\" is not a valid transaction amount. \
                        Enter a dollar value of at least $0.01."
                    ),
                )
                .into_html(),
            )
                .into_response(),
            Error::StoreLockError => {
                tracing::error!("could not acquire the transaction store lock");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AlertTemplate::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    )
                    .into_html(),
                )
                    .into_response()
            }
        }
    }
}

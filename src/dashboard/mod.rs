//! The dashboard page: summary cards and charts over the transaction data.

pub(crate) mod aggregation;
mod cards;
mod charts;
mod handlers;

pub(crate) use handlers::get_dashboard_page;

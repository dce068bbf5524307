//! The AI analyst: a floating panel that forwards natural-language questions
//! about the transaction data to a generative-text service.

mod client;
mod endpoint;
mod prompt;

pub use client::InsightsClient;

pub(crate) use endpoint::{insights_panel, post_insights_endpoint};

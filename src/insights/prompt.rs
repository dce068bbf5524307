//! Builds the analyst prompt from a snapshot of the transaction data.

use serde_json::{Map, Value};

use crate::{
    dashboard::aggregation::{group_by_branch, group_by_payment_mode},
    transaction::Transaction,
};

/// How many of the newest transactions are included verbatim in the prompt.
///
/// The rest of the collection only contributes to the aggregate summary so
/// large datasets stay within the model's input limits.
pub(super) const RECENT_TRANSACTION_LIMIT: usize = 10;

/// Build the prompt sent to the analyst model for `query`.
///
/// The prompt carries an aggregate revenue summary, the newest
/// [RECENT_TRANSACTION_LIMIT] transactions as JSON and the user's question.
pub(super) fn build_prompt(transactions: &[Transaction], query: &str) -> String {
    let total: f64 = transactions.iter().map(|t| t.amount).sum();
    let by_branch = totals_to_json(
        group_by_branch(transactions)
            .into_iter()
            .map(|(branch, amount)| (branch.as_str(), amount)),
    );
    let by_mode = totals_to_json(
        group_by_payment_mode(transactions)
            .into_iter()
            .map(|(payment_mode, amount)| (payment_mode.as_str(), amount)),
    );

    let recent = &transactions[..transactions.len().min(RECENT_TRANSACTION_LIMIT)];
    let recent_json = serde_json::to_string(recent).unwrap_or_else(|_| "[]".to_owned());

    format!(
        "You are a business intelligence analyst. Analyze the following sales data summary \
        and recent transactions.\n\
        \n\
        Data Summary:\n\
        Total Revenue: {total}\n\
        Revenue by Branch: {by_branch}\n\
        Revenue by Payment Mode: {by_mode}\n\
        \n\
        Recent {RECENT_TRANSACTION_LIMIT} Transactions:\n\
        {recent_json}\n\
        \n\
        User Question: \"{query}\"\n\
        \n\
        Provide a concise, professional, and actionable answer. Use bullet points if necessary."
    )
}

fn totals_to_json<'a>(totals: impl Iterator<Item = (&'a str, f64)>) -> String {
    let map: Map<String, Value> = totals
        .map(|(label, amount)| (label.to_owned(), amount.into()))
        .collect();

    Value::Object(map).to_string()
}

//! Transaction data aggregation for the summary cards and charts.
//!
//! Provides pure functions that turn a snapshot of the transaction collection
//! into KPI figures, per-branch and per-payment-mode totals, and a daily
//! revenue trend. Everything here is recomputed from the full collection on
//! every dashboard render.

use std::collections::HashMap;

use time::Date;

use crate::transaction::{Branch, PaymentMode, Transaction};

/// How many of the most recent active dates the daily trend covers.
pub(crate) const TREND_WINDOW_DAYS: usize = 14;

/// The top-branch label shown when there are no transactions.
pub(crate) const NO_TOP_BRANCH: &str = "N/A";

/// The headline figures shown in the summary cards.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Kpi {
    /// The sum of all transaction amounts.
    pub total_revenue: f64,
    /// The number of transactions.
    pub transaction_count: usize,
    /// The mean transaction amount, or zero when there are no transactions.
    pub average_value: f64,
    /// The display name of the branch with the highest revenue, or
    /// [NO_TOP_BRANCH] when there are no transactions.
    pub top_branch: String,
}

/// Compute the headline figures for `transactions`.
///
/// When branches tie on revenue, the branch encountered first in the
/// collection wins.
pub(crate) fn compute_kpi(transactions: &[Transaction]) -> Kpi {
    let total_revenue: f64 = transactions.iter().map(|t| t.amount).sum();
    let transaction_count = transactions.len();
    let average_value = if transaction_count == 0 {
        0.0
    } else {
        total_revenue / transaction_count as f64
    };

    let mut top_branch = NO_TOP_BRANCH.to_owned();
    let mut max_total = -1.0;
    for (branch, total) in group_by_branch(transactions) {
        if total > max_total {
            max_total = total;
            top_branch = branch.as_str().to_owned();
        }
    }

    Kpi {
        total_revenue,
        transaction_count,
        average_value,
        top_branch,
    }
}

/// Sum transaction amounts per branch.
///
/// Branches appear in the order they are first encountered in `transactions`;
/// branches with no transactions are absent.
pub(crate) fn group_by_branch(transactions: &[Transaction]) -> Vec<(Branch, f64)> {
    let mut totals: Vec<(Branch, f64)> = Vec::new();

    for transaction in transactions {
        match totals.iter_mut().find(|(branch, _)| *branch == transaction.branch) {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((transaction.branch, transaction.amount)),
        }
    }

    totals
}

/// Sum transaction amounts per payment mode, in first-encountered order.
pub(crate) fn group_by_payment_mode(transactions: &[Transaction]) -> Vec<(PaymentMode, f64)> {
    let mut totals: Vec<(PaymentMode, f64)> = Vec::new();

    for transaction in transactions {
        match totals
            .iter_mut()
            .find(|(payment_mode, _)| *payment_mode == transaction.payment_mode)
        {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((transaction.payment_mode, transaction.amount)),
        }
    }

    totals
}

/// Sum transaction amounts per calendar date, sorted ascending and truncated
/// to the last [TREND_WINDOW_DAYS] dates that have transactions.
///
/// Dates with no transactions do not appear, so the window covers the most
/// recent *active* dates rather than a fixed calendar span.
pub(crate) fn daily_trend(transactions: &[Transaction]) -> Vec<(Date, f64)> {
    let mut totals: HashMap<Date, f64> = HashMap::new();

    for transaction in transactions {
        *totals.entry(transaction.date).or_insert(0.0) += transaction.amount;
    }

    let mut trend: Vec<(Date, f64)> = totals.into_iter().collect();
    trend.sort_by_key(|(date, _)| *date);

    let skip = trend.len().saturating_sub(TREND_WINDOW_DAYS);
    trend.split_off(skip)
}

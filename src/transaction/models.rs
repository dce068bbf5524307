//! The transaction domain model: one recorded monetary event.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Uniquely identifies a transaction across the collection.
pub type TransactionId = Uuid;

/// The description given to transactions created without one.
pub(crate) const DEFAULT_DESCRIPTION: &str = "No Description";

/// The branch where a transaction was recorded.
///
/// The set of branches is closed so that grouping keys are validated at
/// compile time. Variants serialize as their display names ("North Branch")
/// to match the persisted-state layout and the form select values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// The main branch.
    Headquarters,
    /// The northern satellite branch.
    #[serde(rename = "North Branch")]
    NorthBranch,
    /// The southern satellite branch.
    #[serde(rename = "South Branch")]
    SouthBranch,
}

impl Branch {
    /// Every branch, in display order.
    pub const ALL: [Branch; 3] = [Branch::Headquarters, Branch::NorthBranch, Branch::SouthBranch];

    /// The display name of the branch.
    pub fn as_str(self) -> &'static str {
        match self {
            Branch::Headquarters => "Headquarters",
            Branch::NorthBranch => "North Branch",
            Branch::SouthBranch => "South Branch",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a transaction was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    /// Paid in cash.
    Cash,
    /// Paid by debit or credit card.
    Card,
    /// Covered by an insurance claim.
    Insurance,
    /// Paid via a mobile payment app.
    Mobile,
}

impl PaymentMode {
    /// Every payment mode, in display order.
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Cash,
        PaymentMode::Card,
        PaymentMode::Insurance,
        PaymentMode::Mobile,
    ];

    /// The display name of the payment mode.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::Insurance => "Insurance",
            PaymentMode::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded monetary event.
///
/// The serde layout (camelCase field names, ISO 8601 dates) is the on-disk
/// format of the persisted collection, so changing it invalidates saved data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier, assigned at creation, immutable.
    pub id: TransactionId,
    /// The calendar date the transaction happened, without a time component.
    pub date: Date,
    /// The branch where the transaction was recorded.
    pub branch: Branch,
    /// How the transaction was paid for.
    pub payment_mode: PaymentMode,
    /// The dollar value of the transaction.
    pub amount: f64,
    /// A free-text label describing the transaction.
    pub description: String,
}

impl Transaction {
    /// Create a transaction with a freshly generated ID.
    ///
    /// An empty `description` is replaced with [DEFAULT_DESCRIPTION].
    pub fn build(
        date: Date,
        branch: Branch,
        payment_mode: PaymentMode,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        let description: String = description.into();
        let description = if description.is_empty() {
            DEFAULT_DESCRIPTION.to_owned()
        } else {
            description
        };

        Self {
            id: Uuid::new_v4(),
            date,
            branch,
            payment_mode,
            amount,
            description,
        }
    }
}

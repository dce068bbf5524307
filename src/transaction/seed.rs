//! Seed data generation for first runs and corrupt-state recovery.

use rand::Rng;
use time::{Duration, OffsetDateTime};

use super::models::{Branch, PaymentMode, Transaction};

/// The number of transactions in a freshly generated dataset.
pub(crate) const SEED_COUNT: usize = 50;

/// How many days into the past seed transactions are spread over.
const SEED_PERIOD_DAYS: i64 = 30;

/// Generate a demo dataset: [SEED_COUNT] transactions spread over the
/// previous [SEED_PERIOD_DAYS] days with random branches, payment modes and
/// whole-dollar amounts in [50, 550), sorted descending by date.
pub(crate) fn generate_seed_data() -> Vec<Transaction> {
    let mut rng = rand::thread_rng();
    let today = OffsetDateTime::now_utc().date();

    let mut data: Vec<Transaction> = (0..SEED_COUNT)
        .map(|i| {
            let date = today - Duration::days(rng.gen_range(0..SEED_PERIOD_DAYS));
            let branch = Branch::ALL[rng.gen_range(0..Branch::ALL.len())];
            let payment_mode = PaymentMode::ALL[rng.gen_range(0..PaymentMode::ALL.len())];
            let amount = rng.gen_range(50..550) as f64;

            Transaction::build(
                date,
                branch,
                payment_mode,
                amount,
                format!("Transaction #{}", 1000 + i),
            )
        })
        .collect();

    data.sort_by(|a, b| b.date.cmp(&a.date));

    data
}

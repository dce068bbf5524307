//! The in-memory transaction collection and its write-through persistence.

use crate::persist::BlobStore;

use super::{
    models::{Transaction, TransactionId},
    seed::generate_seed_data,
};

/// The fixed blob-store key the transaction collection is persisted under.
pub(crate) const STORAGE_KEY: &str = "bizdash_transactions";

/// An ordered collection of transactions, newest-first by insertion.
///
/// The store owns the collection exclusively; the aggregation and view code
/// only ever read snapshots via [TransactionStore::list]. Every mutation
/// writes the whole collection through to the backing [BlobStore].
/// Persistence is best-effort: a failed write is logged and does not roll
/// back the in-memory state.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    blob_store: Box<dyn BlobStore>,
}

impl TransactionStore {
    /// Load the persisted collection from `blob_store`, falling back to a
    /// generated seed dataset when there is no saved blob or the blob cannot
    /// be parsed.
    ///
    /// A parse failure is treated the same as missing data so that a corrupt
    /// or legacy payload never prevents the application from starting.
    pub fn load_or_seed(blob_store: Box<dyn BlobStore>) -> Self {
        let transactions = match blob_store.load(STORAGE_KEY) {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(transactions) => transactions,
                Err(error) => {
                    tracing::warn!(
                        "discarding unparseable saved transactions in favor of seed data: {error}"
                    );
                    generate_seed_data()
                }
            },
            None => {
                tracing::info!("no saved transactions found, generating seed data");
                generate_seed_data()
            }
        };

        Self {
            transactions,
            blob_store,
        }
    }

    /// Insert `transaction` at the front of the collection and persist.
    ///
    /// The caller is trusted to have assigned a globally unique ID (see
    /// [Transaction::build]); no uniqueness check happens here.
    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
        self.write_through();
    }

    /// Remove the transaction with `id` and persist.
    ///
    /// Returns `true` if a record was removed. An absent `id` is a no-op,
    /// not an error: the collection and the persisted blob are unchanged.
    pub fn remove(&mut self, id: TransactionId) -> bool {
        match self.transactions.iter().position(|t| t.id == id) {
            Some(index) => {
                self.transactions.remove(index);
                self.write_through();
                true
            }
            None => false,
        }
    }

    /// The current ordered snapshot of the collection.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    fn write_through(&self) {
        let payload = match serde_json::to_string(&self.transactions) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::error!("could not serialize transactions for persistence: {error}");
                return;
            }
        };

        if let Err(error) = self.blob_store.save(STORAGE_KEY, &payload) {
            tracing::warn!("could not persist transactions: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use time::macros::date;

    use crate::persist::{BlobStore, MemoryBlobStore};
    use crate::transaction::{
        models::{Branch, PaymentMode, Transaction},
        seed::SEED_COUNT,
    };

    use super::{STORAGE_KEY, TransactionStore};

    fn test_transaction(amount: f64, description: &str) -> Transaction {
        Transaction::build(
            date!(2025 - 07 - 04),
            Branch::Headquarters,
            PaymentMode::Cash,
            amount,
            description,
        )
    }

    /// A blob store shared between the store under test and the test body so
    /// the persisted payload can be inspected and reloaded.
    #[derive(Clone, Default)]
    struct SharedBlobStore(Arc<MemoryBlobStore>);

    impl BlobStore for SharedBlobStore {
        fn load(&self, key: &str) -> Option<String> {
            self.0.load(key)
        }

        fn save(&self, key: &str, value: &str) -> io::Result<()> {
            self.0.save(key, value)
        }
    }

    #[test]
    fn seeds_when_no_saved_data() {
        let store = TransactionStore::load_or_seed(Box::new(MemoryBlobStore::new()));

        assert_eq!(store.list().len(), SEED_COUNT);
    }

    #[test]
    fn seeds_when_saved_data_is_corrupt() {
        let blobs = MemoryBlobStore::new();
        blobs.save(STORAGE_KEY, "{not valid json").unwrap();

        let store = TransactionStore::load_or_seed(Box::new(blobs));

        assert_eq!(store.list().len(), SEED_COUNT);
    }

    #[test]
    fn add_prepends_to_collection() {
        let mut store = TransactionStore::load_or_seed(Box::new(MemoryBlobStore::new()));
        let transaction = test_transaction(12.5, "newest");
        let id = transaction.id;

        store.add(transaction);

        assert_eq!(store.list().len(), SEED_COUNT + 1);
        assert_eq!(store.list()[0].id, id);
    }

    #[test]
    fn remove_deletes_matching_record() {
        let mut store = TransactionStore::load_or_seed(Box::new(MemoryBlobStore::new()));
        let transaction = test_transaction(99.0, "short lived");
        let id = transaction.id;
        store.add(transaction);

        assert!(store.remove(id));

        assert_eq!(store.list().len(), SEED_COUNT);
        assert!(store.list().iter().all(|t| t.id != id));
    }

    #[test]
    fn remove_of_missing_id_is_a_noop() {
        let mut store = TransactionStore::load_or_seed(Box::new(MemoryBlobStore::new()));
        let before = store.list().to_vec();

        assert!(!store.remove(uuid::Uuid::new_v4()));

        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn mutations_write_through_and_reload_identically() {
        let blobs = SharedBlobStore::default();

        let mut store = TransactionStore::load_or_seed(Box::new(blobs.clone()));
        store.add(test_transaction(42.0, "persisted"));
        store.add(test_transaction(17.5, "also persisted"));
        let expected = store.list().to_vec();

        let reloaded = TransactionStore::load_or_seed(Box::new(blobs));

        assert_eq!(reloaded.list(), expected.as_slice());
    }

    #[test]
    fn failed_persistence_does_not_roll_back() {
        struct FailingBlobStore;

        impl BlobStore for FailingBlobStore {
            fn load(&self, _key: &str) -> Option<String> {
                None
            }

            fn save(&self, _key: &str, _value: &str) -> io::Result<()> {
                Err(io::Error::other("disk on fire"))
            }
        }

        let mut store = TransactionStore::load_or_seed(Box::new(FailingBlobStore));
        let transaction = test_transaction(5.0, "kept in memory");
        let id = transaction.id;

        store.add(transaction);

        assert_eq!(store.list()[0].id, id);
    }
}

//! Repository implementation over a Store Client.

use std::future::Future;

use async_trait::async_trait;
use tracing::{debug, info, trace};

use pieces_core::piece::{validate_piece, Piece};
use pieces_core::storage::{Deadline, PieceRepository, RepositoryError, Result};

use crate::store::{PutCondition, StoreClient, StoreError};

use super::conversions::{item_to_piece, piece_to_item};
use super::keys;

const ENTITY_TYPE: &str = "Piece";

/// Piece repository backed by a single table of a [`StoreClient`].
///
/// The client is injected once and shared by every call; the repository
/// itself keeps no state between calls.
#[derive(Debug, Clone)]
pub struct StorePieceRepository<C> {
    client: C,
    table_name: String,
}

impl<C: StoreClient> StorePieceRepository<C> {
    /// Creates a new repository with the given client and table name.
    pub fn new(client: C, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Insert-if-absent as a single conditional write.
    async fn create_conditionally(&self, piece: &Piece, deadline: Deadline) -> Result<()> {
        let item = piece_to_item(piece);

        within(
            deadline,
            "PutItem",
            self.client.put_item(
                &self.table_name,
                item,
                PutCondition::AttributeNotExists(keys::PIECE_ID),
            ),
        )
        .await?
        .map_err(|e| map_write_error(e, piece))
    }

    /// Insert-if-absent as a lookup followed by a plain write.
    ///
    /// Two concurrent calls for the same key can both pass the lookup; only
    /// used for stores without conditional writes.
    async fn create_after_lookup(&self, piece: &Piece, deadline: Deadline) -> Result<()> {
        let existing = within(
            deadline,
            "GetItem",
            self.client
                .get_item(&self.table_name, keys::piece_key(&piece.key())),
        )
        .await?
        .map_err(map_lookup_error)?;

        if existing.is_some() {
            return Err(duplicate_key(piece));
        }

        let item = piece_to_item(piece);

        within(
            deadline,
            "PutItem",
            self.client
                .put_item(&self.table_name, item, PutCondition::Unconditional),
        )
        .await?
        .map_err(|e| map_write_error(e, piece))
    }
}

#[async_trait]
impl<C: StoreClient> PieceRepository for StorePieceRepository<C> {
    async fn store_piece(&self, piece: &Piece, deadline: Deadline) -> Result<()> {
        validate_piece(piece)?;

        if self.client.supports_conditional_put() {
            self.create_conditionally(piece, deadline).await?;
        } else {
            self.create_after_lookup(piece, deadline).await?;
        }

        info!(
            title = %piece.title,
            year = piece.year,
            table = %self.table_name,
            "Successfully added piece"
        );

        Ok(())
    }

    async fn find_all_pieces(&self, deadline: Deadline) -> Result<Vec<Piece>> {
        let mut pieces = Vec::new();
        let mut start_key = None;
        let mut pages = 0usize;

        loop {
            let page = within(
                deadline,
                "Scan",
                self.client.scan(&self.table_name, start_key.take()),
            )
            .await?
            .map_err(map_lookup_error)?;
            pages += 1;

            for item in &page.items {
                let piece = item_to_piece(item).map_err(|e| {
                    RepositoryError::DeserializationFailed {
                        index: pieces.len(),
                        id: item
                            .get(keys::PIECE_ID)
                            .and_then(|v| v.as_s().ok())
                            .cloned(),
                        reason: e.to_string(),
                    }
                })?;
                pieces.push(piece);
            }

            match page.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        debug!(
            table = %self.table_name,
            pages,
            count = pieces.len(),
            "Scanned pieces"
        );

        Ok(pieces)
    }
}

/// Runs a store call, failing with `Timeout` once `deadline` passes.
///
/// An already expired deadline fails before the call is polled, so no
/// request is sent whose answer would be discarded.
async fn within<F: Future>(
    deadline: Deadline,
    operation: &'static str,
    call: F,
) -> Result<F::Output> {
    if deadline.is_expired() {
        return Err(RepositoryError::Timeout { operation });
    }
    trace!(
        operation,
        remaining_ms = deadline.remaining().as_millis() as u64,
        "Calling store"
    );

    tokio::time::timeout_at(deadline.instant(), call)
        .await
        .map_err(|_| RepositoryError::Timeout { operation })
}

fn duplicate_key(piece: &Piece) -> RepositoryError {
    RepositoryError::DuplicateKey {
        entity_type: ENTITY_TYPE,
        id: piece.id.clone(),
        year: piece.year,
    }
}

fn map_lookup_error(err: StoreError) -> RepositoryError {
    match err {
        StoreError::Unavailable(reason) | StoreError::Rejected(reason) => {
            RepositoryError::StoreUnavailable(reason)
        }
        other => RepositoryError::StoreUnavailable(other.to_string()),
    }
}

fn map_write_error(err: StoreError, piece: &Piece) -> RepositoryError {
    match err {
        StoreError::ConditionFailed => duplicate_key(piece),
        StoreError::Unavailable(reason) => RepositoryError::StoreUnavailable(reason),
        StoreError::Rejected(reason) => RepositoryError::WriteFailed(reason),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use aws_sdk_dynamodb::types::AttributeValue;
    use pieces_core::piece::generate_seed_pieces;

    use super::*;
    use crate::repository::key_schema;
    use crate::store::{InMemoryStore, Item, ScanPage};

    const TABLE: &str = "Pieces";

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(5))
    }

    fn blue_study() -> Piece {
        Piece::new("artist42-7", 2001, "Blue Study")
            .with_medium("oil")
            .with_dimensions(40, 60)
            .with_sequence(3)
            .with_image_reference("https://x/42-7.jpg")
    }

    fn conditional_store() -> InMemoryStore {
        InMemoryStore::new(key_schema())
    }

    fn lookup_store() -> InMemoryStore {
        InMemoryStore::new(key_schema()).without_conditional_writes()
    }

    /// Wraps an in-memory store with injectable failures and a write counter.
    #[derive(Clone)]
    struct FaultyStore {
        inner: InMemoryStore,
        lookup_error: Option<StoreError>,
        write_error: Option<StoreError>,
        scan_error: Option<StoreError>,
        delay: Option<Duration>,
        writes: Arc<AtomicUsize>,
    }

    impl FaultyStore {
        fn new(inner: InMemoryStore) -> Self {
            Self {
                inner,
                lookup_error: None,
                write_error: None,
                scan_error: None,
                delay: None,
                writes: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        async fn pause(&self) {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl StoreClient for FaultyStore {
        async fn get_item(
            &self,
            table_name: &str,
            key: Item,
        ) -> std::result::Result<Option<Item>, StoreError> {
            self.pause().await;
            match &self.lookup_error {
                Some(err) => Err(err.clone()),
                None => self.inner.get_item(table_name, key).await,
            }
        }

        async fn put_item(
            &self,
            table_name: &str,
            item: Item,
            condition: PutCondition,
        ) -> std::result::Result<(), StoreError> {
            self.pause().await;
            self.writes.fetch_add(1, Ordering::SeqCst);
            match &self.write_error {
                Some(err) => Err(err.clone()),
                None => self.inner.put_item(table_name, item, condition).await,
            }
        }

        async fn scan(
            &self,
            table_name: &str,
            exclusive_start_key: Option<Item>,
        ) -> std::result::Result<ScanPage, StoreError> {
            self.pause().await;
            match &self.scan_error {
                Some(err) => Err(err.clone()),
                None => self.inner.scan(table_name, exclusive_start_key).await,
            }
        }

        fn supports_conditional_put(&self) -> bool {
            self.inner.supports_conditional_put()
        }
    }

    // ==================== Store Tests ====================

    #[tokio::test]
    async fn test_store_then_find_all_returns_the_piece() {
        let repo = StorePieceRepository::new(conditional_store(), TABLE);

        repo.store_piece(&blue_study(), deadline()).await.unwrap();

        let pieces = repo.find_all_pieces(deadline()).await.unwrap();
        assert_eq!(pieces, vec![blue_study()]);
    }

    #[tokio::test]
    async fn test_store_then_find_all_on_lookup_path() {
        let repo = StorePieceRepository::new(lookup_store(), TABLE);

        repo.store_piece(&blue_study(), deadline()).await.unwrap();

        let pieces = repo.find_all_pieces(deadline()).await.unwrap();
        assert_eq!(pieces, vec![blue_study()]);
    }

    #[tokio::test]
    async fn test_duplicate_is_rejected_with_conditional_write() {
        let repo = StorePieceRepository::new(conditional_store(), TABLE);
        repo.store_piece(&blue_study(), deadline()).await.unwrap();

        let changed = blue_study().with_medium("acrylic");
        let result = repo.store_piece(&changed, deadline()).await;

        assert_eq!(
            result,
            Err(RepositoryError::DuplicateKey {
                entity_type: "Piece",
                id: "artist42-7".to_string(),
                year: 2001,
            })
        );
        let pieces = repo.find_all_pieces(deadline()).await.unwrap();
        assert_eq!(pieces, vec![blue_study()]);
    }

    #[tokio::test]
    async fn test_duplicate_is_rejected_after_lookup_without_write() {
        let store = FaultyStore::new(lookup_store());
        let repo = StorePieceRepository::new(store.clone(), TABLE);
        repo.store_piece(&blue_study(), deadline()).await.unwrap();
        assert_eq!(store.writes(), 1);

        let mut changed = blue_study();
        changed.title = "Red Study".to_string();
        let result = repo.store_piece(&changed, deadline()).await;

        assert!(matches!(result, Err(RepositoryError::DuplicateKey { .. })));
        assert_eq!(store.writes(), 1);
        let pieces = repo.find_all_pieces(deadline()).await.unwrap();
        assert_eq!(pieces, vec![blue_study()]);
    }

    #[tokio::test]
    async fn test_same_id_different_year_is_not_a_duplicate() {
        let repo = StorePieceRepository::new(conditional_store(), TABLE);
        let mut later = blue_study();
        later.year = 2002;

        repo.store_piece(&blue_study(), deadline()).await.unwrap();
        repo.store_piece(&later, deadline()).await.unwrap();

        let pieces = repo.find_all_pieces(deadline()).await.unwrap();
        assert_eq!(pieces.len(), 2);
        assert!(pieces.contains(&later));
    }

    #[tokio::test]
    async fn test_invalid_piece_is_rejected_before_any_call() {
        let store = FaultyStore::new(conditional_store());
        let repo = StorePieceRepository::new(store.clone(), TABLE);

        let result = repo
            .store_piece(&Piece::new("", 2001, "No id"), deadline())
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_store_unavailable_without_write() {
        let mut store = FaultyStore::new(lookup_store());
        store.lookup_error = Some(StoreError::Unavailable("connection refused".to_string()));
        let repo = StorePieceRepository::new(store.clone(), TABLE);

        let result = repo.store_piece(&blue_study(), deadline()).await;

        assert_eq!(
            result,
            Err(RepositoryError::StoreUnavailable(
                "connection refused".to_string()
            ))
        );
        assert_eq!(store.writes(), 0);
        assert!(store.inner.is_empty(TABLE).await);
    }

    #[tokio::test]
    async fn test_rejected_write_is_write_failed() {
        let mut store = FaultyStore::new(conditional_store());
        store.write_error = Some(StoreError::Rejected(
            "Throughput exceeded, please retry".to_string(),
        ));
        let repo = StorePieceRepository::new(store, TABLE);

        let result = repo.store_piece(&blue_study(), deadline()).await;

        assert_eq!(
            result,
            Err(RepositoryError::WriteFailed(
                "Throughput exceeded, please retry".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_unavailable_write_is_store_unavailable() {
        let mut store = FaultyStore::new(lookup_store());
        store.write_error = Some(StoreError::Unavailable("dispatch failure".to_string()));
        let repo = StorePieceRepository::new(store, TABLE);

        let result = repo.store_piece(&blue_study(), deadline()).await;

        assert!(matches!(result, Err(RepositoryError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_slow_write_times_out() {
        let mut store = FaultyStore::new(conditional_store());
        store.delay = Some(Duration::from_secs(5));
        let repo = StorePieceRepository::new(store, TABLE);

        let result = repo
            .store_piece(&blue_study(), Deadline::after(Duration::from_millis(20)))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::Timeout {
                operation: "PutItem"
            })
        );
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let mut store = FaultyStore::new(lookup_store());
        store.delay = Some(Duration::from_secs(5));
        let repo = StorePieceRepository::new(store.clone(), TABLE);

        let result = repo
            .store_piece(&blue_study(), Deadline::after(Duration::from_millis(20)))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::Timeout {
                operation: "GetItem"
            })
        );
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_expired_deadline_sends_no_write() {
        let inner = conditional_store();
        let store = FaultyStore::new(inner.clone());
        let repo = StorePieceRepository::new(store.clone(), TABLE);
        let expired = Deadline::at(tokio::time::Instant::now() - Duration::from_millis(1));

        let result = repo.store_piece(&blue_study(), expired).await;

        assert_eq!(
            result,
            Err(RepositoryError::Timeout {
                operation: "PutItem"
            })
        );
        assert_eq!(store.writes(), 0);
        assert!(inner.is_empty(TABLE).await);
    }

    // ==================== FindAll Tests ====================

    #[tokio::test]
    async fn test_find_all_on_empty_table() {
        let repo = StorePieceRepository::new(conditional_store(), TABLE);

        let pieces = repo.find_all_pieces(deadline()).await.unwrap();

        assert!(pieces.is_empty());
    }

    #[tokio::test]
    async fn test_find_all_follows_every_page() {
        let store = conditional_store().with_page_size(1_000);
        let repo = StorePieceRepository::new(store, TABLE);
        for piece in generate_seed_pieces("artist7", 1950, 5_000) {
            repo.store_piece(&piece, deadline()).await.unwrap();
        }

        let pieces = repo.find_all_pieces(deadline()).await.unwrap();

        assert_eq!(pieces.len(), 5_000);
        let ids: std::collections::HashSet<_> = pieces.iter().map(Piece::key).collect();
        assert_eq!(ids.len(), 5_000);
    }

    #[tokio::test]
    async fn test_malformed_item_fails_whole_scan() {
        let store = conditional_store().with_page_size(2);
        let repo = StorePieceRepository::new(store.clone(), TABLE);
        for piece in generate_seed_pieces("artist1", 2000, 3) {
            repo.store_piece(&piece, deadline()).await.unwrap();
        }
        let malformed: Item = HashMap::from([
            ("PieceId".to_string(), AttributeValue::S("zz-1".to_string())),
            ("Year".to_string(), AttributeValue::N("1999".to_string())),
            ("Title".to_string(), AttributeValue::S("Broken".to_string())),
        ]);
        store.insert_raw(TABLE, malformed).await.unwrap();

        let result = repo.find_all_pieces(deadline()).await;

        assert_eq!(
            result,
            Err(RepositoryError::DeserializationFailed {
                index: 3,
                id: Some("zz-1".to_string()),
                reason: "missing attribute Media".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_scan_failure_is_store_unavailable() {
        let mut store = FaultyStore::new(conditional_store());
        store.scan_error = Some(StoreError::Unavailable("Table not found".to_string()));
        let repo = StorePieceRepository::new(store, TABLE);

        let result = repo.find_all_pieces(deadline()).await;

        assert!(matches!(result, Err(RepositoryError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_slow_scan_times_out() {
        let mut store = FaultyStore::new(conditional_store());
        store.delay = Some(Duration::from_secs(5));
        let repo = StorePieceRepository::new(store, TABLE);

        let result = repo
            .find_all_pieces(Deadline::after(Duration::from_millis(20)))
            .await;

        assert_eq!(result, Err(RepositoryError::Timeout { operation: "Scan" }));
    }

    #[tokio::test]
    async fn test_results_are_independent_copies() {
        let repo = StorePieceRepository::new(conditional_store(), TABLE);
        repo.store_piece(&blue_study(), deadline()).await.unwrap();

        let mut first = repo.find_all_pieces(deadline()).await.unwrap();
        first[0].title = "Changed".to_string();

        let second = repo.find_all_pieces(deadline()).await.unwrap();
        assert_eq!(second, vec![blue_study()]);
    }

    #[tokio::test]
    async fn test_concurrent_conditional_stores_admit_one_winner() {
        let repo = Arc::new(StorePieceRepository::new(conditional_store(), TABLE));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.store_piece(&blue_study(), deadline()).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(err) => assert!(matches!(err, RepositoryError::DuplicateKey { .. })),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.client().len(TABLE).await, 1);
    }
}

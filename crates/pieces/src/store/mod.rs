//! Store Client abstraction.
//!
//! The repository talks to the backing key-value store only through the
//! three primitives of [`StoreClient`]: point lookup, point write and a
//! paginated scan.

pub mod dynamodb;
mod error;
mod inmemory;

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

pub use error::StoreError;
pub use inmemory::{InMemoryStore, KeySchema};

/// A stored item in the store's native attribute representation.
pub type Item = HashMap<String, AttributeValue>;

/// Condition attached to a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCondition {
    /// Create or replace the item.
    Unconditional,
    /// Fail with [`StoreError::ConditionFailed`] if an item with the same key
    /// already has the named attribute, i.e. already exists.
    AttributeNotExists(&'static str),
}

/// One page of a scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Continuation token; `None` once the scan is exhausted.
    pub last_evaluated_key: Option<Item>,
}

/// Primitive operations against a key-value table.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Point lookup by full primary key.
    async fn get_item(&self, table_name: &str, key: Item) -> Result<Option<Item>, StoreError>;

    /// Point write.
    async fn put_item(
        &self,
        table_name: &str,
        item: Item,
        condition: PutCondition,
    ) -> Result<(), StoreError>;

    /// Reads one page of the table, starting after `exclusive_start_key`.
    async fn scan(
        &self,
        table_name: &str,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage, StoreError>;

    /// Whether [`PutCondition::AttributeNotExists`] is evaluated atomically by
    /// the store.
    fn supports_conditional_put(&self) -> bool;
}

//! In-memory Store Client.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tokio::sync::RwLock;

use super::{Item, PutCondition, ScanPage, StoreClient, StoreError};

const DEFAULT_PAGE_SIZE: usize = 1_000;

/// Names of the primary key attributes of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySchema {
    pub partition_key: &'static str,
    pub sort_key: Option<&'static str>,
}

type StoredKey = (String, Option<String>);
type Table = BTreeMap<StoredKey, Item>;

/// In-memory store for testing and local runs.
///
/// Items are kept in key order per table, so scans are deterministic and
/// continuation tokens behave like DynamoDB's `LastEvaluatedKey`. Data is not
/// persisted and is lost when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    key_schema: KeySchema,
    page_size: usize,
    conditional_writes: bool,
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates an empty store whose tables use `key_schema`.
    pub fn new(key_schema: KeySchema) -> Self {
        Self {
            key_schema,
            page_size: DEFAULT_PAGE_SIZE,
            conditional_writes: true,
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Sets the maximum number of items returned per scan page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Reports conditional writes as unsupported, forcing callers onto the
    /// lookup-then-write path.
    pub fn without_conditional_writes(mut self) -> Self {
        self.conditional_writes = false;
        self
    }

    /// Stores `item` as-is, bypassing any write condition.
    ///
    /// Useful to plant items that a repository could never have written.
    pub async fn insert_raw(&self, table_name: &str, item: Item) -> Result<(), StoreError> {
        let key = self.stored_key(&item)?;
        let mut tables = self.tables.write().await;
        tables
            .entry(table_name.to_string())
            .or_default()
            .insert(key, item);
        Ok(())
    }

    /// Number of items in a table.
    pub async fn len(&self, table_name: &str) -> usize {
        let tables = self.tables.read().await;
        tables.get(table_name).map_or(0, BTreeMap::len)
    }

    pub async fn is_empty(&self, table_name: &str) -> bool {
        self.len(table_name).await == 0
    }

    fn stored_key(&self, item: &Item) -> Result<StoredKey, StoreError> {
        let partition = key_part(item, self.key_schema.partition_key)?;
        let sort = match self.key_schema.sort_key {
            Some(name) => Some(key_part(item, name)?),
            None => None,
        };
        Ok((partition, sort))
    }

    fn key_attributes(&self, item: &Item) -> Item {
        std::iter::once(self.key_schema.partition_key)
            .chain(self.key_schema.sort_key)
            .filter_map(|name| item.get(name).map(|v| (name.to_string(), v.clone())))
            .collect()
    }
}

#[async_trait]
impl StoreClient for InMemoryStore {
    async fn get_item(&self, table_name: &str, key: Item) -> Result<Option<Item>, StoreError> {
        let key = self.stored_key(&key)?;
        let tables = self.tables.read().await;
        Ok(tables
            .get(table_name)
            .and_then(|table| table.get(&key))
            .cloned())
    }

    async fn put_item(
        &self,
        table_name: &str,
        item: Item,
        condition: PutCondition,
    ) -> Result<(), StoreError> {
        let key = self.stored_key(&item)?;
        let mut tables = self.tables.write().await;
        let table = tables.entry(table_name.to_string()).or_default();

        if let PutCondition::AttributeNotExists(attribute) = condition {
            if table
                .get(&key)
                .is_some_and(|existing| existing.contains_key(attribute))
            {
                return Err(StoreError::ConditionFailed);
            }
        }

        table.insert(key, item);
        Ok(())
    }

    async fn scan(
        &self,
        table_name: &str,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage, StoreError> {
        let start = match exclusive_start_key {
            Some(key) => Bound::Excluded(self.stored_key(&key)?),
            None => Bound::Unbounded,
        };

        let tables = self.tables.read().await;
        let Some(table) = tables.get(table_name) else {
            return Ok(ScanPage::default());
        };

        let mut remaining = table.range((start, Bound::Unbounded));
        let items: Vec<Item> = remaining
            .by_ref()
            .take(self.page_size)
            .map(|(_, item)| item.clone())
            .collect();

        let last_evaluated_key = match (remaining.next(), items.last()) {
            (Some(_), Some(last)) => Some(self.key_attributes(last)),
            _ => None,
        };

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }

    fn supports_conditional_put(&self) -> bool {
        self.conditional_writes
    }
}

fn key_part(item: &Item, name: &str) -> Result<String, StoreError> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(format!("S:{}", value)),
        Some(AttributeValue::N(value)) => match canonical_number(value) {
            Some(number) => Ok(format!("N:{}", number)),
            None => Err(StoreError::Rejected(format!(
                "Key attribute {} is not a valid number: {}",
                name, value
            ))),
        },
        Some(_) => Err(StoreError::Rejected(format!(
            "Key attribute {} must be a string or number",
            name
        ))),
        None => Err(StoreError::Rejected(format!(
            "Missing key attribute {}",
            name
        ))),
    }
}

/// Normalizes a decimal number string so equal values compare equal
/// (`2001`, `2001.0` and `2.001e3` all become `2001e0`).
fn canonical_number(value: &str) -> Option<String> {
    let value = value.trim();
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", integer, fraction);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some("0".to_string());
    }

    let significant = digits.trim_end_matches('0');
    let exponent =
        exponent - fraction.len() as i64 + (digits.len() - significant.len()) as i64;
    let sign = if negative { "-" } else { "" };

    Some(format!("{}{}e{}", sign, significant, exponent))
}

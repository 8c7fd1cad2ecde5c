//! Table inspection (Imperative Shell).

use super::error::{DynamodbError, Result};
use super::planning::{TableState, TableStatus};
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::types::KeyType;
use aws_sdk_dynamodb::Client;

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => {
            let Some(table) = response.table() else {
                return Ok(None);
            };

            // Partition key first, then sort key
            let mut key_schema: Vec<_> = table.key_schema().iter().collect();
            key_schema.sort_by_key(|key| *key.key_type() != KeyType::Hash);
            let key_names = key_schema
                .into_iter()
                .map(|key| key.attribute_name().to_string())
                .collect();

            let status = match table.table_status() {
                Some(aws_sdk_dynamodb::types::TableStatus::Creating) => TableStatus::Creating,
                Some(aws_sdk_dynamodb::types::TableStatus::Updating) => TableStatus::Updating,
                Some(aws_sdk_dynamodb::types::TableStatus::Deleting) => TableStatus::Deleting,
                _ => TableStatus::Active,
            };

            Ok(Some(TableState { status, key_names }))
        }
        Err(err) => match err.into_service_error() {
            DescribeTableError::ResourceNotFoundException(_) => Ok(None),
            err => Err(DynamodbError::AwsSdk(err.to_string())),
        },
    }
}

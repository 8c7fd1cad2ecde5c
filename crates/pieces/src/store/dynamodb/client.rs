use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::ConfigLoader;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use crate::config::Config;
use crate::store::{Item, PutCondition, ScanPage, StoreClient, StoreError};

use super::error::{map_get_item_error, map_put_item_error, map_scan_error};

/// DynamoDB-backed Store Client.
///
/// The SDK client is cheap to clone and safe to share between tasks, so one
/// instance should live for the whole application.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    scan_page_size: Option<i32>,
}

impl DynamoDbStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            scan_page_size: None,
        }
    }

    /// Caps the number of items DynamoDB evaluates per scan page.
    pub fn with_scan_page_size(mut self, scan_page_size: Option<i32>) -> Self {
        self.scan_page_size = scan_page_size;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Creates a DynamoDB Store Client from the application configuration.
///
/// Credentials come from the AWS SDK default provider chain. When an endpoint
/// URL is configured (e.g. a local DynamoDB on `http://localhost:8000`) it
/// replaces the regional endpoint.
pub async fn connect(config: &Config) -> DynamoDbStore {
    let sdk_config = sdk_loader(config).load().await;
    debug!(endpoint = %config.target_display(), "Created DynamoDB client");

    DynamoDbStore::new(Client::new(&sdk_config)).with_scan_page_size(config.scan_page_size)
}

/// SDK config loader for `config`.
///
/// Automatic retries are disabled: a conditional put that committed but
/// answered with an error must not be re-sent and come back as a duplicate.
fn sdk_loader(config: &Config) -> ConfigLoader {
    let loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .retry_config(RetryConfig::disabled());

    match &config.endpoint_url {
        Some(endpoint) => loader.endpoint_url(endpoint),
        None => loader,
    }
}

#[async_trait]
impl StoreClient for DynamoDbStore {
    async fn get_item(&self, table_name: &str, key: Item) -> Result<Option<Item>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    async fn put_item(
        &self,
        table_name: &str,
        item: Item,
        condition: PutCondition,
    ) -> Result<(), StoreError> {
        let mut request = self
            .client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item));

        if let PutCondition::AttributeNotExists(attribute) = condition {
            request = request
                .condition_expression("attribute_not_exists(#key)")
                .expression_attribute_names("#key", attribute);
        }

        request.send().await.map_err(map_put_item_error)?;

        Ok(())
    }

    async fn scan(
        &self,
        table_name: &str,
        exclusive_start_key: Option<Item>,
    ) -> Result<ScanPage, StoreError> {
        let result = self
            .client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(exclusive_start_key)
            .set_limit(self.scan_page_size)
            .send()
            .await
            .map_err(map_scan_error)?;

        Ok(ScanPage {
            items: result.items.unwrap_or_default(),
            last_evaluated_key: result.last_evaluated_key.filter(|key| !key.is_empty()),
        })
    }

    fn supports_conditional_put(&self) -> bool {
        true
    }
}

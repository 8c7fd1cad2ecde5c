//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to [`StoreError`]. Failures that never reached the
//! service (dispatch, timeouts, unreadable responses) are always
//! `Unavailable`; service errors are split between `Unavailable` and
//! `Rejected` depending on whether the request itself was at fault.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;

use crate::store::StoreError;

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    if !matches!(err, SdkError::ServiceError(_)) {
        return transport_error("GetItem", &err);
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StoreError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StoreError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => StoreError::Unavailable(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> StoreError {
    if !matches!(err, SdkError::ServiceError(_)) {
        return transport_error("PutItem", &err);
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => StoreError::ConditionFailed,
        PutItemError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("Table not found".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::Unavailable("DynamoDB internal server error".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Rejected("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StoreError::Rejected("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::Rejected("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StoreError::Rejected("Transaction conflict, please retry".to_string())
        }
        err => StoreError::Rejected(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> StoreError {
    if !matches!(err, SdkError::ServiceError(_)) {
        return transport_error("Scan", &err);
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            StoreError::Unavailable("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            StoreError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StoreError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            StoreError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => StoreError::Unavailable(format!("Scan failed: {:?}", err)),
    }
}

fn transport_error<E, R>(operation: &str, err: &SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    StoreError::Unavailable(format!("{} failed: {}", operation, DisplayErrorContext(err)))
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ProvisionedThroughputExceededException,
        ResourceNotFoundException,
    };

    use super::*;

    fn service_error<E>(err: E) -> SdkError<E, ()> {
        SdkError::service_error(err, ())
    }

    #[test]
    fn test_condition_failure_maps_to_condition_failed() {
        let err = service_error(PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder().build(),
        ));
        assert_eq!(map_put_item_error(err), StoreError::ConditionFailed);
    }

    #[test]
    fn test_put_throttling_is_rejected() {
        let err = service_error(PutItemError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder().build(),
        ));
        assert_eq!(
            map_put_item_error(err),
            StoreError::Rejected("Throughput exceeded, please retry".to_string())
        );
    }

    #[test]
    fn test_missing_table_is_unavailable() {
        let err = service_error(GetItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder().build(),
        ));
        assert_eq!(
            map_get_item_error(err),
            StoreError::Unavailable("Table not found".to_string())
        );

        let err = service_error(ScanError::ResourceNotFoundException(
            ResourceNotFoundException::builder().build(),
        ));
        assert_eq!(
            map_scan_error(err),
            StoreError::Unavailable("Table not found".to_string())
        );
    }

    #[test]
    fn test_timeout_is_unavailable() {
        let err: SdkError<GetItemError, ()> = SdkError::timeout_error("read timed out");
        assert!(matches!(
            map_get_item_error(err),
            StoreError::Unavailable(message) if message.starts_with("GetItem failed")
        ));
    }
}

//! DynamoDB Store Client.
//!
//! Wraps `aws-sdk-dynamodb` behind [`super::StoreClient`] and builds the
//! long-lived SDK client from [`crate::config::Config`].

mod client;
mod error;

pub use client::{connect, DynamoDbStore};

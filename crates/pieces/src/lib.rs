//! DynamoDB-backed repository for artwork pieces.
//!
//! The [`repository::StorePieceRepository`] implements
//! [`pieces_core::storage::PieceRepository`] on top of any
//! [`store::StoreClient`]. Two clients ship with the crate: the DynamoDB one
//! used in deployments and an in-memory one used in tests and local runs.

pub mod cli;
pub mod config;
pub mod output;
pub mod repository;
pub mod store;

//! Core domain types and the repository contract for artwork pieces.
//!
//! This crate is free of any storage vendor: it defines what a [`piece::Piece`]
//! is, how it is validated, and the [`storage::PieceRepository`] trait that
//! storage backends implement.
//!
//! Services embedding a repository behind HTTP map its failures with
//! [`storage::repository_error_to_status_code`]; the `pieces` CLI maps the
//! same errors to process exit codes instead.

pub mod piece;
pub mod storage;

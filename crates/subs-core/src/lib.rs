//! Core types and trait definitions for the subscription ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies. Request
//! payloads are validated here into the inputs a
//! [`SubscriptionStore`](store::SubscriptionStore) accepts, so every backend
//! and every transport shares the same rules.

// Backends implement the store trait with native `async fn`; the `Send`
// bounds are spelled out on the trait's signatures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod month;
pub mod page;
pub mod patch;
pub mod store;
pub mod subscription;
pub mod summary;

pub use error::{Error, Result};

//! Domain model for users, coffee shops and speed-test records.
//!
//! # Responsibility
//! - Define the records persisted in the store document.
//! - Own the wire shape (camelCase field names) shared with other consumers
//!   of the same `db.json` file.
//!
//! # Invariants
//! - Every record is identified by a UUID that is never reused.
//! - Records are append-only; only `CoffeeShop::votes` is mutated in place.

pub mod coffee_shop;
pub mod document;
pub mod identity;
mod measurement;
mod timestamp;
pub mod user;

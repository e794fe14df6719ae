//! Domain core for the todo service.
//!
//! Holds the [`todo::Todo`] entity and its lifecycle rules, the mutating
//! [`commands`], the query-side [`read_models`], and the [`store::TodoStore`]
//! gateway every operation persists through. Nothing in here knows about
//! HTTP or SQL.

pub mod commands;
pub mod error;
pub mod read_models;
pub mod store;
pub mod todo;
pub mod types;

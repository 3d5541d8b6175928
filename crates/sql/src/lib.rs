//! # Jet SQL surface
//!
//! Shared types sitting between the ORM layer and database drivers: the
//! [`DataType`] value enum used for bound parameters and fetched column
//! values, the [`Row`]/[`Field`] result shape, the [`Executor`]/[`Session`]
//! capability drivers implement, and the explicit [`ConnectConfig`]
//! connection configuration.

#![forbid(unsafe_code)]

mod config;
mod executor;
mod types;

pub use config::ConnectConfig;
pub use executor::{Executor, Session};
pub use types::{DataType, Field, Nullable, Row};

//! Metadata-driven SQL generation and row materialization.
//!
//! A record type declared through the [`entity!`] macro carries enough
//! metadata (table name, field-to-column mappings, primary-key flags) for
//! this crate to derive SELECT, INSERT, and UPDATE statements, bind typed
//! parameters to them, and materialize result rows back into instances.
//! Statement execution stays outside: a [`Store`] delegates to whatever
//! [`Executor`](jet_sql::Executor) implementation a driver provides.
//!
//! # Quick Start
//!
//! ## Declare a mapped type
//!
//! ```ignore
//! entity! {
//!     table = "Users",
//!     columns = [("id", "ID"), ("name", "Name"), ("age", "Age")],
//!     keys = ["id"],
//!     #[derive(Debug, Clone, Default)]
//!     pub struct User {
//!         pub id: i32,
//!         pub name: String,
//!         pub age: i32,
//!     }
//! }
//! ```
//!
//! Every field must name its column in `columns`; a field left out fails
//! resolution with `MissingColumnMapping` before any SQL is generated.
//! Field declaration order fixes the generated column and parameter order.
//!
//! ## Run CRUD operations
//!
//! ```ignore
//! let store = Store::new(driver);
//!
//! // SELECT * FROM Users (TOP 10 with a non-zero limit)
//! let users: Vec<User> = store.fetch_all(0)?;
//!
//! // INSERT INTO Users ([Name], [Age]) VALUES (@name, @age); the key
//! // column is excluded and the generated identity comes back afterwards
//! let id = store.insert(&user, true)?;
//!
//! // UPDATE Users SET [Name]=@name, [Age]=@age WHERE [ID]=@id
//! store.update(&user)?;
//!
//! // Custom statement, same materialization path
//! let adults: Vec<User> = store.query("SELECT * FROM Users WHERE Age >= 18")?;
//! ```
//!
//! ## Build statements without executing
//!
//! ```ignore
//! let query = SelectBuilder::<User>::new().limit(5).build(&Dialect::access())?;
//! assert_eq!(query.sql, "SELECT TOP 5 * FROM Users");
//! ```
//!
//! ## Custom column types
//!
//! ```ignore
//! impl FromSql for UserId {
//!     fn from_sql(value: &DataType) -> anyhow::Result<Self> {
//!         Ok(UserId(String::from_sql(value)?))
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

mod entity;
mod error;
mod insert;
mod query;
mod row;
mod select;
mod store;
mod update;

pub use entity::{Entity, EntityValues, FieldMapping, FieldSpec, FromSql, MappedType, resolve};
pub use error::{Error, Result};
pub use insert::{InsertBuilder, build_insert};
// Re-export the SQL surface used in parameters, rows, driver
// implementations, and custom value conversions.
pub use jet_sql::{ConnectConfig, DataType, Executor, Field, Nullable, Row, Session};
pub use query::{Dialect, LimitStyle, Query};
pub use row::materialize_field;
pub use select::{SelectBuilder, build_select};
pub use store::Store;
pub use update::{UpdateBuilder, build_update};

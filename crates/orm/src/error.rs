//! Errors

use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by metadata resolution, query construction, row
/// materialization, and statement execution.
#[derive(Error, Debug)]
pub enum Error {
    /// A declared field has no column mapping. Every mapped field must name
    /// its column explicitly; there is no default.
    #[error("field `{field}` of `{entity}` has no column mapping declared")]
    MissingColumnMapping {
        /// The mapped type's name.
        entity: &'static str,
        /// The offending field.
        field: &'static str,
    },

    /// The resolved table name is blank.
    #[error("table name is blank")]
    InvalidTableName,

    /// The mapped type declares no fields at all.
    #[error("mapped type for table `{table}` declares no fields")]
    EmptyFieldSet {
        /// The target table.
        table: String,
    },

    /// Every declared field is a primary key, leaving nothing to insert.
    #[error("mapped type for table `{table}` has no insertable columns")]
    InvalidInsert {
        /// The target table.
        table: String,
    },

    /// No field is marked as primary key; an UPDATE without a key target is
    /// never emitted.
    #[error("mapped type for table `{table}` has no primary key field")]
    NoPrimaryKey {
        /// The target table.
        table: String,
    },

    /// A fetched column value could not be coerced into its field's type.
    #[error("column `{column}` cannot be coerced into field `{field}`: {source}")]
    FieldCoercion {
        /// The column whose value failed to convert.
        column: String,
        /// The target field.
        field: &'static str,
        /// The underlying conversion failure.
        #[source]
        source: anyhow::Error,
    },

    /// The external executor reported a failure. The offending statement
    /// text is attached for diagnosis.
    #[error("executor fault while running `{statement}`: {source}")]
    Executor {
        /// The statement that was being executed.
        statement: String,
        /// The driver-reported failure.
        #[source]
        source: anyhow::Error,
    },
}

use std::marker::PhantomData;

use crate::entity::{Entity, MappedType, resolve};
use crate::error::{Error, Result};
use crate::query::{Dialect, LimitStyle, Query};

/// Builder for constructing SELECT statements.
pub struct SelectBuilder<M: Entity> {
    limit: u32,
    _marker: PhantomData<M>,
}

impl<M: Entity> Default for SelectBuilder<M> {
    fn default() -> Self {
        Self { limit: 0, _marker: PhantomData }
    }
}

impl<M: Entity> SelectBuilder<M> {
    /// Creates a new SELECT builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of returned rows. Zero means unbounded.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Build the SELECT statement for the given dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumnMapping`] for unmapped fields and
    /// [`Error::InvalidTableName`] for a blank table name.
    pub fn build(self, dialect: &Dialect) -> Result<Query> {
        let mapped = resolve::<M>()?;
        build_select(&mapped, self.limit, dialect)
    }
}

/// Build a SELECT from an already-resolved descriptor. Produces no bound
/// parameters.
///
/// # Errors
///
/// Returns [`Error::InvalidTableName`] if the table name is blank.
pub fn build_select(mapped: &MappedType, limit: u32, dialect: &Dialect) -> Result<Query> {
    if mapped.table.trim().is_empty() {
        return Err(Error::InvalidTableName);
    }

    let sql = match (limit, dialect.limit_style) {
        (0, _) => format!("SELECT * FROM {}", mapped.table),
        (n, LimitStyle::Top) => format!("SELECT TOP {n} * FROM {}", mapped.table),
        (n, LimitStyle::Limit) => format!("SELECT * FROM {} LIMIT {n}", mapped.table),
    };

    tracing::debug!(table = %mapped.table, sql = %sql, "SelectBuilder generated SQL");

    Ok(Query { sql, params: Vec::new() })
}

use anyhow::anyhow;
use jet_sql::{DataType, Executor, Session};

use crate::entity::{Entity, EntityValues, resolve};
use crate::error::{Error, Result};
use crate::insert::InsertBuilder;
use crate::query::Dialect;
use crate::select::build_select;
use crate::update::UpdateBuilder;

/// Façade orchestrating metadata resolution, query construction, and row
/// materialization against an [`Executor`].
///
/// A store owns its executor and dialect; there is no ambient
/// configuration, so independent stores can target different databases.
/// Every operation opens one session, runs to completion, and releases the
/// session on every exit path.
pub struct Store<E: Executor> {
    executor: E,
    dialect: Dialect,
}

impl<E: Executor> Store<E> {
    /// Creates a store over `executor` using the Access dialect.
    pub fn new(executor: E) -> Self {
        Self { executor, dialect: Dialect::access() }
    }

    /// Replaces the SQL dialect.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// The store's dialect.
    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Fetch rows of `M` and materialize each one, in cursor order. A
    /// `limit` of zero fetches all rows.
    ///
    /// Any row's materialization failure fails the whole call rather than
    /// silently returning an incomplete list.
    ///
    /// # Errors
    ///
    /// Returns query-construction errors, [`Error::Executor`] for driver
    /// faults, and [`Error::FieldCoercion`] for unconvertible values.
    pub fn fetch_all<M: Entity>(&self, limit: u32) -> Result<Vec<M>> {
        let mapped = resolve::<M>()?;
        let query = build_select(&mapped, limit, &self.dialect)?;

        let mut session = self.open_for(&query.sql)?;
        let rows = session
            .execute_reader(&query.sql, &query.params)
            .map_err(|source| Error::Executor { statement: query.sql.clone(), source })?;

        tracing::debug!(table = %mapped.table, rows = rows.len(), "fetch_all read rows");

        rows.iter().map(|row| M::from_row(&mapped, row)).collect()
    }

    /// Run a caller-supplied statement and materialize the result rows as
    /// `M`, using the type's column mappings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumnMapping`] for unmapped fields,
    /// [`Error::Executor`] for driver faults, and
    /// [`Error::FieldCoercion`] for unconvertible values.
    pub fn query<M: Entity>(&self, sql: &str) -> Result<Vec<M>> {
        let mapped = resolve::<M>()?;

        let mut session = self.open_for(sql)?;
        let rows = session
            .execute_reader(sql, &[])
            .map_err(|source| Error::Executor { statement: sql.to_string(), source })?;

        tracing::debug!(table = %mapped.table, rows = rows.len(), "custom query read rows");

        rows.iter().map(|row| M::from_row(&mapped, row)).collect()
    }

    /// Insert `entity`, optionally retrieving the generated identity value.
    ///
    /// The identity fetch is a second statement issued on the same open
    /// session as the insert. The two round-trips are sequential, not
    /// atomic: another insert through the same session between them can
    /// skew the retrieved value. Returns 0 when the identity is not
    /// requested.
    ///
    /// # Errors
    ///
    /// Returns query-construction errors and [`Error::Executor`] for
    /// driver faults or a non-integer identity value.
    pub fn insert<M: Entity + EntityValues>(
        &self, entity: &M, return_generated_id: bool,
    ) -> Result<i64> {
        let query = InsertBuilder::from_entity(entity).build(&self.dialect)?;

        let mut session = self.open_for(&query.sql)?;
        session
            .execute_non_query(&query.sql, &query.params)
            .map_err(|source| Error::Executor { statement: query.sql.clone(), source })?;

        if !return_generated_id {
            return Ok(0);
        }

        let identity = self.dialect.identity_query;
        let value = session
            .execute_scalar(identity)
            .map_err(|source| Error::Executor { statement: identity.to_string(), source })?;

        match value {
            DataType::Int32(Some(v)) => Ok(v.into()),
            DataType::Int64(Some(v)) => Ok(v),
            DataType::Uint32(Some(v)) => Ok(v.into()),
            DataType::Uint64(Some(v)) => i64::try_from(v).map_err(|_e| Error::Executor {
                statement: identity.to_string(),
                source: anyhow!("identity value {v} exceeds i64 range"),
            }),
            other => Err(Error::Executor {
                statement: identity.to_string(),
                source: anyhow!("identity query returned a non-integer value: {other:?}"),
            }),
        }
    }

    /// Update the row keyed by `entity`'s primary-key field.
    ///
    /// A zero-row match (no row with that key) is not an error; only
    /// execution faults are surfaced.
    ///
    /// # Errors
    ///
    /// Returns query-construction errors and [`Error::Executor`] for
    /// driver faults.
    pub fn update<M: Entity + EntityValues>(&self, entity: &M) -> Result<()> {
        let query = UpdateBuilder::from_entity(entity).build(&self.dialect)?;

        let mut session = self.open_for(&query.sql)?;
        let affected = session
            .execute_non_query(&query.sql, &query.params)
            .map_err(|source| Error::Executor { statement: query.sql.clone(), source })?;

        tracing::debug!(affected, "update executed");
        Ok(())
    }

    fn open_for(&self, statement: &str) -> Result<E::Session> {
        self.executor
            .open()
            .map_err(|source| Error::Executor { statement: statement.to_string(), source })
    }
}

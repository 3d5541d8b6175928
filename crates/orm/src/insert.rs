use jet_sql::DataType;

use crate::entity::{Entity, EntityValues, MappedType, resolve};
use crate::error::{Error, Result};
use crate::query::{Dialect, Query};

/// Builder for constructing INSERT statements from an entity instance.
///
/// Primary-key fields never appear in the generated statement; keys are
/// assumed to be server-generated.
pub struct InsertBuilder<'a, M: Entity + EntityValues> {
    entity: &'a M,
}

impl<'a, M: Entity + EntityValues> InsertBuilder<'a, M> {
    /// Creates an INSERT builder reading values from `entity`.
    #[must_use]
    pub const fn from_entity(entity: &'a M) -> Self {
        Self { entity }
    }

    /// Build the INSERT statement for the given dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumnMapping`] for unmapped fields,
    /// [`Error::EmptyFieldSet`] for a type with no fields, and
    /// [`Error::InvalidInsert`] when every field is a primary key.
    pub fn build(self, dialect: &Dialect) -> Result<Query> {
        let mapped = resolve::<M>()?;
        build_insert(&mapped, self.entity.to_values(), dialect)
    }
}

/// Build an INSERT from an already-resolved descriptor and the instance's
/// values in declaration order.
///
/// # Errors
///
/// Returns [`Error::EmptyFieldSet`] or [`Error::InvalidInsert`] when the
/// descriptor leaves nothing to insert.
pub fn build_insert(
    mapped: &MappedType, values: Vec<(&'static str, DataType)>, dialect: &Dialect,
) -> Result<Query> {
    if mapped.fields.is_empty() {
        return Err(Error::EmptyFieldSet { table: mapped.table.clone() });
    }

    let mut columns = Vec::new();
    let mut markers = Vec::new();
    let mut params = Vec::new();

    for (mapping, (_, value)) in mapped.fields.iter().zip(values) {
        if mapping.primary_key {
            continue;
        }
        columns.push(dialect.ident(mapping.column));
        markers.push(dialect.param(mapping.field));
        params.push((mapping.field, value));
    }

    if params.is_empty() {
        return Err(Error::InvalidInsert { table: mapped.table.clone() });
    }

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        mapped.table,
        columns.join(", "),
        markers.join(", ")
    );

    tracing::debug!(
        table = %mapped.table,
        sql = %sql,
        param_count = params.len(),
        "InsertBuilder generated SQL"
    );

    Ok(Query { sql, params })
}

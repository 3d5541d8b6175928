use jet_sql::DataType;

use crate::entity::{Entity, EntityValues, FieldMapping, MappedType, resolve};
use crate::error::{Error, Result};
use crate::query::{Dialect, Query};

/// Builder for constructing UPDATE statements from an entity instance.
///
/// Non-key fields form the SET clause in declaration order; the key field
/// forms the WHERE clause and its parameter is bound last, matching the
/// placeholder order in the statement text.
pub struct UpdateBuilder<'a, M: Entity + EntityValues> {
    entity: &'a M,
}

impl<'a, M: Entity + EntityValues> UpdateBuilder<'a, M> {
    /// Creates an UPDATE builder reading values from `entity`.
    #[must_use]
    pub const fn from_entity(entity: &'a M) -> Self {
        Self { entity }
    }

    /// Build the UPDATE statement for the given dialect.
    ///
    /// When several fields are flagged as primary key, the last one in
    /// declaration order becomes the WHERE target; composite keys are not
    /// supported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumnMapping`] for unmapped fields,
    /// [`Error::EmptyFieldSet`] for a type with no fields, and
    /// [`Error::NoPrimaryKey`] when no field is flagged as key.
    pub fn build(self, dialect: &Dialect) -> Result<Query> {
        let mapped = resolve::<M>()?;
        build_update(&mapped, self.entity.to_values(), dialect)
    }
}

/// Build an UPDATE from an already-resolved descriptor and the instance's
/// values in declaration order.
///
/// # Errors
///
/// Returns [`Error::EmptyFieldSet`] or [`Error::NoPrimaryKey`] when the
/// descriptor cannot produce a keyed update.
pub fn build_update(
    mapped: &MappedType, values: Vec<(&'static str, DataType)>, dialect: &Dialect,
) -> Result<Query> {
    if mapped.fields.is_empty() {
        return Err(Error::EmptyFieldSet { table: mapped.table.clone() });
    }

    let mut sets = Vec::new();
    let mut params = Vec::new();
    let mut key: Option<(&FieldMapping, DataType)> = None;

    for (mapping, (_, value)) in mapped.fields.iter().zip(values) {
        if mapping.primary_key {
            // last flagged key wins
            key = Some((mapping, value));
        } else {
            sets.push(format!("{}={}", dialect.ident(mapping.column), dialect.param(mapping.field)));
            params.push((mapping.field, value));
        }
    }

    let Some((pk, pk_value)) = key else {
        return Err(Error::NoPrimaryKey { table: mapped.table.clone() });
    };
    params.push((pk.field, pk_value));

    let sql = format!(
        "UPDATE {} SET {} WHERE {}={}",
        mapped.table,
        sets.join(", "),
        dialect.ident(pk.column),
        dialect.param(pk.field)
    );

    tracing::debug!(
        table = %mapped.table,
        sql = %sql,
        param_count = params.len(),
        "UpdateBuilder generated SQL"
    );

    Ok(Query { sql, params })
}

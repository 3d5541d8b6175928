use jet_sql::Row;

use crate::entity::{FromSql, MappedType};
use crate::error::{Error, Result};

/// Materialize one field of an entity from a result row.
///
/// The value is looked up by the field's mapped column name, never by
/// position, so the row's field order is irrelevant. An absent column or a
/// SQL NULL leaves the field at its default value.
///
/// # Errors
///
/// Returns [`Error::MissingColumnMapping`] if `field` does not appear in
/// `mapped` at all, which indicates a descriptor for a different type.
/// Returns [`Error::FieldCoercion`] when a fetched value cannot be
/// converted to the field's type. The error names the column and the
/// target field; rows materialized before the failure remain valid.
pub fn materialize_field<T: FromSql + Default>(
    entity: &'static str, mapped: &MappedType, field: &'static str, row: &Row,
) -> Result<T> {
    let Some(mapping) = mapped.mapping(field) else {
        return Err(Error::MissingColumnMapping { entity, field });
    };

    match row.get(mapping.column) {
        Some(value) if !value.is_null() => {
            T::from_sql(value).map_err(|source| Error::FieldCoercion {
                column: mapping.column.to_string(),
                field,
                source,
            })
        }
        _ => Ok(T::default()),
    }
}

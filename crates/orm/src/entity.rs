use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use jet_sql::DataType;

use crate::error::Error;

/// Declares a mapped record type with automatic [`Entity`] trait
/// implementation.
///
/// The `columns` list is the explicit field-to-column mapping; every field
/// that takes part in SQL generation must appear in it. Fields left out are
/// caught by [`resolve`] with [`Error::MissingColumnMapping`]. The optional
/// `keys` list flags primary-key fields and the optional `table` argument
/// overrides the table name (the struct's own name is the default).
///
/// # Examples
///
/// ```ignore
/// entity! {
///     table = "Users",
///     columns = [("id", "ID"), ("name", "Name")],
///     keys = ["id"],
///     pub struct User {
///         pub id: i32,
///         pub name: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! entity {
    // Full form: table + columns + keys (single code-generation arm)
    (
        table = $table:literal,
        columns = [$( ($col_field:literal, $col_name:literal) ),* $(,)?],
        keys = [$( $key:literal ),* $(,)?],
        $($rest:tt)*
    ) => {
        $crate::entity! {
            @impl
            table = Some($table),
            columns = [$( ($col_field, $col_name) ),*],
            keys = [$( $key ),*],
            $($rest)*
        }
    };

    // Table + columns → forward with empty keys
    (
        table = $table:literal,
        columns = [$( ($col_field:literal, $col_name:literal) ),* $(,)?],
        $($rest:tt)*
    ) => {
        $crate::entity! {
            @impl
            table = Some($table),
            columns = [$( ($col_field, $col_name) ),*],
            keys = [],
            $($rest)*
        }
    };

    // Columns + keys → table defaults to the struct name
    (
        columns = [$( ($col_field:literal, $col_name:literal) ),* $(,)?],
        keys = [$( $key:literal ),* $(,)?],
        $($rest:tt)*
    ) => {
        $crate::entity! {
            @impl
            table = None,
            columns = [$( ($col_field, $col_name) ),*],
            keys = [$( $key ),*],
            $($rest)*
        }
    };

    // Columns only → struct-name table, no keys
    (
        columns = [$( ($col_field:literal, $col_name:literal) ),* $(,)?],
        $($rest:tt)*
    ) => {
        $crate::entity! {
            @impl
            table = None,
            columns = [$( ($col_field, $col_name) ),*],
            keys = [],
            $($rest)*
        }
    };

    (
        @impl
        table = $table:expr,
        columns = [$( ($col_field:literal, $col_name:literal) ),* $(,)?],
        keys = [$( $key:literal ),* $(,)?],
        $(#[$meta:meta])*
        pub struct $struct_name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field_name:ident : $field_type:ty
            ),* $(,)?
        }
    ) => {
        #[allow(missing_docs)]
        $(#[$meta])*
        pub struct $struct_name {
            $(
                $(#[$field_meta])*
                pub $field_name : $field_type
            ),*
        }

        impl $crate::Entity for $struct_name {
            const NAME: &'static str = stringify!($struct_name);

            fn table_override() -> Option<&'static str> {
                $table
            }

            fn field_specs() -> &'static [$crate::FieldSpec] {
                static SPECS: ::std::sync::LazyLock<Vec<$crate::FieldSpec>> =
                    ::std::sync::LazyLock::new(|| {
                        let columns: &[(&'static str, &'static str)] =
                            &[$( ($col_field, $col_name) ),*];
                        let keys: &[&'static str] = &[$( $key ),*];
                        let declared: &[&'static str] = &[$( stringify!($field_name) ),*];

                        declared
                            .iter()
                            .map(|&field| $crate::FieldSpec {
                                field,
                                column: columns
                                    .iter()
                                    .find(|(name, _)| *name == field)
                                    .map(|&(_, column)| column),
                                primary_key: keys.contains(&field),
                            })
                            .collect()
                    });
                &SPECS
            }

            fn from_row(
                mapped: &$crate::MappedType, row: &$crate::Row,
            ) -> $crate::Result<Self> {
                Ok(Self {
                    $(
                        $field_name: $crate::materialize_field(
                            Self::NAME,
                            mapped,
                            stringify!($field_name),
                            row,
                        )?,
                    )*
                })
            }
        }

        impl $crate::EntityValues for $struct_name {
            fn to_values(&self) -> Vec<(&'static str, $crate::DataType)> {
                vec![
                    $(
                        (stringify!($field_name), self.$field_name.clone().into()),
                    )*
                ]
            }
        }
    };
}

/// One field's static mapping declaration, as written in the [`entity!`]
/// macro. A `None` column means the field was not listed in `columns`.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    /// Field identifier, used for parameter naming.
    pub field: &'static str,
    /// Declared column name, if any.
    pub column: Option<&'static str>,
    /// Whether the field is flagged as primary key.
    pub primary_key: bool,
}

/// One field of a resolved [`MappedType`]. Unlike [`FieldSpec`], the column
/// name is guaranteed present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field identifier, used for parameter naming.
    pub field: &'static str,
    /// Physical column name.
    pub column: &'static str,
    /// Whether the field is flagged as primary key.
    pub primary_key: bool,
}

/// Immutable descriptor of a mapped type: its table name and its field
/// mappings in declaration order.
///
/// Field order is a binding contract: it fixes the column and parameter
/// order the builders emit, which callers expect to mirror the physical
/// table's column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedType {
    /// Resolved table name.
    pub table: String,
    /// Field mappings in declaration order.
    pub fields: Vec<FieldMapping>,
}

impl MappedType {
    /// The field designated as the UPDATE key target. With multiple flagged
    /// fields, the last one in declaration order wins.
    #[must_use]
    pub fn primary_key(&self) -> Option<&FieldMapping> {
        self.fields.iter().rev().find(|mapping| mapping.primary_key)
    }

    /// Look up a mapping by field name.
    #[must_use]
    pub fn mapping(&self, field: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|mapping| mapping.field == field)
    }
}

/// Trait for mapped record types. Typically implemented via the [`entity!`]
/// macro rather than manually.
pub trait Entity: Sized {
    /// The type's bare name; the table name falls back to this.
    const NAME: &'static str;

    /// Table-name override, if one was declared.
    fn table_override() -> Option<&'static str> {
        None
    }

    /// Static field declarations, in declaration order.
    fn field_specs() -> &'static [FieldSpec];

    /// Construct an instance from a result row using the resolved mapping.
    ///
    /// Columns that are absent or SQL NULL leave the field at its default
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldCoercion`] if a fetched value cannot be
    /// converted to its field's type.
    fn from_row(mapped: &MappedType, row: &jet_sql::Row) -> crate::Result<Self>;
}

/// Trait for reading an entity's field values in declaration order.
/// Implemented by the [`entity!`] macro.
pub trait EntityValues {
    /// `(field name, value)` pairs in declaration order.
    fn to_values(&self) -> Vec<(&'static str, DataType)>;
}

/// Resolve a mapped type's descriptor.
///
/// The table name is the declared override when non-blank, otherwise the
/// type's own name. Field declaration order is preserved exactly.
///
/// # Errors
///
/// Returns [`Error::MissingColumnMapping`] if any field lacks a declared
/// column. This is a configuration error and surfaces before any statement
/// text is generated.
pub fn resolve<M: Entity>() -> crate::Result<MappedType> {
    let table = M::table_override()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(M::NAME)
        .to_string();

    let specs = M::field_specs();
    let mut fields = Vec::with_capacity(specs.len());
    for spec in specs {
        let Some(column) = spec.column else {
            return Err(Error::MissingColumnMapping { entity: M::NAME, field: spec.field });
        };
        fields.push(FieldMapping {
            field: spec.field,
            column,
            primary_key: spec.primary_key,
        });
    }

    Ok(MappedType { table, fields })
}

/// Trait for types that can be extracted from fetched column values.
///
/// Implemented for the standard Rust types a database row can carry
/// (`i32`, `String`, `DateTime`, etc.).
pub trait FromSql: Sized {
    /// Convert a non-NULL column value to the target type.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be converted.
    fn from_sql(value: &DataType) -> Result<Self>;
}

impl FromSql for bool {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Boolean(Some(v)) => Ok(*v),
            _ => bail!("expected boolean data type"),
        }
    }
}

impl FromSql for i32 {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Int32(Some(v)) => Ok(*v),
            _ => bail!("expected int32 data type"),
        }
    }
}

impl FromSql for i64 {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Int64(Some(v)) => Ok(*v),
            DataType::Int32(Some(v)) => Ok(Self::from(*v)),
            _ => bail!("expected int64 data type"),
        }
    }
}

impl FromSql for u32 {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Uint32(Some(v)) => Ok(*v),
            _ => bail!("expected uint32 data type"),
        }
    }
}

impl FromSql for u64 {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Uint64(Some(v)) => Ok(*v),
            DataType::Uint32(Some(v)) => Ok(Self::from(*v)),
            _ => bail!("expected uint64 data type"),
        }
    }
}

impl FromSql for f32 {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Float(Some(v)) => Ok(*v),
            _ => bail!("expected float data type"),
        }
    }
}

impl FromSql for f64 {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Double(Some(v)) => Ok(*v),
            DataType::Float(Some(v)) => Ok(Self::from(*v)),
            _ => bail!("expected double data type"),
        }
    }
}

impl FromSql for String {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Str(Some(raw)) => Ok(raw.clone()),
            _ => bail!("expected string data type"),
        }
    }
}

impl FromSql for Vec<u8> {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Binary(Some(bytes)) => Ok(bytes.clone()),
            _ => bail!("expected binary data type"),
        }
    }
}

impl FromSql for DateTime<Utc> {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Timestamp(Some(raw)) => {
                if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
                    return Ok(parsed.with_timezone(&Utc));
                }

                if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
                    return Ok(Self::from_naive_utc_and_offset(parsed, Utc));
                }

                bail!(
                    "unsupported timestamp: {raw}; expected RFC3339 or \"%Y-%m-%d %H:%M:%S%.f\" format"
                )
            }
            _ => bail!("expected timestamp data type"),
        }
    }
}

impl FromSql for NaiveDate {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Date(Some(raw)) => Self::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_e| anyhow!("unsupported date: {raw}; expected \"%Y-%m-%d\" format")),
            _ => bail!("expected date data type"),
        }
    }
}

impl FromSql for NaiveTime {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Time(Some(raw)) => Self::parse_from_str(raw, "%H:%M:%S%.f")
                .map_err(|_e| anyhow!("unsupported time: {raw}; expected \"%H:%M:%S%.f\" format")),
            _ => bail!("expected time data type"),
        }
    }
}

impl FromSql for serde_json::Value {
    fn from_sql(value: &DataType) -> Result<Self> {
        match value {
            DataType::Str(Some(raw)) => Ok(serde_json::from_str(raw)?),
            DataType::Binary(Some(bytes)) => Ok(serde_json::from_slice(bytes)?),
            _ => bail!("expected json compatible data type"),
        }
    }
}

impl<T: FromSql> FromSql for Option<T> {
    fn from_sql(value: &DataType) -> Result<Self> {
        if value.is_null() { Ok(None) } else { T::from_sql(value).map(Some) }
    }
}

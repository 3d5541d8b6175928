use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// A single typed SQL value.
///
/// Every variant carries an `Option`; a `None` payload encodes SQL NULL
/// while retaining the column's type. Date, time, and timestamp values are
/// carried as formatted strings (`%Y-%m-%d`, `%H:%M:%S%.f`, RFC3339 or
/// `%Y-%m-%d %H:%M:%S%.f`) so drivers stay free of chrono types.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum DataType {
    Boolean(Option<bool>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Uint32(Option<u32>),
    Uint64(Option<u64>),
    Float(Option<f32>),
    Double(Option<f64>),
    Str(Option<String>),
    Binary(Option<Vec<u8>>),
    Date(Option<String>),
    Time(Option<String>),
    Timestamp(Option<String>),
}

impl DataType {
    /// Whether this value is SQL NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(
            self,
            Self::Boolean(None)
                | Self::Int32(None)
                | Self::Int64(None)
                | Self::Uint32(None)
                | Self::Uint64(None)
                | Self::Float(None)
                | Self::Double(None)
                | Self::Str(None)
                | Self::Binary(None)
                | Self::Date(None)
                | Self::Time(None)
                | Self::Timestamp(None)
        )
    }
}

/// A named value within a result row.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Column name as reported by the driver.
    pub name: String,
    /// The column's value.
    pub value: DataType,
}

/// One result row, queryable by column name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    /// The row's fields, in cursor order.
    pub fields: Vec<Field>,
}

impl Row {
    /// Look up a value by column name. Field position is irrelevant.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&DataType> {
        self.fields.iter().find(|field| field.name == column).map(|field| &field.value)
    }
}

/// Types with a typed SQL NULL representation, enabling `Option<T>`
/// parameter binding.
pub trait Nullable {
    /// The NULL value carrying this type's variant.
    const NULL: DataType;
}

macro_rules! convert {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DataType {
                fn from(value: $ty) -> Self {
                    Self::$variant(Some(value))
                }
            }

            impl Nullable for $ty {
                const NULL: DataType = DataType::$variant(None);
            }
        )*
    };
}

convert! {
    bool => Boolean,
    i32 => Int32,
    i64 => Int64,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float,
    f64 => Double,
    String => Str,
    Vec<u8> => Binary,
}

impl From<&str> for DataType {
    fn from(value: &str) -> Self {
        Self::Str(Some(value.to_string()))
    }
}

impl From<NaiveDate> for DataType {
    fn from(value: NaiveDate) -> Self {
        Self::Date(Some(value.to_string())) // "%Y-%m-%d"
    }
}

impl Nullable for NaiveDate {
    const NULL: DataType = DataType::Date(None);
}

impl From<NaiveTime> for DataType {
    fn from(value: NaiveTime) -> Self {
        Self::Time(Some(value.to_string())) // "%H:%M:%S%.f"
    }
}

impl Nullable for NaiveTime {
    const NULL: DataType = DataType::Time(None);
}

impl From<NaiveDateTime> for DataType {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(Some(value.to_string())) // "%Y-%m-%d %H:%M:%S%.f"
    }
}

impl Nullable for NaiveDateTime {
    const NULL: DataType = DataType::Timestamp(None);
}

impl From<DateTime<Utc>> for DataType {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(Some(value.to_rfc3339()))
    }
}

impl Nullable for DateTime<Utc> {
    const NULL: DataType = DataType::Timestamp(None);
}

impl<T> From<Option<T>> for DataType
where
    T: Into<Self> + Nullable,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(T::NULL, Into::into)
    }
}

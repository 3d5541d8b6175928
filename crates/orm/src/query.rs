use jet_sql::DataType;

/// A built statement: SQL text plus its bound parameters.
///
/// Parameter names are field names and their order matches placeholder
/// order in the statement text, so drivers may bind by name or by
/// position. A query is built and consumed within a single operation.
#[derive(Debug)]
pub struct Query {
    /// The statement text.
    pub sql: String,
    /// Ordered `(parameter name, value)` pairs.
    pub params: Vec<(&'static str, DataType)>,
}

/// How a dialect caps the number of returned rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitStyle {
    /// `SELECT TOP <n> * FROM t` (Access, SQL Server).
    Top,
    /// `SELECT * FROM t LIMIT <n>` (SQLite, Postgres).
    Limit,
}

/// The SQL flavor the builders emit.
///
/// Everything dialect-specific is carried here: identifier quoting,
/// the parameter marker, the row-limit syntax, and the statement that
/// retrieves the last generated identity value.
#[derive(Clone, Debug)]
pub struct Dialect {
    /// Opening and closing identifier quote characters.
    pub quote: (char, char),
    /// Prefix for named parameter placeholders.
    pub param_marker: char,
    /// Row-limit syntax.
    pub limit_style: LimitStyle,
    /// Statement retrieving the identity generated by the last insert on
    /// the current session.
    pub identity_query: &'static str,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::access()
    }
}

impl Dialect {
    /// The Access/Jet dialect: `[bracket]` quoting, `@name` parameters,
    /// `TOP n` limits, `SELECT @@IDENTITY`.
    #[must_use]
    pub const fn access() -> Self {
        Self {
            quote: ('[', ']'),
            param_marker: '@',
            limit_style: LimitStyle::Top,
            identity_query: "SELECT @@IDENTITY",
        }
    }

    /// The SQLite dialect. SQLite accepts `@name` parameters natively.
    #[must_use]
    pub const fn sqlite() -> Self {
        Self {
            quote: ('"', '"'),
            param_marker: '@',
            limit_style: LimitStyle::Limit,
            identity_query: "SELECT last_insert_rowid()",
        }
    }

    pub(crate) fn ident(&self, name: &str) -> String {
        format!("{}{name}{}", self.quote.0, self.quote.1)
    }

    pub(crate) fn param(&self, name: &str) -> String {
        format!("{}{name}", self.param_marker)
    }
}

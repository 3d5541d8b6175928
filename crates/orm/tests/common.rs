//! Common test helpers shared across integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use jet_orm::{DataType, Executor, Field, MappedType, Row, Session, entity};

// Common test entities used across multiple test files

entity! {
    table = "Users",
    columns = [("id", "ID"), ("name", "Name"), ("surname", "Surname"), ("age", "Age")],
    keys = ["id"],
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct User {
        pub id: i32,
        pub name: String,
        pub surname: String,
        pub age: i32,
    }
}

// No table override: the struct name is the table name.
entity! {
    columns = [("id", "id"), ("label", "label")],
    keys = ["id"],
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Widget {
        pub id: i64,
        pub label: String,
    }
}

// `note` is deliberately missing from the columns list.
entity! {
    table = "Broken",
    columns = [("id", "ID")],
    keys = ["id"],
    #[derive(Debug, Clone, Default)]
    pub struct Broken {
        pub id: i32,
        pub note: String,
    }
}

entity! {
    table = "Links",
    columns = [("first", "First"), ("label", "Label"), ("second", "Second")],
    keys = ["first", "second"],
    #[derive(Debug, Clone, Default)]
    pub struct MultiKey {
        pub first: i32,
        pub label: String,
        pub second: i32,
    }
}

entity! {
    table = "Pairs",
    columns = [("left", "Left"), ("right", "Right")],
    keys = ["left", "right"],
    #[derive(Debug, Clone, Default)]
    pub struct OnlyKeys {
        pub left: i32,
        pub right: i32,
    }
}

entity! {
    table = "Tags",
    columns = [("name", "Name")],
    #[derive(Debug, Clone, Default)]
    pub struct Tag {
        pub name: String,
    }
}

/// Build a result row from `(column, value)` pairs.
pub fn row(fields: &[(&str, DataType)]) -> Row {
    Row {
        fields: fields
            .iter()
            .map(|(name, value)| Field { name: (*name).to_string(), value: value.clone() })
            .collect(),
    }
}

/// Shared state behind a [`FakeExecutor`]: preset results plus a log of
/// everything executed.
#[derive(Debug, Default)]
pub struct FakeState {
    /// Rows returned by `execute_reader`.
    pub rows: Vec<Row>,
    /// Value returned by `execute_scalar`.
    pub identity: Option<DataType>,
    /// Count returned by `execute_non_query`.
    pub affected: u64,
    /// When set, every statement fails with this message.
    pub fail: Option<String>,
    /// When set, `execute_reader` echoes rows rebuilt from previously
    /// recorded write parameters, renaming fields to columns via this map.
    pub echo_columns: Option<HashMap<String, String>>,
    /// Executed statement texts, in order.
    pub statements: Vec<String>,
    /// Bound parameters per executed statement.
    pub params: Vec<Vec<(String, DataType)>>,
    /// Sessions opened so far.
    pub opened: usize,
    /// Sessions released so far.
    pub closed: usize,
}

/// In-memory [`Executor`] recording statements and session lifecycle.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    state: Arc<Mutex<FakeState>>,
}

impl FakeExecutor {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        let fake = Self::default();
        fake.state().rows = rows;
        fake
    }

    pub fn with_identity(identity: DataType) -> Self {
        let fake = Self::default();
        fake.state().identity = Some(identity);
        fake
    }

    /// An executor that plays written rows back: reads return one row per
    /// recorded write, with parameter names translated to column names
    /// through `mapped`.
    pub fn echoing(mapped: &MappedType) -> Self {
        let fake = Self::default();
        fake.state().echo_columns = Some(
            mapped
                .fields
                .iter()
                .map(|mapping| (mapping.field.to_string(), mapping.column.to_string()))
                .collect(),
        );
        fake
    }

    pub fn failing(message: &str) -> Self {
        let fake = Self::default();
        fake.state().fail = Some(message.to_string());
        fake
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("state lock")
    }
}

impl Executor for FakeExecutor {
    type Session = FakeSession;

    fn open(&self) -> Result<Self::Session> {
        self.state().opened += 1;
        Ok(FakeSession { state: Arc::clone(&self.state) })
    }
}

pub struct FakeSession {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSession {
    fn record(&self, sql: &str, params: &[(&'static str, DataType)]) -> Result<()> {
        let mut state = self.state.lock().expect("state lock");
        state.statements.push(sql.to_string());
        state
            .params
            .push(params.iter().map(|(name, value)| ((*name).to_string(), value.clone())).collect());
        match &state.fail {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(()),
        }
    }
}

impl Session for FakeSession {
    fn execute_reader(
        &mut self, sql: &str, params: &[(&'static str, DataType)],
    ) -> Result<Vec<Row>> {
        self.record(sql, params)?;
        let state = self.state.lock().expect("state lock");

        if let Some(columns) = &state.echo_columns {
            let rows = state
                .params
                .iter()
                .filter(|bound| !bound.is_empty())
                .map(|bound| Row {
                    fields: bound
                        .iter()
                        .filter_map(|(field, value)| {
                            columns.get(field).map(|column| Field {
                                name: column.clone(),
                                value: value.clone(),
                            })
                        })
                        .collect(),
                })
                .collect();
            return Ok(rows);
        }

        Ok(state.rows.clone())
    }

    fn execute_non_query(
        &mut self, sql: &str, params: &[(&'static str, DataType)],
    ) -> Result<u64> {
        self.record(sql, params)?;
        Ok(self.state.lock().expect("state lock").affected)
    }

    fn execute_scalar(&mut self, sql: &str) -> Result<DataType> {
        self.record(sql, &[])?;
        self.state
            .lock()
            .expect("state lock")
            .identity
            .clone()
            .ok_or_else(|| anyhow!("no scalar value configured"))
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.state.lock().expect("state lock").closed += 1;
    }
}

/// Install a subscriber once so `RUST_LOG` controls test output.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

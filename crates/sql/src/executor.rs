use anyhow::Result;

use crate::types::{DataType, Row};

/// Database drivers implement [`Executor`] to hand out connection-scoped
/// sessions. The ORM layer opens one session per operation and never holds
/// it across calls.
pub trait Executor {
    /// The session type produced by [`open`](Self::open).
    type Session: Session;

    /// Acquire a connection-scoped session.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying connection cannot be established.
    fn open(&self) -> Result<Self::Session>;
}

/// A single acquired connection. The session's resource is released when
/// the value is dropped, on every exit path.
pub trait Session {
    /// Execute a statement and return the resulting rows in cursor order.
    ///
    /// # Errors
    ///
    /// Returns an error for connection faults or statement failures.
    fn execute_reader(
        &mut self, sql: &str, params: &[(&'static str, DataType)],
    ) -> Result<Vec<Row>>;

    /// Execute a statement that returns no rows, yielding the affected row
    /// count.
    ///
    /// # Errors
    ///
    /// Returns an error for connection faults or statement failures.
    fn execute_non_query(&mut self, sql: &str, params: &[(&'static str, DataType)])
    -> Result<u64>;

    /// Execute a statement producing a single value (first column of the
    /// first row).
    ///
    /// # Errors
    ///
    /// Returns an error for connection faults or statement failures.
    fn execute_scalar(&mut self, sql: &str) -> Result<DataType>;
}

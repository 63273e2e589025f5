// Statement session - one connection plus at most one compiled statement
//
// The impl is split by concern:
// - core: opening, accessors, connection-scoped helpers
// - lifecycle: set_query / prepare / step / reset / execute
// - bind: parameter binding
// - columns: typed reads from the current row

mod bind;
mod columns;
mod core;
mod lifecycle;

use std::fmt;

use rusqlite::Connection;

use crate::config::SessionOptions;
use crate::ffi::RawStatement;

/// Emit a lifecycle event at `DEBUG` when the session was opened with `debug`, else `TRACE`.
macro_rules! session_event {
    ($debug:expr, $($arg:tt)+) => {
        if $debug {
            tracing::debug!($($arg)+);
        } else {
            tracing::trace!($($arg)+);
        }
    };
}
pub(crate) use session_event;

/// Slot holding the session's single compiled statement.
///
/// Assigning a new value drops (and so finalizes) the previous occupant.
enum CompiledStatement {
    Vacant,
    /// Compilation succeeded but the text held no statement (only whitespace or comments).
    Empty,
    Live(RawStatement),
}

impl CompiledStatement {
    fn live(&self) -> Option<&RawStatement> {
        if let CompiledStatement::Live(raw) = self {
            Some(raw)
        } else {
            None
        }
    }
}

/// Owns a `SQLite` connection and sequences one prepared statement through
/// set-query, prepare, step, bind, read and reset.
///
/// The session is move-only: it is not `Clone`, so the underlying handles can never be
/// released twice. Dropping it finalizes the statement and then closes the connection.
///
/// ```rust
/// use sqlite_session::prelude::*;
///
/// # fn main() -> Result<(), SessionError> {
/// let mut db = StatementSession::open_in_memory()?;
/// db.execute("CREATE TABLE test(id INTEGER PRIMARY KEY, text TEXT)")?;
///
/// db.set_query("INSERT INTO test(text) VALUES(?)")?;
/// db.prepare()?;
/// db.bind(1, "hello")?;
/// db.step()?;
/// db.reset()?;
///
/// db.set_query("SELECT id, text FROM test")?;
/// db.prepare()?;
/// while db.step()?.is_row() {
///     assert_eq!(db.get_text(1)?, "hello");
/// }
/// # Ok(())
/// # }
/// ```
pub struct StatementSession {
    // Declared before `connection`: the statement must be finalized first.
    statement: CompiledStatement,
    connection: Connection,
    options: SessionOptions,
    query: String,
    tail: String,
    prepared: bool,
    valid: bool,
    rows_pending: bool,
    /// The most recent `step` produced a row that has not been invalidated since.
    row_ready: bool,
}

impl Drop for StatementSession {
    fn drop(&mut self) {
        session_event!(self.options.debug, path = %self.options.target, "closing session");
        self.statement = CompiledStatement::Vacant;
    }
}

impl fmt::Debug for StatementSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementSession")
            .field("target", &self.options.target)
            .field("query", &self.query)
            .field("prepared", &self.prepared)
            .field("valid", &self.valid)
            .field("rows_pending", &self.rows_pending)
            .finish_non_exhaustive()
    }
}

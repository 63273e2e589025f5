use rusqlite::Connection;

use crate::config::{SessionOptions, SessionOptionsBuilder};
use crate::error::{SessionError, SessionResult};
use crate::ffi;
use crate::types::SessionState;

use super::{CompiledStatement, StatementSession, session_event};

impl StatementSession {
    /// Open a connection described by `options`.
    ///
    /// # Errors
    /// Returns `SessionError::Config` for an empty target, or `SessionError::Connection` carrying
    /// the `SQLite` status and a message naming the target when the open fails.
    pub fn open(options: SessionOptions) -> SessionResult<Self> {
        options.validate()?;
        session_event!(options.debug, path = %options.target, read_only = options.read_only, "opening database");
        let connection = Connection::open_with_flags(&options.target, options.open_flags())
            .map_err(|err| SessionError::from_open(&options.target, err))?;
        Ok(Self {
            statement: CompiledStatement::Vacant,
            connection,
            options,
            query: String::new(),
            tail: String::new(),
            prepared: false,
            valid: true,
            rows_pending: false,
            row_ready: false,
        })
    }

    /// Open `target` (a path or [`crate::MEMORY_TARGET`]) with default options.
    ///
    /// # Errors
    /// See [`StatementSession::open`].
    pub fn open_target(target: &str, debug: bool) -> SessionResult<Self> {
        Self::open(SessionOptions::new(target).with_debug(debug))
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    /// See [`StatementSession::open`].
    pub fn open_in_memory() -> SessionResult<Self> {
        Self::open(SessionOptions::in_memory())
    }

    #[must_use]
    pub fn builder(target: impl Into<String>) -> SessionOptionsBuilder {
        SessionOptionsBuilder::new(target)
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.options.target
    }

    /// Query text pending (or last used for) compilation.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Text left over after the last successful `prepare` compiled the first statement.
    #[must_use]
    pub fn tail(&self) -> &str {
        &self.tail
    }

    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// `false` once the statement has run to completion, until the next reset or prepare.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn has_rows_pending(&self) -> bool {
        self.rows_pending
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match (self.prepared, self.valid) {
            (true, true) => SessionState::Prepared,
            (true, false) => SessionState::Exhausted,
            (false, _) if self.query.is_empty() => SessionState::Idle,
            (false, _) => SessionState::Queued,
        }
    }

    /// Rowid of the most recent successful INSERT on this connection (any statement).
    #[must_use]
    pub fn last_insert_id(&self) -> i64 {
        self.connection.last_insert_rowid()
    }

    /// Rows modified by the most recently completed INSERT, UPDATE or DELETE.
    #[must_use]
    pub fn changes(&self) -> u64 {
        self.connection.changes()
    }

    /// Build an engine error from `code` and the connection's current diagnostic.
    pub(crate) fn engine_error(&self, code: i32, prefix: &str) -> SessionError {
        let message = format!("{prefix}{}", ffi::errmsg(&self.connection));
        session_event!(self.options.debug, code, %message, "sqlite rejected operation");
        SessionError::engine(code, message)
    }
}

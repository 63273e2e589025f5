use crate::error::{SessionError, SessionResult, UsageCause};
use crate::ffi::{self, SQLITE_DONE, SQLITE_OK, SQLITE_ROW};
use crate::types::StepResult;

use super::{CompiledStatement, StatementSession, session_event};

const SET_QUERY_REJECTED: &str = "Can not set sql on prepared query or the query is empty";

impl StatementSession {
    /// Store `sql` as the text for the next [`prepare`](Self::prepare).
    ///
    /// # Errors
    /// Returns `SessionError::Usage` with the message
    /// `"Can not set sql on prepared query or the query is empty"` when a compiled statement is
    /// pending (cause `QueryAlreadyPrepared`) or `sql` is empty (cause `EmptyQuery`).
    pub fn set_query(&mut self, sql: &str) -> SessionResult<()> {
        session_event!(self.options.debug, sql, "set query");
        if self.prepared {
            return Err(SessionError::usage(
                UsageCause::QueryAlreadyPrepared,
                SET_QUERY_REJECTED,
            ));
        }
        if sql.is_empty() {
            return Err(SessionError::usage(UsageCause::EmptyQuery, SET_QUERY_REJECTED));
        }
        sql.clone_into(&mut self.query);
        Ok(())
    }

    /// Compile the stored query text, replacing (and finalizing) any previous statement.
    ///
    /// Only the first statement is compiled; the rest is available from [`tail`](Self::tail).
    /// The stored text is kept, so a reset statement can be prepared again without calling
    /// [`set_query`](Self::set_query).
    ///
    /// # Errors
    /// Returns `SessionError::Usage` if no query is set, or `SessionError::Engine` prefixed
    /// `"Could not prepare query: "` if `SQLite` rejects the text. On failure the session is left
    /// as it was.
    pub fn prepare(&mut self) -> SessionResult<()> {
        if self.query.is_empty() {
            return Err(SessionError::usage(UsageCause::NoQuery, "No query set"));
        }
        session_event!(self.options.debug, sql = %self.query, "prepare query");
        let compiled = ffi::prepare(&self.connection, &self.query)
            .map_err(|code| self.engine_error(code, "Could not prepare query: "))?;

        self.statement = match compiled.statement {
            Some(raw) => CompiledStatement::Live(raw),
            None => CompiledStatement::Empty,
        };
        self.tail = self
            .query
            .get(compiled.consumed..)
            .unwrap_or_default()
            .to_owned();
        self.prepared = true;
        self.valid = true;
        self.rows_pending = false;
        self.row_ready = false;
        Ok(())
    }

    /// Advance the compiled statement by one row.
    ///
    /// # Errors
    /// Returns `SessionError::Usage` when the statement is already exhausted (reset it first) or
    /// nothing has been prepared, and `SessionError::Engine` prefixed `"Sqlite had an error: "`
    /// for any other `SQLite` outcome.
    pub fn step(&mut self) -> SessionResult<StepResult> {
        session_event!(self.options.debug, "step query");
        if !self.valid {
            return Err(SessionError::usage(
                UsageCause::InvalidStatement,
                "Trying to step an invalid statement.",
            ));
        }
        self.row_ready = false;
        let rc = match &self.statement {
            CompiledStatement::Vacant => {
                return Err(SessionError::usage(
                    UsageCause::NoStatement,
                    "No statement prepared",
                ));
            }
            CompiledStatement::Empty => SQLITE_DONE,
            CompiledStatement::Live(raw) => raw.step(),
        };
        match rc {
            SQLITE_DONE => {
                self.valid = false;
                Ok(StepResult::Done)
            }
            SQLITE_ROW => {
                self.rows_pending = true;
                self.row_ready = true;
                Ok(StepResult::Row)
            }
            code => Err(self.engine_error(code, "Sqlite had an error: ")),
        }
    }

    /// Rewind the statement so it can run again from the start. Bindings are kept.
    ///
    /// Afterwards a new [`set_query`](Self::set_query) is accepted, while the compiled statement
    /// stays live for re-stepping or re-preparing.
    ///
    /// # Errors
    /// Returns `SessionError::Engine` prefixed `"Could not reset the query: "`; `SQLite` reports
    /// the most recent step failure here. The statement is rewound either way, so no row stays
    /// readable, but the remaining session flags are unchanged on failure.
    pub fn reset(&mut self) -> SessionResult<()> {
        session_event!(self.options.debug, "reset query");
        self.row_ready = false;
        let rc = self.statement.live().map_or(SQLITE_OK, |raw| raw.reset());
        if rc != SQLITE_OK {
            return Err(self.engine_error(rc, "Could not reset the query: "));
        }
        self.clear_flags();
        Ok(())
    }

    /// Run a one-shot statement: set, prepare, step once, reset.
    ///
    /// Meant for DDL and single-row DML without parameters.
    ///
    /// # Errors
    /// Propagates the first failure from any of the steps. A failed step still rewinds the
    /// statement so the session accepts a new query.
    pub fn execute(&mut self, sql: &str) -> SessionResult<()> {
        self.set_query(sql)?;
        self.prepare()?;
        if let Err(err) = self.step() {
            self.rewind();
            return Err(err);
        }
        self.reset()
    }

    /// Best-effort reset that ignores `SQLite`'s echo of the last step error.
    fn rewind(&mut self) {
        if let Some(raw) = self.statement.live() {
            let _ = raw.reset();
        }
        self.clear_flags();
    }

    fn clear_flags(&mut self) {
        self.valid = true;
        self.rows_pending = false;
        self.row_ready = false;
        self.prepared = false;
    }
}

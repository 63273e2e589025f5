use std::ffi::c_int;

use crate::error::{SessionError, SessionResult, UsageCause};
use crate::ffi::{RawStatement, SQLITE_OK, SQLITE_RANGE};
use crate::types::Value;

use super::{CompiledStatement, StatementSession, session_event};

impl StatementSession {
    /// Bind `value` to the 1-based parameter `position` of the compiled statement.
    ///
    /// Positions follow `SQLite`'s numbering, so `?7` in the query text is position 7 even if
    /// positions 1..6 are unused. Bindings survive [`reset`](Self::reset) but not a new
    /// [`prepare`](Self::prepare).
    ///
    /// # Errors
    /// Returns `SessionError::Usage` when no statement is compiled, or `SessionError::Engine`
    /// prefixed `"Could not bind <kind>: "` when `SQLite` rejects the binding (e.g. position out
    /// of range).
    pub fn bind(&mut self, position: usize, value: impl Into<Value>) -> SessionResult<()> {
        let value = value.into();
        self.bind_value(position, &value)
    }

    /// Bind SQL NULL at `position`.
    ///
    /// # Errors
    /// Same as [`bind`](Self::bind); the engine message is prefixed `"Could not bind to NULL: "`.
    pub fn bind_null(&mut self, position: usize) -> SessionResult<()> {
        self.bind_value(position, &Value::Null)
    }

    /// Bind `values` to positions `1..=values.len()`.
    ///
    /// # Errors
    /// Stops at the first rejected value; see [`bind`](Self::bind).
    pub fn bind_all(&mut self, values: &[Value]) -> SessionResult<()> {
        for (i, value) in values.iter().enumerate() {
            self.bind_value(i + 1, value)?;
        }
        Ok(())
    }

    /// Reset every parameter of the compiled statement to NULL.
    ///
    /// # Errors
    /// Returns `SessionError::Usage` when nothing has been prepared.
    pub fn clear_bindings(&mut self) -> SessionResult<()> {
        let rc = match &self.statement {
            CompiledStatement::Vacant => return Err(no_statement()),
            CompiledStatement::Empty => SQLITE_OK,
            CompiledStatement::Live(raw) => raw.clear_bindings(),
        };
        if rc != SQLITE_OK {
            return Err(self.engine_error(rc, "Could not clear bindings: "));
        }
        Ok(())
    }

    /// Largest parameter position used by the compiled statement; 0 when nothing is compiled.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.statement
            .live()
            .map_or(0, |raw| usize::try_from(raw.parameter_count()).unwrap_or(0))
    }

    fn bind_value(&mut self, position: usize, value: &Value) -> SessionResult<()> {
        session_event!(self.options.debug, position, ?value, "bind parameter");
        let raw = self.statement.live().ok_or_else(no_statement)?;
        let prefix = format!("Could not bind {}: ", value.bind_label());
        let Ok(idx) = c_int::try_from(position) else {
            return Err(SessionError::engine(
                SQLITE_RANGE,
                format!("{prefix}column index out of range"),
            ));
        };
        let rc = bind_raw(raw, idx, value);
        if rc != SQLITE_OK {
            return Err(self.engine_error(rc, &prefix));
        }
        Ok(())
    }
}

fn bind_raw(raw: &RawStatement, idx: c_int, value: &Value) -> c_int {
    match value {
        Value::Null => raw.bind_null(idx),
        Value::Integer(v) => raw.bind_i64(idx, *v),
        Value::Real(v) => raw.bind_double(idx, *v),
        Value::Text(v) => raw.bind_text(idx, v),
        Value::Blob(v) => raw.bind_blob(idx, v),
    }
}

fn no_statement() -> SessionError {
    SessionError::usage(UsageCause::NoStatement, "No statement prepared")
}

use thiserror::Error;

/// Status code reported for failures that never reached `SQLite`.
pub const USAGE_ERROR_CODE: i32 = -1;

/// Which precondition a [`SessionError::Usage`] violated.
///
/// Several causes share one message (see `set_query`), so match on this rather than the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageCause {
    /// `set_query` was given empty text.
    EmptyQuery,
    /// `set_query` was called while a compiled statement is pending.
    QueryAlreadyPrepared,
    /// `prepare` was called before any query text was set.
    NoQuery,
    /// `step` was called on an exhausted statement.
    InvalidStatement,
    /// The operation needs a compiled statement and there is none.
    NoStatement,
    /// A column was read while no row is available.
    NoRow,
    /// A column index past the end of the result row.
    ColumnOutOfRange,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// The caller violated a state precondition.
    #[error("{message}")]
    Usage { cause: UsageCause, message: String },

    /// `SQLite` refused to open the connection target.
    #[error("{message}")]
    Connection { code: i32, message: String },

    /// `SQLite` rejected an operation on an open connection.
    #[error("{message}")]
    Engine { code: i32, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SessionError {
    pub(crate) fn usage(cause: UsageCause, message: impl Into<String>) -> Self {
        SessionError::Usage {
            cause,
            message: message.into(),
        }
    }

    pub(crate) fn engine(code: i32, message: impl Into<String>) -> Self {
        SessionError::Engine {
            code,
            message: message.into(),
        }
    }

    /// Map a failed `rusqlite` open into a [`SessionError::Connection`].
    pub(crate) fn from_open(target: &str, err: rusqlite::Error) -> Self {
        let (code, detail) = match err {
            rusqlite::Error::SqliteFailure(failure, Some(msg)) => (failure.extended_code, msg),
            rusqlite::Error::SqliteFailure(failure, None) => {
                (failure.extended_code, failure.to_string())
            }
            other => (USAGE_ERROR_CODE, other.to_string()),
        };
        SessionError::Connection {
            code,
            message: format!("Can't open '{target}' : {detail}"),
        }
    }

    /// Status code carried by the error; [`USAGE_ERROR_CODE`] when `SQLite` was not involved.
    ///
    /// Connections open with extended result codes enabled, so engine failures may report e.g.
    /// `SQLITE_CONSTRAINT_UNIQUE` rather than `SQLITE_CONSTRAINT`. See [`Self::primary_code`].
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            SessionError::Connection { code, .. } | SessionError::Engine { code, .. } => *code,
            SessionError::Usage { .. } | SessionError::Config(_) => USAGE_ERROR_CODE,
        }
    }

    /// The primary (low byte) result code.
    #[must_use]
    pub fn primary_code(&self) -> i32 {
        match self.code() {
            USAGE_ERROR_CODE => USAGE_ERROR_CODE,
            code => code & 0xff,
        }
    }

    #[must_use]
    pub fn usage_cause(&self) -> Option<UsageCause> {
        if let SessionError::Usage { cause, .. } = self {
            Some(*cause)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, SessionError::Usage { .. })
    }

    #[must_use]
    pub fn is_engine(&self) -> bool {
        matches!(self, SessionError::Engine { .. })
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

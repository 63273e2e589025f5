use rusqlite::OpenFlags;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::session::StatementSession;

/// Connection target naming a private, non-persisted, in-memory database.
pub const MEMORY_TARGET: &str = ":memory:";

/// Options for opening a [`StatementSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Filesystem path of the database, or [`MEMORY_TARGET`].
    pub target: String,
    /// Emit lifecycle events at `DEBUG` instead of `TRACE`.
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub read_only: bool,
}

impl SessionOptions {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            debug: false,
            read_only: false,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MEMORY_TARGET)
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Parse options from a JSON document such as `{"target": "app.db", "debug": true}`.
    ///
    /// # Errors
    /// Returns `SessionError::Config` if the document is malformed or names an empty target.
    pub fn from_json(json: &str) -> SessionResult<Self> {
        let opts: SessionOptions = serde_json::from_str(json)
            .map_err(|e| SessionError::Config(format!("invalid session options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.target == MEMORY_TARGET
    }

    /// # Errors
    /// Returns `SessionError::Config` when the target is empty.
    pub fn validate(&self) -> SessionResult<()> {
        if self.target.trim().is_empty() {
            return Err(SessionError::Config(
                "connection target must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn open_flags(&self) -> OpenFlags {
        if self.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        }
    }
}

/// Fluent builder for session options.
#[derive(Debug, Clone)]
pub struct SessionOptionsBuilder {
    opts: SessionOptions,
}

impl SessionOptionsBuilder {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            opts: SessionOptions::new(target),
        }
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.opts.debug = debug;
        self
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.opts.read_only = read_only;
        self
    }

    #[must_use]
    pub fn finish(self) -> SessionOptions {
        self.opts
    }

    /// Open a session with the accumulated options.
    ///
    /// # Errors
    /// Returns `SessionError::Config` for an empty target, or `SessionError::Connection` if
    /// `SQLite` cannot open it.
    pub fn open(self) -> SessionResult<StatementSession> {
        StatementSession::open(self.finish())
    }
}

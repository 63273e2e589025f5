//! Stateful wrapper around `SQLite` prepared statements.
//!
//! A [`StatementSession`] owns one connection and at most one compiled statement, and walks it
//! through set-query, prepare, step, bind, read and reset. `SQLite` result codes come back as
//! [`SessionError`] values carrying the engine's code and diagnostic text.

mod ffi;
mod session;

pub mod config;
pub mod error;
pub mod prelude;
pub mod types;

pub use config::{MEMORY_TARGET, SessionOptions, SessionOptionsBuilder};
pub use error::{SessionError, SessionResult, USAGE_ERROR_CODE, UsageCause};
pub use session::StatementSession;
pub use types::{ColumnType, SessionState, StepResult, Value};

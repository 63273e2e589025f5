//! Convenient imports for common functionality.
//!
//! ```rust
//! use sqlite_session::prelude::*;
//! ```

pub use crate::config::{MEMORY_TARGET, SessionOptions, SessionOptionsBuilder};
pub use crate::error::{SessionError, SessionResult, UsageCause};
pub use crate::session::StatementSession;
pub use crate::types::{ColumnType, SessionState, StepResult, Value};

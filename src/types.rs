/// A value bound to a statement parameter or read from a result column.
///
/// ```rust
/// use sqlite_session::Value;
///
/// let params = vec![Value::from(7), Value::from(2.5), Value::from("alice"), Value::Null];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    /// Integer value (64-bit)
    Integer(i64),
    /// Floating point value (64-bit)
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        if let Value::Real(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Value::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let Value::Blob(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Wording used in bind failure messages ("Could not bind text: ...").
    pub(crate) fn bind_label(&self) -> &'static str {
        match self {
            Value::Null => "to NULL",
            Value::Integer(_) => "int",
            Value::Real(_) => "double",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Blob(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Outcome of a single `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// A result row is available through the column accessors.
    Row,
    /// The statement ran to completion.
    Done,
}

impl StepResult {
    #[must_use]
    pub fn is_row(self) -> bool {
        matches!(self, StepResult::Row)
    }
}

/// Storage class of a column in the current row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
    Null,
}

impl ColumnType {
    pub(crate) fn from_code(code: i32) -> Self {
        match code {
            rusqlite::ffi::SQLITE_INTEGER => ColumnType::Integer,
            rusqlite::ffi::SQLITE_FLOAT => ColumnType::Real,
            rusqlite::ffi::SQLITE_TEXT => ColumnType::Text,
            rusqlite::ffi::SQLITE_BLOB => ColumnType::Blob,
            _ => ColumnType::Null,
        }
    }
}

/// Coarse position of a session in the query lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No query text and nothing compiled.
    Idle,
    /// Query text set (or statement reset) but not compiled.
    Queued,
    /// Compiled; zero or more rows consumed.
    Prepared,
    /// Compiled and stepped to completion.
    Exhausted,
}

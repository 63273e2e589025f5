use std::ffi::c_int;

use crate::error::{SessionError, SessionResult, UsageCause};
use crate::ffi::RawStatement;
use crate::types::{ColumnType, Value};

use super::StatementSession;

impl StatementSession {
    /// Number of columns the compiled statement returns; 0 for DML/DDL or when nothing is
    /// compiled.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.statement
            .live()
            .map_or(0, |raw| usize::try_from(raw.column_count()).unwrap_or(0))
    }

    /// Name of result column `index` (the `AS` alias when present).
    ///
    /// # Errors
    /// Returns `SessionError::Usage` if nothing is compiled or the index is out of range.
    pub fn column_name(&self, index: usize) -> SessionResult<String> {
        let raw = self.statement.live().ok_or_else(|| {
            SessionError::usage(UsageCause::NoStatement, "No statement prepared")
        })?;
        let idx = checked_index(raw, index)?;
        Ok(raw.column_name(idx).unwrap_or_default())
    }

    /// Storage class of column `index` in the current row.
    ///
    /// # Errors
    /// See [`get_integer`](Self::get_integer).
    pub fn column_type(&self, index: usize) -> SessionResult<ColumnType> {
        let (raw, idx) = self.current_row(index)?;
        Ok(ColumnType::from_code(raw.column_type(idx)))
    }

    /// Read column `index` of the current row as a 64-bit integer (NULL reads as 0).
    ///
    /// # Errors
    /// Returns `SessionError::Usage` if the last `step` did not produce a row or the index is
    /// past the last column.
    pub fn get_integer(&self, index: usize) -> SessionResult<i64> {
        let (raw, idx) = self.current_row(index)?;
        Ok(raw.column_i64(idx))
    }

    /// Read column `index` as a double (NULL reads as 0.0).
    ///
    /// # Errors
    /// See [`get_integer`](Self::get_integer).
    pub fn get_real(&self, index: usize) -> SessionResult<f64> {
        let (raw, idx) = self.current_row(index)?;
        Ok(raw.column_double(idx))
    }

    /// Read column `index` as text; numbers come back in their decimal form, NULL as "".
    ///
    /// # Errors
    /// See [`get_integer`](Self::get_integer).
    pub fn get_text(&self, index: usize) -> SessionResult<String> {
        let (raw, idx) = self.current_row(index)?;
        Ok(raw.column_text(idx))
    }

    /// Read column `index` as raw bytes (NULL reads as empty).
    ///
    /// # Errors
    /// See [`get_integer`](Self::get_integer).
    pub fn get_blob(&self, index: usize) -> SessionResult<Vec<u8>> {
        let (raw, idx) = self.current_row(index)?;
        Ok(raw.column_blob(idx))
    }

    /// Read column `index` in its own storage class.
    ///
    /// # Errors
    /// See [`get_integer`](Self::get_integer).
    pub fn get_value(&self, index: usize) -> SessionResult<Value> {
        let (raw, idx) = self.current_row(index)?;
        let value = match ColumnType::from_code(raw.column_type(idx)) {
            ColumnType::Integer => Value::Integer(raw.column_i64(idx)),
            ColumnType::Real => Value::Real(raw.column_double(idx)),
            ColumnType::Text => Value::Text(raw.column_text(idx)),
            ColumnType::Blob => Value::Blob(raw.column_blob(idx)),
            ColumnType::Null => Value::Null,
        };
        Ok(value)
    }

    /// Every column of the current row, in order.
    ///
    /// # Errors
    /// See [`get_integer`](Self::get_integer).
    pub fn row_values(&self) -> SessionResult<Vec<Value>> {
        self.row_statement()?;
        (0..self.column_count()).map(|i| self.get_value(i)).collect()
    }

    fn current_row(&self, index: usize) -> SessionResult<(&RawStatement, c_int)> {
        let raw = self.row_statement()?;
        let idx = checked_index(raw, index)?;
        Ok((raw, idx))
    }

    /// The live statement, provided the last `step` produced a row.
    fn row_statement(&self) -> SessionResult<&RawStatement> {
        match self.statement.live() {
            Some(raw) if self.row_ready => Ok(raw),
            _ => Err(SessionError::usage(UsageCause::NoRow, "No row available")),
        }
    }
}

fn checked_index(raw: &RawStatement, index: usize) -> SessionResult<c_int> {
    let count = raw.column_count();
    match c_int::try_from(index) {
        Ok(idx) if idx < count => Ok(idx),
        _ => Err(SessionError::usage(
            UsageCause::ColumnOutOfRange,
            format!("Column index {index} out of range ({count} columns)"),
        )),
    }
}

//! Raw statement handle over the `SQLite` C API.
//!
//! This is the only module allowed to contain `unsafe` code. `rusqlite` owns the connection;
//! the session keeps exactly one `sqlite3_stmt` alive beside it, which `rusqlite`'s safe
//! `Statement<'conn>` cannot express without borrowing the connection it sits next to.
#![allow(unsafe_code)]

use std::ffi::{CStr, c_char, c_int};
use std::ptr::{self, NonNull};

use rusqlite::Connection;
pub(crate) use rusqlite::ffi::{SQLITE_DONE, SQLITE_OK, SQLITE_RANGE, SQLITE_ROW, SQLITE_TOOBIG};
use rusqlite::ffi;

/// Owned `sqlite3_stmt`, finalized on drop.
///
/// Must be dropped before the connection that compiled it is closed; `StatementSession`
/// guarantees this through its `Drop` impl and field order.
pub(crate) struct RawStatement {
    ptr: NonNull<ffi::sqlite3_stmt>,
}

/// Result of compiling the first statement in a piece of SQL text.
pub(crate) struct Compiled {
    /// `None` when the text held only whitespace or comments.
    pub(crate) statement: Option<RawStatement>,
    /// Bytes of the input consumed by the compiler.
    pub(crate) consumed: usize,
}

/// The most recent error message recorded on `conn`.
pub(crate) fn errmsg(conn: &Connection) -> String {
    // SAFETY: `handle` is a live connection for the lifetime of the borrow and
    // `sqlite3_errmsg` always returns a valid NUL-terminated string owned by SQLite.
    unsafe {
        let msg = ffi::sqlite3_errmsg(conn.handle());
        if msg.is_null() {
            return String::new();
        }
        CStr::from_ptr(msg).to_string_lossy().into_owned()
    }
}

/// Compile the first statement in `sql` with `sqlite3_prepare_v2`.
///
/// Returns the raw result code on failure; read the message with [`errmsg`] before issuing any
/// other call on the connection.
pub(crate) fn prepare(conn: &Connection, sql: &str) -> Result<Compiled, c_int> {
    let len = c_int::try_from(sql.len()).map_err(|_| SQLITE_TOOBIG)?;
    let start = sql.as_ptr().cast::<c_char>();
    let mut stmt: *mut ffi::sqlite3_stmt = ptr::null_mut();
    let mut tail: *const c_char = ptr::null();
    // SAFETY: `start..start+len` is the borrowed UTF-8 buffer of `sql`; SQLite reads at most
    // `len` bytes and writes `tail` as a pointer into that same buffer.
    let rc = unsafe { ffi::sqlite3_prepare_v2(conn.handle(), start, len, &mut stmt, &mut tail) };
    if rc != SQLITE_OK {
        // SAFETY: on failure `stmt` is either null or a handle we must release.
        unsafe { ffi::sqlite3_finalize(stmt) };
        return Err(rc);
    }
    let consumed = if tail.is_null() {
        sql.len()
    } else {
        (tail as usize).saturating_sub(start as usize).min(sql.len())
    };
    Ok(Compiled {
        statement: NonNull::new(stmt).map(|ptr| RawStatement { ptr }),
        consumed,
    })
}

impl RawStatement {
    fn as_ptr(&self) -> *mut ffi::sqlite3_stmt {
        self.ptr.as_ptr()
    }

    pub(crate) fn step(&self) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_step(self.as_ptr()) }
    }

    /// Rewind to the first row; bindings are kept.
    pub(crate) fn reset(&self) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_reset(self.as_ptr()) }
    }

    pub(crate) fn clear_bindings(&self) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_clear_bindings(self.as_ptr()) }
    }

    pub(crate) fn parameter_count(&self) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_bind_parameter_count(self.as_ptr()) }
    }

    pub(crate) fn bind_null(&self, idx: c_int) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_bind_null(self.as_ptr(), idx) }
    }

    pub(crate) fn bind_i64(&self, idx: c_int, value: i64) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_bind_int64(self.as_ptr(), idx, value) }
    }

    pub(crate) fn bind_double(&self, idx: c_int, value: f64) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_bind_double(self.as_ptr(), idx, value) }
    }

    pub(crate) fn bind_text(&self, idx: c_int, value: &str) -> c_int {
        let Ok(len) = c_int::try_from(value.len()) else {
            return SQLITE_TOOBIG;
        };
        // SAFETY: SQLITE_TRANSIENT makes SQLite copy the `len` bytes before returning.
        unsafe {
            ffi::sqlite3_bind_text(
                self.as_ptr(),
                idx,
                value.as_ptr().cast::<c_char>(),
                len,
                ffi::SQLITE_TRANSIENT(),
            )
        }
    }

    pub(crate) fn bind_blob(&self, idx: c_int, value: &[u8]) -> c_int {
        let Ok(len) = c_int::try_from(value.len()) else {
            return SQLITE_TOOBIG;
        };
        if len == 0 {
            // SAFETY: `ptr` is a live statement owned by `self`.
            return unsafe { ffi::sqlite3_bind_zeroblob(self.as_ptr(), idx, 0) };
        }
        // SAFETY: SQLITE_TRANSIENT makes SQLite copy the `len` bytes before returning.
        unsafe {
            ffi::sqlite3_bind_blob(
                self.as_ptr(),
                idx,
                value.as_ptr().cast(),
                len,
                ffi::SQLITE_TRANSIENT(),
            )
        }
    }

    pub(crate) fn column_count(&self) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_column_count(self.as_ptr()) }
    }

    pub(crate) fn column_name(&self, idx: c_int) -> Option<String> {
        // SAFETY: `ptr` is live; the returned string stays valid until the next call for the
        // same column, and is copied out immediately.
        unsafe {
            let name = ffi::sqlite3_column_name(self.as_ptr(), idx);
            if name.is_null() {
                None
            } else {
                Some(CStr::from_ptr(name).to_string_lossy().into_owned())
            }
        }
    }

    pub(crate) fn column_type(&self, idx: c_int) -> c_int {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_column_type(self.as_ptr(), idx) }
    }

    pub(crate) fn column_i64(&self, idx: c_int) -> i64 {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_column_int64(self.as_ptr(), idx) }
    }

    pub(crate) fn column_double(&self, idx: c_int) -> f64 {
        // SAFETY: `ptr` is a live statement owned by `self`.
        unsafe { ffi::sqlite3_column_double(self.as_ptr(), idx) }
    }

    /// NULL reads as an empty string; invalid UTF-8 is replaced.
    pub(crate) fn column_text(&self, idx: c_int) -> String {
        // SAFETY: text must be fetched before bytes so the length refers to the UTF-8 form;
        // the buffer is valid until the next step/reset and is copied out immediately.
        unsafe {
            let text = ffi::sqlite3_column_text(self.as_ptr(), idx);
            if text.is_null() {
                return String::new();
            }
            let len = usize::try_from(ffi::sqlite3_column_bytes(self.as_ptr(), idx)).unwrap_or(0);
            String::from_utf8_lossy(std::slice::from_raw_parts(text, len)).into_owned()
        }
    }

    /// NULL and zero-length blobs read as an empty `Vec`.
    pub(crate) fn column_blob(&self, idx: c_int) -> Vec<u8> {
        // SAFETY: blob must be fetched before bytes; copied out immediately.
        unsafe {
            let blob = ffi::sqlite3_column_blob(self.as_ptr(), idx);
            if blob.is_null() {
                return Vec::new();
            }
            let len = usize::try_from(ffi::sqlite3_column_bytes(self.as_ptr(), idx)).unwrap_or(0);
            std::slice::from_raw_parts(blob.cast::<u8>(), len).to_vec()
        }
    }
}

impl Drop for RawStatement {
    fn drop(&mut self) {
        // The return value repeats the last step error, if any; nothing to do with it here.
        // SAFETY: `ptr` is owned by `self` and never used again.
        unsafe {
            ffi::sqlite3_finalize(self.as_ptr());
        }
    }
}

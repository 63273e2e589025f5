use sqlite_session::prelude::*;

fn session_with_rows() -> Result<StatementSession, SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    db.execute("CREATE TABLE t(id INTEGER PRIMARY KEY, v TEXT)")?;
    db.execute("INSERT INTO t(v) VALUES('only')")?;
    Ok(db)
}

#[test]
fn stepping_an_exhausted_statement_fails() -> Result<(), SessionError> {
    let mut db = session_with_rows()?;
    db.set_query("SELECT v FROM t")?;
    db.prepare()?;
    assert_eq!(db.step()?, StepResult::Row);
    assert_eq!(db.step()?, StepResult::Done);

    let err = db.step().unwrap_err();
    assert_eq!(err.to_string(), "Trying to step an invalid statement.");
    assert_eq!(err.usage_cause(), Some(UsageCause::InvalidStatement));

    db.reset()?;
    assert_eq!(db.step()?, StepResult::Row);
    Ok(())
}

#[test]
fn step_without_statement_fails() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    let err = db.step().unwrap_err();
    assert_eq!(err.usage_cause(), Some(UsageCause::NoStatement));

    db.set_query("SELECT 1")?;
    let err = db.step().unwrap_err();
    assert_eq!(err.usage_cause(), Some(UsageCause::NoStatement));
    Ok(())
}

#[test]
fn columns_require_a_current_row() -> Result<(), SessionError> {
    let mut db = session_with_rows()?;
    db.set_query("SELECT id, v FROM t")?;
    db.prepare()?;

    let err = db.get_text(1).unwrap_err();
    assert_eq!(err.to_string(), "No row available");
    assert_eq!(err.usage_cause(), Some(UsageCause::NoRow));

    assert!(db.step()?.is_row());
    assert_eq!(db.get_text(1)?, "only");

    let err = db.get_integer(5).unwrap_err();
    assert_eq!(err.to_string(), "Column index 5 out of range (2 columns)");
    assert_eq!(err.usage_cause(), Some(UsageCause::ColumnOutOfRange));

    assert_eq!(db.step()?, StepResult::Done);
    let err = db.get_integer(0).unwrap_err();
    assert_eq!(err.usage_cause(), Some(UsageCause::NoRow));

    db.reset()?;
    assert!(db.get_blob(0).unwrap_err().is_usage());
    assert!(db.row_values().unwrap_err().is_usage());
    Ok(())
}

#[test]
fn column_name_checks_bounds() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    assert_eq!(
        db.column_name(0).unwrap_err().usage_cause(),
        Some(UsageCause::NoStatement)
    );
    db.set_query("SELECT 1 AS one")?;
    db.prepare()?;
    assert_eq!(db.column_name(0)?, "one");
    assert_eq!(
        db.column_name(1).unwrap_err().usage_cause(),
        Some(UsageCause::ColumnOutOfRange)
    );
    Ok(())
}

#[test]
fn bind_errors_carry_engine_code() -> Result<(), SessionError> {
    let mut db = session_with_rows()?;

    let err = db.bind(1, "early").unwrap_err();
    assert_eq!(err.usage_cause(), Some(UsageCause::NoStatement));

    db.set_query("INSERT INTO t(v) VALUES(?)")?;
    db.prepare()?;

    let err = db.bind(2, "too far").unwrap_err();
    assert!(err.is_engine());
    assert_eq!(err.primary_code(), 25);
    assert_eq!(err.to_string(), "Could not bind text: column index out of range");

    let err = db.bind(0, 1.5).unwrap_err();
    assert!(err.to_string().starts_with("Could not bind double: "));

    let err = db.bind(3, 9).unwrap_err();
    assert!(err.to_string().starts_with("Could not bind int: "));

    let err = db.bind_null(4).unwrap_err();
    assert!(err.to_string().starts_with("Could not bind to NULL: "));

    let err = db.bind(usize::MAX, "huge").unwrap_err();
    assert_eq!(err.primary_code(), 25);
    Ok(())
}

#[test]
fn constraint_failure_in_execute_leaves_session_usable() -> Result<(), SessionError> {
    let mut db = session_with_rows()?;

    let err = db.execute("INSERT INTO t(id, v) VALUES(1, 'dup')").unwrap_err();
    assert!(err.is_engine());
    assert_eq!(err.primary_code(), 19);
    let msg = err.to_string();
    assert!(msg.starts_with("Sqlite had an error: "), "{msg}");
    assert!(msg.contains("UNIQUE constraint failed"), "{msg}");

    assert!(!db.is_prepared());
    db.execute("INSERT INTO t(id, v) VALUES(2, 'fresh')")?;
    assert_eq!(db.last_insert_id(), 2);
    Ok(())
}

#[test]
fn manual_reset_reports_failed_step() -> Result<(), SessionError> {
    let mut db = session_with_rows()?;
    db.set_query("INSERT INTO t(id, v) VALUES(1, 'dup')")?;
    db.prepare()?;
    let err = db.step().unwrap_err();
    assert_eq!(err.primary_code(), 19);

    let err = db.reset().unwrap_err();
    assert!(err.to_string().starts_with("Could not reset the query: "));
    assert!(db.is_prepared());
    assert_eq!(
        db.get_integer(0).unwrap_err().usage_cause(),
        Some(UsageCause::NoRow)
    );

    // The statement was rewound anyway; a second reset is clean.
    db.reset()?;
    assert!(!db.is_prepared());
    Ok(())
}

#[test]
fn failed_step_drops_the_previous_row() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    db.execute("CREATE TABLE t(x INTEGER)")?;
    db.execute("INSERT INTO t(x) VALUES(1)")?;
    db.execute("INSERT INTO t(x) VALUES(2)")?;

    db.set_query("SELECT CASE WHEN x = 2 THEN abs(-9223372036854775808) ELSE x END FROM t")?;
    db.prepare()?;
    assert!(db.step()?.is_row());
    assert_eq!(db.get_integer(0)?, 1);

    let err = db.step().unwrap_err();
    assert!(err.is_engine());
    assert!(err.to_string().contains("integer overflow"), "{err}");

    let err = db.get_integer(0).unwrap_err();
    assert_eq!(err.usage_cause(), Some(UsageCause::NoRow));
    assert!(db.row_values().unwrap_err().is_usage());
    Ok(())
}

#[test]
fn re_prepare_replaces_live_statement() -> Result<(), SessionError> {
    let mut db = session_with_rows()?;
    db.set_query("SELECT v FROM t")?;
    db.prepare()?;
    assert!(db.step()?.is_row());
    assert_eq!(db.step()?, StepResult::Done);

    // Preparing again without a reset swaps in a fresh handle.
    db.prepare()?;
    assert_eq!(db.state(), SessionState::Prepared);
    assert!(!db.has_rows_pending());
    assert!(db.step()?.is_row());
    assert_eq!(db.get_text(0)?, "only");
    Ok(())
}

#[test]
fn execute_rejects_while_prepared() -> Result<(), SessionError> {
    let mut db = session_with_rows()?;
    db.set_query("SELECT v FROM t")?;
    db.prepare()?;
    let err = db.execute("DELETE FROM t").unwrap_err();
    assert_eq!(err.usage_cause(), Some(UsageCause::QueryAlreadyPrepared));
    Ok(())
}

#[test]
fn session_moves_with_its_statement() -> Result<(), SessionError> {
    let mut db = session_with_rows()?;
    db.set_query("SELECT v FROM t")?;
    db.prepare()?;

    let mut moved = db;
    assert!(moved.step()?.is_row());
    assert_eq!(moved.get_text(0)?, "only");
    drop(moved);
    Ok(())
}

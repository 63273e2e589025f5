use sqlite_session::prelude::*;

const CREATE: &str = "CREATE TABLE test(id INTEGER PRIMARY KEY, text TEXT)";
const REJECTED: &str = "Can not set sql on prepared query or the query is empty";

#[test]
fn set_query_without_prepare_succeeds() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    assert_eq!(db.state(), SessionState::Idle);
    db.set_query(CREATE)?;
    assert_eq!(db.query(), CREATE);
    assert_eq!(db.state(), SessionState::Queued);

    // Replacing queued text is fine as long as nothing is compiled.
    db.set_query("SELECT 1")?;
    assert_eq!(db.query(), "SELECT 1");
    Ok(())
}

#[test]
fn set_query_rejects_empty_text() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    let err = db.set_query("").unwrap_err();
    assert!(err.is_usage());
    assert_eq!(err.to_string(), REJECTED);
    assert_eq!(err.usage_cause(), Some(UsageCause::EmptyQuery));
    assert_eq!(err.code(), -1);
    Ok(())
}

#[test]
fn set_query_rejects_prepared_session() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    db.set_query(CREATE)?;
    db.prepare()?;
    assert!(db.is_prepared());

    let err = db.set_query(CREATE).unwrap_err();
    assert_eq!(err.to_string(), REJECTED);
    assert_eq!(err.usage_cause(), Some(UsageCause::QueryAlreadyPrepared));

    // Already-prepared wins over empty when both apply.
    let err = db.set_query("").unwrap_err();
    assert_eq!(err.usage_cause(), Some(UsageCause::QueryAlreadyPrepared));

    db.reset()?;
    db.set_query("SELECT 1")?;
    Ok(())
}

#[test]
fn prepare_without_query_fails() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    let err = db.prepare().unwrap_err();
    assert_eq!(err.to_string(), "No query set");
    assert_eq!(err.usage_cause(), Some(UsageCause::NoQuery));
    Ok(())
}

#[test]
fn prepare_reports_engine_syntax_error() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    db.set_query("SELEC id FROM nowhere")?;
    let err = db.prepare().unwrap_err();
    assert!(err.is_engine());
    assert_eq!(err.primary_code(), 1);
    let msg = err.to_string();
    assert!(msg.starts_with("Could not prepare query: "), "{msg}");
    assert!(msg.contains("syntax error"), "{msg}");

    // A failed prepare leaves the text queued so it can be corrected.
    assert!(!db.is_prepared());
    assert_eq!(db.state(), SessionState::Queued);
    db.set_query("SELECT 1")?;
    db.prepare()?;
    assert_eq!(db.step()?, StepResult::Row);
    assert_eq!(db.get_integer(0)?, 1);
    Ok(())
}

#[test]
fn prepare_reports_missing_table() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    db.set_query("SELECT * FROM missing")?;
    let err = db.prepare().unwrap_err();
    assert!(err.to_string().contains("no such table: missing"));
    Ok(())
}

#[test]
fn prepare_records_unconsumed_tail() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    db.set_query("SELECT 1; SELECT 2")?;
    db.prepare()?;
    assert_eq!(db.tail(), " SELECT 2");
    assert_eq!(db.query(), "SELECT 1; SELECT 2");

    db.reset()?;
    db.set_query("SELECT 3")?;
    db.prepare()?;
    assert_eq!(db.tail(), "");
    Ok(())
}

#[test]
fn comment_only_query_steps_straight_to_done() -> Result<(), SessionError> {
    let mut db = StatementSession::open_in_memory()?;
    db.execute("-- nothing to run")?;

    db.set_query("   ")?;
    db.prepare()?;
    assert_eq!(db.step()?, StepResult::Done);
    assert_eq!(db.column_count(), 0);
    Ok(())
}

#[test]
fn empty_target_is_a_config_error() {
    let err = StatementSession::open(SessionOptions::new("")).unwrap_err();
    assert!(matches!(err, SessionError::Config(_)));
}

use clap::Parser;
use sqlite_session::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Walk a StatementSession through its lifecycle")]
struct Args {
    /// Database path, or `:memory:` for a private in-memory database.
    #[arg(long, default_value = MEMORY_TARGET)]
    database: String,
    /// Log every lifecycle step.
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), SessionError> {
    let args = Args::parse();
    let level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut db = StatementSession::open_target(&args.database, args.debug)?;

    println!("== Create table 'test' which has text ==");
    db.execute("CREATE TABLE IF NOT EXISTS test(id INTEGER PRIMARY KEY, text TEXT)")?;

    println!("== Insert into test using execute() ==");
    db.execute("INSERT INTO test(text) VALUES('test')")?;
    db.execute("INSERT INTO test(text) VALUES('test2')")?;

    let special_text = "text with ap'ostrophes and sla/shes in both \\ directions are handled perfectly with bind!";

    println!("== Insert into test with bound values ==");
    db.set_query("INSERT INTO test(text) VALUES(?)")?;
    db.prepare()?;
    db.bind(1, special_text)?;
    db.step()?;
    db.reset()?;

    println!("== Insert into test binding a numbered placeholder ==");
    db.set_query("INSERT INTO test(text) VALUES(?5)")?;
    db.prepare()?;
    db.bind(5, "Some other text")?;
    db.step()?;
    db.reset()?;

    println!("== Insert into test reusing the compiled statement ==");
    db.prepare()?;
    db.bind(5, "other test, reuse query")?;
    db.step()?;
    db.reset()?;

    println!("== Select query ==");
    db.set_query("SELECT id, text FROM test")?;
    db.prepare()?;
    while db.step()?.is_row() {
        println!("{} {}", db.get_integer(0)?, db.get_text(1)?);
    }
    db.reset()?;

    println!("Last insert id: {}", db.last_insert_id());
    Ok(())
}

// Integration tests for the migration framework

use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    // Given: An empty SQLite database
    let mut conn = setup_test_db();

    // When: Migrations are applied
    let result = snippetbox_store::migrations::apply_migrations(&mut conn);

    // Then: All migrations succeed
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    // And: The expected tables exist (sqlite_sequence comes from AUTOINCREMENT)
    let tables = get_table_names(&conn);
    for expected in ["schema_version", "snippets", "sqlite_sequence"] {
        assert!(
            tables.contains(&expected.to_string()),
            "Missing table: {}",
            expected
        );
    }
}

#[test]
fn test_migration_idempotency() {
    // Given: A database with migrations already applied
    let mut conn = setup_test_db();
    snippetbox_store::migrations::apply_migrations(&mut conn).unwrap();

    // When: Migrations are applied again
    snippetbox_store::migrations::apply_migrations(&mut conn).unwrap();

    // Then: Each migration is recorded exactly once
    let version_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version_count, 1);
}

#[test]
fn test_schema_rejects_empty_title() {
    let mut conn = setup_test_db();
    snippetbox_store::migrations::apply_migrations(&mut conn).unwrap();

    let result = conn.execute(
        "INSERT INTO snippets (title, content, created, expires) VALUES ('', 'c', 0, 0)",
        [],
    );
    assert!(result.is_err(), "CHECK constraint should reject empty title");
}

#[test]
fn test_schema_rejects_expiry_before_creation() {
    let mut conn = setup_test_db();
    snippetbox_store::migrations::apply_migrations(&mut conn).unwrap();

    let result = conn.execute(
        "INSERT INTO snippets (title, content, created, expires) VALUES ('t', 'c', 100, 99)",
        [],
    );
    assert!(result.is_err());
}

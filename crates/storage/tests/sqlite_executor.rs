use quiz_core::model::CellValue;
use storage::{SqliteSession, StatementExecutor};

async fn memory_session() -> SqliteSession {
    SqliteSession::connect("sqlite::memory:")
        .await
        .expect("connect")
}

#[tokio::test]
async fn select_literal_returns_typed_cells() {
    let db = memory_session().await;
    let result = db
        .execute("SELECT 7 AS n, 2.5 AS r, 'Alien' AS t, NULL AS z, x'cafe' AS b")
        .await
        .unwrap();

    assert_eq!(result.columns, vec!["n", "r", "t", "z", "b"]);
    assert_eq!(
        result.rows,
        vec![vec![
            CellValue::Integer(7),
            CellValue::Real(2.5),
            CellValue::Text("Alien".into()),
            CellValue::Null,
            CellValue::Blob(vec![0xca, 0xfe]),
        ]]
    );
}

#[tokio::test]
async fn state_persists_between_statements() {
    let db = memory_session().await;
    db.execute("CREATE TABLE movies (title TEXT, year INTEGER)")
        .await
        .unwrap();
    db.execute("INSERT INTO movies VALUES ('Jaws', 1975), ('Alien', 1979)")
        .await
        .unwrap();

    let result = db
        .execute("SELECT title FROM movies ORDER BY year DESC")
        .await
        .unwrap();
    assert_eq!(
        result.rows,
        vec![
            vec![CellValue::from("Alien")],
            vec![CellValue::from("Jaws")],
        ]
    );
}

#[tokio::test]
async fn statements_without_rows_return_empty_set() {
    let db = memory_session().await;
    let result = db.execute("CREATE TABLE t (x)").await.unwrap();
    assert!(result.is_empty());
    assert!(result.columns.is_empty());
}

#[tokio::test]
async fn errors_carry_the_database_message() {
    let db = memory_session().await;
    let err = db.execute("SELECT * FROM nowhere").await.unwrap_err();
    assert!(err.message().contains("no such table"), "{err}");
}

#[tokio::test]
async fn empty_select_keeps_column_names() {
    let db = memory_session().await;
    db.execute("CREATE TABLE movies (title TEXT, year INTEGER)")
        .await
        .unwrap();

    let result = db
        .execute("SELECT title FROM movies WHERE 0")
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.columns, vec!["title"]);

    let result = db
        .execute("INSERT INTO movies VALUES ('Jaws', 1975)")
        .await
        .unwrap();
    assert!(result.columns.is_empty());
}

use crate::database::sqlite::SqliteFilmRepository;
use crate::database::FilmRepository;
use crate::features::films::model::{FilmPatch, NewFilm};
use sqlx::sqlite::SqlitePoolOptions;

// create a sqlite database in memory to test against; every connection to
// ":memory:" is its own database, so the pool is capped at one connection
async fn setup_test_db() -> SqliteFilmRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // run migrations to create the films schema
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    SqliteFilmRepository::new(pool, "films".to_string())
}

fn dune() -> NewFilm {
    NewFilm {
        nev: "Dune".to_string(),
        tipus: "Sci-Fi".to_string(),
        ertekeles: 4.8,
    }
}

// test that inserting hands back the storage-assigned id and the row can be
// read back with matching fields
#[tokio::test]
async fn test_sqlite_insert_and_retrieve() {
    let repo = setup_test_db().await;

    let created = repo.insert_film(&dune()).await.expect("Should insert film");
    assert!(created.id > 0, "Storage should assign a positive id");

    let retrieved = repo
        .get_film_by_id(created.id)
        .await
        .expect("Should query")
        .expect("Should find film");

    assert_eq!(retrieved.nev, "Dune");
    assert_eq!(retrieved.tipus, "Sci-Fi");
    assert_eq!(retrieved.ertekeles, 4.8);
}

// consecutive inserts must get distinct ids
#[tokio::test]
async fn test_sqlite_insert_assigns_distinct_ids() {
    let repo = setup_test_db().await;

    let first = repo.insert_film(&dune()).await.unwrap();
    let second = repo.insert_film(&dune()).await.unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_sqlite_get_missing_returns_none() {
    let repo = setup_test_db().await;

    let retrieved = repo.get_film_by_id(42).await.unwrap();

    assert!(retrieved.is_none());
}

// an empty table lists as an empty vec, not an error
#[tokio::test]
async fn test_sqlite_list_empty_table() {
    let repo = setup_test_db().await;

    let films = repo.get_all_films().await.unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn test_sqlite_list_returns_inserted_rows() {
    let repo = setup_test_db().await;

    repo.insert_film(&dune()).await.unwrap();
    repo.insert_film(&NewFilm {
        nev: "Alien".to_string(),
        tipus: "Horror".to_string(),
        ertekeles: 4.5,
    })
    .await
    .unwrap();

    let films = repo.get_all_films().await.unwrap();

    assert_eq!(films.len(), 2);
}

// whole replacement overwrites every column
#[tokio::test]
async fn test_sqlite_replace_overwrites_all_columns() {
    let repo = setup_test_db().await;
    let created = repo.insert_film(&dune()).await.unwrap();

    repo.replace_film(
        created.id,
        &NewFilm {
            nev: "Dune Part Two".to_string(),
            tipus: "Sci-Fi".to_string(),
            ertekeles: 4.9,
        },
    )
    .await
    .unwrap();

    let retrieved = repo.get_film_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(retrieved.nev, "Dune Part Two");
    assert_eq!(retrieved.ertekeles, 4.9);
}

// replacing a missing id affects zero rows and is still a success
#[tokio::test]
async fn test_sqlite_replace_missing_id_is_ok() {
    let repo = setup_test_db().await;

    let result = repo.replace_film(999, &dune()).await;

    assert!(result.is_ok());
}

// a patch only touches the columns it names
#[tokio::test]
async fn test_sqlite_patch_updates_named_columns_only() {
    let repo = setup_test_db().await;
    let created = repo.insert_film(&dune()).await.unwrap();

    let patch = FilmPatch {
        ertekeles: Some(5.0),
        ..FilmPatch::default()
    };
    repo.patch_film(created.id, &patch).await.unwrap();

    let retrieved = repo.get_film_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(retrieved.ertekeles, 5.0);
    // untouched columns keep their values
    assert_eq!(retrieved.nev, "Dune");
    assert_eq!(retrieved.tipus, "Sci-Fi");
}

// the repository refuses to build an UPDATE with no SET clause
#[tokio::test]
async fn test_sqlite_patch_empty_is_rejected() {
    let repo = setup_test_db().await;
    let created = repo.insert_film(&dune()).await.unwrap();

    let result = repo.patch_film(created.id, &FilmPatch::default()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_sqlite_delete_then_get_none() {
    let repo = setup_test_db().await;
    let created = repo.insert_film(&dune()).await.unwrap();

    repo.delete_film(created.id).await.unwrap();

    let retrieved = repo.get_film_by_id(created.id).await.unwrap();
    assert!(retrieved.is_none());
}

// deleting an id that never existed is indistinguishable from success
#[tokio::test]
async fn test_sqlite_delete_missing_id_is_ok() {
    let repo = setup_test_db().await;

    let result = repo.delete_film(999).await;

    assert!(result.is_ok());
}

// the table name comes from config; a repository pointed at a differently
// named table must work against it
#[tokio::test]
async fn test_sqlite_configured_table_name() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::query(
        "CREATE TABLE mozi (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nev TEXT NOT NULL,
            tipus TEXT NOT NULL,
            ertekeles REAL NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .expect("Should create custom table");

    let repo = SqliteFilmRepository::new(pool, "mozi".to_string());

    let created = repo.insert_film(&dune()).await.unwrap();
    let retrieved = repo.get_film_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(retrieved.nev, "Dune");
}

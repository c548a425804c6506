pub mod unit_sqlite_films_database;

use crate::features::films::model::{Film, FilmPatch, NewFilm};
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// film storage operations behind a trait so handlers can be exercised with
// mock repositories. sqlx::Pool is thread safe; implementations must be too.
#[async_trait]
pub trait FilmRepository: Send + Sync {
    async fn get_all_films(&self) -> Result<Vec<Film>>;
    async fn get_film_by_id(&self, id: i64) -> Result<Option<Film>>;

    // write operations
    async fn insert_film(&self, film: &NewFilm) -> Result<Film>;
    async fn replace_film(&self, id: i64, film: &NewFilm) -> Result<()>;
    async fn patch_film(&self, id: i64, patch: &FilmPatch) -> Result<()>;
    async fn delete_film(&self, id: i64) -> Result<()>;
}

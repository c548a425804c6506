use crate::database::FilmRepository;
use crate::features::films::model::{Film, FilmPatch, NewFilm};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use sqlx::{Pool, QueryBuilder, Sqlite};

pub struct SqliteFilmRepository {
    pool: Pool<Sqlite>,
    table: String,
}

impl SqliteFilmRepository {
    // `table` has already been validated as a bare identifier by the config
    // layer; it is the only non-bound value that reaches statement text
    pub fn new(pool: Pool<Sqlite>, table: String) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl FilmRepository for SqliteFilmRepository {
    async fn get_all_films(&self) -> Result<Vec<Film>> {
        let films = sqlx::query_as::<_, Film>(&format!("SELECT * FROM {}", self.table))
            .fetch_all(&self.pool)
            .await?;

        Ok(films)
    }

    async fn get_film_by_id(&self, id: i64) -> Result<Option<Film>> {
        let film =
            sqlx::query_as::<_, Film>(&format!("SELECT * FROM {} WHERE id = ?", self.table))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(film)
    }

    async fn insert_film(&self, film: &NewFilm) -> Result<Film> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (nev, tipus, ertekeles) VALUES (?, ?, ?)",
            self.table
        ))
        .bind(&film.nev)
        .bind(&film.tipus)
        .bind(film.ertekeles)
        .execute(&self.pool)
        .await
        .context(format!("Failed to insert film {}", film.nev))?;

        // hand back the row as stored so the caller sees the generated id
        Ok(Film {
            id: result.last_insert_rowid(),
            nev: film.nev.clone(),
            tipus: film.tipus.clone(),
            ertekeles: film.ertekeles,
        })
    }

    async fn replace_film(&self, id: i64, film: &NewFilm) -> Result<()> {
        // zero rows affected is not an error, existence is not verified
        sqlx::query(&format!(
            "UPDATE {} SET nev = ?, tipus = ?, ertekeles = ? WHERE id = ?",
            self.table
        ))
        .bind(&film.nev)
        .bind(&film.tipus)
        .bind(film.ertekeles)
        .bind(id)
        .execute(&self.pool)
        .await
        .context(format!("Failed to update film {}", id))?;

        Ok(())
    }

    async fn patch_film(&self, id: i64, patch: &FilmPatch) -> Result<()> {
        if patch.is_empty() {
            bail!("Refusing to build an UPDATE statement with an empty SET clause");
        }

        // the SET clause is assembled from fixed column literals only;
        // client-supplied values are always bound, never spliced into the text
        let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", self.table));
        let mut fields = builder.separated(", ");

        if let Some(nev) = &patch.nev {
            fields.push("nev = ").push_bind_unseparated(nev);
        }
        if let Some(tipus) = &patch.tipus {
            fields.push("tipus = ").push_bind_unseparated(tipus);
        }
        if let Some(ertekeles) = patch.ertekeles {
            fields.push("ertekeles = ").push_bind_unseparated(ertekeles);
        }

        builder.push(" WHERE id = ").push_bind(id);

        builder
            .build()
            .execute(&self.pool)
            .await
            .context(format!("Failed to patch film {}", id))?;

        Ok(())
    }

    async fn delete_film(&self, id: i64) -> Result<()> {
        // deleting an id that never existed is indistinguishable from success
        sqlx::query(&format!("DELETE FROM {} WHERE id = ?", self.table))
            .bind(id)
            .execute(&self.pool)
            .await
            .context(format!("Failed to delete film {}", id))?;

        Ok(())
    }
}

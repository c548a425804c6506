pub mod model;

use crate::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use model::{Film, FilmPatch, NewFilm};
use serde::Deserialize;

pub fn films_router() -> Router<AppState> {
    Router::new()
        .route("/films", get(list_films_handler).post(create_film_handler))
        .route(
            "/film",
            get(get_film_handler)
                .put(replace_film_handler)
                .patch(patch_film_handler)
                .delete(delete_film_handler),
        )
}

#[derive(Deserialize)]
struct IdParam {
    id: i64,
}

async fn list_films_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Film>>, (StatusCode, String)> {
    // an empty table serializes as [], never null
    let films = state.repo.get_all_films().await.map_err(storage_error)?;

    Ok(Json(films))
}

async fn create_film_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewFilm>, JsonRejection>,
) -> Result<(StatusCode, Json<Film>), (StatusCode, String)> {
    let Json(new_film) = payload.map_err(bad_request)?;

    // the inserted row carries the storage-assigned id, so the 201 echo is
    // accurate without a second round trip
    let film = state
        .repo
        .insert_film(&new_film)
        .await
        .map_err(storage_error)?;

    Ok((StatusCode::CREATED, Json(film)))
}

async fn get_film_handler(
    State(state): State<AppState>,
    id: Result<Query<IdParam>, QueryRejection>,
) -> Result<Json<Film>, (StatusCode, String)> {
    let Query(IdParam { id }) = id.map_err(bad_request)?;

    match state.repo.get_film_by_id(id).await {
        Err(err) => Err(storage_error(err)),

        Ok(None) => Err((StatusCode::NOT_FOUND, "Film was not found".to_string())),

        Ok(Some(film)) => Ok(Json(film)),
    }
}

async fn replace_film_handler(
    State(state): State<AppState>,
    id: Result<Query<IdParam>, QueryRejection>,
    payload: Result<Json<NewFilm>, JsonRejection>,
) -> Result<Json<Film>, (StatusCode, String)> {
    let Query(IdParam { id }) = id.map_err(bad_request)?;
    let Json(film) = payload.map_err(bad_request)?;

    // updating a missing id affects zero rows and still succeeds
    state
        .repo
        .replace_film(id, &film)
        .await
        .map_err(storage_error)?;

    Ok(Json(Film {
        id,
        nev: film.nev,
        tipus: film.tipus,
        ertekeles: film.ertekeles,
    }))
}

async fn patch_film_handler(
    State(state): State<AppState>,
    id: Result<Query<IdParam>, QueryRejection>,
    payload: Result<Json<FilmPatch>, JsonRejection>,
) -> Result<Json<FilmPatch>, (StatusCode, String)> {
    let Query(IdParam { id }) = id.map_err(bad_request)?;
    let Json(patch) = payload.map_err(bad_request)?;

    // an empty patch would produce an UPDATE with no SET clause; reject it
    // before it reaches storage
    if patch.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Patch must contain at least one field".to_string(),
        ));
    }

    state
        .repo
        .patch_film(id, &patch)
        .await
        .map_err(storage_error)?;

    Ok(Json(patch))
}

async fn delete_film_handler(
    State(state): State<AppState>,
    id: Result<Query<IdParam>, QueryRejection>,
) -> Result<StatusCode, (StatusCode, String)> {
    let Query(IdParam { id }) = id.map_err(bad_request)?;

    state.repo.delete_film(id).await.map_err(storage_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// storage failures never leak driver detail to the client; the full error
// goes to the server log instead
fn storage_error(err: anyhow::Error) -> (StatusCode, String) {
    tracing::error!(error = %err, "storage operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}

fn bad_request(rejection: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, rejection.to_string())
}

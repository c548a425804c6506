use serde::{Deserialize, Serialize};

// the wire field names are the original Hungarian column names; renaming
// them would break every existing client
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Film {
    pub id: i64,
    pub nev: String,
    pub tipus: String,
    pub ertekeles: f64,
}

// create/replace payload; a client-supplied `id` key is silently ignored, the
// storage engine assigns ids
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewFilm {
    pub nev: String,
    pub tipus: String,
    pub ertekeles: f64,
}

// patch set for partial updates. unknown keys fail deserialization, which is
// the column allow-list: client field names never reach the SQL text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilmPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ertekeles: Option<f64>,
}

impl FilmPatch {
    pub fn is_empty(&self) -> bool {
        self.nev.is_none() && self.tipus.is_none() && self.ertekeles.is_none()
    }
}

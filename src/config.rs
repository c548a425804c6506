#[derive(Clone, Debug)]
pub struct FilmtarConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    pub table_name: String,
}

impl FilmtarConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("Failed to determine DATABASE_URL from environment variables");

        let max_connections = std::env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(15);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .unwrap_or(8080);

        let table_name = std::env::var("FILMS_TABLE").unwrap_or_else(|_| "films".to_string());

        // the table name is the only config value that ends up inside SQL
        // text, so it must be a bare identifier
        if !is_sql_identifier(&table_name) {
            panic!("FILMS_TABLE must be a plain SQL identifier, got {table_name:?}");
        }

        Self {
            database_url,
            max_connections,
            port,
            table_name,
        }
    }
}

pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

//! Database configuration.

/// Connection settings for the relational gateway.
///
/// Passed explicitly to [`PostgresStore::connect`](crate::PostgresStore::connect);
/// the gateway itself never reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            database: "almacen".to_owned(),
            user: "postgres".to_owned(),
            password: String::new(),
        }
    }
}

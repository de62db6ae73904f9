use mongodb::options::ClientOptions;

use super::{
    connection::RetryPolicy,
    error::{MongoDaoError, MongoResult},
};

const DEFAULT_DATABASE_NAME: &str = "game_catalog";

/// Connection settings for [`MongoGameStore`](super::MongoGameStore).
#[derive(Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
    /// Ping schedule used while the server is coming up.
    pub retry: RetryPolicy,
}

impl MongoConfig {
    /// Parse `uri` and pick the database, defaulting to `game_catalog`.
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let database_name = db_name.unwrap_or(DEFAULT_DATABASE_NAME).to_owned();
        let mut options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;
        if options.app_name.is_none() {
            options.app_name = Some("game-catalog".to_owned());
        }

        Ok(Self {
            options,
            database_name,
            retry: RetryPolicy::default(),
        })
    }

    /// Use `retry` for the initial connection.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

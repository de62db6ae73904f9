//! MongoDB-backed [`GameStore`](crate::dao::game_store::GameStore).

mod config;
mod connection;
mod error;
mod models;
pub mod store;

pub use config::MongoConfig;
pub use connection::RetryPolicy;
pub use error::MongoDaoError;
pub use store::MongoGameStore;

use crate::dao::storage::StorageError;

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::DuplicateGame { name, producer } => {
                StorageError::duplicate(name, producer)
            }
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}

pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::GameEntity;
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

pub use memory::MemoryGameStore;

/// Abstraction over the persistence layer for the game catalog.
pub trait GameStore: Send + Sync {
    /// Return up to `limit` games after skipping the first `skip`, in store order.
    fn list(&self, skip: u64, limit: u64) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    fn find(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    fn find_by_name_and_producer(
        &self,
        name: String,
        producer: String,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    fn insert(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Overwrite an existing game, returning `false` when no record carries its id.
    fn replace(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>>;
    /// Remove a game, returning `false` when it did not exist.
    fn delete(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

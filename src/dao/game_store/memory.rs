//! In-process game store keeping the catalog in insertion order.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    game_store::GameStore,
    models::GameEntity,
    storage::{StorageError, StorageResult},
};

/// Volatile [`GameStore`] used by default and in tests.
#[derive(Clone, Default)]
pub struct MemoryGameStore {
    games: Arc<RwLock<IndexMap<Uuid, GameEntity>>>,
}

impl MemoryGameStore {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    async fn list(&self, skip: u64, limit: u64) -> Vec<GameEntity> {
        let guard = self.games.read().await;
        guard
            .values()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    async fn find(&self, id: Uuid) -> Option<GameEntity> {
        self.games.read().await.get(&id).cloned()
    }

    async fn find_by_name_and_producer(&self, name: &str, producer: &str) -> Option<GameEntity> {
        let guard = self.games.read().await;
        guard
            .values()
            .find(|game| game.same_identity(name, producer))
            .cloned()
    }

    async fn insert(&self, game: GameEntity) -> StorageResult<()> {
        let mut guard = self.games.write().await;
        if guard
            .values()
            .any(|existing| existing.same_identity(&game.name, &game.producer))
        {
            return Err(StorageError::duplicate(game.name, game.producer));
        }
        guard.insert(game.id, game);
        Ok(())
    }

    async fn replace(&self, game: GameEntity) -> StorageResult<bool> {
        let mut guard = self.games.write().await;
        if guard.values().any(|existing| {
            existing.id != game.id && existing.same_identity(&game.name, &game.producer)
        }) {
            return Err(StorageError::duplicate(game.name, game.producer));
        }

        match guard.get_mut(&game.id) {
            Some(slot) => {
                *slot = game;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> bool {
        // shift_remove keeps the remaining games in their original order.
        self.games.write().await.shift_remove(&id).is_some()
    }
}

impl GameStore for MemoryGameStore {
    fn list(&self, skip: u64, limit: u64) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.list(skip, limit).await) })
    }

    fn find(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.find(id).await) })
    }

    fn find_by_name_and_producer(
        &self,
        name: String,
        producer: String,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.find_by_name_and_producer(&name, &producer).await) })
    }

    fn insert(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert(game).await })
    }

    fn replace(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.replace(game).await })
    }

    fn delete(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.delete(id).await) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, producer: &str, price: f64) -> GameEntity {
        GameEntity {
            id: Uuid::new_v4(),
            name: name.into(),
            producer: producer.into(),
            price,
        }
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order() {
        let store = MemoryGameStore::new();
        for idx in 0..7 {
            GameStore::insert(&store, game(&format!("Game {idx}"), "Studio", 10.0))
                .await
                .unwrap();
        }

        let page = GameStore::list(&store, 5, 5).await.unwrap();
        let names: Vec<_> = page.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Game 5", "Game 6"]);
    }

    #[tokio::test]
    async fn insert_rejects_same_name_and_producer() {
        let store = MemoryGameStore::new();
        GameStore::insert(&store, game("Fifa 21", "EA", 200.0))
            .await
            .unwrap();

        let err = GameStore::insert(&store, game("Fifa 21", "EA", 150.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { .. }));

        // Same title from another producer is a different game.
        GameStore::insert(&store, game("Fifa 21", "Other", 150.0))
            .await
            .unwrap();
        assert_eq!(GameStore::list(&store, 0, 50).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn replace_reports_missing_games() {
        let store = MemoryGameStore::new();
        let replaced = GameStore::replace(&store, game("Ghost", "Nobody", 1.0))
            .await
            .unwrap();
        assert!(!replaced);
    }

    #[tokio::test]
    async fn delete_keeps_remaining_order() {
        let store = MemoryGameStore::new();
        let first = game("A", "S", 1.0);
        let second = game("B", "S", 1.0);
        let third = game("C", "S", 1.0);
        for g in [first.clone(), second.clone(), third.clone()] {
            GameStore::insert(&store, g).await.unwrap();
        }

        assert!(GameStore::delete(&store, second.id).await.unwrap());
        assert!(!GameStore::delete(&store, second.id).await.unwrap());

        let ids: Vec<_> = GameStore::list(&store, 0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }
}

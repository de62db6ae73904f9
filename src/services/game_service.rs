//! Catalog business rules: pagination, identity conflicts and existence checks
//! on top of a [`GameStore`].

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::game_store::GameStore,
    dto::game::{GameInput, GameView},
    error::ServiceError,
};

/// Result alias for catalog operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Capability consumed by the HTTP layer to read and mutate the catalog.
pub trait GameService: Send + Sync {
    /// Return the games of page `page` (1-based), at most `page_size` of them.
    fn list(&self, page: u32, page_size: u32) -> BoxFuture<'static, ServiceResult<Vec<GameView>>>;
    /// Return the game with `id`, or `None` when it is not in the catalog.
    fn get_by_id(&self, id: Uuid) -> BoxFuture<'static, ServiceResult<Option<GameView>>>;
    /// Register a new game; fails with [`ServiceError::AlreadyRegistered`] on a name/producer clash.
    fn create(&self, input: GameInput) -> BoxFuture<'static, ServiceResult<GameView>>;
    /// Replace every field of an existing game.
    fn update_full(&self, id: Uuid, input: GameInput) -> BoxFuture<'static, ServiceResult<()>>;
    /// Change only the price of an existing game.
    fn update_price(&self, id: Uuid, price: f64) -> BoxFuture<'static, ServiceResult<()>>;
    /// Remove a game from the catalog.
    fn delete(&self, id: Uuid) -> BoxFuture<'static, ServiceResult<()>>;
}

/// [`GameService`] backed by any [`GameStore`].
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn GameStore>,
}

impl CatalogService {
    /// Build a catalog over `store`.
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    /// Insert the configured starter catalog, skipping invalid or already present games.
    ///
    /// Returns how many games were actually added.
    pub async fn seed(&self, games: Vec<GameInput>) -> ServiceResult<usize> {
        let mut inserted = 0;
        for game in games {
            if let Err(err) = game.validate() {
                warn!(name = %game.name, error = %err, "skipping invalid seed game");
                continue;
            }

            match self.create(game).await {
                Ok(_) => inserted += 1,
                Err(ServiceError::AlreadyRegistered) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(inserted)
    }

    async fn list(&self, page: u32, page_size: u32) -> ServiceResult<Vec<GameView>> {
        let limit = u64::from(page_size);
        let skip = u64::from(page.saturating_sub(1)) * limit;

        let games = self.store.list(skip, limit).await?;
        debug!(page, page_size, count = games.len(), "listed games");
        Ok(games.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> ServiceResult<Option<GameView>> {
        Ok(self.store.find(id).await?.map(Into::into))
    }

    async fn create(&self, input: GameInput) -> ServiceResult<GameView> {
        let existing = self
            .store
            .find_by_name_and_producer(input.name.clone(), input.producer.clone())
            .await?;
        if let Some(existing) = existing {
            warn!(id = %existing.id, name = %input.name, producer = %input.producer, "game already registered");
            return Err(ServiceError::AlreadyRegistered);
        }

        let game = input.into_entity(Uuid::new_v4());
        self.store.insert(game.clone()).await?;
        debug!(id = %game.id, name = %game.name, "game registered");
        Ok(game.into())
    }

    async fn update_full(&self, id: Uuid, input: GameInput) -> ServiceResult<()> {
        if self.store.find(id).await?.is_none() {
            warn!(%id, "full update of unknown game");
            return Err(ServiceError::NotRegistered);
        }

        let clash = self
            .store
            .find_by_name_and_producer(input.name.clone(), input.producer.clone())
            .await?;
        if clash.is_some_and(|other| other.id != id) {
            warn!(%id, name = %input.name, producer = %input.producer, "update collides with another game");
            return Err(ServiceError::AlreadyRegistered);
        }

        // The game may vanish between the lookup and the write.
        if !self.store.replace(input.into_entity(id)).await? {
            return Err(ServiceError::NotRegistered);
        }
        debug!(%id, "game updated");
        Ok(())
    }

    async fn update_price(&self, id: Uuid, price: f64) -> ServiceResult<()> {
        let Some(mut game) = self.store.find(id).await? else {
            warn!(%id, "price update of unknown game");
            return Err(ServiceError::NotRegistered);
        };

        game.price = price;
        if !self.store.replace(game).await? {
            return Err(ServiceError::NotRegistered);
        }
        debug!(%id, price, "game price updated");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.store.delete(id).await? {
            warn!(%id, "delete of unknown game");
            return Err(ServiceError::NotRegistered);
        }
        debug!(%id, "game removed");
        Ok(())
    }
}

impl GameService for CatalogService {
    fn list(&self, page: u32, page_size: u32) -> BoxFuture<'static, ServiceResult<Vec<GameView>>> {
        let service = self.clone();
        Box::pin(async move { service.list(page, page_size).await })
    }

    fn get_by_id(&self, id: Uuid) -> BoxFuture<'static, ServiceResult<Option<GameView>>> {
        let service = self.clone();
        Box::pin(async move { service.get_by_id(id).await })
    }

    fn create(&self, input: GameInput) -> BoxFuture<'static, ServiceResult<GameView>> {
        let service = self.clone();
        Box::pin(async move { service.create(input).await })
    }

    fn update_full(&self, id: Uuid, input: GameInput) -> BoxFuture<'static, ServiceResult<()>> {
        let service = self.clone();
        Box::pin(async move { service.update_full(id, input).await })
    }

    fn update_price(&self, id: Uuid, price: f64) -> BoxFuture<'static, ServiceResult<()>> {
        let service = self.clone();
        Box::pin(async move { service.update_price(id, price).await })
    }

    fn delete(&self, id: Uuid) -> BoxFuture<'static, ServiceResult<()>> {
        let service = self.clone();
        Box::pin(async move { service.delete(id).await })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::dao::{
        game_store::MemoryGameStore,
        models::GameEntity,
        storage::{StorageError, StorageResult},
    };

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryGameStore::new()))
    }

    fn input(name: &str, producer: &str, price: f64) -> GameInput {
        GameInput {
            name: name.into(),
            producer: producer.into(),
            price,
        }
    }

    #[tokio::test]
    async fn list_is_empty_for_new_catalog() {
        let games = GameService::list(&service(), 1, 5).await.unwrap();
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn list_never_exceeds_page_size() {
        let service = service();
        for idx in 0..12 {
            GameService::create(&service, input(&format!("Game {idx:02}"), "Studio", 10.0))
                .await
                .unwrap();
        }

        for page_size in [1, 5, 7, 50] {
            let page = GameService::list(&service, 1, page_size).await.unwrap();
            assert!(page.len() <= page_size as usize);
        }

        let third = GameService::list(&service, 3, 5).await.unwrap();
        let names: Vec<_> = third.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Game 10", "Game 11"]);

        assert!(GameService::list(&service, 4, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown_game() {
        let found = GameService::get_by_id(&service(), Uuid::new_v4())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn create_assigns_identifier_and_rejects_duplicates() {
        let service = service();
        let created = GameService::create(&service, input("Fifa 21", "EA", 200.0))
            .await
            .unwrap();

        let fetched = GameService::get_by_id(&service, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);

        let err = GameService::create(&service, input("Fifa 21", "EA", 120.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyRegistered));
        assert_eq!(GameService::list(&service, 1, 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_full_replaces_fields() {
        let service = service();
        let created = GameService::create(&service, input("Fifa 20", "EA", 150.0))
            .await
            .unwrap();

        GameService::update_full(&service, created.id, input("Fifa 21", "EA", 200.0))
            .await
            .unwrap();

        let updated = GameService::get_by_id(&service, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Fifa 21");
        assert_eq!(updated.price, 200.0);
    }

    #[tokio::test]
    async fn update_full_keeps_own_identity() {
        let service = service();
        let created = GameService::create(&service, input("Fifa 21", "EA", 150.0))
            .await
            .unwrap();

        GameService::update_full(&service, created.id, input("Fifa 21", "EA", 99.0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_full_reports_unknown_and_conflicting_games() {
        let service = service();
        let err = GameService::update_full(&service, Uuid::new_v4(), input("Fifa 21", "EA", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotRegistered));

        GameService::create(&service, input("Fifa 21", "EA", 200.0))
            .await
            .unwrap();
        let other = GameService::create(&service, input("Fifa 22", "EA", 250.0))
            .await
            .unwrap();
        let err = GameService::update_full(&service, other.id, input("Fifa 21", "EA", 250.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyRegistered));
    }

    #[tokio::test]
    async fn update_price_only_touches_price() {
        let service = service();
        let created = GameService::create(&service, input("Grand Theft Auto V", "Rockstar", 190.0))
            .await
            .unwrap();

        GameService::update_price(&service, created.id, 49.9)
            .await
            .unwrap();

        let updated = GameService::get_by_id(&service, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 49.9);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.producer, created.producer);

        let err = GameService::update_price(&service, Uuid::new_v4(), 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotRegistered));
    }

    #[tokio::test]
    async fn delete_removes_and_then_reports_not_registered() {
        let service = service();
        let created = GameService::create(&service, input("Forza Horizon 4", "Microsoft", 150.0))
            .await
            .unwrap();

        GameService::delete(&service, created.id).await.unwrap();
        assert!(
            GameService::get_by_id(&service, created.id)
                .await
                .unwrap()
                .is_none()
        );

        let err = GameService::delete(&service, created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotRegistered));
    }

    #[tokio::test]
    async fn seed_skips_invalid_and_duplicate_games() {
        let service = service();
        let inserted = service
            .seed(vec![
                input("Fifa 21", "EA", 200.0),
                input("Fifa 21", "EA", 200.0),
                input("no", "EA", 200.0),
                input("Assassin's Creed Valhalla", "Ubisoft", 180.0),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 2);
    }

    struct UnreachableStore;

    fn refused<T: Send + 'static>() -> BoxFuture<'static, StorageResult<T>> {
        Box::pin(async {
            Err(StorageError::unavailable(
                "connection refused".into(),
                io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            ))
        })
    }

    impl GameStore for UnreachableStore {
        fn list(&self, _: u64, _: u64) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
            refused()
        }
        fn find(&self, _: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            refused()
        }
        fn find_by_name_and_producer(
            &self,
            _: String,
            _: String,
        ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
            refused()
        }
        fn insert(&self, _: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
            refused()
        }
        fn replace(&self, _: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
            refused()
        }
        fn delete(&self, _: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
            refused()
        }
        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            refused()
        }
    }

    #[tokio::test]
    async fn storage_failures_surface_as_unavailable() {
        let service = CatalogService::new(Arc::new(UnreachableStore));
        let err = GameService::delete(&service, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));

        let err = GameService::create(&service, input("Fifa 21", "EA", 200.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }
}

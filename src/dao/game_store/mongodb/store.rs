use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult, is_duplicate_key},
    models::{MongoGameDocument, doc_id, doc_identity},
};
use crate::dao::{game_store::GameStore, models::GameEntity, storage::StorageResult};

const GAME_COLLECTION_NAME: &str = "games";

/// [`GameStore`] persisting games in the `games` collection.
#[derive(Clone)]
pub struct MongoGameStore {
    database: Database,
}

impl MongoGameStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let database = establish_connection(&config).await?;

        let store = Self { database };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let collection = self.collection();
        let index = IndexModel::builder()
            .keys(doc! {"name": 1, "producer": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("game_identity_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();

        collection
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: GAME_COLLECTION_NAME,
                index: "name,producer",
                source,
            })?;

        Ok(())
    }

    fn collection(&self) -> Collection<MongoGameDocument> {
        self.database
            .collection::<MongoGameDocument>(GAME_COLLECTION_NAME)
    }

    async fn list(&self, skip: u64, limit: u64) -> MongoResult<Vec<GameEntity>> {
        let collection = self.collection();

        let documents: Vec<MongoGameDocument> = collection
            .find(doc! {})
            .sort(doc! {"name": 1, "producer": 1})
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await
            .map_err(|source| MongoDaoError::ListGames { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListGames { source })?;

        documents.into_iter().map(GameEntity::try_from).collect()
    }

    async fn find(&self, id: Uuid) -> MongoResult<Option<GameEntity>> {
        let collection = self.collection();

        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadGame { id, source })?;

        document.map(GameEntity::try_from).transpose()
    }

    async fn find_by_name_and_producer(
        &self,
        name: String,
        producer: String,
    ) -> MongoResult<Option<GameEntity>> {
        let collection = self.collection();

        let document = collection
            .find_one(doc_identity(&name, &producer))
            .await
            .map_err(|source| MongoDaoError::LookupGame {
                name,
                producer,
                source,
            })?;

        document.map(GameEntity::try_from).transpose()
    }

    async fn insert(&self, game: GameEntity) -> MongoResult<()> {
        let id = game.id;
        let (name, producer) = (game.name.clone(), game.producer.clone());
        let document: MongoGameDocument = game.into();
        let collection = self.collection();

        match collection.insert_one(&document).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => {
                Err(MongoDaoError::DuplicateGame { name, producer })
            }
            Err(source) => Err(MongoDaoError::SaveGame { id, source }),
        }
    }

    async fn replace(&self, game: GameEntity) -> MongoResult<bool> {
        let id = game.id;
        let (name, producer) = (game.name.clone(), game.producer.clone());
        let document: MongoGameDocument = game.into();
        let collection = self.collection();

        match collection.replace_one(doc_id(id), &document).await {
            Ok(result) => Ok(result.matched_count > 0),
            Err(err) if is_duplicate_key(&err) => {
                Err(MongoDaoError::DuplicateGame { name, producer })
            }
            Err(source) => Err(MongoDaoError::SaveGame { id, source }),
        }
    }

    async fn delete(&self, id: Uuid) -> MongoResult<bool> {
        let collection = self.collection();
        let result = collection
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteGame { id, source })?;
        Ok(result.deleted_count > 0)
    }
}

impl GameStore for MongoGameStore {
    fn list(&self, skip: u64, limit: u64) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list(skip, limit).await.map_err(Into::into) })
    }

    fn find(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find(id).await.map_err(Into::into) })
    }

    fn find_by_name_and_producer(
        &self,
        name: String,
        producer: String,
    ) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_by_name_and_producer(name, producer)
                .await
                .map_err(Into::into)
        })
    }

    fn insert(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert(game).await.map_err(Into::into) })
    }

    fn replace(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.replace(game).await.map_err(Into::into) })
    }

    fn delete(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete(id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}

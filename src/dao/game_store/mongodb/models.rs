use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MongoDaoError;
use crate::dao::models::GameEntity;

/// Shape of a game inside the `games` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    producer: String,
    price: f64,
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: value.id.hyphenated().to_string(),
            name: value.name,
            producer: value.producer,
            price: value.price,
        }
    }
}

impl TryFrom<MongoGameDocument> for GameEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoGameDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&value.id).map_err(|source| MongoDaoError::MalformedId {
            raw: value.id.clone(),
            source,
        })?;

        Ok(Self {
            id,
            name: value.name,
            producer: value.producer,
            price: value.price,
        })
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": id.hyphenated().to_string()}
}

pub fn doc_identity(name: &str, producer: &str) -> Document {
    doc! {"name": name, "producer": producer}
}

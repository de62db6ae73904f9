use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Game record persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameEntity {
    /// Primary key of the game.
    pub id: Uuid,
    /// Title of the game (e.g. "Fifa 21").
    pub name: String,
    /// Studio or publisher that produced the game.
    pub producer: String,
    /// Catalog price.
    pub price: f64,
}

impl GameEntity {
    /// Whether this record carries the given name and producer pair.
    pub fn same_identity(&self, name: &str, producer: &str) -> bool {
        self.name == name && self.producer == producer
    }
}

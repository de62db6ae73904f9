//! Request and response shapes of the game catalog API.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::GameEntity;

/// Largest page a caller may request when listing games.
pub const MAX_PAGE_SIZE: u32 = 50;
/// Page size used when `quantidade` is omitted.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Pagination parameters accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ListGamesQuery {
    /// Page to fetch, starting at 1.
    #[serde(rename = "pagina", default = "default_page")]
    #[param(minimum = 1, default = 1)]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u32,
    /// Number of games per page, between 1 and 50.
    #[serde(rename = "quantidade", default = "default_page_size")]
    #[param(minimum = 1, maximum = 50, default = 5)]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE, message = "page size must be between 1 and 50"))]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Caller-supplied game definition used by create and full update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct GameInput {
    /// Title of the game.
    #[schema(min_length = 3, max_length = 100, example = "Fifa 21")]
    #[validate(
        length(min = 3, max = 100, message = "name must have between 3 and 100 characters"),
        custom(function = "crate::dto::validation::validate_not_blank")
    )]
    pub name: String,
    /// Studio or publisher of the game.
    #[schema(min_length = 1, max_length = 100, example = "EA")]
    #[validate(
        length(min = 1, max = 100, message = "producer must have between 1 and 100 characters"),
        custom(function = "crate::dto::validation::validate_not_blank")
    )]
    pub producer: String,
    /// Catalog price, between 1 and 1000.
    #[schema(minimum = 1.0, maximum = 1000.0, example = 200.0)]
    #[validate(range(min = 1.0, max = 1000.0, message = "price must be between 1 and 1000"))]
    pub price: f64,
}

/// Read-only projection of a game returned to API callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct GameView {
    /// Identifier assigned at registration.
    pub id: Uuid,
    /// Title of the game.
    pub name: String,
    /// Studio or publisher of the game.
    pub producer: String,
    /// Current catalog price.
    pub price: f64,
}

impl From<GameEntity> for GameView {
    fn from(entity: GameEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            producer: entity.producer,
            price: entity.price,
        }
    }
}

impl GameInput {
    /// Materialise a new catalog record under `id`.
    pub fn into_entity(self, id: Uuid) -> GameEntity {
        GameEntity {
            id,
            name: self.name,
            producer: self.producer,
            price: self.price,
        }
    }
}

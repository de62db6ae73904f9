use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use axum_valid::Valid;
use uuid::Uuid;

use super::extract::ValidJson;
use crate::{
    dto::game::{GameInput, GameView, ListGamesQuery},
    error::{AppError, ServiceError},
    state::SharedState,
};

const GAME_ALREADY_REGISTERED: &str = "Game already registered!";
const GAME_NOT_REGISTERED: &str = "Game not registered!";

/// Version 1 catalog endpoints, mounted under `/api/V1`.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", get(list_games).post(create_game))
        .route(
            "/games/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .route("/games/{id}/price/{price}", patch(update_game_price))
}

/// List games one page at a time. Unpaginated listing is not offered.
#[utoipa::path(
    get,
    path = "/api/V1/games",
    tag = "games",
    params(ListGamesQuery),
    responses(
        (status = 200, description = "Games on the requested page", body = [GameView]),
        (status = 204, description = "No games on the requested page"),
        (status = 400, description = "Page or page size out of range")
    )
)]
pub async fn list_games(
    State(state): State<SharedState>,
    Valid(Query(query)): Valid<Query<ListGamesQuery>>,
) -> Result<Response, AppError> {
    let games = state.games().list(query.page, query.page_size).await?;

    if games.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(games).into_response())
}

/// Fetch a single game by its identifier.
#[utoipa::path(
    get,
    path = "/api/V1/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Requested game", body = GameView),
        (status = 204, description = "No game with this identifier")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    match state.games().get_by_id(id).await? {
        Some(game) => Ok(Json(game).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Register a new game in the catalog.
#[utoipa::path(
    post,
    path = "/api/V1/games",
    tag = "games",
    request_body = GameInput,
    responses(
        (status = 200, description = "Game registered", body = GameView),
        (status = 400, description = "Invalid game payload"),
        (status = 404, description = "A game with the same name and producer exists", body = String, content_type = "text/plain")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    ValidJson(payload): ValidJson<GameInput>,
) -> Result<Json<GameView>, AppError> {
    match state.games().create(payload).await {
        Ok(game) => Ok(Json(game)),
        Err(ServiceError::AlreadyRegistered) => {
            Err(AppError::NotFound(GAME_ALREADY_REGISTERED.into()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Replace every field of an existing game.
#[utoipa::path(
    put,
    path = "/api/V1/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Identifier of the game to update")),
    request_body = GameInput,
    responses(
        (status = 200, description = "Game updated"),
        (status = 400, description = "Invalid game payload"),
        (status = 404, description = "Game unknown, or another game already has this name and producer", body = String, content_type = "text/plain")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    ValidJson(payload): ValidJson<GameInput>,
) -> Result<StatusCode, AppError> {
    match state.games().update_full(id, payload).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(ServiceError::AlreadyRegistered) => {
            Err(AppError::NotFound(GAME_ALREADY_REGISTERED.into()))
        }
        Err(ServiceError::NotRegistered) => Err(AppError::NotFound(GAME_NOT_REGISTERED.into())),
        Err(err) => Err(err.into()),
    }
}

/// Change only the price of an existing game.
#[utoipa::path(
    patch,
    path = "/api/V1/games/{id}/price/{price}",
    tag = "games",
    params(
        ("id" = Uuid, Path, description = "Identifier of the game to update"),
        ("price" = f64, Path, description = "New price")
    ),
    responses(
        (status = 200, description = "Price updated"),
        (status = 400, description = "Price is not a finite number"),
        (status = 404, description = "Game unknown", body = String, content_type = "text/plain")
    )
)]
pub async fn update_game_price(
    State(state): State<SharedState>,
    Path((id, price)): Path<(Uuid, f64)>,
) -> Result<StatusCode, AppError> {
    // "NaN" and "inf" parse as f64 but cannot be rendered back as JSON.
    if !price.is_finite() {
        return Err(AppError::BadRequest(format!("price `{price}` is not a number")));
    }

    match state.games().update_price(id, price).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(ServiceError::NotRegistered) => Err(AppError::NotFound(GAME_NOT_REGISTERED.into())),
        Err(err) => Err(err.into()),
    }
}

/// Remove a game from the catalog.
#[utoipa::path(
    delete,
    path = "/api/V1/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Identifier of the game to delete")),
    responses(
        (status = 200, description = "Game deleted"),
        (status = 404, description = "Game unknown", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.games().delete(id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(err @ ServiceError::NotRegistered) => Err(AppError::NotFound(err.to_string())),
        Err(err) => Err(err.into()),
    }
}

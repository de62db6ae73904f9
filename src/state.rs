use std::sync::Arc;

use crate::{dao::game_store::GameStore, services::game_service::GameService};

/// Handle cloned into every handler.
pub type SharedState = Arc<AppState>;

/// Collaborators shared by every request handler.
pub struct AppState {
    games: Arc<dyn GameService>,
    game_store: Arc<dyn GameStore>,
}

impl AppState {
    /// Wire the catalog service and the store it runs on, wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(games: Arc<dyn GameService>, game_store: Arc<dyn GameStore>) -> SharedState {
        Arc::new(Self { games, game_store })
    }

    /// Catalog operations consumed by the game routes.
    pub fn games(&self) -> &dyn GameService {
        self.games.as_ref()
    }

    /// Store probed by the health check.
    pub fn game_store(&self) -> &dyn GameStore {
        self.game_store.as_ref()
    }
}

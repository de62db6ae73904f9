use axum::Router;

use crate::state::SharedState;

pub mod docs;
mod extract;
pub mod games;
pub mod health;

/// Compose all route trees and attach the shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .nest("/api/V1", games::router())
        .merge(docs::router())
        .with_state(state)
}

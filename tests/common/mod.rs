use std::{net::SocketAddr, sync::Arc};

use serde_json::{Value, json};

use game_catalog::{
    build_router, dao::game_store::MemoryGameStore, services::game_service::CatalogService,
    state::AppState,
};

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    _server: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server over an empty in-memory catalog on an ephemeral port.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryGameStore::new());
        let catalog = Arc::new(CatalogService::new(store.clone()));
        let app = build_router(AppState::new(catalog, store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            _server: handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Register a game and return its JSON view.
    pub async fn create_game(&self, name: &str, producer: &str, price: f64) -> Value {
        let resp = self
            .client
            .post(self.url("/api/V1/games"))
            .json(&game_payload(name, producer, price))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "creating {name}");
        resp.json().await.unwrap()
    }
}

pub fn game_payload(name: &str, producer: &str, price: f64) -> Value {
    json!({ "name": name, "producer": producer, "price": price })
}

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::config::AppConfig;
use crate::state::users::UserStore;

#[derive(Clone)]
struct SystemState {
    store: UserStore,
    server_version: String,
}

#[derive(Debug, Serialize)]
struct Alive {
    status: &'static str,
    users: usize,
}

#[derive(Debug, Serialize)]
struct Version {
    name: &'static str,
    version: String,
}

/// Build the operational routes under /system
pub fn routes(store: UserStore, config: &AppConfig) -> Router {
    let state = SystemState {
        store,
        server_version: config.server_version.clone(),
    };

    Router::new()
        .route("/alive", get(alive))
        .route("/version", get(version))
        .with_state(state)
}

/// GET /system/alive
///
/// Liveness plus the number of records currently held.
async fn alive(State(state): State<SystemState>) -> Json<Alive> {
    Json(Alive {
        status: "OK",
        users: state.store.len(),
    })
}

/// GET /system/version
async fn version(State(state): State<SystemState>) -> Json<Version> {
    Json(Version {
        name: env!("CARGO_PKG_NAME"),
        version: state.server_version,
    })
}

/*****************************************************************************************
 *
 *  userstore – In-memory user records over HTTP
 *  --------------------------------------------
 *
 *  POST/GET/DELETE /users/{id}, GET /users, GET /system/{alive,version}
 *
 *****************************************************************************************/

use std::path::PathBuf;
use std::process::ExitCode;

use axum::serve;
use tokio::net::TcpListener;

use tracing_subscriber::FmtSubscriber;

use userstore::app;
use userstore::config::AppConfig;
use userstore::errors::StartupError;
use userstore::state::users::UserStore;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("userstore: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    //
    // ────────────────────────────────────────────────────────
    //  Locate and load config.json (EXE folder or its parent)
    // ────────────────────────────────────────────────────────
    //
    let config_path = locate_config();
    let cfg = match &config_path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.level_filter())
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match &config_path {
        Some(path) => tracing::info!("Loaded config.json from {}", path.display()),
        None => tracing::warn!("config.json not found, running with defaults"),
    }

    tracing::info!("Starting userstore…");
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Create the seeded store and the Axum app
    // ────────────────────────────────────────────────────────
    //
    let store = UserStore::seeded();
    let app = app::build_app(store.clone(), cfg.clone());

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!("Listening on http://{}", addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await?;

    tracing::info!("Server stopped with {} users in memory. Goodbye.", store.len());
    Ok(())
}

/// `config.json` next to the executable, falling back to the parent folder.
fn locate_config() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    [exe_dir.join("config.json"), exe_dir.join("..").join("config.json")]
        .into_iter()
        .find(|p| p.exists())
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::warn!("CTRL+C received, draining requests…");
}

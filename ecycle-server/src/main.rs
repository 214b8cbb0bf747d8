use std::net::SocketAddr;
use std::path::PathBuf;

use ecycle_server::advisor::RepairAdvisor;
use ecycle_server::bins::{BinCacheConfig, CachedBinSource};
use ecycle_server::web::{AppState, create_router};

/// Default location of the bin CSV source.
const DEFAULT_DATA_PATH: &str = "data/daejeon_map.csv";

/// Default static asset directory.
const DEFAULT_STATIC_DIR: &str = "static";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // A missing key is the documented degraded mode: the chatbot
    // answers every query with a fixed unavailable-service message.
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty());
    if api_key.is_none() {
        eprintln!("Warning: OPENAI_API_KEY not set. The repair chatbot will be unavailable.");
    }

    let advisor = RepairAdvisor::new(api_key).expect("Failed to create chat client");

    let data_path = std::env::var("ECYCLE_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));
    let static_dir =
        std::env::var("ECYCLE_STATIC").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());

    let bins = CachedBinSource::new(&BinCacheConfig::default());

    // Warm the cache once so startup reports the table size. A missing
    // file is only a warning here; the page surfaces it per request.
    match bins.load(&data_path).await {
        Ok(table) => println!(
            "Loaded {} pickup points from {}",
            table.len(),
            data_path.display()
        ),
        Err(err) => eprintln!("Warning: {err}"),
    }

    let state = AppState::new(bins, advisor, data_path);
    let app = create_router(state, &static_dir);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("E-Cycle Navi listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the map.");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health         - Health check");
    println!("  GET  /api/bins       - Filtered pickup points");
    println!("  GET  /api/districts  - District list");
    println!("  POST /advice         - Repair consultation");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

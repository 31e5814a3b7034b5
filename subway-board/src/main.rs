use std::net::SocketAddr;
use std::sync::Arc;

use subway_board::board::{BoardConfig, StopBoardService};
use subway_board::cache::{RouteCacheConfig, RouteNameCache};
use subway_board::catalog::StopCatalog;
use subway_board::topology::{TrunkTable, TrunkTopology};
use subway_board::transiter::{MockTransitApi, TransiterClient, TransiterConfig, Upstream};
use subway_board::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Default static stop list.
const DEFAULT_STOPS_PATH: &str = "data/stops.txt";

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .init();

    // Static stop list (fail fast if unavailable)
    let stops_path = std::env::var("STOPS_PATH").unwrap_or_else(|_| DEFAULT_STOPS_PATH.to_string());
    let catalog = StopCatalog::load_path(&stops_path).expect("Failed to load stop list");
    info!(path = %stops_path, stops = catalog.len(), "loaded stop list");

    // Trunk table: from file if given, otherwise the built-in one
    let table = match std::env::var("TRUNK_TABLE_PATH") {
        Ok(path) => TrunkTable::load_path(&path).expect("Failed to load trunk table"),
        Err(_) => TrunkTable::default(),
    };
    let topology = TrunkTopology::build(&catalog, table);
    info!(
        version = topology.table().version,
        stops = topology.len(),
        "built trunk topology"
    );

    // Upstream: fixtures for development, Transiter otherwise
    let upstream = match std::env::var("TRANSIT_MOCK_DIR") {
        Ok(dir) => {
            warn!(%dir, "serving upstream responses from fixtures");
            Upstream::Mock(MockTransitApi::from_dir(&dir).expect("Failed to load fixtures"))
        }
        Err(_) => {
            let mut config = TransiterConfig::new();
            if let Ok(url) = std::env::var("TRANSITER_BASE_URL") {
                config = config.with_base_url(url);
            }
            if let Ok(system) = std::env::var("TRANSITER_SYSTEM") {
                config = config.with_system(system);
            }
            let client = TransiterClient::new(config).expect("Failed to create Transiter client");
            info!(url = client.system_url(), "using Transiter upstream");
            Upstream::Live(client)
        }
    };

    let service = StopBoardService::new(
        upstream,
        Arc::new(catalog),
        Arc::new(topology),
        BoardConfig::default(),
    )
    .with_route_cache(RouteNameCache::new(&RouteCacheConfig::default()));

    let app = create_router(AppState::new(service));

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("Invalid BIND_ADDR");
    info!(%addr, "subway board listening");
    info!("  GET /health                 - Health check");
    info!("  GET /api/lines              - Trunk lines");
    info!("  GET /api/lines/:line        - Stops of a line");
    info!("  GET /api/board/:stop_id     - Board for a stop");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}

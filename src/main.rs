use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use metrics_exporter_prometheus::PrometheusHandle;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;

use estate_catalog::catalog::{
    catalog_router, Category, CatalogRouterState, CatalogStore, ListingStatus, MemoryCatalog,
    PropertyDraft,
};
use estate_catalog::config::AppConfig;
use estate_catalog::error::AppError;
use estate_catalog::session::{IdentityError, IdentityGateway, SessionAuthority, SingleAdminPolicy};
use estate_catalog::telemetry;

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Estate Catalog",
    about = "Serve the property-listing catalog and inquiry desk",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Seed the in-memory catalog with sample listings
    #[arg(long)]
    demo_data: bool,
}

/// Identity seam for the standalone binary. The real OAuth handshake lives in
/// the presentation layer; here sign-out is acknowledged locally and the
/// authorize URL points at the configured issuer.
#[derive(Debug)]
struct LoopbackIdentity {
    issuer: String,
}

impl IdentityGateway for LoopbackIdentity {
    fn sign_out(&self) -> Result<(), IdentityError> {
        info!("session invalidated");
        Ok(())
    }

    fn authorize_url(&self, redirect_to: &str) -> String {
        format!("{}/authorize?redirect_to={redirect_to}", self.issuer)
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let store = Arc::new(MemoryCatalog::new());
    if args.demo_data {
        seed_demo_listings(store.as_ref())?;
    }

    let sessions = Arc::new(SessionAuthority::new(
        Box::new(SingleAdminPolicy::new(config.admin.admin_email.clone())),
        Box::new(LoopbackIdentity {
            issuer: "https://id.invalid".to_string(),
        }),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops_state = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(ops_state)
        .merge(catalog_router(CatalogRouterState::new(store, sessions)))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "property catalog ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn seed_demo_listings(store: &MemoryCatalog) -> Result<(), AppError> {
    let drafts = [
        PropertyDraft {
            title: "Sunlit 2BR near the river".to_string(),
            description: "Top-floor apartment with a balcony and updated kitchen.".to_string(),
            price: 1450.0,
            location_city: "Austin".to_string(),
            location_state: "TX".to_string(),
            property_type: "Apartment".to_string(),
            category: Category::Rent,
            status: ListingStatus::Available,
            bedrooms: 2,
            bathrooms: 1,
            sqft: 880,
            images: Vec::new(),
        },
        PropertyDraft {
            title: "Brick duplex on Maple Court".to_string(),
            description: "Both units occupied; separate meters and a shared yard.".to_string(),
            price: 315_000.0,
            location_city: "Des Moines".to_string(),
            location_state: "IA".to_string(),
            property_type: "Duplex".to_string(),
            category: Category::Sale,
            status: ListingStatus::Available,
            bedrooms: 4,
            bathrooms: 2,
            sqft: 2100,
            images: Vec::new(),
        },
        PropertyDraft {
            title: "Family house with fenced yard".to_string(),
            description: "Quiet cul-de-sac, two-car garage, new roof in 2024.".to_string(),
            price: 264_900.0,
            location_city: "Dallas".to_string(),
            location_state: "TX".to_string(),
            property_type: "House".to_string(),
            category: Category::Sale,
            status: ListingStatus::Sold,
            bedrooms: 3,
            bathrooms: 2,
            sqft: 1650,
            images: Vec::new(),
        },
    ];

    for draft in drafts {
        let listing = store
            .insert_property(draft)
            .map_err(estate_catalog::catalog::CatalogError::from)?;
        info!(listing = %listing.id.0, title = %listing.title, "seeded demo listing");
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(json!({ "ready": ready })))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    state.metrics.render()
}
